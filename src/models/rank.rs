//! Position of a rank within the promotion hierarchy.

use serde::{Deserialize, Serialize};

use crate::config::CreditTables;

/// Text shown as the destination when there is no higher rank.
pub const HIGHEST_RANK_TEXT: &str = "Tertinggi";

/// Text shown as the destination when the rank code is not in the hierarchy.
pub const UNRANKED_TEXT: &str = "N/A";

/// The rank an employee would be promoted to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "status", content = "code", rename_all = "snake_case")]
pub enum NextRank {
    /// A concrete rank code in the hierarchy.
    Rank(String),
    /// The current rank is already the top of the hierarchy.
    Highest,
    /// The current rank code is not part of the hierarchy.
    Unranked,
}

impl NextRank {
    /// Moves one step further up the hierarchy.
    ///
    /// `Highest` and `Unranked` are terminal.
    pub fn advance(&self, tables: &CreditTables) -> NextRank {
        match self {
            NextRank::Rank(code) => tables.next_rank(code),
            terminal => terminal.clone(),
        }
    }

    /// Returns the rank code, if this is a concrete rank.
    pub fn code(&self) -> Option<&str> {
        match self {
            NextRank::Rank(code) => Some(code),
            _ => None,
        }
    }

    /// Returns the destination text printed on the Penetapan report,
    /// "`<rank title> <code>`" for a concrete rank.
    pub fn destination_text(&self, tables: &CreditTables) -> String {
        match self {
            NextRank::Rank(code) => match tables.rank_name_for(code) {
                Some(name) => format!("{} {}", name, code),
                None => code.clone(),
            },
            NextRank::Highest => HIGHEST_RANK_TEXT.to_string(),
            NextRank::Unranked => UNRANKED_TEXT.to_string(),
        }
    }
}
