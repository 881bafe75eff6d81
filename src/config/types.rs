//! Configuration types for credit-point computation.
//!
//! This module contains the strongly-typed table structures that are
//! deserialized from the YAML files in a credit configuration directory,
//! and the [`CreditTables`] aggregate that every calculation reads from.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::NextRank;

/// A civil-service rank (pangkat) and its code (golongan).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rank {
    /// The rank title (e.g., "Penata Muda").
    pub name: String,
    /// The canonical rank code (e.g., "III/a").
    pub code: String,
    /// Credit carried over as "old" credit in the Penetapan report.
    #[serde(default)]
    pub baseline_credit: Decimal,
    /// Amount subtracted from newly earned credit for this rank.
    #[serde(default)]
    pub deduction: Decimal,
}

/// Ranks configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct RanksConfig {
    /// Ranks ordered from lowest to highest.
    pub ranks: Vec<Rank>,
}

/// Ratings configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct RatingsConfig {
    /// Map of rating label to percentage.
    pub ratings: HashMap<String, u32>,
}

/// The two career tracks of a functional position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CareerTrack {
    /// Expertise track (Ahli Pertama .. Ahli Utama).
    Keahlian,
    /// Skill track (Pemula .. Penyelia).
    Keterampilan,
}

/// A job level (jenjang) and its annual coefficient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobLevel {
    /// The career track this level belongs to.
    pub track: CareerTrack,
    /// Credit earned per full year at a 100% rating.
    pub coefficient: Decimal,
}

/// Job levels configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct JobLevelsConfig {
    /// Map of job level label to job level details.
    pub job_levels: HashMap<String, JobLevel>,
}

/// Minimum credit needed to move from one rank to the next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromotionThreshold {
    /// The current rank code.
    pub from: String,
    /// The destination rank code.
    pub to: String,
    /// Minimum credit for the rank promotion.
    pub rank_minimum: Decimal,
    /// Minimum credit for the job-level promotion, if one applies.
    #[serde(default)]
    pub job_level_minimum: Option<Decimal>,
}

/// Promotion configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct PromotionConfig {
    /// All known promotion thresholds.
    pub thresholds: Vec<PromotionThreshold>,
}

/// All lookup tables used by the credit calculator and report builders.
///
/// Loaded once at process start and shared by reference; nothing mutates
/// it afterwards.
#[derive(Debug, Clone)]
pub struct CreditTables {
    ranks: Vec<Rank>,
    ratings: HashMap<String, u32>,
    job_levels: HashMap<String, JobLevel>,
    thresholds: Vec<PromotionThreshold>,
}

impl CreditTables {
    /// Creates a new CreditTables from its component parts.
    ///
    /// `ranks` must be ordered from lowest to highest.
    pub fn new(
        ranks: Vec<Rank>,
        ratings: HashMap<String, u32>,
        job_levels: HashMap<String, JobLevel>,
        thresholds: Vec<PromotionThreshold>,
    ) -> Self {
        Self {
            ranks,
            ratings,
            job_levels,
            thresholds,
        }
    }

    /// Returns the rank hierarchy, lowest first.
    pub fn ranks(&self) -> &[Rank] {
        &self.ranks
    }

    /// Returns the rank codes in promotion order, lowest first.
    pub fn rank_hierarchy(&self) -> impl Iterator<Item = &str> {
        self.ranks.iter().map(|r| r.code.as_str())
    }

    /// Returns all promotion thresholds.
    pub fn thresholds(&self) -> &[PromotionThreshold] {
        &self.thresholds
    }

    /// Returns the rank with the given code, if it is part of the hierarchy.
    pub fn rank(&self, code: &str) -> Option<&Rank> {
        self.ranks.iter().find(|r| r.code == code)
    }

    /// Returns the percentage for a rating label, or 0 if it is unknown.
    pub fn percentage_for(&self, rating: &str) -> u32 {
        self.ratings.get(rating).copied().unwrap_or(0)
    }

    /// Returns the coefficient for a job level label, or 0 if it is unknown.
    pub fn coefficient_for(&self, job_level: &str) -> Decimal {
        self.job_levels
            .get(job_level)
            .map(|level| level.coefficient)
            .unwrap_or(Decimal::ZERO)
    }

    /// Returns the job level details for a label.
    pub fn job_level(&self, label: &str) -> Option<&JobLevel> {
        self.job_levels.get(label)
    }

    /// Returns the rank code for a rank title.
    ///
    /// Called by the presentation layer whenever a rank is picked, so the
    /// dependent code field never goes stale.
    ///
    /// ```no_run
    /// use angka_kredit::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/angka_kredit")?;
    /// assert_eq!(loader.tables().rank_code_for("Penata"), Some("III/c"));
    /// # Ok::<(), angka_kredit::error::CreditError>(())
    /// ```
    pub fn rank_code_for(&self, rank_name: &str) -> Option<&str> {
        self.ranks
            .iter()
            .find(|r| r.name == rank_name)
            .map(|r| r.code.as_str())
    }

    /// Returns the rank title for a rank code.
    pub fn rank_name_for(&self, code: &str) -> Option<&str> {
        self.rank(code).map(|r| r.name.as_str())
    }

    /// Returns the "old credit" baseline for a rank code, 0 if none.
    pub fn baseline_credit(&self, code: &str) -> Decimal {
        self.rank(code)
            .map(|r| r.baseline_credit)
            .unwrap_or(Decimal::ZERO)
    }

    /// Returns the new-credit deduction for a rank code, 0 if none.
    pub fn deduction(&self, code: &str) -> Decimal {
        self.rank(code).map(|r| r.deduction).unwrap_or(Decimal::ZERO)
    }

    /// Returns the next rank in the hierarchy.
    ///
    /// The last rank yields [`NextRank::Highest`]; a code outside the
    /// hierarchy yields [`NextRank::Unranked`].
    pub fn next_rank(&self, code: &str) -> NextRank {
        match self.ranks.iter().position(|r| r.code == code) {
            Some(idx) => match self.ranks.get(idx + 1) {
                Some(next) => NextRank::Rank(next.code.clone()),
                None => NextRank::Highest,
            },
            None => NextRank::Unranked,
        }
    }

    /// Returns the promotion threshold between two ranks.
    pub fn promotion_threshold(&self, from: &str, to: &str) -> Option<&PromotionThreshold> {
        self.thresholds
            .iter()
            .find(|t| t.from == from && t.to == to)
    }
}
