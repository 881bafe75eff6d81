//! Education credit (AK Pendidikan) resolution.
//!
//! An education record either carries an explicit credit amount or takes a
//! quarter of the minimum rank-promotion credit for the employee's next
//! rank.

use rust_decimal::Decimal;

use crate::config::CreditTables;
use crate::models::{EducationCredit, EducationEntry};

use super::rank::normalize_rank_code;

/// Share of the next rank's minimum credit an education record is worth
/// when its credit is not set.
pub const EDUCATION_SHARE: Decimal = Decimal::from_parts(25, 0, 0, false, 2);

/// Resolves the credit of one education record for an employee holding
/// `rank_code`.
///
/// Returns the amount and whether it was derived rather than entered. An
/// employee at the highest rank, or with no threshold on file, derives 0.
pub fn resolve_education_credit(
    record: &EducationCredit,
    rank_code: &str,
    tables: &CreditTables,
) -> (Decimal, bool) {
    match record.credit {
        Some(credit) => (credit, false),
        None => (derived_education_credit(rank_code, tables), true),
    }
}

/// Returns the derived education credit for an employee holding
/// `rank_code`: 25% of the minimum credit for promotion to the next rank.
pub fn derived_education_credit(rank_code: &str, tables: &CreditTables) -> Decimal {
    let code = normalize_rank_code(rank_code);
    let next = tables.next_rank(&code);
    let minimum = next
        .code()
        .and_then(|next_code| tables.promotion_threshold(&code, next_code))
        .map(|threshold| threshold.rank_minimum)
        .unwrap_or(Decimal::ZERO);

    minimum * EDUCATION_SHARE
}

/// The education subtotal and its individual entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EducationSubtotal {
    /// Sum of every entry's credit.
    pub amount: Decimal,
    /// One entry per education record, in the given order.
    pub entries: Vec<EducationEntry>,
}

/// Resolves and sums a set of education records.
pub fn education_subtotal(
    records: &[EducationCredit],
    rank_code: &str,
    tables: &CreditTables,
) -> EducationSubtotal {
    let entries: Vec<EducationEntry> = records
        .iter()
        .map(|record| {
            let (credit, derived) = resolve_education_credit(record, rank_code, tables);
            EducationEntry {
                id: record.id.clone(),
                activity_type: record.activity_type.clone(),
                execution_date: record.execution_date,
                certificate_number: record.certificate_number.clone(),
                credit,
                derived,
            }
        })
        .collect();

    let amount = entries.iter().map(|entry| entry.credit).sum();

    EducationSubtotal { amount, entries }
}
