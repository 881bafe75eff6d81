//! Credit calculation for a single assessment.
//!
//! The credit for an assessment period is
//!
//! ```text
//! credit = round(years × coefficient × percentage / 100, 3)
//! ```
//!
//! where `years` is the inclusive day count over a 365.25-day year, the
//! coefficient comes from the job level and the percentage from the rating.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::config::CreditTables;
use crate::error::{CreditError, CreditResult};
use crate::models::{Assessment, AssessmentDraft, AuditStep, AuditWarning};

use super::duration::{duration_in_years, inclusive_days};

/// Number of decimal places credit amounts are rounded to.
pub const CREDIT_DECIMAL_PLACES: u32 = 3;

/// Warning code for a rating label with no registered percentage.
pub const UNKNOWN_RATING_WARNING: &str = "UNKNOWN_RATING";

/// Warning code for a job level label with no registered coefficient.
pub const UNKNOWN_JOB_LEVEL_WARNING: &str = "UNKNOWN_JOB_LEVEL";

/// The inputs to a credit calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditInput {
    /// First day of the period (inclusive).
    pub period_start: NaiveDate,
    /// Last day of the period (inclusive).
    pub period_end: NaiveDate,
    /// Rating label.
    pub rating: String,
    /// Job level label.
    pub job_level: String,
}

/// The result of a credit calculation, including warnings and audit step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditCalculation {
    /// Percentage looked up from the rating (0 if unknown).
    pub percentage: u32,
    /// Coefficient looked up from the job level (0 if unknown).
    pub coefficient: Decimal,
    /// Inclusive day count of the period.
    pub days: i64,
    /// Period length as a fraction of a 365.25-day year.
    pub duration_in_years: Decimal,
    /// Credit amount, rounded to three decimal places.
    pub credit: Decimal,
    /// Warnings about labels that look like data-entry mistakes.
    pub warnings: Vec<AuditWarning>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// A stored assessment produced from a draft, with its warnings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentDerivation {
    /// The assessment with derived percentage, coefficient and credit.
    pub assessment: Assessment,
    /// Warnings raised by the calculation.
    pub warnings: Vec<AuditWarning>,
}

/// Rejects a period that starts after it ends.
pub fn validate_period(start: NaiveDate, end: NaiveDate) -> CreditResult<()> {
    if start > end {
        return Err(CreditError::InvalidPeriod { start, end });
    }
    Ok(())
}

/// Computes `years × coefficient × percentage / 100`, rounded half away
/// from zero to three decimal places.
///
/// # Examples
///
/// ```
/// use angka_kredit::calculation::credit_amount;
/// use rust_decimal::Decimal;
///
/// let credit = credit_amount(Decimal::ONE, Decimal::new(375, 1), 150);
/// assert_eq!(credit, Decimal::new(56250, 3));
/// ```
pub fn credit_amount(years: Decimal, coefficient: Decimal, percentage: u32) -> Decimal {
    (years * coefficient * Decimal::from(percentage) / Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(CREDIT_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Calculates the credit for one assessment period.
///
/// Unknown rating or job level labels are not errors: they produce a zero
/// credit and a warning on the result.
///
/// # Errors
///
/// Returns [`CreditError::InvalidPeriod`] if the period starts after it
/// ends.
///
/// # Examples
///
/// ```no_run
/// use angka_kredit::calculation::{CreditInput, calculate_credit};
/// use angka_kredit::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/angka_kredit")?;
/// let input = CreditInput {
///     period_start: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
///     period_end: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
///     rating: "Sangat Baik".to_string(),
///     job_level: "KEAHLIAN - AHLI MADYA".to_string(),
/// };
/// let result = calculate_credit(&input, loader.tables(), 1)?;
/// println!("credit: {}", result.credit);
/// # Ok::<(), angka_kredit::error::CreditError>(())
/// ```
pub fn calculate_credit(
    input: &CreditInput,
    tables: &CreditTables,
    step_number: u32,
) -> CreditResult<CreditCalculation> {
    validate_period(input.period_start, input.period_end)?;

    let percentage = tables.percentage_for(&input.rating);
    let coefficient = tables.coefficient_for(&input.job_level);
    let days = inclusive_days(input.period_start, input.period_end);
    let years = duration_in_years(input.period_start, input.period_end);
    let credit = credit_amount(years, coefficient, percentage);

    let mut warnings = Vec::new();
    if percentage == 0 {
        warnings.push(AuditWarning::new(
            UNKNOWN_RATING_WARNING,
            format!(
                "Rating '{}' has no registered percentage; credit is zero",
                input.rating
            ),
        ));
    }
    if coefficient.is_zero() {
        warnings.push(AuditWarning::new(
            UNKNOWN_JOB_LEVEL_WARNING,
            format!(
                "Job level '{}' has no registered coefficient; credit is zero",
                input.job_level
            ),
        ));
    }

    let duration_display = years.round_dp(6);
    let audit_step = AuditStep {
        step_number,
        rule_id: "credit_calculation".to_string(),
        rule_name: "Assessment Credit".to_string(),
        input: serde_json::json!({
            "period_start": input.period_start.to_string(),
            "period_end": input.period_end.to_string(),
            "rating": input.rating,
            "job_level": input.job_level
        }),
        output: serde_json::json!({
            "percentage": percentage,
            "coefficient": coefficient.to_string(),
            "days": days,
            "duration_in_years": duration_display.to_string(),
            "credit": credit.to_string()
        }),
        reasoning: format!(
            "{} days / 365.25 = {} years × {} × {}% = {}",
            days,
            duration_display,
            coefficient.normalize(),
            percentage,
            credit
        ),
    };

    Ok(CreditCalculation {
        percentage,
        coefficient,
        days,
        duration_in_years: duration_display,
        credit,
        warnings,
        audit_step,
    })
}

/// Turns an assessment draft into a stored assessment by deriving its
/// percentage, coefficient and credit.
///
/// # Errors
///
/// Returns [`CreditError::InvalidPeriod`] if the period starts after it
/// ends.
pub fn derive_assessment(
    draft: AssessmentDraft,
    tables: &CreditTables,
) -> CreditResult<AssessmentDerivation> {
    let input = CreditInput {
        period_start: draft.period_start,
        period_end: draft.period_end,
        rating: draft.rating.clone(),
        job_level: draft.job_level.clone(),
    };
    let calculation = calculate_credit(&input, tables, 1)?;

    let assessment = Assessment {
        id: draft.id,
        employee_id: draft.employee_id,
        institution_id: draft.institution_id,
        assessor_id: draft.assessor_id,
        period_start: draft.period_start,
        period_end: draft.period_end,
        rating: draft.rating,
        percentage: calculation.percentage,
        job_level: draft.job_level,
        coefficient: calculation.coefficient,
        credit: calculation.credit,
        decree_date: draft.decree_date,
        decree_place: draft.decree_place,
    };

    Ok(AssessmentDerivation {
        assessment,
        warnings: calculation.warnings,
    })
}
