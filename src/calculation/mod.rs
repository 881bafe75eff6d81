//! Calculation logic for the Angka Kredit engine.
//!
//! This module contains the credit calculator for a single assessment,
//! rank code normalisation, education credit resolution, and the builders
//! for the Konversi, Akumulasi and Penetapan reports.

mod akumulasi;
mod credit;
mod duration;
mod education;
mod konversi;
mod penetapan;
mod rank;
mod report;
mod report_context;

#[cfg(test)]
mod test_support;

pub use akumulasi::build_akumulasi;
pub use credit::{
    AssessmentDerivation, CREDIT_DECIMAL_PLACES, CreditCalculation, CreditInput,
    UNKNOWN_JOB_LEVEL_WARNING, UNKNOWN_RATING_WARNING, calculate_credit, credit_amount,
    derive_assessment, validate_period,
};
pub use duration::{DAYS_PER_YEAR, duration_in_years, elapsed_months, inclusive_days};
pub use education::{
    EDUCATION_SHARE, EducationSubtotal, derived_education_credit, education_subtotal,
    resolve_education_credit,
};
pub use konversi::build_konversi;
pub use penetapan::{MISSING_THRESHOLD_WARNING, UNRANKED_WARNING, build_penetapan};
pub use rank::normalize_rank_code;
pub use report::build_report;
pub use report_context::{
    NO_ASSESSMENTS_WARNING, ReportContext, assessment_line, covered_period, latest_assessment,
    reporting_year, select_assessments,
};
