//! Performance assessment (AK) models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An assessment as entered, before the credit is derived.
///
/// Percentage, coefficient and credit are never entered by hand; see
/// [`derive_assessment`](crate::calculation::derive_assessment).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentDraft {
    /// Opaque store identifier.
    pub id: String,
    /// The assessed employee.
    pub employee_id: String,
    /// The institution issuing the assessment.
    pub institution_id: String,
    /// The assessor who signed it.
    pub assessor_id: String,
    /// First day of the assessment period (inclusive).
    pub period_start: NaiveDate,
    /// Last day of the assessment period (inclusive).
    pub period_end: NaiveDate,
    /// Qualitative rating label (penilaian), e.g. "Baik".
    pub rating: String,
    /// Job level label (jenjang), e.g. "KEAHLIAN - AHLI MUDA".
    pub job_level: String,
    /// Decree date (tanggal ditetapkan).
    #[serde(default)]
    pub decree_date: Option<NaiveDate>,
    /// Decree place (tempat ditetapkan).
    #[serde(default)]
    pub decree_place: String,
}

/// A stored assessment with its derived credit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    /// Opaque store identifier.
    pub id: String,
    /// The assessed employee.
    pub employee_id: String,
    /// The institution issuing the assessment.
    pub institution_id: String,
    /// The assessor who signed it.
    pub assessor_id: String,
    /// First day of the assessment period (inclusive).
    pub period_start: NaiveDate,
    /// Last day of the assessment period (inclusive).
    pub period_end: NaiveDate,
    /// Qualitative rating label.
    pub rating: String,
    /// Percentage derived from the rating.
    pub percentage: u32,
    /// Job level label.
    pub job_level: String,
    /// Annual coefficient derived from the job level.
    pub coefficient: Decimal,
    /// Derived credit amount (jumlah angka kredit).
    pub credit: Decimal,
    /// Decree date.
    #[serde(default)]
    pub decree_date: Option<NaiveDate>,
    /// Decree place.
    #[serde(default)]
    pub decree_place: String,
}
