//! Supplemental credit sources: integration credit and education credit.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Credit carried in from the integration process (angka integrasi).
///
/// Only the first record per employee is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationCredit {
    /// The employee this credit belongs to.
    pub employee_id: String,
    /// Credit amount.
    pub amount: Decimal,
}

/// Credit earned from an educational or training activity (AK pendidikan).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationCredit {
    /// Opaque store identifier.
    pub id: String,
    /// The employee who completed the activity.
    pub employee_id: String,
    /// The institution that issued the certificate.
    pub institution_id: String,
    /// The assessor who signed off the credit.
    pub assessor_id: String,
    /// Kind of activity (e.g. "Pelatihan Fungsional").
    pub activity_type: String,
    /// Level of the activity.
    pub level: String,
    /// Date the activity took place.
    pub execution_date: NaiveDate,
    /// Duration in hours.
    pub duration_hours: u32,
    /// Explicit credit amount. `None` derives it from the employee's
    /// next promotion threshold.
    #[serde(default)]
    pub credit: Option<Decimal>,
    /// Decree date.
    #[serde(default)]
    pub decree_date: Option<NaiveDate>,
    /// Decree place.
    #[serde(default)]
    pub decree_place: String,
    /// Certificate number, unique.
    pub certificate_number: String,
}
