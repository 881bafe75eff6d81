//! Request types for the Angka Kredit API.
//!
//! The report endpoints are stateless: each request carries a snapshot of
//! the employee's records, which is loaded into a [`MemoryStore`] before the
//! report is built.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::CreditInput;
use crate::config::CreditTables;
use crate::error::CreditResult;
use crate::models::{
    AssessmentDraft, AssessmentSelection, Assessor, AuditWarning, EducationCredit, Employee,
    Institution, IntegrationCredit, ReportKind, ReportRequest,
};
use crate::store::MemoryStore;

/// Request body for the `/credit` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditRequest {
    /// First day of the period (inclusive).
    pub period_start: NaiveDate,
    /// Last day of the period (inclusive).
    pub period_end: NaiveDate,
    /// Rating label, e.g. "Baik".
    pub rating: String,
    /// Job level label, e.g. "KEAHLIAN - AHLI MUDA".
    pub job_level: String,
}

impl From<CreditRequest> for CreditInput {
    fn from(req: CreditRequest) -> Self {
        CreditInput {
            period_start: req.period_start,
            period_end: req.period_end,
            rating: req.rating,
            job_level: req.job_level,
        }
    }
}

/// An assessment in a report snapshot. Its employee is the snapshot's
/// employee, and its credit is always derived.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentRequest {
    /// Unique identifier for the assessment.
    pub id: String,
    /// Issuing institution id.
    pub institution_id: String,
    /// Signing assessor id.
    pub assessor_id: String,
    /// First day of the period.
    pub period_start: NaiveDate,
    /// Last day of the period.
    pub period_end: NaiveDate,
    /// Rating label.
    pub rating: String,
    /// Job level label.
    pub job_level: String,
    /// Decree date.
    #[serde(default)]
    pub decree_date: Option<NaiveDate>,
    /// Decree place.
    #[serde(default)]
    pub decree_place: String,
}

/// An education credit in a report snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationCreditRequest {
    /// Unique identifier for the record.
    pub id: String,
    /// Issuing institution id.
    pub institution_id: String,
    /// Signing assessor id.
    pub assessor_id: String,
    /// Kind of activity.
    pub activity_type: String,
    /// Activity level.
    pub level: String,
    /// Date of the activity.
    pub execution_date: NaiveDate,
    /// Duration in hours.
    #[serde(default)]
    pub duration_hours: u32,
    /// Explicit credit; omitted to derive it from the next rank.
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

/// Request body for the `/reports` and `/reports/html` endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSnapshotRequest {
    /// The employee the report is about.
    pub employee: Employee,
    /// Assessors referenced by the assessments.
    #[serde(default)]
    pub assessors: Vec<Assessor>,
    /// Institutions referenced by the assessments.
    #[serde(default)]
    pub institutions: Vec<Institution>,
    /// The employee's assessments.
    #[serde(default)]
    pub assessments: Vec<AssessmentRequest>,
    /// The employee's integration credit, if any.
    #[serde(default)]
    pub integration_credit: Option<Decimal>,
    /// The employee's education credits.
    #[serde(default)]
    pub education_credits: Vec<EducationCreditRequest>,
    /// Which assessments the report covers.
    #[serde(default)]
    pub selection: AssessmentSelection,
    /// Whether to add the integration credit.
    #[serde(default)]
    pub include_integration: bool,
    /// Whether to add the education credits.
    #[serde(default)]
    pub include_education: bool,
    /// The report format.
    pub kind: ReportKind,
    /// Reference date for the reporting-year fallback; today when omitted.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

/// A snapshot loaded into a store, ready for the report builder.
#[derive(Debug)]
pub struct LoadedSnapshot {
    /// The populated store.
    pub store: MemoryStore,
    /// The report to build.
    pub request: ReportRequest,
    /// Warnings raised while deriving assessment credit.
    pub warnings: Vec<AuditWarning>,
}

impl ReportSnapshotRequest {
    /// Loads the snapshot into a fresh [`MemoryStore`].
    ///
    /// # Errors
    ///
    /// Returns [`CreditError::InvalidPeriod`](crate::error::CreditError::InvalidPeriod)
    /// for an inverted assessment period and
    /// [`CreditError::InvalidRecord`](crate::error::CreditError::InvalidRecord)
    /// for duplicate ids, NIPs, institution names or certificate numbers.
    pub fn into_store(self, tables: &CreditTables) -> CreditResult<LoadedSnapshot> {
        let employee_id = self.employee.id.clone();
        let mut store = MemoryStore::new();
        let mut warnings = Vec::new();

        store.insert_employee(self.employee)?;
        for assessor in self.assessors {
            store.insert_assessor(assessor)?;
        }
        for institution in self.institutions {
            store.insert_institution(institution)?;
        }

        for assessment in self.assessments {
            let draft = AssessmentDraft {
                id: assessment.id,
                employee_id: employee_id.clone(),
                institution_id: assessment.institution_id,
                assessor_id: assessment.assessor_id,
                period_start: assessment.period_start,
                period_end: assessment.period_end,
                rating: assessment.rating,
                job_level: assessment.job_level,
                decree_date: assessment.decree_date,
                decree_place: assessment.decree_place,
            };
            let derivation = store.record_assessment(draft, tables)?;
            warnings.extend(derivation.warnings);
        }

        if let Some(amount) = self.integration_credit {
            store.insert_integration_credit(IntegrationCredit {
                employee_id: employee_id.clone(),
                amount,
            })?;
        }

        for education in self.education_credits {
            store.insert_education_credit(EducationCredit {
                id: education.id,
                employee_id: employee_id.clone(),
                institution_id: education.institution_id,
                assessor_id: education.assessor_id,
                activity_type: education.activity_type,
                level: education.level,
                execution_date: education.execution_date,
                duration_hours: education.duration_hours,
                credit: education.credit,
                decree_date: education.decree_date,
                decree_place: education.decree_place,
                certificate_number: education.certificate_number,
            })?;
        }

        let request = ReportRequest {
            employee_id,
            selection: self.selection,
            include_integration: self.include_integration,
            include_education: self.include_education,
            kind: self.kind,
            as_of: self.as_of.unwrap_or_else(|| Utc::now().date_naive()),
        };

        Ok(LoadedSnapshot {
            store,
            request,
            warnings,
        })
    }
}
