//! Steps shared by all three report formats.
//!
//! [`ReportContext::gather`] reads everything a report needs from the
//! store once: the selected assessments, the latest assessment for the
//! signature block, the reporting year, the covered period and the
//! optional integration and education addends.

use chrono::Datelike;
use rust_decimal::Decimal;
use serde_json::json;

use crate::config::CreditTables;
use crate::error::{CreditError, CreditResult};
use crate::models::{
    Assessment, AssessmentLine, AssessmentSelection, AuditTrace, AuditWarning, Employee, ReportFooter,
    ReportHeader, ReportLine, ReportRequest, format_date,
};
use crate::store::CreditRecordStore;

use super::credit::{UNKNOWN_JOB_LEVEL_WARNING, UNKNOWN_RATING_WARNING};
use super::education::{EducationSubtotal, education_subtotal};

/// Warning code for an employee with no assessment on file.
pub const NO_ASSESSMENTS_WARNING: &str = "NO_ASSESSMENTS";

/// Everything read from the store for one report.
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    /// The employee the report is about.
    pub employee: &'a Employee,
    /// Selected assessments, ordered by period start.
    pub selected: Vec<&'a Assessment>,
    /// Source of the signature block and reporting year.
    pub latest: Option<&'a Assessment>,
    /// Identification block.
    pub header: ReportHeader,
    /// Signature block.
    pub footer: ReportFooter,
    /// Integration amount, present only when requested.
    pub integration: Option<Decimal>,
    /// Education subtotal, present only when requested.
    pub education: Option<EducationSubtotal>,
    /// Steps and warnings recorded so far.
    pub audit_trace: AuditTrace,
}

impl<'a> ReportContext<'a> {
    /// Reads the records for `request` and resolves the shared values.
    ///
    /// # Errors
    ///
    /// Returns [`CreditError::EmployeeNotFound`] if the employee does not
    /// exist.
    pub fn gather<S: CreditRecordStore>(
        store: &'a S,
        tables: &CreditTables,
        request: &ReportRequest,
    ) -> CreditResult<Self> {
        let employee =
            store
                .employee(&request.employee_id)
                .ok_or_else(|| CreditError::EmployeeNotFound {
                    id: request.employee_id.clone(),
                })?;

        let mut audit_trace = AuditTrace::default();

        let all = sorted_by_start(store.assessments_for(&employee.id));
        let selected = select_assessments(&all, &request.selection);
        let latest = latest_assessment(&selected).or_else(|| latest_assessment(&all));

        if all.is_empty() {
            audit_trace.warn(AuditWarning::low(
                NO_ASSESSMENTS_WARNING,
                format!(
                    "Employee '{}' has no assessment on file; signature block is empty",
                    employee.id
                ),
            ));
        }
        for assessment in &selected {
            flag_unknown_labels(assessment, &mut audit_trace);
        }

        let selected_sum: Decimal = selected.iter().map(|a| a.credit).sum();
        audit_trace.record(
            "assessment_selection",
            "Assessment Selection",
            json!({
                "employee_id": employee.id,
                "selection": request.selection,
                "on_file": all.len()
            }),
            json!({
                "selected": selected.iter().map(|a| a.id.as_str()).collect::<Vec<_>>(),
                "latest": latest.map(|a| a.id.as_str()),
                "credit_sum": selected_sum.to_string()
            }),
            format!(
                "{} of {} assessments selected, credit sum {}",
                selected.len(),
                all.len(),
                selected_sum
            ),
        );

        let (period_start, period_end) = covered_period(&selected);
        let year = reporting_year(latest, employee, request);
        let header = ReportHeader {
            employee: employee.clone(),
            year,
            period_start,
            period_end,
            job_title_line: employee.job_title_line(),
        };
        let footer = build_footer(store, latest);

        let integration = if request.include_integration {
            let amount = store
                .integration_credit_for(&employee.id)
                .map(|credit| credit.amount)
                .unwrap_or(Decimal::ZERO);
            audit_trace.record(
                "integration_credit",
                "Integration Credit",
                json!({ "employee_id": employee.id }),
                json!({ "amount": amount.to_string() }),
                format!("Integration credit {} included", amount),
            );
            Some(amount)
        } else {
            None
        };

        let education = if request.include_education {
            let records: Vec<_> = store
                .education_credits_for(&employee.id)
                .into_iter()
                .cloned()
                .collect();
            let subtotal = education_subtotal(&records, &employee.rank_code, tables);
            audit_trace.record(
                "education_credit",
                "Education Credit",
                json!({
                    "employee_id": employee.id,
                    "rank_code": employee.rank_code,
                    "records": records.len()
                }),
                json!({
                    "amount": subtotal.amount.to_string(),
                    "derived_entries": subtotal.entries.iter().filter(|e| e.derived).count()
                }),
                format!(
                    "{} education records sum to {}",
                    subtotal.entries.len(),
                    subtotal.amount
                ),
            );
            Some(subtotal)
        } else {
            None
        };

        Ok(Self {
            employee,
            selected,
            latest,
            header,
            footer,
            integration,
            education,
            audit_trace,
        })
    }

    /// Sum of the selected assessments' stored credit.
    pub fn assessment_sum(&self) -> Decimal {
        self.selected.iter().map(|a| a.credit).sum()
    }

    /// Integration amount, 0 when not requested.
    pub fn integration_amount(&self) -> Decimal {
        self.integration.unwrap_or(Decimal::ZERO)
    }

    /// Education subtotal, 0 when not requested.
    pub fn education_amount(&self) -> Decimal {
        self.education
            .as_ref()
            .map(|subtotal| subtotal.amount)
            .unwrap_or(Decimal::ZERO)
    }

    /// Returns the synthetic integration and education lines, in that
    /// order, for whichever were requested.
    pub fn synthetic_lines(&self) -> Vec<ReportLine> {
        let mut lines = Vec::new();
        if let Some(amount) = self.integration {
            lines.push(ReportLine::Integration { amount });
        }
        if let Some(subtotal) = &self.education {
            lines.push(ReportLine::Education {
                amount: subtotal.amount,
                entries: subtotal.entries.clone(),
            });
        }
        lines
    }
}

/// Builds the body row for a stored assessment.
pub fn assessment_line(assessment: &Assessment, months: Option<u32>) -> ReportLine {
    ReportLine::Assessment(AssessmentLine {
        assessment_id: assessment.id.clone(),
        period_start: assessment.period_start,
        period_end: assessment.period_end,
        rating: assessment.rating.clone(),
        percentage: assessment.percentage,
        job_level: assessment.job_level.clone(),
        coefficient: assessment.coefficient,
        credit: assessment.credit,
        months,
    })
}

fn sorted_by_start(mut assessments: Vec<&Assessment>) -> Vec<&Assessment> {
    assessments.sort_by_key(|a| a.period_start);
    assessments
}

/// Filters assessments by the selection, keeping their order.
pub fn select_assessments<'a>(
    assessments: &[&'a Assessment],
    selection: &AssessmentSelection,
) -> Vec<&'a Assessment> {
    assessments
        .iter()
        .copied()
        .filter(|a| selection.includes(&a.id))
        .collect()
}

/// Returns the assessment with the latest period end. On a tie the last
/// one in order wins.
pub fn latest_assessment<'a>(assessments: &[&'a Assessment]) -> Option<&'a Assessment> {
    assessments.iter().copied().max_by_key(|a| a.period_end)
}

/// Returns the earliest start and latest end of the given assessments as
/// `dd-mm-YYYY`, or empty strings when there are none.
pub fn covered_period(assessments: &[&Assessment]) -> (String, String) {
    let start = assessments.iter().map(|a| a.period_start).min();
    let end = assessments.iter().map(|a| a.period_end).max();
    (
        start.map(format_date).unwrap_or_default(),
        end.map(format_date).unwrap_or_default(),
    )
}

/// Resolves the reporting year: the latest assessment's decree year, else
/// its period-end year, else the employee's decree year, else the year of
/// `as_of`.
pub fn reporting_year(
    latest: Option<&Assessment>,
    employee: &Employee,
    request: &ReportRequest,
) -> i32 {
    latest
        .map(|a| a.decree_date.unwrap_or(a.period_end))
        .or(employee.decree_date)
        .unwrap_or(request.as_of)
        .year()
}

fn build_footer<S: CreditRecordStore>(store: &S, latest: Option<&Assessment>) -> ReportFooter {
    let Some(latest) = latest else {
        return ReportFooter::default();
    };

    let institution_name = store
        .institution(&latest.institution_id)
        .map(|i| i.name.clone())
        .unwrap_or_default();
    let assessor = store.assessor(&latest.assessor_id);

    ReportFooter {
        institution_name,
        decree_place: latest.decree_place.clone(),
        decree_date: latest.decree_date,
        assessor_name: assessor.map(|a| a.name.clone()).unwrap_or_default(),
        assessor_nip: assessor.map(|a| a.nip.clone()).unwrap_or_default(),
        assessor_rank_name: assessor.map(|a| a.rank_name.clone()).unwrap_or_default(),
        assessor_rank_code: assessor.map(|a| a.rank_code.clone()).unwrap_or_default(),
    }
}

fn flag_unknown_labels(assessment: &Assessment, trace: &mut AuditTrace) {
    if assessment.percentage == 0 {
        trace.warn(AuditWarning::new(
            UNKNOWN_RATING_WARNING,
            format!(
                "Assessment '{}' has unregistered rating '{}' and contributes no credit",
                assessment.id, assessment.rating
            ),
        ));
    }
    if assessment.coefficient.is_zero() {
        trace.warn(AuditWarning::new(
            UNKNOWN_JOB_LEVEL_WARNING,
            format!(
                "Assessment '{}' has unregistered job level '{}' and contributes no credit",
                assessment.id, assessment.job_level
            ),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::{
        AssessmentDraft, EducationCredit, Institution, IntegrationCredit, ReportKind,
    };
    use crate::store::MemoryStore;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tables() -> CreditTables {
        ConfigLoader::load("./config/angka_kredit")
            .expect("Failed to load config")
            .tables()
            .clone()
    }

    fn person(id: &str, name: &str, nip: &str, rank_code: &str) -> Employee {
        Employee {
            id: id.to_string(),
            name: name.to_string(),
            nip: nip.to_string(),
            card_serial: None,
            birthplace: "Bandung".to_string(),
            birthdate: date(1980, 1, 1),
            sex: "L".to_string(),
            rank_name: "Penata Muda Tingkat I".to_string(),
            rank_code: rank_code.to_string(),
            rank_effective_date: date(2019, 4, 1),
            job_title: "Pranata Komputer".to_string(),
            job_title_effective_date: Some(date(2020, 1, 2)),
            work_unit: "Sekretariat".to_string(),
            decree_date: None,
        }
    }

    fn draft(
        id: &str,
        start: NaiveDate,
        end: NaiveDate,
        decree_date: Option<NaiveDate>,
    ) -> AssessmentDraft {
        AssessmentDraft {
            id: id.to_string(),
            employee_id: "peg_001".to_string(),
            institution_id: "ins_001".to_string(),
            assessor_id: "pen_001".to_string(),
            period_start: start,
            period_end: end,
            rating: "Baik".to_string(),
            job_level: "KETERAMPILAN - TERAMPIL".to_string(),
            decree_date,
            decree_place: format!("Place of {}", id),
        }
    }

    fn store_with(drafts: Vec<AssessmentDraft>) -> MemoryStore {
        let tables = tables();
        let mut store = MemoryStore::new();
        store
            .insert_employee(person("peg_001", "Budi", "1001", "III/b"))
            .unwrap();
        store
            .insert_assessor(person("pen_001", "Dr. Ani", "2001", "IV/b"))
            .unwrap();
        store
            .insert_institution(Institution {
                id: "ins_001".to_string(),
                name: "BKPSDM Kota".to_string(),
            })
            .unwrap();
        for draft in drafts {
            store.record_assessment(draft, &tables).unwrap();
        }
        store
    }

    fn request(selection: AssessmentSelection) -> ReportRequest {
        ReportRequest {
            employee_id: "peg_001".to_string(),
            selection,
            include_integration: false,
            include_education: false,
            kind: ReportKind::Konversi,
            as_of: date(2025, 6, 1),
        }
    }

    #[test]
    fn test_selected_assessments_are_sorted_by_start() {
        let store = store_with(vec![
            draft("ak_2", date(2023, 1, 1), date(2023, 12, 31), None),
            draft("ak_1", date(2022, 1, 1), date(2022, 12, 31), None),
        ]);
        let ctx =
            ReportContext::gather(&store, &tables(), &request(AssessmentSelection::All)).unwrap();

        let ids: Vec<&str> = ctx.selected.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["ak_1", "ak_2"]);
        assert_eq!(ctx.header.period_start, "01-01-2022");
        assert_eq!(ctx.header.period_end, "31-12-2023");
        assert_eq!(ctx.latest.unwrap().id, "ak_2");
    }

    #[test]
    fn test_latest_tie_goes_to_last_in_order() {
        let store = store_with(vec![
            draft("ak_a", date(2023, 1, 1), date(2023, 12, 31), None),
            draft("ak_b", date(2023, 7, 1), date(2023, 12, 31), None),
        ]);
        let ctx =
            ReportContext::gather(&store, &tables(), &request(AssessmentSelection::All)).unwrap();

        assert_eq!(ctx.latest.unwrap().id, "ak_b");
        assert_eq!(ctx.footer.decree_place, "Place of ak_b");
    }

    #[test]
    fn test_empty_selection_falls_back_to_all_records_for_footer() {
        let store = store_with(vec![
            draft("ak_1", date(2022, 1, 1), date(2022, 12, 31), None),
            draft("ak_2", date(2023, 1, 1), date(2023, 12, 31), Some(date(2024, 2, 1))),
        ]);
        let ctx = ReportContext::gather(
            &store,
            &tables(),
            &request(AssessmentSelection::Only(vec![])),
        )
        .unwrap();

        assert!(ctx.selected.is_empty());
        assert_eq!(ctx.header.period_start, "");
        assert_eq!(ctx.header.period_end, "");
        assert_eq!(ctx.latest.unwrap().id, "ak_2");
        assert_eq!(ctx.footer.institution_name, "BKPSDM Kota");
        assert_eq!(ctx.footer.assessor_name, "Dr. Ani");
        assert_eq!(ctx.footer.assessor_nip, "2001");
        assert_eq!(ctx.header.year, 2024);
    }

    #[test]
    fn test_reporting_year_fallback_chain() {
        // Decree year wins.
        let store = store_with(vec![draft(
            "ak_1",
            date(2022, 1, 1),
            date(2022, 12, 31),
            Some(date(2023, 3, 1)),
        )]);
        let ctx =
            ReportContext::gather(&store, &tables(), &request(AssessmentSelection::All)).unwrap();
        assert_eq!(ctx.header.year, 2023);

        // Then period-end year.
        let store = store_with(vec![draft("ak_1", date(2021, 1, 1), date(2021, 12, 31), None)]);
        let ctx =
            ReportContext::gather(&store, &tables(), &request(AssessmentSelection::All)).unwrap();
        assert_eq!(ctx.header.year, 2021);

        // Then the as-of year.
        let store = store_with(vec![]);
        let ctx =
            ReportContext::gather(&store, &tables(), &request(AssessmentSelection::All)).unwrap();
        assert_eq!(ctx.header.year, 2025);
    }

    #[test]
    fn test_reporting_year_uses_employee_decree_before_as_of() {
        let mut employee = person("peg_001", "Budi", "1001", "III/b");
        employee.decree_date = Some(date(2019, 9, 9));
        let request = request(AssessmentSelection::All);
        assert_eq!(reporting_year(None, &employee, &request), 2019);
    }

    #[test]
    fn test_no_assessments_gives_empty_footer_and_warning() {
        let store = store_with(vec![]);
        let ctx =
            ReportContext::gather(&store, &tables(), &request(AssessmentSelection::All)).unwrap();

        assert_eq!(ctx.footer, ReportFooter::default());
        assert!(ctx.audit_trace.has_warning(NO_ASSESSMENTS_WARNING));
    }

    #[test]
    fn test_unknown_employee_is_an_error() {
        let store = store_with(vec![]);
        let mut request = request(AssessmentSelection::All);
        request.employee_id = "ghost".to_string();

        assert!(matches!(
            ReportContext::gather(&store, &tables(), &request),
            Err(CreditError::EmployeeNotFound { .. })
        ));
    }

    #[test]
    fn test_synthetic_lines_follow_flags() {
        let tables = tables();
        let mut store = store_with(vec![]);
        store
            .insert_integration_credit(IntegrationCredit {
                employee_id: "peg_001".to_string(),
                amount: dec("12.5"),
            })
            .unwrap();
        store
            .insert_education_credit(EducationCredit {
                id: "edu_1".to_string(),
                employee_id: "peg_001".to_string(),
                institution_id: "ins_001".to_string(),
                assessor_id: "pen_001".to_string(),
                activity_type: "Diklat".to_string(),
                level: "Nasional".to_string(),
                execution_date: date(2023, 3, 3),
                duration_hours: 30,
                credit: None,
                decree_date: None,
                decree_place: String::new(),
                certificate_number: "C-1".to_string(),
            })
            .unwrap();

        let mut req = request(AssessmentSelection::All);
        let ctx = ReportContext::gather(&store, &tables, &req).unwrap();
        assert!(ctx.synthetic_lines().is_empty());
        assert_eq!(ctx.integration_amount(), Decimal::ZERO);

        req.include_integration = true;
        req.include_education = true;
        let ctx = ReportContext::gather(&store, &tables, &req).unwrap();
        let lines = ctx.synthetic_lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], ReportLine::Integration { amount: dec("12.5") });
        // III/b -> III/c needs 100, a quarter is 25
        assert_eq!(lines[1].credit(), dec("25"));
        assert_eq!(ctx.education_amount(), dec("25"));
    }

    #[test]
    fn test_missing_integration_record_counts_as_zero_line() {
        let store = store_with(vec![]);
        let mut req = request(AssessmentSelection::All);
        req.include_integration = true;

        let ctx = ReportContext::gather(&store, &tables(), &req).unwrap();
        assert_eq!(
            ctx.synthetic_lines(),
            vec![ReportLine::Integration {
                amount: Decimal::ZERO
            }]
        );
    }
}
