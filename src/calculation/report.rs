//! Report entry point.

use tracing::{debug, info, warn};

use crate::config::CreditTables;
use crate::error::CreditResult;
use crate::models::{Report, ReportKind, ReportRequest};
use crate::store::CreditRecordStore;

use super::akumulasi::build_akumulasi;
use super::konversi::build_konversi;
use super::penetapan::build_penetapan;
use super::report_context::ReportContext;

/// Builds the report described by `request` from the records in `store`.
///
/// # Errors
///
/// Returns [`CreditError::EmployeeNotFound`](crate::error::CreditError::EmployeeNotFound)
/// if the employee does not exist. Every other data gap degrades to a
/// default value and a warning in the report's audit trace.
///
/// # Examples
///
/// ```no_run
/// use angka_kredit::calculation::build_report;
/// use angka_kredit::config::ConfigLoader;
/// use angka_kredit::models::{AssessmentSelection, ReportKind, ReportRequest};
/// use angka_kredit::store::MemoryStore;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/angka_kredit")?;
/// let store = MemoryStore::new();
/// let request = ReportRequest {
///     employee_id: "peg_001".to_string(),
///     selection: AssessmentSelection::All,
///     include_integration: true,
///     include_education: false,
///     kind: ReportKind::Penetapan,
///     as_of: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
/// };
/// let report = build_report(&store, loader.tables(), &request)?;
/// println!("{}", report.download_filename("pdf"));
/// # Ok::<(), angka_kredit::error::CreditError>(())
/// ```
pub fn build_report<S: CreditRecordStore>(
    store: &S,
    tables: &CreditTables,
    request: &ReportRequest,
) -> CreditResult<Report> {
    debug!(
        employee_id = %request.employee_id,
        kind = %request.kind,
        include_integration = request.include_integration,
        include_education = request.include_education,
        "Building report"
    );

    let ctx = ReportContext::gather(store, tables, request)?;
    let selected = ctx.selected.len();

    let report = match request.kind {
        ReportKind::Konversi => Report::Konversi(build_konversi(ctx)),
        ReportKind::Akumulasi => Report::Akumulasi(build_akumulasi(ctx)),
        ReportKind::Penetapan => Report::Penetapan(build_penetapan(ctx, tables)),
    };

    for warning in &report.audit_trace().warnings {
        warn!(
            employee_id = %request.employee_id,
            code = %warning.code,
            "{}",
            warning.message
        );
    }

    match &report {
        Report::Penetapan(penetapan) => info!(
            employee_id = %request.employee_id,
            kind = %request.kind,
            selected,
            total_jumlah = %penetapan.total_jumlah,
            hasil_pangkat = %penetapan.hasil_pangkat,
            "Report built"
        ),
        Report::Akumulasi(summary) | Report::Konversi(summary) => info!(
            employee_id = %request.employee_id,
            kind = %request.kind,
            selected,
            total_credit = %summary.total_credit,
            "Report built"
        ),
    }

    Ok(report)
}
