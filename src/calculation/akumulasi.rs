//! Akumulasi (accumulation) report.
//!
//! Same rows and total as Konversi, plus a month count on every assessment
//! row for display. The month count never feeds back into the credit.

use crate::models::CreditSummaryReport;

use super::duration::elapsed_months;
use super::konversi::summarise;
use super::report_context::{ReportContext, assessment_line};

/// Builds the Akumulasi report.
pub fn build_akumulasi(ctx: ReportContext<'_>) -> CreditSummaryReport {
    let mut lines = ctx.synthetic_lines();
    lines.extend(ctx.selected.iter().map(|a| {
        let months = elapsed_months(a.period_start, a.period_end);
        assessment_line(a, Some(months))
    }));

    summarise(ctx, lines, "akumulasi_total", "Akumulasi Total")
}
