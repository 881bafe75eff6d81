//! Konversi (conversion) report.

use rust_decimal::Decimal;
use serde_json::json;

use crate::models::{CreditSummaryReport, ReportLine};

use super::report_context::{ReportContext, assessment_line};

/// Builds the Konversi report: one row per included item and a grand
/// total over every row.
pub fn build_konversi(ctx: ReportContext<'_>) -> CreditSummaryReport {
    let mut lines = ctx.synthetic_lines();
    lines.extend(ctx.selected.iter().map(|a| assessment_line(a, None)));

    summarise(ctx, lines, "konversi_total", "Konversi Total")
}

/// Sums the lines into a summary report, recording the total as the final
/// audit step.
pub(crate) fn summarise(
    ctx: ReportContext<'_>,
    lines: Vec<ReportLine>,
    rule_id: &str,
    rule_name: &str,
) -> CreditSummaryReport {
    let total_credit: Decimal = lines.iter().map(ReportLine::credit).sum();

    let mut audit_trace = ctx.audit_trace;
    audit_trace.record(
        rule_id,
        rule_name,
        json!({
            "lines": lines.len(),
            "assessment_sum": ctx.selected.iter().map(|a| a.credit).sum::<Decimal>().to_string(),
            "integration": ctx.integration.map(|amount| amount.to_string()),
            "education": ctx.education.as_ref().map(|e| e.amount.to_string())
        }),
        json!({ "total_credit": total_credit.to_string() }),
        format!("Sum of {} lines = {}", lines.len(), total_credit),
    );

    CreditSummaryReport {
        header: ctx.header,
        lines,
        total_credit,
        footer: ctx.footer,
        audit_trace,
    }
}
