//! Penetapan (rank determination) report.
//!
//! The calculation:
//!
//! 1. Normalise the employee's rank code.
//! 2. `total_lama` = baseline credit for the rank.
//! 3. `total_baru` = max(0, assessment sum + integration - deduction).
//! 4. `total_jumlah` = `total_lama` + `total_baru` + education subtotal.
//! 5. Resolve the next rank and its promotion thresholds (0 when missing).
//! 6. Compare `total_jumlah` against both thresholds.
//!
//! Education is kept out of step 3, so it is never reduced by the rank
//! deduction.

use rust_decimal::Decimal;
use serde_json::json;

use crate::config::CreditTables;
use crate::models::{AuditWarning, CreditBalance, NextRank, PenetapanReport};

use super::rank::normalize_rank_code;
use super::report_context::{ReportContext, assessment_line};

/// Warning code for a rank code outside the hierarchy.
pub const UNRANKED_WARNING: &str = "UNRANKED";

/// Warning code for a rank pair with no promotion threshold on file.
pub const MISSING_THRESHOLD_WARNING: &str = "MISSING_THRESHOLD";

/// Builds the Penetapan report.
pub fn build_penetapan(mut ctx: ReportContext<'_>, tables: &CreditTables) -> PenetapanReport {
    let mut audit_trace = std::mem::take(&mut ctx.audit_trace);

    // Rank normalisation
    let raw_code = ctx.employee.rank_code.as_str();
    let rank_code = normalize_rank_code(raw_code);
    audit_trace.record(
        "rank_normalisation",
        "Rank Code Normalisation",
        json!({ "rank_code": raw_code }),
        json!({ "rank_code": rank_code }),
        if rank_code == raw_code {
            format!("Rank code {} is canonical", rank_code)
        } else {
            format!("Rank code '{}' normalised to {}", raw_code, rank_code)
        },
    );

    // Old and new credit
    let total_lama = tables.baseline_credit(&rank_code);
    let deduction = tables.deduction(&rank_code);
    let assessment_sum = ctx.assessment_sum();
    let integration = ctx.integration_amount();
    let education_credit = ctx.education_amount();

    let total_baru = (assessment_sum + integration - deduction).max(Decimal::ZERO);
    audit_trace.record(
        "new_credit",
        "New Credit After Deduction",
        json!({
            "assessment_sum": assessment_sum.to_string(),
            "integration": integration.to_string(),
            "deduction": deduction.to_string()
        }),
        json!({ "total_baru": total_baru.to_string() }),
        format!(
            "max(0, {} + {} - {}) = {}",
            assessment_sum, integration, deduction, total_baru
        ),
    );

    let total_jumlah = total_lama + total_baru + education_credit;
    audit_trace.record(
        "grand_total",
        "Grand Total",
        json!({
            "total_lama": total_lama.to_string(),
            "total_baru": total_baru.to_string(),
            "education": education_credit.to_string()
        }),
        json!({ "total_jumlah": total_jumlah.to_string() }),
        format!(
            "{} + {} + {} = {}",
            total_lama, total_baru, education_credit, total_jumlah
        ),
    );

    // Promotion thresholds
    let next_rank = tables.next_rank(&rank_code);
    let threshold = next_rank
        .code()
        .and_then(|next| tables.promotion_threshold(&rank_code, next));

    match (&next_rank, threshold) {
        (NextRank::Unranked, _) => audit_trace.warn(AuditWarning::new(
            UNRANKED_WARNING,
            format!(
                "Rank code '{}' is not part of the rank hierarchy; thresholds default to 0",
                rank_code
            ),
        )),
        (NextRank::Rank(next), None) => audit_trace.warn(AuditWarning::new(
            MISSING_THRESHOLD_WARNING,
            format!(
                "No promotion threshold from {} to {}; thresholds default to 0",
                rank_code, next
            ),
        )),
        _ => {}
    }

    let pangkat_minimal = threshold
        .map(|t| t.rank_minimum)
        .unwrap_or(Decimal::ZERO);
    let jenjang_minimal = match threshold {
        Some(t) => t.job_level_minimum,
        None => Some(Decimal::ZERO),
    };

    let hasil_pangkat = total_jumlah - pangkat_minimal;
    let hasil_jenjang = jenjang_minimal.map(|minimum| total_jumlah - minimum);
    let balance = CreditBalance::of(hasil_pangkat);
    let verdict = balance.verdict();
    let destination = next_rank.destination_text(tables);

    audit_trace.record(
        "promotion_threshold",
        "Promotion Threshold",
        json!({
            "rank_code": rank_code,
            "next_rank": next_rank,
            "total_jumlah": total_jumlah.to_string()
        }),
        json!({
            "pangkat_minimal": pangkat_minimal.to_string(),
            "jenjang_minimal": jenjang_minimal.map(|m| m.to_string()),
            "hasil_pangkat": hasil_pangkat.to_string(),
            "hasil_jenjang": hasil_jenjang.map(|h| h.to_string()),
            "verdict": verdict
        }),
        format!(
            "{} - {} = {} toward {}",
            total_jumlah, pangkat_minimal, hasil_pangkat, destination
        ),
    );

    let mut lines = ctx.synthetic_lines();
    lines.extend(ctx.selected.iter().map(|a| assessment_line(a, None)));

    PenetapanReport {
        header: ctx.header,
        lines,
        rank_code,
        total_lama,
        deduction,
        total_baru,
        education_credit,
        total_jumlah,
        total_performance_only: total_lama + total_baru,
        total_baru_with_education: total_baru + education_credit,
        next_rank,
        destination,
        pangkat_minimal,
        jenjang_minimal,
        hasil_pangkat,
        hasil_jenjang,
        balance,
        verdict,
        footer: ctx.footer,
        audit_trace,
    }
}
