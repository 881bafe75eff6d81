//! Report request and payload models.
//!
//! A report is built from a [`ReportRequest`] and comes out as one of the
//! three statutory payloads wrapped in [`Report`]. Body rows are a sum type,
//! [`ReportLine`], so renderers match on the row kind instead of probing
//! flags.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AuditTrace, Employee, NextRank};

/// Date format used on every printed document (day-month-year).
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Formats a date as `dd-mm-YYYY`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// The three statutory report formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    /// Rank/promotion determination (penetapan).
    Penetapan,
    /// Accumulation over periods (akumulasi).
    Akumulasi,
    /// Conversion of ratings into credit (konversi).
    Konversi,
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReportKind::Penetapan => "Penetapan",
            ReportKind::Akumulasi => "Akumulasi",
            ReportKind::Konversi => "Konversi",
        };
        f.write_str(name)
    }
}

/// Which of the employee's assessments a report covers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "ids", rename_all = "snake_case")]
pub enum AssessmentSelection {
    /// Every assessment on file.
    #[default]
    All,
    /// Only the listed assessment ids. An empty list selects nothing.
    Only(Vec<String>),
}

impl AssessmentSelection {
    /// Returns true if the assessment id is part of the selection.
    pub fn includes(&self, id: &str) -> bool {
        match self {
            AssessmentSelection::All => true,
            AssessmentSelection::Only(ids) => ids.iter().any(|selected| selected == id),
        }
    }
}

/// An ephemeral request for one report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRequest {
    /// The employee the report is about.
    pub employee_id: String,
    /// The assessments to include.
    pub selection: AssessmentSelection,
    /// Whether to add the integration credit.
    pub include_integration: bool,
    /// Whether to add the education credits.
    pub include_education: bool,
    /// The report format.
    pub kind: ReportKind,
    /// Reference date for the "current year" fallback.
    pub as_of: NaiveDate,
}

/// A body row for one real assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentLine {
    /// The assessment this row comes from.
    pub assessment_id: String,
    /// First day of the period.
    pub period_start: NaiveDate,
    /// Last day of the period.
    pub period_end: NaiveDate,
    /// Rating label.
    pub rating: String,
    /// Rating percentage.
    pub percentage: u32,
    /// Job level label.
    pub job_level: String,
    /// Annual coefficient.
    pub coefficient: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Whole months covered, shown on the Akumulasi report only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub months: Option<u32>,
}

/// One education activity contributing to an education line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    /// The education credit record id.
    pub id: String,
    /// Kind of activity.
    pub activity_type: String,
    /// Date of the activity.
    pub execution_date: NaiveDate,
    /// Certificate number.
    pub certificate_number: String,
    /// Resolved credit amount.
    pub credit: Decimal,
    /// True when the credit came from the next-promotion rule rather than
    /// the record.
    pub derived: bool,
}

/// A row in a report body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReportLine {
    /// A real assessment record.
    Assessment(AssessmentLine),
    /// The employee's integration credit.
    Integration {
        /// Credit amount.
        amount: Decimal,
    },
    /// The sum of the employee's education credits.
    Education {
        /// Credit amount.
        amount: Decimal,
        /// The individual activities making up the amount.
        entries: Vec<EducationEntry>,
    },
}

impl ReportLine {
    /// Returns the credit this row contributes.
    pub fn credit(&self) -> Decimal {
        match self {
            ReportLine::Assessment(line) => line.credit,
            ReportLine::Integration { amount } => *amount,
            ReportLine::Education { amount, .. } => *amount,
        }
    }

    /// Returns the label printed in the rating column.
    pub fn label(&self) -> &str {
        match self {
            ReportLine::Assessment(line) => &line.rating,
            ReportLine::Integration { .. } => "AK Integrasi",
            ReportLine::Education { .. } => "AK Pendidikan",
        }
    }
}

/// Identification block at the top of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportHeader {
    /// The employee the report is about.
    pub employee: Employee,
    /// Reporting year.
    pub year: i32,
    /// Earliest selected period start, `dd-mm-YYYY`, or empty.
    pub period_start: String,
    /// Latest selected period end, `dd-mm-YYYY`, or empty.
    pub period_end: String,
    /// "`<job title> / <TMT>`".
    pub job_title_line: String,
}

/// Signature block at the bottom of a report.
///
/// Every field is empty when the employee has no assessment on file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportFooter {
    /// Name of the issuing institution.
    pub institution_name: String,
    /// Decree place.
    pub decree_place: String,
    /// Decree date.
    pub decree_date: Option<NaiveDate>,
    /// Assessor name.
    pub assessor_name: String,
    /// Assessor NIP.
    pub assessor_nip: String,
    /// Assessor rank title.
    pub assessor_rank_name: String,
    /// Assessor rank code.
    pub assessor_rank_code: String,
}

/// Payload shared by the Konversi and Akumulasi reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditSummaryReport {
    /// Identification block.
    pub header: ReportHeader,
    /// Body rows: integration, education, then assessments.
    pub lines: Vec<ReportLine>,
    /// Sum of every row.
    pub total_credit: Decimal,
    /// Signature block.
    pub footer: ReportFooter,
    /// Rules applied while building the report.
    pub audit_trace: AuditTrace,
}

/// Whether the employee qualifies for the next rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromotionVerdict {
    /// Rank-promotion balance is positive.
    Eligible,
    /// Rank-promotion balance is zero or negative.
    NotEligible,
}

/// Label for the rank-promotion balance line. The renderer strikes the
/// other one through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditBalance {
    /// Credit above the minimum (kelebihan).
    Surplus,
    /// Credit at or below the minimum (kekurangan).
    Deficit,
}

impl CreditBalance {
    /// Classifies a balance: strictly positive is a surplus.
    pub fn of(balance: Decimal) -> Self {
        if balance > Decimal::ZERO {
            CreditBalance::Surplus
        } else {
            CreditBalance::Deficit
        }
    }

    /// The verdict that goes with this balance.
    pub fn verdict(self) -> PromotionVerdict {
        match self {
            CreditBalance::Surplus => PromotionVerdict::Eligible,
            CreditBalance::Deficit => PromotionVerdict::NotEligible,
        }
    }
}

/// Payload of the Penetapan (rank determination) report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenetapanReport {
    /// Identification block.
    pub header: ReportHeader,
    /// Body rows: integration, education, then assessments.
    pub lines: Vec<ReportLine>,
    /// The employee's rank code after normalisation.
    pub rank_code: String,
    /// Old credit carried over for the rank (total lama).
    pub total_lama: Decimal,
    /// Deduction applied to new credit for the rank.
    pub deduction: Decimal,
    /// New credit after deduction, never negative (total baru).
    pub total_baru: Decimal,
    /// Education subtotal, added only into the grand total.
    pub education_credit: Decimal,
    /// Grand total (total jumlah).
    pub total_jumlah: Decimal,
    /// Old plus new credit, without education.
    pub total_performance_only: Decimal,
    /// New credit plus education.
    pub total_baru_with_education: Decimal,
    /// The rank the employee would be promoted to.
    pub next_rank: NextRank,
    /// Destination text, "`<rank title> <code>`".
    pub destination: String,
    /// Minimum credit for the rank promotion.
    pub pangkat_minimal: Decimal,
    /// Minimum credit for the job-level promotion, if one applies.
    pub jenjang_minimal: Option<Decimal>,
    /// Grand total minus the rank minimum.
    pub hasil_pangkat: Decimal,
    /// Grand total minus the job-level minimum, if one applies.
    pub hasil_jenjang: Option<Decimal>,
    /// Surplus or deficit label for `hasil_pangkat`.
    pub balance: CreditBalance,
    /// Rank-promotion verdict.
    pub verdict: PromotionVerdict,
    /// Signature block.
    pub footer: ReportFooter,
    /// Rules applied while building the report.
    pub audit_trace: AuditTrace,
}

/// A computed report payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Report {
    /// Rank determination.
    Penetapan(PenetapanReport),
    /// Accumulation.
    Akumulasi(CreditSummaryReport),
    /// Conversion.
    Konversi(CreditSummaryReport),
}

impl Report {
    /// Returns the report format.
    pub fn kind(&self) -> ReportKind {
        match self {
            Report::Penetapan(_) => ReportKind::Penetapan,
            Report::Akumulasi(_) => ReportKind::Akumulasi,
            Report::Konversi(_) => ReportKind::Konversi,
        }
    }

    /// Returns the identification block.
    pub fn header(&self) -> &ReportHeader {
        match self {
            Report::Penetapan(report) => &report.header,
            Report::Akumulasi(report) | Report::Konversi(report) => &report.header,
        }
    }

    /// Returns the signature block.
    pub fn footer(&self) -> &ReportFooter {
        match self {
            Report::Penetapan(report) => &report.footer,
            Report::Akumulasi(report) | Report::Konversi(report) => &report.footer,
        }
    }

    /// Returns the body rows.
    pub fn lines(&self) -> &[ReportLine] {
        match self {
            Report::Penetapan(report) => &report.lines,
            Report::Akumulasi(report) | Report::Konversi(report) => &report.lines,
        }
    }

    /// Returns the audit trace.
    pub fn audit_trace(&self) -> &AuditTrace {
        match self {
            Report::Penetapan(report) => &report.audit_trace,
            Report::Akumulasi(report) | Report::Konversi(report) => &report.audit_trace,
        }
    }

    /// Returns the audit trace for appending.
    pub fn audit_trace_mut(&mut self) -> &mut AuditTrace {
        match self {
            Report::Penetapan(report) => &mut report.audit_trace,
            Report::Akumulasi(report) | Report::Konversi(report) => &mut report.audit_trace,
        }
    }

    /// Returns the download filename,
    /// "`<ReportType> an.<name> periode <start> s.d <end>.<extension>`".
    pub fn download_filename(&self, extension: &str) -> String {
        let header = self.header();
        format!(
            "{} an.{} periode {} s.d {}.{}",
            self.kind(),
            header.employee.name,
            header.period_start,
            header.period_end,
            extension
        )
    }
}
