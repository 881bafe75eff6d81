//! HTML rendering with Tera templates.

use std::error::Error;

use rust_decimal::Decimal;
use serde::Serialize;
use tera::{Context, Tera};

use crate::error::{CreditError, CreditResult};
use crate::models::{
    PenetapanReport, PromotionVerdict, Report, ReportFooter, ReportHeader, ReportKind, ReportLine,
    format_date,
};

use super::{DocumentRenderer, RenderedDocument, format_credit};

const BASE_TEMPLATE: &str = include_str!("../../templates/base.html");
const CREDIT_TABLE_TEMPLATE: &str = include_str!("../../templates/credit_table.html");
const PENETAPAN_TEMPLATE: &str = include_str!("../../templates/penetapan.html");

/// Renders reports as standalone HTML documents.
///
/// Template values are escaped by Tera, so names and places can contain
/// markup characters safely.
#[derive(Debug)]
pub struct HtmlRenderer {
    tera: Tera,
}

impl HtmlRenderer {
    /// Creates a renderer with the built-in templates.
    ///
    /// # Errors
    ///
    /// Returns [`CreditError::RenderError`] if a template fails to parse.
    pub fn new() -> CreditResult<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("base.html", BASE_TEMPLATE),
            ("credit_table.html", CREDIT_TABLE_TEMPLATE),
            ("penetapan.html", PENETAPAN_TEMPLATE),
        ])
        .map_err(render_error)?;
        Ok(Self { tera })
    }

    /// Renders the report to an HTML string.
    ///
    /// # Errors
    ///
    /// Returns [`CreditError::RenderError`] if the template fails.
    pub fn render_html(&self, report: &Report) -> CreditResult<String> {
        let view = DocumentView::from_report(report);
        let template = match report.kind() {
            ReportKind::Penetapan => "penetapan.html",
            ReportKind::Akumulasi | ReportKind::Konversi => "credit_table.html",
        };
        let context = Context::from_serialize(&view).map_err(render_error)?;
        self.tera.render(template, &context).map_err(render_error)
    }
}

impl DocumentRenderer for HtmlRenderer {
    fn render(&self, report: &Report) -> CreditResult<RenderedDocument> {
        let html = self.render_html(report)?;
        Ok(RenderedDocument {
            content_type: "text/html; charset=utf-8",
            filename: report.download_filename("html"),
            bytes: html.into_bytes(),
        })
    }
}

fn render_error(error: tera::Error) -> CreditError {
    // Tera nests the useful message in the error source chain.
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    CreditError::RenderError { message }
}

#[derive(Debug, Serialize)]
struct DocumentView {
    title: String,
    heading: &'static str,
    header: HeaderView,
    identity: Vec<FieldView>,
    footer: FooterView,
    rows: Vec<RowView>,
    show_months: bool,
    total: String,
    penetapan: Option<PenetapanView>,
}

#[derive(Debug, Serialize)]
struct HeaderView {
    year: i32,
    period_start: String,
    period_end: String,
}

#[derive(Debug, Serialize)]
struct FieldView {
    label: &'static str,
    value: String,
}

#[derive(Debug, Serialize)]
struct FooterView {
    institution_name: String,
    decree_place: String,
    decree_date: String,
    assessor_name: String,
    assessor_nip: String,
    assessor_rank: String,
}

#[derive(Debug, Serialize)]
struct RowView {
    label: String,
    percentage: String,
    period: String,
    months: String,
    coefficient: String,
    credit: String,
}

#[derive(Debug, Serialize)]
struct PenetapanView {
    total_lama: String,
    total_baru: String,
    education_credit: String,
    total_performance_only: String,
    total_baru_with_education: String,
    total_jumlah: String,
    pangkat_minimal: String,
    jenjang_minimal: String,
    hasil_pangkat: String,
    hasil_jenjang: String,
    surplus: bool,
    jenjang_surplus: bool,
    eligible: bool,
    destination: String,
}

impl DocumentView {
    fn from_report(report: &Report) -> Self {
        let header = report.header();
        let (heading, total, penetapan) = match report {
            Report::Penetapan(p) => (
                "PENETAPAN ANGKA KREDIT",
                format_credit(p.total_jumlah),
                Some(PenetapanView::from_report(p)),
            ),
            Report::Akumulasi(s) => ("AKUMULASI ANGKA KREDIT", format_credit(s.total_credit), None),
            Report::Konversi(s) => (
                "KONVERSI PREDIKAT KINERJA KE ANGKA KREDIT",
                format_credit(s.total_credit),
                None,
            ),
        };

        Self {
            title: report.download_filename("html"),
            heading,
            header: HeaderView {
                year: header.year,
                period_start: header.period_start.clone(),
                period_end: header.period_end.clone(),
            },
            identity: identity_fields(header),
            footer: FooterView::from_footer(report.footer()),
            rows: report.lines().iter().map(RowView::from_line).collect(),
            show_months: report.kind() == ReportKind::Akumulasi,
            total,
            penetapan,
        }
    }
}

fn identity_fields(header: &ReportHeader) -> Vec<FieldView> {
    let employee = &header.employee;
    let field = |label, value: String| FieldView { label, value };
    vec![
        field("Nama", employee.name.clone()),
        field("NIP", employee.nip.clone()),
        field(
            "No. Seri Karpeg",
            employee.card_serial.clone().unwrap_or_default(),
        ),
        field(
            "Tempat Tgl. Lahir",
            format!("{}, {}", employee.birthplace, format_date(employee.birthdate)),
        ),
        field("Jenis Kelamin", employee.sex.clone()),
        field(
            "Pangkat/Golongan ruang/TMT",
            format!(
                "{} ({}), {}",
                employee.rank_name,
                employee.rank_code,
                format_date(employee.rank_effective_date)
            ),
        ),
        field("Jabatan/TMT", header.job_title_line.clone()),
        field("Unit Kerja", employee.work_unit.clone()),
    ]
}

impl FooterView {
    fn from_footer(footer: &ReportFooter) -> Self {
        let assessor_rank = if footer.assessor_rank_name.is_empty() {
            footer.assessor_rank_code.clone()
        } else {
            format!("{} ({})", footer.assessor_rank_name, footer.assessor_rank_code)
        };
        Self {
            institution_name: footer.institution_name.clone(),
            decree_place: footer.decree_place.clone(),
            decree_date: footer.decree_date.map(format_date).unwrap_or_default(),
            assessor_name: footer.assessor_name.clone(),
            assessor_nip: footer.assessor_nip.clone(),
            assessor_rank,
        }
    }
}

impl RowView {
    fn from_line(line: &ReportLine) -> Self {
        match line {
            ReportLine::Assessment(a) => Self {
                label: a.rating.clone(),
                percentage: format!("{}%", a.percentage),
                period: format!(
                    "{} s.d. {}",
                    format_date(a.period_start),
                    format_date(a.period_end)
                ),
                months: a.months.map(|m| m.to_string()).unwrap_or_default(),
                coefficient: a.coefficient.normalize().to_string(),
                credit: format_credit(a.credit),
            },
            ReportLine::Integration { amount } | ReportLine::Education { amount, .. } => Self {
                label: line.label().to_string(),
                percentage: String::new(),
                period: String::new(),
                months: String::new(),
                coefficient: String::new(),
                credit: format_credit(*amount),
            },
        }
    }
}

impl PenetapanView {
    fn from_report(report: &PenetapanReport) -> Self {
        Self {
            total_lama: format_credit(report.total_lama),
            total_baru: format_credit(report.total_baru),
            education_credit: format_credit(report.education_credit),
            total_performance_only: format_credit(report.total_performance_only),
            total_baru_with_education: format_credit(report.total_baru_with_education),
            total_jumlah: format_credit(report.total_jumlah),
            pangkat_minimal: format_credit(report.pangkat_minimal),
            jenjang_minimal: report
                .jenjang_minimal
                .map(format_credit)
                .unwrap_or_else(|| "-".to_string()),
            hasil_pangkat: format_credit(report.hasil_pangkat),
            hasil_jenjang: report
                .hasil_jenjang
                .map(format_credit)
                .unwrap_or_else(|| "-".to_string()),
            surplus: report.hasil_pangkat > Decimal::ZERO,
            jenjang_surplus: report
                .hasil_jenjang
                .is_some_and(|h| h > Decimal::ZERO),
            eligible: report.verdict == PromotionVerdict::Eligible,
            destination: report.destination.clone(),
        }
    }
}
