//! Core data models for the Angka Kredit engine.
//!
//! This module contains all the domain models used throughout the engine.

mod assessment;
mod audit;
mod credit_source;
mod employee;
mod rank;
mod report;

pub use assessment::{Assessment, AssessmentDraft};
pub use audit::{AuditStep, AuditTrace, AuditWarning};
pub use credit_source::{EducationCredit, IntegrationCredit};
pub use employee::{Assessor, Employee, Institution};
pub use rank::{HIGHEST_RANK_TEXT, NextRank, UNRANKED_TEXT};
pub use report::{
    AssessmentLine, AssessmentSelection, CreditBalance, CreditSummaryReport, DATE_FORMAT,
    EducationEntry, PenetapanReport, PromotionVerdict, Report, ReportFooter, ReportHeader,
    ReportKind, ReportLine, ReportRequest, format_date,
};
