//! HTTP API module for the Angka Kredit engine.
//!
//! This module provides the REST API endpoints for computing credit,
//! building reports and rendering them as downloadable documents.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AssessmentRequest, CreditRequest, EducationCreditRequest, LoadedSnapshot,
    ReportSnapshotRequest,
};
pub use response::{ApiError, ApiErrorResponse, RankSummary};
pub use state::AppState;
