//! HTTP request handlers for the Angka Kredit API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{CreditInput, build_report, calculate_credit};
use crate::models::{NextRank, Report};
use crate::render::DocumentRenderer;

use super::request::{CreditRequest, ReportSnapshotRequest};
use super::response::{ApiError, ApiErrorResponse, RankSummary};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/credit", post(credit_handler))
        .route("/reports", post(report_handler))
        .route("/reports/html", post(report_html_handler))
        .route("/ranks", get(ranks_handler))
        .with_state(state)
}

/// Handler for POST /credit endpoint.
///
/// Calculates the credit for a single assessment period.
async fn credit_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreditRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing credit request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let input: CreditInput = request.into();
    match calculate_credit(&input, state.tables(), 1) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                rating = %input.rating,
                job_level = %input.job_level,
                credit = %result.credit,
                warnings = result.warnings.len(),
                "Credit calculated"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(result),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Credit calculation rejected"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /reports endpoint.
///
/// Builds a report from a snapshot of the employee's records and returns
/// the payload as JSON.
async fn report_handler(
    State(state): State<AppState>,
    payload: Result<Json<ReportSnapshotRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing report request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    match prepare_report(&state, request, correlation_id) {
        Ok(report) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            Json(report),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}

/// Handler for POST /reports/html endpoint.
///
/// Same input as `/reports`; returns the rendered document as a download.
async fn report_html_handler(
    State(state): State<AppState>,
    payload: Result<Json<ReportSnapshotRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing report document request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let report = match prepare_report(&state, request, correlation_id) {
        Ok(report) => report,
        Err(err) => return err.into_response(),
    };

    let document = match state.renderer().render(&report) {
        Ok(document) => document,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Rendering failed"
            );
            return ApiErrorResponse::from(err).into_response();
        }
    };

    // Header values must be visible ASCII; fall back to a bare attachment
    // for names that are not.
    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        document.filename.replace('"', "'")
    ))
    .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

    info!(
        correlation_id = %correlation_id,
        filename = %document.filename,
        bytes = document.bytes.len(),
        "Report document rendered"
    );

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(document.content_type)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        document.bytes,
    )
        .into_response()
}

/// Handler for GET /ranks endpoint.
///
/// Lists the rank hierarchy, lowest first, with each rank's promotion
/// destination.
async fn ranks_handler(State(state): State<AppState>) -> Json<Vec<RankSummary>> {
    let tables = state.tables();
    let ranks = tables
        .ranks()
        .iter()
        .map(|rank| {
            let next_rank: NextRank = tables.next_rank(&rank.code);
            RankSummary {
                name: rank.name.clone(),
                code: rank.code.clone(),
                destination: next_rank.destination_text(tables),
                next_rank,
            }
        })
        .collect();
    Json(ranks)
}

/// Loads the snapshot and builds the report, folding derivation warnings
/// into the report's audit trace.
fn prepare_report(
    state: &AppState,
    request: ReportSnapshotRequest,
    correlation_id: Uuid,
) -> Result<Report, ApiErrorResponse> {
    let start_time = Instant::now();
    let tables = state.tables();

    let loaded = request.into_store(tables).map_err(|err| {
        warn!(
            correlation_id = %correlation_id,
            error = %err,
            "Snapshot rejected"
        );
        ApiErrorResponse::from(err)
    })?;

    let mut report = build_report(&loaded.store, tables, &loaded.request).map_err(|err| {
        warn!(
            correlation_id = %correlation_id,
            error = %err,
            "Report build failed"
        );
        ApiErrorResponse::from(err)
    })?;

    let trace = report.audit_trace_mut();
    for warning in loaded.warnings {
        if !trace
            .warnings
            .iter()
            .any(|w| w.code == warning.code && w.message == warning.message)
        {
            trace.warn(warning);
        }
    }

    info!(
        correlation_id = %correlation_id,
        employee_id = %loaded.request.employee_id,
        kind = %loaded.request.kind,
        duration_us = start_time.elapsed().as_micros(),
        "Report completed successfully"
    );

    Ok(report)
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error).into_response()
}
