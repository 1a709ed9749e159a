//! HTTP request handlers for the Policy Impact Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{calculate_policy_impact, compare_regimes};
use crate::error::EngineError;
use crate::models::HouseholdProfile;

use super::request::HouseholdRequest;
use super::response::{
    ApiError, ApiErrorResponse, ComparisonResponse, ImpactResponse, RegimeSummary,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/regimes", get(list_regimes_handler))
        .route("/regimes/:regime_id/impact", post(impact_handler))
        .route("/compare", post(compare_handler))
        .with_state(state)
}

/// Handler for GET /regimes.
async fn list_regimes_handler(State(state): State<AppState>) -> Response {
    let regimes: Vec<RegimeSummary> = state
        .registry()
        .regimes()
        .iter()
        .map(RegimeSummary::from)
        .collect();
    json_response(StatusCode::OK, &regimes)
}

/// Handler for POST /compare.
///
/// Evaluates every registered regime against the submitted household.
async fn compare_handler(
    State(state): State<AppState>,
    payload: Result<Json<HouseholdRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing comparison request");

    let profile = match parse_household(payload, correlation_id) {
        Ok(profile) => profile,
        Err(response) => return response,
    };

    let start_time = Instant::now();
    match compare_regimes(&profile, state.registry()) {
        Ok(comparison) => {
            info!(
                correlation_id = %correlation_id,
                regimes = comparison.reports.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Comparison completed successfully"
            );
            json_response(StatusCode::OK, &ComparisonResponse::from(comparison))
        }
        Err(err) => engine_error_response(err, correlation_id),
    }
}

/// Handler for POST /regimes/:regime_id/impact.
async fn impact_handler(
    State(state): State<AppState>,
    Path(regime_id): Path<String>,
    payload: Result<Json<HouseholdRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        regime = %regime_id,
        "Processing impact request"
    );

    let profile = match parse_household(payload, correlation_id) {
        Ok(profile) => profile,
        Err(response) => return response,
    };

    let start_time = Instant::now();
    let result = state
        .registry()
        .regime(&regime_id)
        .and_then(|regime| calculate_policy_impact(&profile, regime));

    match result {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                regime = %regime_id,
                tax_owed = %report.impact.tax_owed,
                child_credit = %report.impact.child_credit_amount,
                duration_us = start_time.elapsed().as_micros(),
                "Impact calculation completed successfully"
            );
            json_response(StatusCode::OK, &ImpactResponse::from(report))
        }
        Err(err) => engine_error_response(err, correlation_id),
    }
}

/// Converts the request body into a household profile, or an error response.
fn parse_household(
    payload: Result<Json<HouseholdRequest>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<HouseholdProfile, Response> {
    match payload {
        Ok(Json(request)) => Ok(request.into()),
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    // Missing fields and unknown filing statuses are input
                    // validation failures rather than malformed JSON.
                    if body_text.contains("missing field") || body_text.contains("unknown variant")
                    {
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
            Err(json_response(StatusCode::BAD_REQUEST, &error))
        }
    }
}

fn engine_error_response(err: EngineError, correlation_id: Uuid) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Calculation failed"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, &api_error.error)
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}
