//! HTTP request handlers for the Fee Waiver Eligibility Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{AuditTrace, EligibilityAssessment, HouseholdProfile, normalize_state_code};

use super::request::{EligibilityRequest, GuidelineQuery};
use super::response::{ApiError, ApiErrorResponse, GuidelineResponse, PathwaysResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/eligibility", post(eligibility_handler))
        .route("/pathways", get(pathways_handler))
        .route("/guidelines", get(guidelines_handler))
        .with_state(state)
}

fn json_error(status: StatusCode, error: ApiError) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], Json(error)).into_response()
}

/// Handler for POST /eligibility endpoint.
///
/// Accepts a household and pathway and returns the eligibility assessment.
async fn eligibility_handler(
    State(state): State<AppState>,
    payload: Result<Json<EligibilityRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing eligibility request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
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
            return json_error(StatusCode::BAD_REQUEST, error);
        }
    };

    let pathway_id = request.pathway_id;
    let household: HouseholdProfile = request.household.into();

    if let Err(err) = household.validate() {
        warn!(
            correlation_id = %correlation_id,
            error = %err,
            "Household validation failed"
        );
        let api_error: ApiErrorResponse = err.into();
        return json_error(api_error.status, api_error.error);
    }

    let engine = state.engine();
    let (evaluation, duration_us) = engine.evaluate_timed(&household, pathway_id);
    let amount_due = engine.amount_due(pathway_id, &evaluation.result);

    info!(
        correlation_id = %correlation_id,
        pathway = %pathway_id,
        category = evaluation.result.category.as_str(),
        eligible = evaluation.result.eligible,
        amount_due,
        duration_us,
        "Eligibility assessment completed"
    );

    let assessment = EligibilityAssessment {
        assessment_id: correlation_id,
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        guideline_year: engine.config().metadata().year,
        pathway_id,
        result: evaluation.result,
        amount_due,
        audit_trace: AuditTrace {
            steps: evaluation.steps,
            warnings: evaluation.warnings,
            duration_us,
        },
    };

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(assessment),
    )
        .into_response()
}

/// Handler for GET /pathways endpoint.
async fn pathways_handler(State(state): State<AppState>) -> Response {
    let config = state.engine().config();
    let response = PathwaysResponse {
        year: config.metadata().year,
        effective_date: config.metadata().effective_date,
        pathways: config.fee_schedule().profiles().to_vec(),
    };

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(response),
    )
        .into_response()
}

/// Handler for GET /guidelines endpoint.
///
/// Returns the poverty guideline and both income thresholds for a household
/// size and state.
async fn guidelines_handler(
    State(state): State<AppState>,
    query: Result<Query<GuidelineQuery>, QueryRejection>,
) -> Response {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            let body_text = rejection.body_text();
            warn!(error = %body_text, "Invalid guideline query");
            return json_error(StatusCode::BAD_REQUEST, ApiError::invalid_query(body_text));
        }
    };

    let state_code = normalize_state_code(&query.state_code);
    let candidate = HouseholdProfile::new(query.household_size, 0, state_code.clone());
    if let Err(err) = candidate.validate() {
        warn!(error = %err, "Guideline query validation failed");
        let api_error: ApiErrorResponse = err.into();
        return json_error(api_error.status, api_error.error);
    }

    let engine = state.engine();
    let thresholds = engine.thresholds_for(query.household_size, &state_code);
    let response = GuidelineResponse {
        household_size: query.household_size,
        state_code,
        band: thresholds.band,
        guideline: thresholds.guideline,
        threshold_150: thresholds.threshold_150.normalize(),
        threshold_200: thresholds.threshold_200.normalize(),
        year: engine.config().metadata().year,
    };

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(response),
    )
        .into_response()
}
