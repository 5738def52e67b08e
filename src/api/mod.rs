//! HTTP API module for the Fee Waiver Eligibility Engine.
//!
//! This module provides the REST API endpoints for assessing fee waiver
//! eligibility and inspecting the loaded fee schedule and poverty guidelines.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{EligibilityRequest, GuidelineQuery, HouseholdRequest};
pub use response::{ApiError, GuidelineResponse, PathwaysResponse};
pub use state::AppState;
