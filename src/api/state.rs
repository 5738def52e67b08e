//! Application state for the Fee Waiver Eligibility Engine API.

use std::sync::Arc;

use crate::eligibility::EligibilityEngine;

/// Shared application state.
///
/// Holds the eligibility engine and its loaded configuration, shared across
/// all request handlers.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<EligibilityEngine>,
}

impl AppState {
    /// Creates a new application state around an engine.
    pub fn new(engine: EligibilityEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// Returns a reference to the eligibility engine.
    pub fn engine(&self) -> &EligibilityEngine {
        &self.engine
    }
}
