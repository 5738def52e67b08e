//! Error types for the Fee Waiver Eligibility Engine.
//!
//! The eligibility cascade itself is total and never fails. Errors only arise
//! while loading configuration or validating inbound household data.

use thiserror::Error;

/// The main error type for the Fee Waiver Eligibility Engine.
///
/// # Example
///
/// ```
/// use fee_waiver_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/pathways.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/pathways.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but is structurally incomplete or inconsistent.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of what is wrong with the configuration.
        message: String,
    },

    /// A household profile field failed validation.
    #[error("Invalid household field '{field}': {message}")]
    InvalidHousehold {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
