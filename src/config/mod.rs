//! Configuration loading and management for the Fee Waiver Eligibility Engine.
//!
//! This module loads the pathway fee schedule and the HHS poverty guideline
//! tables from YAML, either from a directory or from the copy compiled into
//! the crate.
//!
//! # Example
//!
//! ```no_run
//! use fee_waiver_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/fy2024").unwrap();
//! println!("Guideline year: {}", config.metadata().year);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    BandGuideline, BandGuidelineConfig, EngineConfig, FeeSchedule, FeeScheduleConfig,
    GuidelineMetadata, PovertyGuidelineConfig, PovertyGuidelines, TABULATED_HOUSEHOLD_SIZES,
};
