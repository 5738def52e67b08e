//! Fee Waiver Eligibility Engine for USCIS citizenship and immigration forms
//!
//! This crate classifies a household as fee-exempt, fully waived, eligible for
//! a reduced fee, or liable for the full fee on a given application pathway,
//! using the HHS poverty guidelines and the USCIS fee schedule.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod eligibility;
pub mod error;
pub mod models;
pub mod telemetry;
