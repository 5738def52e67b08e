//! Core data models for the Fee Waiver Eligibility Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod eligibility_result;
mod household;
mod pathway;
mod region;

pub use eligibility_result::{
    AuditStep, AuditTrace, AuditWarning, EligibilityAssessment, EligibilityEvaluation,
    EligibilityResult, FeeCategory, GoverningForm,
};
pub use household::{BenefitSource, HouseholdProfile, MilitaryStatus};
pub use pathway::{FeeTreatment, PathwayFeeProfile, PathwayId};
pub use region::{
    GeographicBand, RECOGNIZED_STATE_CODES, is_recognized_state_code, normalize_state_code,
};
