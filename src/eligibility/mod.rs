//! Eligibility logic for the Fee Waiver Eligibility Engine.
//!
//! This module contains the poverty guideline resolver, the currency
//! formatter used in reason strings, one module per cascade rule (military
//! exemption, waiver availability, means-tested benefits, homelessness,
//! income waiver, extraordinary expenses, reduced fee), the cascade that
//! orders them, and the amount-due calculation.

mod amount_due;
mod cascade;
mod context;
mod currency;
mod extraordinary_expenses;
mod homelessness;
mod income_waiver;
mod means_tested;
mod military_exemption;
mod poverty_guideline;
mod reduced_fee;
mod waiver_availability;

pub use amount_due::amount_due;
pub use cascade::{EligibilityEngine, evaluate_household};
pub use context::{EvaluationContext, RuleOutcome};
pub use currency::{format_usd, format_usd_decimal};
pub use extraordinary_expenses::{HARDSHIP_EVIDENCE, check_extraordinary_expenses};
pub use homelessness::{HARDSHIP_CLAUSE, HOMELESSNESS_EVIDENCE, check_homelessness};
pub use income_waiver::{INCOME_EVIDENCE, INCOME_WAIVER_CLAUSE, check_income_waiver};
pub use means_tested::{MEANS_TESTED_CLAUSE, MEANS_TESTED_EVIDENCE, check_means_tested_benefit};
pub use military_exemption::{
    MILITARY_EVIDENCE, MILITARY_EXEMPTION_CLAUSE, check_military_exemption,
};
pub use poverty_guideline::{
    GuidelineThresholds, full_waiver_multiplier, guideline_for, reduced_fee_multiplier,
    thresholds_for,
};
pub use reduced_fee::{REDUCED_FEE_CLAUSE, REDUCED_FEE_EVIDENCE, check_reduced_fee};
pub use waiver_availability::{WAIVER_AVAILABILITY_CLAUSE, check_waiver_availability};
