//! Eligibility result models for the Fee Waiver Eligibility Engine.
//!
//! This module contains the [`EligibilityResult`] produced by the decision
//! cascade, the audit records describing how it was reached, and the
//! [`EligibilityAssessment`] envelope returned over HTTP.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PathwayId;

/// The fee category a household falls into.
///
/// # Example
///
/// ```
/// use fee_waiver_engine::models::FeeCategory;
///
/// let category = FeeCategory::MeansTested;
/// assert_eq!(serde_json::to_string(&category).unwrap(), "\"means_tested\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeCategory {
    /// Receives a means-tested public benefit.
    MeansTested,
    /// Qualifies on household income alone (full waiver or reduced fee).
    IncomeBased,
    /// Qualifies through financial hardship or homelessness.
    Hardship,
    /// Exempt through qualifying military service.
    Military,
    /// Pays the full fee.
    NotEligible,
}

impl FeeCategory {
    /// Returns the wire name of this category.
    pub fn as_str(self) -> &'static str {
        match self {
            FeeCategory::MeansTested => "means_tested",
            FeeCategory::IncomeBased => "income_based",
            FeeCategory::Hardship => "hardship",
            FeeCategory::Military => "military",
            FeeCategory::NotEligible => "not_eligible",
        }
    }
}

/// The form that governs the fee outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GoverningForm {
    /// Form I-912, Request for Fee Waiver.
    #[serde(rename = "I-912")]
    I912,
    /// Form I-942, Request for Reduced Fee.
    #[serde(rename = "I-942")]
    I942,
    /// No form; the fee is exempt by military service.
    #[serde(rename = "N/A — military exemption")]
    MilitaryExemption,
    /// No form applies.
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl GoverningForm {
    /// Returns the form identifier as displayed to applicants.
    pub fn as_str(self) -> &'static str {
        match self {
            GoverningForm::I912 => "I-912",
            GoverningForm::I942 => "I-942",
            GoverningForm::MilitaryExemption => "N/A — military exemption",
            GoverningForm::NotApplicable => "N/A",
        }
    }
}

impl fmt::Display for GoverningForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome of running the eligibility cascade for one household.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityResult {
    /// Whether any fee relief applies.
    pub eligible: bool,
    /// The fee category the household falls into.
    pub category: FeeCategory,
    /// Human-readable justification, embedding the figures compared.
    pub reason: String,
    /// Evidence the applicant must submit, in order.
    pub required_evidence: Vec<String>,
    /// The form that governs the outcome.
    pub governing_form: GoverningForm,
}

/// A single step in the audit trace recording a cascade decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Reference to the statute or regulation for this rule.
    pub clause_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during evaluation.
///
/// Warnings flag inputs the engine accepted permissively but a reviewer
/// may want to double-check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for an assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of cascade steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during evaluation.
    pub warnings: Vec<AuditWarning>,
    /// The total evaluation duration in microseconds.
    pub duration_us: u64,
}

/// The result of the cascade together with the steps that produced it.
///
/// Deterministic: evaluating the same household twice yields equal values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityEvaluation {
    /// The eligibility outcome.
    pub result: EligibilityResult,
    /// One step per rule consulted, in cascade order.
    pub steps: Vec<AuditStep>,
    /// Warnings about permissively handled input.
    pub warnings: Vec<AuditWarning>,
}

/// The complete response for an eligibility request.
///
/// # Example
///
/// ```
/// use fee_waiver_engine::models::{
///     AuditTrace, EligibilityAssessment, EligibilityResult, FeeCategory, GoverningForm,
///     PathwayId,
/// };
/// use chrono::Utc;
/// use uuid::Uuid;
///
/// let assessment = EligibilityAssessment {
///     assessment_id: Uuid::new_v4(),
///     timestamp: Utc::now(),
///     engine_version: "0.1.0".to_string(),
///     guideline_year: 2024,
///     pathway_id: PathwayId::NaturalizationStandard,
///     result: EligibilityResult {
///         eligible: false,
///         category: FeeCategory::NotEligible,
///         reason: "Household income exceeds 200% of the guideline".to_string(),
///         required_evidence: vec![],
///         governing_form: GoverningForm::NotApplicable,
///     },
///     amount_due: 760,
///     audit_trace: AuditTrace {
///         steps: vec![],
///         warnings: vec![],
///         duration_us: 0,
///     },
/// };
/// assert_eq!(assessment.amount_due, 760);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityAssessment {
    /// Unique identifier for this assessment.
    pub assessment_id: Uuid,
    /// When the assessment was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the assessment.
    pub engine_version: String,
    /// The poverty guideline year used.
    pub guideline_year: u16,
    /// The pathway the household applied for.
    pub pathway_id: PathwayId,
    /// The eligibility outcome.
    pub result: EligibilityResult,
    /// The fee the applicant pays after any relief, in whole dollars.
    pub amount_due: u32,
    /// Complete audit trace of cascade decisions.
    pub audit_trace: AuditTrace,
}
