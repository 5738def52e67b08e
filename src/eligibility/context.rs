//! Shared inputs and outputs for cascade rules.

use crate::config::PovertyGuidelines;
use crate::models::{AuditStep, AuditWarning, EligibilityResult, HouseholdProfile, PathwayFeeProfile};

use super::poverty_guideline::{GuidelineThresholds, thresholds_for};

/// Everything a cascade rule needs to decide on one household.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationContext<'a> {
    /// The household being evaluated.
    pub household: &'a HouseholdProfile,
    /// The fee profile of the target pathway.
    pub pathway: &'a PathwayFeeProfile,
    /// The household's poverty guideline and thresholds.
    pub thresholds: GuidelineThresholds,
}

impl<'a> EvaluationContext<'a> {
    /// Resolves thresholds for the household and bundles the inputs.
    pub fn new(
        household: &'a HouseholdProfile,
        pathway: &'a PathwayFeeProfile,
        guidelines: &PovertyGuidelines,
    ) -> Self {
        Self {
            household,
            pathway,
            thresholds: thresholds_for(guidelines, household.size, &household.state_code),
        }
    }
}

/// The outcome of one cascade rule.
///
/// `decision` is `Some` when the rule matched and ends the cascade.
#[derive(Debug, Clone)]
pub struct RuleOutcome {
    /// The result, if this rule decided the household.
    pub decision: Option<EligibilityResult>,
    /// The audit step recording this rule.
    pub audit_step: AuditStep,
    /// Warnings raised while applying this rule.
    pub warnings: Vec<AuditWarning>,
}

impl RuleOutcome {
    /// A rule that decided the household.
    pub fn matched(result: EligibilityResult, audit_step: AuditStep) -> Self {
        Self {
            decision: Some(result),
            audit_step,
            warnings: Vec::new(),
        }
    }

    /// A rule that did not apply; the cascade continues.
    pub fn passed(audit_step: AuditStep) -> Self {
        Self {
            decision: None,
            audit_step,
            warnings: Vec::new(),
        }
    }

    /// Attaches a warning to this outcome.
    pub fn with_warning(mut self, warning: AuditWarning) -> Self {
        self.warnings.push(warning);
        self
    }
}
