//! The eligibility decision cascade.
//!
//! Rules run in a fixed order and the first one that matches decides the
//! household. Categorical checks (military service, benefits, homelessness)
//! come before income comparisons, and the reduced fee tier is tried only
//! after every full-relief path has failed. If nothing matches, the household
//! pays the full fee.

use std::time::Instant;

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::{ConfigLoader, EngineConfig, PovertyGuidelines};
use crate::error::EngineResult;
use crate::models::{
    AuditStep, AuditWarning, EligibilityEvaluation, EligibilityResult, FeeCategory, GoverningForm,
    HouseholdProfile, PathwayFeeProfile, PathwayId, is_recognized_state_code,
};

use super::amount_due::amount_due;
use super::context::{EvaluationContext, RuleOutcome};
use super::currency::{format_usd, format_usd_decimal};
use super::extraordinary_expenses::check_extraordinary_expenses;
use super::homelessness::check_homelessness;
use super::income_waiver::check_income_waiver;
use super::means_tested::check_means_tested_benefit;
use super::military_exemption::check_military_exemption;
use super::poverty_guideline::{GuidelineThresholds, guideline_for, thresholds_for};
use super::reduced_fee::{REDUCED_FEE_CLAUSE, check_reduced_fee};
use super::waiver_availability::check_waiver_availability;

type Rule = fn(&EvaluationContext<'_>, u32) -> RuleOutcome;

/// Cascade rules in evaluation order. The full-fee fallback follows them.
const CASCADE: [Rule; 7] = [
    check_military_exemption,
    check_waiver_availability,
    check_means_tested_benefit,
    check_homelessness,
    check_income_waiver,
    check_extraordinary_expenses,
    check_reduced_fee,
];

/// Runs the cascade for one household against one pathway profile.
///
/// Rules run in order and the first match wins: military exemption, waiver
/// availability, means-tested benefit, homelessness, income waiver,
/// extraordinary expenses, reduced fee. When none matches the full fee is
/// due.
///
/// Pure: the same inputs always produce an equal [`EligibilityEvaluation`].
/// Every input is accepted; unrecognized state codes use the continental
/// band and are flagged with an `UNRECOGNIZED_STATE_CODE` warning.
///
/// # Arguments
///
/// * `household` - The household being evaluated
/// * `pathway` - The fee profile of the target pathway
/// * `guidelines` - The poverty guideline tables
///
/// # Returns
///
/// The result plus one audit step per rule consulted, numbered from 1, and
/// any warnings raised along the way.
///
/// # Examples
///
/// ```
/// use fee_waiver_engine::config::ConfigLoader;
/// use fee_waiver_engine::eligibility::evaluate_household;
/// use fee_waiver_engine::models::{FeeCategory, HouseholdProfile, PathwayId};
///
/// let loader = ConfigLoader::builtin().unwrap();
/// let household = HouseholdProfile::new(1, 40_000, "CA");
///
/// let evaluation = evaluate_household(
///     &household,
///     loader.pathway(PathwayId::NaturalizationStandard),
///     loader.config().guidelines(),
/// );
///
/// assert_eq!(evaluation.result.category, FeeCategory::NotEligible);
/// assert_eq!(evaluation.steps.len(), 8);
/// assert_eq!(evaluation.steps[7].rule_id, "full_fee");
/// ```
pub fn evaluate_household(
    household: &HouseholdProfile,
    pathway: &PathwayFeeProfile,
    guidelines: &PovertyGuidelines,
) -> EligibilityEvaluation {
    let ctx = EvaluationContext::new(household, pathway, guidelines);
    let mut steps: Vec<AuditStep> = Vec::with_capacity(CASCADE.len() + 1);
    let mut warnings: Vec<AuditWarning> = Vec::new();

    if !is_recognized_state_code(&household.state_code) {
        warnings.push(AuditWarning {
            code: "UNRECOGNIZED_STATE_CODE".to_string(),
            message: format!(
                "State code '{}' is not recognized; using the continental poverty guidelines",
                household.state_code
            ),
            severity: "low".to_string(),
        });
    }

    for (index, rule) in CASCADE.iter().enumerate() {
        let outcome = rule(&ctx, index as u32 + 1);
        let rule_id = outcome.audit_step.rule_id.clone();
        steps.push(outcome.audit_step);
        warnings.extend(outcome.warnings);

        if let Some(result) = outcome.decision {
            debug!(
                pathway = %pathway.pathway_id,
                rule = %rule_id,
                category = result.category.as_str(),
                eligible = result.eligible,
                "Eligibility decided"
            );
            return EligibilityEvaluation {
                result,
                steps,
                warnings,
            };
        }
    }

    let (result, audit_step) = full_fee_fallback(&ctx, steps.len() as u32 + 1);
    steps.push(audit_step);
    debug!(
        pathway = %pathway.pathway_id,
        rule = "full_fee",
        category = result.category.as_str(),
        eligible = result.eligible,
        "Eligibility decided"
    );

    EligibilityEvaluation {
        result,
        steps,
        warnings,
    }
}

/// The outcome when no relief applies.
fn full_fee_fallback(
    ctx: &EvaluationContext<'_>,
    step_number: u32,
) -> (EligibilityResult, AuditStep) {
    let household = ctx.household;
    let pathway = ctx.pathway;
    let thresholds: GuidelineThresholds = ctx.thresholds;
    let income = Decimal::from(household.annual_income);

    let reason = if income > thresholds.threshold_200 {
        format!(
            "Household income of {} exceeds 200% of the Federal Poverty Guidelines ({}) for a household of {}",
            format_usd(household.annual_income),
            format_usd_decimal(thresholds.threshold_200),
            household.size
        )
    } else {
        format!(
            "Household income of {} exceeds 150% of the Federal Poverty Guidelines ({}) for a household of {}, and Form {} has no reduced fee option",
            format_usd(household.annual_income),
            format_usd_decimal(thresholds.threshold_150),
            household.size,
            pathway.form
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "full_fee".to_string(),
        rule_name: "Full Fee".to_string(),
        clause_ref: REDUCED_FEE_CLAUSE.to_string(),
        input: serde_json::json!({
            "pathway_id": pathway.pathway_id,
            "annual_income": household.annual_income,
            "base_fee": pathway.base_fee()
        }),
        output: serde_json::json!({
            "threshold_200": thresholds.threshold_200.normalize().to_string(),
            "eligible": false
        }),
        reasoning: format!(
            "No relief applies; full fee of {} is due",
            format_usd(pathway.base_fee())
        ),
    };

    let result = EligibilityResult {
        eligible: false,
        category: FeeCategory::NotEligible,
        reason,
        required_evidence: Vec::new(),
        governing_form: GoverningForm::NotApplicable,
    };

    (result, audit_step)
}

/// The eligibility engine over a loaded fee schedule and guideline tables.
///
/// # Example
///
/// ```
/// use fee_waiver_engine::eligibility::EligibilityEngine;
/// use fee_waiver_engine::models::{FeeCategory, HouseholdProfile, PathwayId};
///
/// let engine = EligibilityEngine::builtin().unwrap();
/// let household = HouseholdProfile::new(1, 15_000, "CA");
///
/// let result = engine.evaluate(&household, PathwayId::NaturalizationStandard);
/// assert_eq!(result.category, FeeCategory::IncomeBased);
/// ```
#[derive(Debug, Clone)]
pub struct EligibilityEngine {
    config: EngineConfig,
}

impl EligibilityEngine {
    /// Creates an engine over the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Creates an engine over the compiled-in configuration.
    pub fn builtin() -> EngineResult<Self> {
        Ok(Self::from(ConfigLoader::builtin()?))
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the fee profile for a pathway.
    pub fn pathway(&self, pathway_id: PathwayId) -> &PathwayFeeProfile {
        self.config.fee_schedule().profile(pathway_id)
    }

    /// Returns the annual poverty guideline for a household size and state.
    pub fn guideline_for(&self, household_size: u32, state_code: &str) -> u64 {
        guideline_for(self.config.guidelines(), household_size, state_code)
    }

    /// Returns the guideline and the 150% and 200% thresholds.
    pub fn thresholds_for(&self, household_size: u32, state_code: &str) -> GuidelineThresholds {
        thresholds_for(self.config.guidelines(), household_size, state_code)
    }

    /// Classifies a household for a pathway.
    pub fn evaluate(&self, household: &HouseholdProfile, pathway_id: PathwayId) -> EligibilityResult {
        self.evaluate_with_trace(household, pathway_id).result
    }

    /// Classifies a household and returns the audit steps behind the result.
    pub fn evaluate_with_trace(
        &self,
        household: &HouseholdProfile,
        pathway_id: PathwayId,
    ) -> EligibilityEvaluation {
        evaluate_household(
            household,
            self.pathway(pathway_id),
            self.config.guidelines(),
        )
    }

    /// Returns the fee owed for a pathway given an eligibility result.
    pub fn amount_due(&self, pathway_id: PathwayId, result: &EligibilityResult) -> u32 {
        amount_due(self.pathway(pathway_id), result)
    }

    /// Evaluates and measures the cascade, for callers that report timing.
    pub fn evaluate_timed(
        &self,
        household: &HouseholdProfile,
        pathway_id: PathwayId,
    ) -> (EligibilityEvaluation, u64) {
        let start = Instant::now();
        let evaluation = self.evaluate_with_trace(household, pathway_id);
        (evaluation, start.elapsed().as_micros() as u64)
    }
}

impl From<ConfigLoader> for EligibilityEngine {
    fn from(loader: ConfigLoader) -> Self {
        Self::new(loader.into_config())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eligibility::test_support::{
        certificate_profile, create_test_guidelines, military_profile, naturalization_profile,
    };
    use crate::models::{BenefitSource, MilitaryStatus};

    fn rule_ids(evaluation: &EligibilityEvaluation) -> Vec<&str> {
        evaluation
            .steps
            .iter()
            .map(|s| s.rule_id.as_str())
            .collect()
    }

    #[test]
    fn test_military_exemption_is_first_and_only_step() {
        let guidelines = create_test_guidelines();
        let pathway = military_profile();
        let mut household = HouseholdProfile::new(1, 1_000_000, "CA");
        household.military_status = MilitaryStatus::Active;

        let evaluation = evaluate_household(&household, &pathway, &guidelines);

        assert_eq!(evaluation.result.category, FeeCategory::Military);
        assert_eq!(rule_ids(&evaluation), vec!["military_exemption"]);
        assert_eq!(evaluation.steps[0].step_number, 1);
    }

    #[test]
    fn test_civilian_on_military_pathway_stops_at_waiver_availability() {
        let guidelines = create_test_guidelines();
        let pathway = military_profile();
        let mut household = HouseholdProfile::new(1, 0, "CA");
        household.benefit_flags.insert(BenefitSource::Snap);
        household.is_homeless = true;

        let evaluation = evaluate_household(&household, &pathway, &guidelines);

        assert!(!evaluation.result.eligible);
        assert_eq!(evaluation.result.category, FeeCategory::NotEligible);
        assert_eq!(
            rule_ids(&evaluation),
            vec!["military_exemption", "waiver_availability"]
        );
    }

    #[test]
    fn test_means_tested_beats_homelessness_and_income() {
        let guidelines = create_test_guidelines();
        let pathway = naturalization_profile();
        let mut household = HouseholdProfile::new(1, 5_000, "CA");
        household.benefit_flags.insert(BenefitSource::Tanf);
        household.is_homeless = true;

        let evaluation = evaluate_household(&household, &pathway, &guidelines);

        assert_eq!(evaluation.result.category, FeeCategory::MeansTested);
        assert_eq!(evaluation.steps.len(), 3);
    }

    #[test]
    fn test_homelessness_beats_income() {
        let guidelines = create_test_guidelines();
        let pathway = naturalization_profile();
        let mut household = HouseholdProfile::new(1, 5_000, "CA");
        household.is_homeless = true;

        let evaluation = evaluate_household(&household, &pathway, &guidelines);
        assert_eq!(evaluation.result.category, FeeCategory::Hardship);
        assert_eq!(evaluation.steps.last().unwrap().rule_id, "homelessness");
    }

    #[test]
    fn test_plain_income_checked_before_expenses() {
        let guidelines = create_test_guidelines();
        let pathway = naturalization_profile();
        let mut household = HouseholdProfile::new(1, 10_000, "CA");
        household.has_extraordinary_expenses = true;
        household.extraordinary_expense_amount = Some(5_000);

        let evaluation = evaluate_household(&household, &pathway, &guidelines);
        assert_eq!(evaluation.result.category, FeeCategory::IncomeBased);
        assert_eq!(evaluation.result.governing_form, GoverningForm::I912);
    }

    #[test]
    fn test_expenses_beat_reduced_fee() {
        let guidelines = create_test_guidelines();
        let pathway = naturalization_profile();
        let mut household = HouseholdProfile::new(1, 25_000, "CA");
        household.has_extraordinary_expenses = true;
        household.extraordinary_expense_amount = Some(5_000);

        let evaluation = evaluate_household(&household, &pathway, &guidelines);
        assert_eq!(evaluation.result.category, FeeCategory::Hardship);
        assert_eq!(evaluation.result.governing_form, GoverningForm::I912);
    }

    #[test]
    fn test_reduced_fee_when_expenses_insufficient() {
        let guidelines = create_test_guidelines();
        let pathway = naturalization_profile();
        let mut household = HouseholdProfile::new(1, 25_000, "CA");
        household.has_extraordinary_expenses = true;
        household.extraordinary_expense_amount = Some(1_000);

        let evaluation = evaluate_household(&household, &pathway, &guidelines);
        assert_eq!(evaluation.result.governing_form, GoverningForm::I942);
        assert_eq!(evaluation.steps.len(), 7);
    }

    #[test]
    fn test_fallback_above_200_percent() {
        let guidelines = create_test_guidelines();
        let pathway = naturalization_profile();
        let household = HouseholdProfile::new(1, 40_000, "CA");

        let evaluation = evaluate_household(&household, &pathway, &guidelines);

        assert!(!evaluation.result.eligible);
        assert_eq!(evaluation.result.category, FeeCategory::NotEligible);
        assert_eq!(evaluation.result.governing_form, GoverningForm::NotApplicable);
        assert_eq!(
            evaluation.result.reason,
            "Household income of $40,000 exceeds 200% of the Federal Poverty Guidelines ($30,120) for a household of 1"
        );
        assert!(evaluation.result.required_evidence.is_empty());
        assert_eq!(evaluation.steps.len(), 8);
        assert_eq!(evaluation.steps[7].rule_id, "full_fee");
        assert_eq!(evaluation.steps[7].step_number, 8);
    }

    #[test]
    fn test_fallback_in_band_without_reduced_tier() {
        let guidelines = create_test_guidelines();
        let pathway = certificate_profile();
        let household = HouseholdProfile::new(1, 25_000, "CA");

        let evaluation = evaluate_household(&household, &pathway, &guidelines);

        assert_eq!(evaluation.result.category, FeeCategory::NotEligible);
        assert_eq!(
            evaluation.result.reason,
            "Household income of $25,000 exceeds 150% of the Federal Poverty Guidelines ($22,590) for a household of 1, and Form N-600 has no reduced fee option"
        );
        assert_eq!(evaluation.steps.last().unwrap().rule_id, "full_fee");
    }

    #[test]
    fn test_unrecognized_state_is_flagged_but_evaluated() {
        let guidelines = create_test_guidelines();
        let pathway = naturalization_profile();
        let household = HouseholdProfile::new(1, 15_000, "ZZ");

        let evaluation = evaluate_household(&household, &pathway, &guidelines);

        assert_eq!(evaluation.result.category, FeeCategory::IncomeBased);
        assert_eq!(evaluation.warnings.len(), 1);
        assert_eq!(evaluation.warnings[0].code, "UNRECOGNIZED_STATE_CODE");
    }

    #[test]
    fn test_step_numbers_are_sequential() {
        let guidelines = create_test_guidelines();
        let pathway = naturalization_profile();
        let household = HouseholdProfile::new(1, 40_000, "CA");

        let evaluation = evaluate_household(&household, &pathway, &guidelines);
        for (i, step) in evaluation.steps.iter().enumerate() {
            assert_eq!(step.step_number, i as u32 + 1);
        }
    }

    #[test]
    fn test_engine_amount_due_uses_pathway_fee() {
        let engine = EligibilityEngine::builtin().unwrap();
        let household = HouseholdProfile::new(1, 40_000, "CA");

        let result = engine.evaluate(&household, PathwayId::ReplacementN565);
        assert_eq!(engine.amount_due(PathwayId::ReplacementN565, &result), 555);
    }

    #[test]
    fn test_engine_evaluate_matches_trace_result() {
        let engine = EligibilityEngine::builtin().unwrap();
        let household = HouseholdProfile::new(3, 35_000, "HI");

        let result = engine.evaluate(&household, PathwayId::NaturalizationSpouse);
        let evaluation = engine.evaluate_with_trace(&household, PathwayId::NaturalizationSpouse);
        assert_eq!(result, evaluation.result);
    }
}
