//! Income-based full fee waiver.
//!
//! Households at or below 150% of the poverty guideline for their size and
//! state qualify for a full waiver.

use rust_decimal::Decimal;

use crate::models::{AuditStep, EligibilityResult, FeeCategory, GoverningForm};

use super::context::{EvaluationContext, RuleOutcome};
use super::currency::{format_usd, format_usd_decimal};

/// Regulation for waivers based on household income.
pub const INCOME_WAIVER_CLAUSE: &str = "8 CFR 106.3(a)(1)(ii)";

/// Evidence of household income.
pub const INCOME_EVIDENCE: [&str; 4] = [
    "Most recent federal income tax transcript from the IRS",
    "Pay stubs covering the most recent three months",
    "Letter from employer stating current annual wages",
    "Other proof of income, such as Social Security, pension, or unemployment benefit statements",
];

/// Grants a full waiver when income is at or below 150% of the guideline.
///
/// The comparison is exact: an income equal to the threshold qualifies, and
/// a threshold with a half dollar is not rounded first.
///
/// # Arguments
///
/// * `ctx` - The household, pathway profile, and resolved thresholds
/// * `step_number` - The step number for audit trail sequencing
///
/// # Returns
///
/// A matched `RuleOutcome` with category `income_based` and Form I-912 whose
/// reason names the income and the threshold; otherwise a passed outcome.
///
/// # Regulation Reference
///
/// - 8 CFR 106.3(a)(1)(ii): household income at or below 150% of the
///   Federal Poverty Guidelines
///
/// # Examples
///
/// ```
/// use fee_waiver_engine::config::ConfigLoader;
/// use fee_waiver_engine::eligibility::{EvaluationContext, check_income_waiver};
/// use fee_waiver_engine::models::{GoverningForm, HouseholdProfile, PathwayId};
///
/// let loader = ConfigLoader::builtin().unwrap();
/// let household = HouseholdProfile::new(1, 15_000, "CA");
/// let ctx = EvaluationContext::new(
///     &household,
///     loader.pathway(PathwayId::NaturalizationStandard),
///     loader.config().guidelines(),
/// );
///
/// let result = check_income_waiver(&ctx, 5).decision.unwrap();
/// assert_eq!(result.governing_form, GoverningForm::I912);
/// assert!(result.reason.contains("($22,590)"));
/// ```
pub fn check_income_waiver(ctx: &EvaluationContext<'_>, step_number: u32) -> RuleOutcome {
    let household = ctx.household;
    let thresholds = ctx.thresholds;
    let income = Decimal::from(household.annual_income);
    let matched = income <= thresholds.threshold_150;

    let audit_step = AuditStep {
        step_number,
        rule_id: "income_waiver".to_string(),
        rule_name: "Income at or Below 150% FPG".to_string(),
        clause_ref: INCOME_WAIVER_CLAUSE.to_string(),
        input: serde_json::json!({
            "annual_income": household.annual_income,
            "household_size": household.size,
            "state_code": household.state_code,
            "band": thresholds.band,
            "guideline": thresholds.guideline
        }),
        output: serde_json::json!({
            "threshold_150": thresholds.threshold_150.normalize().to_string(),
            "matched": matched
        }),
        reasoning: format!(
            "{} {} {} (150% of {})",
            format_usd(household.annual_income),
            if matched { "<=" } else { ">" },
            format_usd_decimal(thresholds.threshold_150),
            format_usd(thresholds.guideline)
        ),
    };

    if !matched {
        return RuleOutcome::passed(audit_step);
    }

    let result = EligibilityResult {
        eligible: true,
        category: FeeCategory::IncomeBased,
        reason: format!(
            "Household income of {} is at or below 150% of the Federal Poverty Guidelines ({}) for a household of {}",
            format_usd(household.annual_income),
            format_usd_decimal(thresholds.threshold_150),
            household.size
        ),
        required_evidence: INCOME_EVIDENCE.iter().map(|s| s.to_string()).collect(),
        governing_form: GoverningForm::I912,
    };

    RuleOutcome::matched(result, audit_step)
}
