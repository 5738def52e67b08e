//! Reduced fee tier.
//!
//! Pathways with a reduced fee (Form I-942) charge less to households whose
//! income is above 150% but at or below 200% of the poverty guideline.

use rust_decimal::Decimal;

use crate::models::{AuditStep, EligibilityResult, FeeCategory, GoverningForm};

use super::context::{EvaluationContext, RuleOutcome};
use super::currency::{format_usd, format_usd_decimal};

/// Regulation for the reduced naturalization fee.
pub const REDUCED_FEE_CLAUSE: &str = "8 CFR 106.2(b)(3)";

/// Evidence of household income for a reduced fee request.
pub const REDUCED_FEE_EVIDENCE: [&str; 3] = [
    "Most recent federal income tax transcript from the IRS",
    "Pay stubs covering the most recent three months",
    "Letter from employer or other documentation of annual household income",
];

/// Grants the reduced fee when income falls between 150% and 200% of the
/// guideline and the pathway offers a reduced tier.
///
/// # Arguments
///
/// * `ctx` - The household, pathway profile, and resolved thresholds
/// * `step_number` - The step number for audit trail sequencing
///
/// # Returns
///
/// A matched `RuleOutcome` with category `income_based` and Form I-942 whose
/// reason names the band and the reduced amount; otherwise a passed outcome.
/// Pathways without a reduced tier always pass.
///
/// # Regulation Reference
///
/// - 8 CFR 106.2(b)(3): reduced naturalization fee for household income
///   above 150% and at or below 200% of the Federal Poverty Guidelines
///
/// # Examples
///
/// ```
/// use fee_waiver_engine::config::ConfigLoader;
/// use fee_waiver_engine::eligibility::{EvaluationContext, check_reduced_fee};
/// use fee_waiver_engine::models::{GoverningForm, HouseholdProfile, PathwayId};
///
/// let loader = ConfigLoader::builtin().unwrap();
/// let household = HouseholdProfile::new(1, 25_000, "CA");
/// let guidelines = loader.config().guidelines();
///
/// let naturalization =
///     EvaluationContext::new(&household, loader.pathway(PathwayId::NaturalizationStandard), guidelines);
/// let result = check_reduced_fee(&naturalization, 7).decision.unwrap();
/// assert_eq!(result.governing_form, GoverningForm::I942);
///
/// let certificate =
///     EvaluationContext::new(&household, loader.pathway(PathwayId::CertificateN600), guidelines);
/// assert!(check_reduced_fee(&certificate, 7).decision.is_none());
/// ```
pub fn check_reduced_fee(ctx: &EvaluationContext<'_>, step_number: u32) -> RuleOutcome {
    let household = ctx.household;
    let pathway = ctx.pathway;
    let thresholds = ctx.thresholds;
    let income = Decimal::from(household.annual_income);
    let in_band = thresholds.threshold_150 < income && income <= thresholds.threshold_200;

    let reduced_fee = match pathway.reduced_fee_amount() {
        Some(amount) if in_band => amount,
        reduced => {
            let audit_step = AuditStep {
                step_number,
                rule_id: "reduced_fee".to_string(),
                rule_name: "Reduced Fee Tier".to_string(),
                clause_ref: REDUCED_FEE_CLAUSE.to_string(),
                input: serde_json::json!({
                    "pathway_id": pathway.pathway_id,
                    "reduced_fee_eligible": reduced.is_some(),
                    "annual_income": household.annual_income
                }),
                output: serde_json::json!({
                    "threshold_150": thresholds.threshold_150.normalize().to_string(),
                    "threshold_200": thresholds.threshold_200.normalize().to_string(),
                    "matched": false
                }),
                reasoning: if reduced.is_none() {
                    format!("Form {} has no reduced fee tier", pathway.form)
                } else {
                    format!(
                        "{} is outside the reduced fee band ({} - {})",
                        format_usd(household.annual_income),
                        format_usd_decimal(thresholds.threshold_150),
                        format_usd_decimal(thresholds.threshold_200)
                    )
                },
            };
            return RuleOutcome::passed(audit_step);
        }
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "reduced_fee".to_string(),
        rule_name: "Reduced Fee Tier".to_string(),
        clause_ref: REDUCED_FEE_CLAUSE.to_string(),
        input: serde_json::json!({
            "pathway_id": pathway.pathway_id,
            "reduced_fee_eligible": true,
            "annual_income": household.annual_income
        }),
        output: serde_json::json!({
            "threshold_150": thresholds.threshold_150.normalize().to_string(),
            "threshold_200": thresholds.threshold_200.normalize().to_string(),
            "reduced_fee": reduced_fee,
            "matched": true
        }),
        reasoning: format!(
            "{} < {} <= {}; reduced fee {} applies",
            format_usd_decimal(thresholds.threshold_150),
            format_usd(household.annual_income),
            format_usd_decimal(thresholds.threshold_200),
            format_usd(reduced_fee)
        ),
    };

    let result = EligibilityResult {
        eligible: true,
        category: FeeCategory::IncomeBased,
        reason: format!(
            "Household income of {} is between 150% ({}) and 200% ({}) of the Federal Poverty Guidelines for a household of {}; qualifies for the reduced fee of {}",
            format_usd(household.annual_income),
            format_usd_decimal(thresholds.threshold_150),
            format_usd_decimal(thresholds.threshold_200),
            household.size,
            format_usd(reduced_fee)
        ),
        required_evidence: REDUCED_FEE_EVIDENCE.iter().map(|s| s.to_string()).collect(),
        governing_form: GoverningForm::I942,
    };

    RuleOutcome::matched(result, audit_step)
}
