//! Means-tested benefit waiver.
//!
//! A household receiving SSI, TANF, SNAP, or Medicaid qualifies for a full
//! fee waiver regardless of its reported income.

use crate::models::{AuditStep, EligibilityResult, FeeCategory, GoverningForm};

use super::context::{EvaluationContext, RuleOutcome};

/// Regulation for waivers based on means-tested benefits.
pub const MEANS_TESTED_CLAUSE: &str = "8 CFR 106.3(a)(1)(i)";

/// Evidence of benefit receipt.
pub const MEANS_TESTED_EVIDENCE: [&str; 2] = [
    "Benefit award or verification letter showing receipt of the means-tested benefit, dated within the last 12 months",
    "If no letter is available, equivalent official documentation such as a current benefit notice or case record",
];

/// Grants a full waiver when the household receives a means-tested benefit.
///
/// Only SSI, TANF, Medicaid, and SNAP qualify. Income is not compared, so a
/// household above 200% of the guideline still matches here.
///
/// # Arguments
///
/// * `ctx` - The household, pathway profile, and resolved thresholds
/// * `step_number` - The step number for audit trail sequencing
///
/// # Returns
///
/// A matched `RuleOutcome` with category `means_tested` and Form I-912, whose
/// reason lists the qualifying benefits; otherwise a passed outcome.
///
/// # Regulation Reference
///
/// - 8 CFR 106.3(a)(1)(i): receipt of a means-tested benefit
pub fn check_means_tested_benefit(ctx: &EvaluationContext<'_>, step_number: u32) -> RuleOutcome {
    let household = ctx.household;
    let qualifying = household.means_tested_benefits();
    let names: Vec<&str> = qualifying.iter().map(|b| b.label()).collect();
    let reported: Vec<&str> = household.benefit_flags.iter().map(|b| b.as_str()).collect();

    let audit_step = AuditStep {
        step_number,
        rule_id: "means_tested_benefit".to_string(),
        rule_name: "Means-Tested Benefit".to_string(),
        clause_ref: MEANS_TESTED_CLAUSE.to_string(),
        input: serde_json::json!({ "benefit_flags": reported }),
        output: serde_json::json!({
            "matched": !qualifying.is_empty(),
            "qualifying_benefits": names
        }),
        reasoning: if qualifying.is_empty() {
            "No means-tested benefit reported".to_string()
        } else {
            format!("Household receives {}", names.join(", "))
        },
    };

    if qualifying.is_empty() {
        return RuleOutcome::passed(audit_step);
    }

    let result = EligibilityResult {
        eligible: true,
        category: FeeCategory::MeansTested,
        reason: format!(
            "Household receives a means-tested benefit ({}), which qualifies for a full fee waiver",
            names.join(", ")
        ),
        required_evidence: MEANS_TESTED_EVIDENCE.iter().map(|s| s.to_string()).collect(),
        governing_form: GoverningForm::I912,
    };

    RuleOutcome::matched(result, audit_step)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eligibility::test_support::{certificate_profile, create_test_guidelines};
    use crate::models::{BenefitSource, HouseholdProfile};

    #[test]
    fn test_snap_household_gets_waiver_regardless_of_income() {
        let guidelines = create_test_guidelines();
        let pathway = certificate_profile();
        let mut household = HouseholdProfile::new(2, 250_000, "AK");
        household.benefit_flags.insert(BenefitSource::Snap);

        let ctx = EvaluationContext::new(&household, &pathway, &guidelines);
        let outcome = check_means_tested_benefit(&ctx, 3);

        let result = outcome.decision.unwrap();
        assert!(result.eligible);
        assert_eq!(result.category, FeeCategory::MeansTested);
        assert_eq!(result.governing_form, GoverningForm::I912);
        assert!(result.reason.contains("SNAP"));
        assert!(result.required_evidence[0].contains("12 months"));
    }

    #[test]
    fn test_multiple_benefits_are_listed_in_reason() {
        let guidelines = create_test_guidelines();
        let pathway = certificate_profile();
        let mut household = HouseholdProfile::new(2, 0, "CA");
        household.benefit_flags.insert(BenefitSource::Medicaid);
        household.benefit_flags.insert(BenefitSource::Ssi);

        let ctx = EvaluationContext::new(&household, &pathway, &guidelines);
        let outcome = check_means_tested_benefit(&ctx, 3);

        assert!(outcome.decision.unwrap().reason.contains("SSI, Medicaid"));
        assert_eq!(
            outcome.audit_step.output["qualifying_benefits"],
            serde_json::json!(["SSI", "Medicaid"])
        );
    }

    #[test]
    fn test_inert_benefits_pass() {
        let guidelines = create_test_guidelines();
        let pathway = certificate_profile();
        let mut household = HouseholdProfile::new(1, 10_000, "CA");
        household.benefit_flags.insert(BenefitSource::Employment);
        household.benefit_flags.insert(BenefitSource::Unemployment);
        household.benefit_flags.insert(BenefitSource::SocialSecurity);

        let ctx = EvaluationContext::new(&household, &pathway, &guidelines);
        let outcome = check_means_tested_benefit(&ctx, 3);

        assert!(outcome.decision.is_none());
        assert_eq!(outcome.audit_step.reasoning, "No means-tested benefit reported");
    }
}
