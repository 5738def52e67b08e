//! Military fee exemption.
//!
//! Applicants naturalizing through military service under INA 328 or 329 pay
//! no filing fee. The exemption is a separate mechanism from a fee waiver, so
//! it is checked before anything else.

use crate::models::{AuditStep, EligibilityResult, FeeCategory, GoverningForm};

use super::context::{EvaluationContext, RuleOutcome};

/// Statutory basis for the military exemption.
pub const MILITARY_EXEMPTION_CLAUSE: &str = "INA 328(b)(4); INA 329(b)(4)";

/// Evidence submitted with a military-exempt application.
pub const MILITARY_EVIDENCE: [&str; 3] = [
    "Form N-426, Request for Certification of Military or Naval Service",
    "Form DD-214 or other discharge documents (if separated from service)",
    "Copy of military ID (if currently serving on active duty)",
];

/// Checks whether qualifying military service exempts the household.
///
/// Matches when the pathway is military-exempt and the applicant is active
/// duty or a veteran. Income, benefits, and hardship are not consulted.
///
/// # Arguments
///
/// * `ctx` - The household, pathway profile, and resolved thresholds
/// * `step_number` - The step number for audit trail sequencing
///
/// # Returns
///
/// A matched `RuleOutcome` with category `military` and no governing form
/// when the exemption applies; otherwise a passed outcome.
///
/// # Regulation Reference
///
/// - INA 328(b)(4): no fee for naturalization through peacetime service
/// - INA 329(b)(4): no fee for naturalization through wartime service
///
/// # Examples
///
/// ```
/// use fee_waiver_engine::config::ConfigLoader;
/// use fee_waiver_engine::eligibility::{EvaluationContext, check_military_exemption};
/// use fee_waiver_engine::models::{FeeCategory, HouseholdProfile, MilitaryStatus, PathwayId};
///
/// let loader = ConfigLoader::builtin().unwrap();
/// let mut household = HouseholdProfile::new(1, 1_000_000, "VA");
/// household.military_status = MilitaryStatus::Active;
///
/// let ctx = EvaluationContext::new(
///     &household,
///     loader.pathway(PathwayId::NaturalizationMilitaryPeacetime),
///     loader.config().guidelines(),
/// );
/// let outcome = check_military_exemption(&ctx, 1);
///
/// assert_eq!(outcome.decision.unwrap().category, FeeCategory::Military);
/// ```
pub fn check_military_exemption(ctx: &EvaluationContext<'_>, step_number: u32) -> RuleOutcome {
    let household = ctx.household;
    let pathway = ctx.pathway;
    let matched = pathway.military_exempt() && household.has_military_service();

    let audit_step = AuditStep {
        step_number,
        rule_id: "military_exemption".to_string(),
        rule_name: "Military Exemption".to_string(),
        clause_ref: MILITARY_EXEMPTION_CLAUSE.to_string(),
        input: serde_json::json!({
            "pathway_id": pathway.pathway_id,
            "pathway_military_exempt": pathway.military_exempt(),
            "military_status": household.military_status.as_str()
        }),
        output: serde_json::json!({ "matched": matched }),
        reasoning: if matched {
            format!(
                "{} applicant filing for {} is exempt from the filing fee",
                capitalize(household.military_status.as_str()),
                pathway.name
            )
        } else if pathway.military_exempt() {
            "Pathway is military-exempt but applicant has no qualifying service".to_string()
        } else {
            format!("Pathway {} has no military exemption", pathway.pathway_id)
        },
    };

    if !matched {
        return RuleOutcome::passed(audit_step);
    }

    let result = EligibilityResult {
        eligible: true,
        category: FeeCategory::Military,
        reason: format!(
            "Qualifying military service ({}) exempts {} applicants from the Form {} filing fee",
            household.military_status.as_str(),
            pathway.name,
            pathway.form
        ),
        required_evidence: MILITARY_EVIDENCE.iter().map(|s| s.to_string()).collect(),
        governing_form: GoverningForm::MilitaryExemption,
    };

    RuleOutcome::matched(result, audit_step)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eligibility::test_support::{
        create_test_guidelines, military_profile, naturalization_profile,
    };
    use crate::models::{HouseholdProfile, MilitaryStatus};

    #[test]
    fn test_active_duty_on_military_pathway_is_exempt() {
        let guidelines = create_test_guidelines();
        let pathway = military_profile();
        let mut household = HouseholdProfile::new(1, 1_000_000, "CA");
        household.military_status = MilitaryStatus::Active;

        let ctx = EvaluationContext::new(&household, &pathway, &guidelines);
        let outcome = check_military_exemption(&ctx, 1);

        let result = outcome.decision.expect("rule should match");
        assert!(result.eligible);
        assert_eq!(result.category, FeeCategory::Military);
        assert_eq!(result.governing_form, GoverningForm::MilitaryExemption);
        assert_eq!(result.required_evidence.len(), 3);
        assert_eq!(outcome.audit_step.rule_id, "military_exemption");
        assert_eq!(outcome.audit_step.output["matched"], true);
        assert!(outcome.audit_step.reasoning.starts_with("Active applicant"));
    }

    #[test]
    fn test_veteran_on_military_pathway_is_exempt() {
        let guidelines = create_test_guidelines();
        let pathway = military_profile();
        let mut household = HouseholdProfile::new(3, 90_000, "HI");
        household.military_status = MilitaryStatus::Veteran;

        let ctx = EvaluationContext::new(&household, &pathway, &guidelines);
        let result = check_military_exemption(&ctx, 1).decision.unwrap();

        assert_eq!(result.category, FeeCategory::Military);
        assert!(result.reason.contains("veteran"));
    }

    #[test]
    fn test_civilian_on_military_pathway_passes() {
        let guidelines = create_test_guidelines();
        let pathway = military_profile();
        let household = HouseholdProfile::new(1, 10_000, "CA");

        let ctx = EvaluationContext::new(&household, &pathway, &guidelines);
        let outcome = check_military_exemption(&ctx, 1);

        assert!(outcome.decision.is_none());
        assert_eq!(outcome.audit_step.output["matched"], false);
    }

    #[test]
    fn test_service_member_on_civilian_pathway_passes() {
        let guidelines = create_test_guidelines();
        let pathway = naturalization_profile();
        let mut household = HouseholdProfile::new(1, 10_000, "CA");
        household.military_status = MilitaryStatus::Active;

        let ctx = EvaluationContext::new(&household, &pathway, &guidelines);
        let outcome = check_military_exemption(&ctx, 4);

        assert!(outcome.decision.is_none());
        assert_eq!(outcome.audit_step.step_number, 4);
    }
}
