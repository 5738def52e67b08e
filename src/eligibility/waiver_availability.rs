//! Pathway waiver availability.
//!
//! Some forms cannot be waived at all. Once the military exemption has been
//! ruled out, such pathways end the cascade as not eligible.

use crate::models::{AuditStep, EligibilityResult, FeeCategory, GoverningForm};

use super::context::{EvaluationContext, RuleOutcome};

/// Regulation listing the forms eligible for a fee waiver.
pub const WAIVER_AVAILABILITY_CLAUSE: &str = "8 CFR 106.3(a)";

/// Ends the cascade when the pathway's form does not accept fee waivers.
pub fn check_waiver_availability(ctx: &EvaluationContext<'_>, step_number: u32) -> RuleOutcome {
    let pathway = ctx.pathway;
    let waiver_eligible = pathway.waiver_eligible();

    let audit_step = AuditStep {
        step_number,
        rule_id: "waiver_availability".to_string(),
        rule_name: "Waiver Availability".to_string(),
        clause_ref: WAIVER_AVAILABILITY_CLAUSE.to_string(),
        input: serde_json::json!({
            "pathway_id": pathway.pathway_id,
            "form": pathway.form
        }),
        output: serde_json::json!({ "waiver_eligible": waiver_eligible }),
        reasoning: if waiver_eligible {
            format!("Form {} accepts fee waiver requests", pathway.form)
        } else {
            format!("Form {} does not accept fee waiver requests", pathway.form)
        },
    };

    if waiver_eligible {
        return RuleOutcome::passed(audit_step);
    }

    let result = EligibilityResult {
        eligible: false,
        category: FeeCategory::NotEligible,
        reason: format!("Form {} does not support fee waivers", pathway.form),
        required_evidence: Vec::new(),
        governing_form: GoverningForm::NotApplicable,
    };

    RuleOutcome::matched(result, audit_step)
}
