//! Homelessness hardship waiver.

use crate::models::{AuditStep, EligibilityResult, FeeCategory, GoverningForm};

use super::context::{EvaluationContext, RuleOutcome};

/// Regulation for waivers based on financial hardship.
pub const HARDSHIP_CLAUSE: &str = "8 CFR 106.3(a)(1)(iii)";

/// Evidence of homelessness.
pub const HOMELESSNESS_EVIDENCE: [&str; 2] = [
    "Letter from a homeless shelter, social services agency, or community organization confirming homelessness",
    "If no letter is available, a signed self-declaration describing the current living situation",
];

/// Grants a hardship waiver to homeless applicants.
///
/// # Returns
///
/// A matched `RuleOutcome` with category `hardship` and Form I-912 when
/// `is_homeless` is set; otherwise a passed outcome.
pub fn check_homelessness(ctx: &EvaluationContext<'_>, step_number: u32) -> RuleOutcome {
    let is_homeless = ctx.household.is_homeless;

    let audit_step = AuditStep {
        step_number,
        rule_id: "homelessness".to_string(),
        rule_name: "Homelessness".to_string(),
        clause_ref: HARDSHIP_CLAUSE.to_string(),
        input: serde_json::json!({ "is_homeless": is_homeless }),
        output: serde_json::json!({ "matched": is_homeless }),
        reasoning: if is_homeless {
            "Applicant reports current homelessness".to_string()
        } else {
            "Applicant does not report homelessness".to_string()
        },
    };

    if !is_homeless {
        return RuleOutcome::passed(audit_step);
    }

    let result = EligibilityResult {
        eligible: true,
        category: FeeCategory::Hardship,
        reason: "Applicant is experiencing homelessness, which qualifies for a full fee waiver on hardship grounds".to_string(),
        required_evidence: HOMELESSNESS_EVIDENCE.iter().map(|s| s.to_string()).collect(),
        governing_form: GoverningForm::I912,
    };

    RuleOutcome::matched(result, audit_step)
}
