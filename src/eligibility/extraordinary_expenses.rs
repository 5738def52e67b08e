//! Hardship waiver through extraordinary expenses.
//!
//! Reached only when plain income missed the 150% threshold. Extraordinary
//! expenses are subtracted from income and the remainder is compared against
//! the same threshold. The remainder is not floored at zero.

use rust_decimal::Decimal;

use crate::models::{AuditStep, AuditWarning, EligibilityResult, FeeCategory, GoverningForm};

use super::context::{EvaluationContext, RuleOutcome};
use super::currency::{format_usd, format_usd_decimal};
use super::homelessness::HARDSHIP_CLAUSE;

/// Evidence supporting an extraordinary expense claim.
pub const HARDSHIP_EVIDENCE: [&str; 6] = [
    "Proof of household income (tax transcript, pay stubs, or income letters)",
    "Itemized medical expenses with bills or receipts",
    "Itemized disability-related expenses with supporting documentation",
    "Itemized elder care or dependent care expenses with receipts",
    "Itemized list of any other extraordinary expenses with receipts",
    "Written explanation of the financial hardship and how it affects the household",
];

/// Grants a hardship waiver when income net of extraordinary expenses is at
/// or below 150% of the guideline.
///
/// Effective income is not floored at zero. When expenses exceed income the
/// household still matches and the outcome carries a
/// `NEGATIVE_EFFECTIVE_INCOME` warning.
///
/// # Arguments
///
/// * `ctx` - The household, pathway profile, and resolved thresholds
/// * `step_number` - The step number for audit trail sequencing
///
/// # Returns
///
/// A matched `RuleOutcome` with category `hardship` and Form I-912 when the
/// household claims expenses that bring it under the threshold; otherwise a
/// passed outcome.
///
/// # Regulation Reference
///
/// - 8 CFR 106.3(a)(1)(iii): financial hardship, including extraordinary
///   medical or other expenses
///
/// # Examples
///
/// ```
/// use fee_waiver_engine::config::ConfigLoader;
/// use fee_waiver_engine::eligibility::{EvaluationContext, check_extraordinary_expenses};
/// use fee_waiver_engine::models::{FeeCategory, HouseholdProfile, PathwayId};
///
/// let loader = ConfigLoader::builtin().unwrap();
/// let mut household = HouseholdProfile::new(1, 30_000, "CA");
/// household.has_extraordinary_expenses = true;
/// household.extraordinary_expense_amount = Some(8_000);
///
/// let ctx = EvaluationContext::new(
///     &household,
///     loader.pathway(PathwayId::NaturalizationStandard),
///     loader.config().guidelines(),
/// );
/// let outcome = check_extraordinary_expenses(&ctx, 6);
///
/// assert_eq!(outcome.decision.unwrap().category, FeeCategory::Hardship);
/// assert!(outcome.warnings.is_empty());
/// ```
pub fn check_extraordinary_expenses(
    ctx: &EvaluationContext<'_>,
    step_number: u32,
) -> RuleOutcome {
    let household = ctx.household;
    let thresholds = ctx.thresholds;
    let claimed = household.has_extraordinary_expenses;
    let expenses = household.extraordinary_expenses();
    let effective_income = Decimal::from(household.annual_income) - Decimal::from(expenses);
    let matched = claimed && effective_income <= thresholds.threshold_150;

    let audit_step = AuditStep {
        step_number,
        rule_id: "extraordinary_expenses".to_string(),
        rule_name: "Extraordinary Expenses Hardship".to_string(),
        clause_ref: HARDSHIP_CLAUSE.to_string(),
        input: serde_json::json!({
            "has_extraordinary_expenses": claimed,
            "annual_income": household.annual_income,
            "extraordinary_expense_amount": expenses
        }),
        output: serde_json::json!({
            "effective_income": effective_income.to_string(),
            "threshold_150": thresholds.threshold_150.normalize().to_string(),
            "matched": matched
        }),
        reasoning: if claimed {
            format!(
                "{} - {} = {} {} {}",
                format_usd(household.annual_income),
                format_usd(expenses),
                format_usd_decimal(effective_income),
                if matched { "<=" } else { ">" },
                format_usd_decimal(thresholds.threshold_150)
            )
        } else {
            "No extraordinary expenses claimed".to_string()
        },
    };

    if !matched {
        return RuleOutcome::passed(audit_step);
    }

    let result = EligibilityResult {
        eligible: true,
        category: FeeCategory::Hardship,
        reason: format!(
            "Household income of {} less extraordinary expenses of {} leaves {}, at or below 150% of the Federal Poverty Guidelines ({}) for a household of {}",
            format_usd(household.annual_income),
            format_usd(expenses),
            format_usd_decimal(effective_income),
            format_usd_decimal(thresholds.threshold_150),
            household.size
        ),
        required_evidence: HARDSHIP_EVIDENCE.iter().map(|s| s.to_string()).collect(),
        governing_form: GoverningForm::I912,
    };

    let outcome = RuleOutcome::matched(result, audit_step);
    if effective_income.is_sign_negative() {
        outcome.with_warning(AuditWarning {
            code: "NEGATIVE_EFFECTIVE_INCOME".to_string(),
            message: format!(
                "Extraordinary expenses of {} exceed annual income of {}",
                format_usd(expenses),
                format_usd(household.annual_income)
            ),
            severity: "medium".to_string(),
        })
    } else {
        outcome
    }
}
