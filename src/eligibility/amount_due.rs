//! Fee owed after relief.

use crate::models::{EligibilityResult, GoverningForm, PathwayFeeProfile};

/// Returns the fee the applicant pays, in whole dollars, given the cascade result.
///
/// Military exemptions and full waivers owe nothing, the reduced tier owes the
/// reduced amount, and everything else owes the base fee.
///
/// # Examples
///
/// ```
/// use fee_waiver_engine::config::ConfigLoader;
/// use fee_waiver_engine::eligibility::{amount_due, evaluate_household};
/// use fee_waiver_engine::models::{HouseholdProfile, PathwayId};
///
/// let loader = ConfigLoader::builtin().unwrap();
/// let pathway = loader.pathway(PathwayId::NaturalizationStandard);
/// let household = HouseholdProfile::new(1, 25_000, "CA");
///
/// let evaluation = evaluate_household(&household, pathway, loader.config().guidelines());
/// assert_eq!(amount_due(pathway, &evaluation.result), 405);
/// ```
pub fn amount_due(pathway: &PathwayFeeProfile, result: &EligibilityResult) -> u32 {
    if !result.eligible {
        return pathway.base_fee();
    }

    match result.governing_form {
        GoverningForm::I942 => pathway
            .reduced_fee_amount()
            .unwrap_or_else(|| pathway.base_fee()),
        GoverningForm::I912 | GoverningForm::MilitaryExemption | GoverningForm::NotApplicable => 0,
    }
}
