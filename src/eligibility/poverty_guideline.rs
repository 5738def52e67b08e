//! Poverty guideline lookup.
//!
//! Resolves the HHS poverty guideline for a household size and state, and
//! derives the 150% and 200% thresholds the cascade compares income against.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::{PovertyGuidelines, TABULATED_HOUSEHOLD_SIZES};
use crate::models::GeographicBand;

/// Returns the 150% multiplier used for full fee waivers.
pub fn full_waiver_multiplier() -> Decimal {
    Decimal::new(15, 1)
}

/// Returns the 200% multiplier used for the reduced fee tier.
pub fn reduced_fee_multiplier() -> Decimal {
    Decimal::new(2, 0)
}

/// The poverty guideline and derived thresholds for one household.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GuidelineThresholds {
    /// The band the state code resolved to.
    pub band: GeographicBand,
    /// 100% of the poverty guideline.
    pub guideline: u64,
    /// 150% of the poverty guideline.
    pub threshold_150: Decimal,
    /// 200% of the poverty guideline.
    pub threshold_200: Decimal,
}

/// Returns the annual poverty guideline for a household.
///
/// Sizes up to 8 read the table directly. Each person beyond 8 adds the
/// band's per-person increment. A size of 0 is treated as 1. State codes
/// other than `AK` and `HI` use the continental band.
///
/// # Examples
///
/// ```
/// use fee_waiver_engine::config::ConfigLoader;
/// use fee_waiver_engine::eligibility::guideline_for;
///
/// let loader = ConfigLoader::builtin().unwrap();
/// let guidelines = loader.config().guidelines();
///
/// assert_eq!(guideline_for(guidelines, 1, "CA"), 15060);
/// assert_eq!(guideline_for(guidelines, 10, "CA"), 52720 + 2 * 5380);
/// ```
pub fn guideline_for(guidelines: &PovertyGuidelines, household_size: u32, state_code: &str) -> u64 {
    let band = guidelines.band(GeographicBand::for_state(state_code));
    let extra = u64::from(household_size.saturating_sub(TABULATED_HOUSEHOLD_SIZES as u32));

    band.tabulated(household_size)
        .saturating_add(extra.saturating_mul(band.additional_person()))
}

/// Resolves the guideline and both income thresholds for a household.
pub fn thresholds_for(
    guidelines: &PovertyGuidelines,
    household_size: u32,
    state_code: &str,
) -> GuidelineThresholds {
    let guideline = guideline_for(guidelines, household_size, state_code);
    let base = Decimal::from(guideline);

    GuidelineThresholds {
        band: GeographicBand::for_state(state_code),
        guideline,
        threshold_150: base * full_waiver_multiplier(),
        threshold_200: base * reduced_fee_multiplier(),
    }
}
