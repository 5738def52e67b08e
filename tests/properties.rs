//! Property tests for guideline resolution and the eligibility cascade.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use fee_waiver_engine::eligibility::EligibilityEngine;
use fee_waiver_engine::models::{
    BenefitSource, FeeCategory, GeographicBand, GoverningForm, HouseholdProfile, MilitaryStatus,
    PathwayId, RECOGNIZED_STATE_CODES,
};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Helpers / Strategies
// ---------------------------------------------------------------------------

const CONTINENTAL: [u64; 8] = [15060, 20440, 25820, 31200, 36580, 41960, 47340, 52720];
const ALASKA: [u64; 8] = [18810, 25540, 32270, 39000, 45730, 52460, 59190, 65920];
const HAWAII: [u64; 8] = [17310, 23500, 29690, 35880, 42070, 48260, 54450, 60640];

fn engine() -> &'static EligibilityEngine {
    static ENGINE: OnceLock<EligibilityEngine> = OnceLock::new();
    ENGINE.get_or_init(|| EligibilityEngine::builtin().expect("builtin config"))
}

fn table(band: GeographicBand) -> ([u64; 8], u64) {
    match band {
        GeographicBand::Continental => (CONTINENTAL, 5380),
        GeographicBand::Alaska => (ALASKA, 6730),
        GeographicBand::Hawaii => (HAWAII, 6190),
    }
}

fn state_for(band: GeographicBand) -> &'static str {
    match band {
        GeographicBand::Continental => "CA",
        GeographicBand::Alaska => "AK",
        GeographicBand::Hawaii => "HI",
    }
}

fn arb_band() -> impl Strategy<Value = GeographicBand> {
    prop::sample::select(GeographicBand::ALL.to_vec())
}

fn arb_state_code() -> impl Strategy<Value = String> {
    prop::sample::select(RECOGNIZED_STATE_CODES.to_vec()).prop_map(str::to_string)
}

fn arb_benefit() -> impl Strategy<Value = BenefitSource> {
    prop_oneof![
        Just(BenefitSource::Employment),
        Just(BenefitSource::SelfEmployment),
        Just(BenefitSource::SocialSecurity),
        Just(BenefitSource::Ssi),
        Just(BenefitSource::Tanf),
        Just(BenefitSource::Medicaid),
        Just(BenefitSource::Snap),
        Just(BenefitSource::Unemployment),
        Just(BenefitSource::Pension),
        Just(BenefitSource::Other),
    ]
}

fn arb_military_status() -> impl Strategy<Value = MilitaryStatus> {
    prop_oneof![
        Just(MilitaryStatus::Active),
        Just(MilitaryStatus::Veteran),
        Just(MilitaryStatus::None),
    ]
}

fn arb_pathway() -> impl Strategy<Value = PathwayId> {
    prop::sample::select(PathwayId::ALL.to_vec())
}

fn arb_civilian_pathway() -> impl Strategy<Value = PathwayId> {
    prop::sample::select(
        PathwayId::ALL
            .into_iter()
            .filter(|id| !engine().pathway(*id).military_exempt())
            .collect::<Vec<_>>(),
    )
}

/// Generate an arbitrary household.
fn arb_household() -> impl Strategy<Value = HouseholdProfile> {
    (
        1u32..15,
        0u64..300_000,
        prop::collection::btree_set(arb_benefit(), 0..4),
        any::<bool>(),
        any::<bool>(),
        prop::option::of(0u64..100_000),
        arb_military_status(),
        arb_state_code(),
    )
        .prop_map(
            |(
                size,
                annual_income,
                benefit_flags,
                is_homeless,
                has_extraordinary_expenses,
                extraordinary_expense_amount,
                military_status,
                state_code,
            )| HouseholdProfile {
                size,
                annual_income,
                benefit_flags,
                is_homeless,
                has_extraordinary_expenses,
                extraordinary_expense_amount,
                military_status,
                state_code,
            },
        )
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    /// Sizes 1 through 8 read the published table exactly.
    #[test]
    fn tabulated_sizes_match_published_table(size in 1u32..=8, band in arb_band()) {
        let (thresholds, _) = table(band);
        let guideline = engine().guideline_for(size, state_for(band));
        prop_assert_eq!(guideline, thresholds[size as usize - 1]);
    }

    /// Sizes above 8 add the per-person increment for each extra person.
    #[test]
    fn large_households_extrapolate_linearly(size in 9u32..500, band in arb_band()) {
        let (thresholds, increment) = table(band);
        let expected = thresholds[7] + u64::from(size - 8) * increment;
        prop_assert_eq!(engine().guideline_for(size, state_for(band)), expected);
    }

    /// A service member on an exempt pathway is always exempt, whatever else is reported.
    #[test]
    fn military_exemption_always_wins(
        household in arb_household(),
        veteran in any::<bool>(),
        wartime in any::<bool>(),
    ) {
        let mut household = household;
        household.military_status = if veteran {
            MilitaryStatus::Veteran
        } else {
            MilitaryStatus::Active
        };
        let pathway = if wartime {
            PathwayId::NaturalizationMilitaryWartime
        } else {
            PathwayId::NaturalizationMilitaryPeacetime
        };

        let result = engine().evaluate(&household, pathway);

        prop_assert_eq!(result.category, FeeCategory::Military);
        prop_assert_eq!(result.governing_form, GoverningForm::MilitaryExemption);
        prop_assert_eq!(engine().amount_due(pathway, &result), 0);
    }

    /// Lowering income never takes away a full income-based waiver.
    #[test]
    fn full_waiver_is_monotonic_in_income(
        household in arb_household(),
        pathway in arb_civilian_pathway(),
        percent_of_threshold in 0u64..=100,
        fraction in 0u64..=100,
    ) {
        let mut household = household;
        household.benefit_flags.clear();
        household.is_homeless = false;
        let threshold_150 = engine().guideline_for(household.size, &household.state_code) * 3 / 2;
        household.annual_income = threshold_150 * percent_of_threshold / 100;

        let result = engine().evaluate(&household, pathway);
        prop_assert_eq!(result.category, FeeCategory::IncomeBased);
        prop_assert_eq!(result.governing_form, GoverningForm::I912);

        let mut poorer = household.clone();
        poorer.annual_income = household.annual_income * fraction / 100;
        let lower = engine().evaluate(&poorer, pathway);

        prop_assert!(lower.eligible);
        prop_assert_eq!(lower.category, FeeCategory::IncomeBased);
        prop_assert_eq!(lower.governing_form, GoverningForm::I912);
        prop_assert_eq!(engine().amount_due(pathway, &lower), 0);
    }

    /// Evaluation is pure.
    #[test]
    fn evaluation_is_idempotent(household in arb_household(), pathway in arb_pathway()) {
        let first = engine().evaluate_with_trace(&household, pathway);
        let second = engine().evaluate_with_trace(&household, pathway);

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(
            serde_json::to_vec(&first.result).unwrap(),
            serde_json::to_vec(&second.result).unwrap()
        );
    }

    /// The amount due never exceeds the pathway's base fee.
    #[test]
    fn amount_due_is_bounded_by_base_fee(household in arb_household(), pathway in arb_pathway()) {
        let result = engine().evaluate(&household, pathway);
        let base_fee = engine().pathway(pathway).base_fee();
        let due = engine().amount_due(pathway, &result);

        prop_assert!(due <= base_fee);
        if !result.eligible {
            prop_assert_eq!(due, base_fee);
        }
    }

    /// Benefits outside the means-tested set never affect the result.
    #[test]
    fn inert_benefits_do_not_change_the_result(
        household in arb_household(),
        pathway in arb_pathway(),
    ) {
        let mut plain = household.clone();
        plain.benefit_flags = household
            .benefit_flags
            .iter()
            .copied()
            .filter(|b| b.is_means_tested())
            .collect::<BTreeSet<_>>();

        prop_assert_eq!(
            engine().evaluate(&household, pathway),
            engine().evaluate(&plain, pathway)
        );
    }
}
