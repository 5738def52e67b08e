//! Application pathways and their fee profiles.
//!
//! A [`PathwayFeeProfile`] describes how USCIS charges for one pathway. The
//! fee itself is a [`FeeTreatment`]: either a military exemption, which has
//! no fee by construction, or a payable fee with optional waiver and reduced
//! fee tiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An application pathway to citizenship or proof of status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathwayId {
    /// Naturalization after the standard residency period.
    NaturalizationStandard,
    /// Naturalization as the spouse of a U.S. citizen.
    NaturalizationSpouse,
    /// Naturalization through peacetime military service (INA 328).
    NaturalizationMilitaryPeacetime,
    /// Naturalization through wartime military service (INA 329).
    NaturalizationMilitaryWartime,
    /// Certificate of citizenship (Form N-600).
    CertificateN600,
    /// Citizenship for a child residing abroad (Form N-600K).
    CertificateN600k,
    /// Replacement naturalization or citizenship document (Form N-565).
    ReplacementN565,
    /// Permanent resident card renewal (Form I-90).
    GreenCardRenewal,
}

impl PathwayId {
    /// Every pathway, in fee table order.
    pub const ALL: [PathwayId; 8] = [
        PathwayId::NaturalizationStandard,
        PathwayId::NaturalizationSpouse,
        PathwayId::NaturalizationMilitaryPeacetime,
        PathwayId::NaturalizationMilitaryWartime,
        PathwayId::CertificateN600,
        PathwayId::CertificateN600k,
        PathwayId::ReplacementN565,
        PathwayId::GreenCardRenewal,
    ];

    /// Returns the wire name of this pathway.
    pub fn as_str(self) -> &'static str {
        match self {
            PathwayId::NaturalizationStandard => "naturalization_standard",
            PathwayId::NaturalizationSpouse => "naturalization_spouse",
            PathwayId::NaturalizationMilitaryPeacetime => "naturalization_military_peacetime",
            PathwayId::NaturalizationMilitaryWartime => "naturalization_military_wartime",
            PathwayId::CertificateN600 => "certificate_n600",
            PathwayId::CertificateN600k => "certificate_n600k",
            PathwayId::ReplacementN565 => "replacement_n565",
            PathwayId::GreenCardRenewal => "green_card_renewal",
        }
    }

    /// Position of this pathway in [`PathwayId::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for PathwayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a pathway's filing fee is charged.
///
/// A reduced fee tier exists exactly when `reduced_fee` is `Some`, so a
/// profile can never claim a reduced tier without an amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "treatment", rename_all = "snake_case")]
pub enum FeeTreatment {
    /// Qualifying military service removes the fee entirely.
    MilitaryExempt,
    /// A fee is charged, possibly waivable or reducible.
    Payable {
        /// The full filing fee in whole dollars.
        base_fee: u32,
        /// Whether Form I-912 can waive this fee.
        waiver_eligible: bool,
        /// The reduced fee available through Form I-942, if any.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reduced_fee: Option<u32>,
    },
}

/// The fee profile of one application pathway.
///
/// # Example
///
/// ```
/// use fee_waiver_engine::models::{FeeTreatment, PathwayFeeProfile, PathwayId};
///
/// let profile = PathwayFeeProfile {
///     pathway_id: PathwayId::NaturalizationStandard,
///     name: "Naturalization".to_string(),
///     form: "N-400".to_string(),
///     fee: FeeTreatment::Payable {
///         base_fee: 760,
///         waiver_eligible: true,
///         reduced_fee: Some(405),
///     },
/// };
/// assert!(profile.reduced_fee_eligible());
/// assert_eq!(profile.reduced_fee_amount(), Some(405));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathwayFeeProfile {
    /// The pathway this profile applies to.
    pub pathway_id: PathwayId,
    /// Human-readable pathway name.
    pub name: String,
    /// The USCIS form filed for this pathway (e.g., "N-400").
    pub form: String,
    /// How the filing fee is charged.
    pub fee: FeeTreatment,
}

impl PathwayFeeProfile {
    /// The listed filing fee. Always zero for military-exempt pathways.
    pub fn base_fee(&self) -> u32 {
        match self.fee {
            FeeTreatment::MilitaryExempt => 0,
            FeeTreatment::Payable { base_fee, .. } => base_fee,
        }
    }

    /// Whether a full fee waiver can ever apply.
    pub fn waiver_eligible(&self) -> bool {
        match self.fee {
            FeeTreatment::MilitaryExempt => false,
            FeeTreatment::Payable {
                waiver_eligible, ..
            } => waiver_eligible,
        }
    }

    /// Whether a reduced fee tier exists.
    pub fn reduced_fee_eligible(&self) -> bool {
        self.reduced_fee_amount().is_some()
    }

    /// The reduced fee, present only when a reduced tier exists.
    pub fn reduced_fee_amount(&self) -> Option<u32> {
        match self.fee {
            FeeTreatment::MilitaryExempt => None,
            FeeTreatment::Payable { reduced_fee, .. } => reduced_fee,
        }
    }

    /// Whether qualifying military status zeroes the fee.
    pub fn military_exempt(&self) -> bool {
        matches!(self.fee, FeeTreatment::MilitaryExempt)
    }
}
