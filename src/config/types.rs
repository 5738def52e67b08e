//! Configuration types for fee waiver eligibility.
//!
//! The `*Config` structs mirror the YAML files one-to-one. [`FeeSchedule`] and
//! [`PovertyGuidelines`] are their validated forms: once built, every pathway
//! has a profile and every band has a full threshold table, so lookups
//! cannot fail.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{GeographicBand, PathwayFeeProfile, PathwayId};

/// Number of household sizes tabulated per band. Larger households
/// extrapolate from the last entry.
pub const TABULATED_HOUSEHOLD_SIZES: usize = 8;

/// Metadata about the fee schedule and guideline edition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidelineMetadata {
    /// The HHS poverty guideline year (e.g., 2024).
    pub year: u16,
    /// The date the fee schedule took effect.
    pub effective_date: NaiveDate,
    /// URL of the published USCIS fee schedule.
    pub fee_schedule_source: String,
    /// URL of the published HHS poverty guidelines.
    pub guideline_source: String,
}

/// Fee schedule file structure (`pathways.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct FeeScheduleConfig {
    /// One profile per pathway.
    pub pathways: Vec<PathwayFeeProfile>,
}

/// One band as written in `poverty_guidelines.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct BandGuidelineConfig {
    /// Annual income thresholds for household sizes 1 through 8.
    pub thresholds: Vec<u64>,
    /// Amount added per person beyond the tabulated sizes.
    pub additional_person: u64,
}

/// Poverty guideline file structure (`poverty_guidelines.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct PovertyGuidelineConfig {
    /// Guideline tables keyed by band.
    pub bands: HashMap<GeographicBand, BandGuidelineConfig>,
}

/// A validated poverty guideline table for one band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BandGuideline {
    thresholds: [u64; TABULATED_HOUSEHOLD_SIZES],
    additional_person: u64,
}

impl BandGuideline {
    /// Creates a band table from its thresholds and per-person increment.
    pub fn new(thresholds: [u64; TABULATED_HOUSEHOLD_SIZES], additional_person: u64) -> Self {
        Self {
            thresholds,
            additional_person,
        }
    }

    /// The tabulated threshold for a household size.
    ///
    /// Sizes outside `1..=8` are clamped into the table.
    pub fn tabulated(&self, household_size: u32) -> u64 {
        let index = (household_size as usize).clamp(1, TABULATED_HOUSEHOLD_SIZES) - 1;
        self.thresholds[index]
    }

    /// The amount added for each person beyond the tabulated sizes.
    pub fn additional_person(&self) -> u64 {
        self.additional_person
    }

    /// All tabulated thresholds, smallest household first.
    pub fn thresholds(&self) -> &[u64; TABULATED_HOUSEHOLD_SIZES] {
        &self.thresholds
    }
}

impl TryFrom<(GeographicBand, BandGuidelineConfig)> for BandGuideline {
    type Error = EngineError;

    fn try_from((band, config): (GeographicBand, BandGuidelineConfig)) -> EngineResult<Self> {
        let count = config.thresholds.len();
        let thresholds: [u64; TABULATED_HOUSEHOLD_SIZES] =
            config
                .thresholds
                .try_into()
                .map_err(|_| EngineError::InvalidConfig {
                    message: format!(
                        "band '{}' has {} thresholds, expected {}",
                        band.as_str(),
                        count,
                        TABULATED_HOUSEHOLD_SIZES
                    ),
                })?;

        Ok(Self::new(thresholds, config.additional_person))
    }
}

/// Validated poverty guidelines for all three bands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PovertyGuidelines {
    continental: BandGuideline,
    alaska: BandGuideline,
    hawaii: BandGuideline,
}

impl PovertyGuidelines {
    /// Creates guidelines from one table per band.
    pub fn new(continental: BandGuideline, alaska: BandGuideline, hawaii: BandGuideline) -> Self {
        Self {
            continental,
            alaska,
            hawaii,
        }
    }

    /// Returns the table for a band.
    pub fn band(&self, band: GeographicBand) -> &BandGuideline {
        match band {
            GeographicBand::Continental => &self.continental,
            GeographicBand::Alaska => &self.alaska,
            GeographicBand::Hawaii => &self.hawaii,
        }
    }
}

impl TryFrom<PovertyGuidelineConfig> for PovertyGuidelines {
    type Error = EngineError;

    fn try_from(config: PovertyGuidelineConfig) -> EngineResult<Self> {
        let mut bands = config.bands;
        let mut take = |band: GeographicBand| -> EngineResult<BandGuideline> {
            let raw = bands.remove(&band).ok_or_else(|| EngineError::InvalidConfig {
                message: format!("missing poverty guideline band '{}'", band.as_str()),
            })?;
            BandGuideline::try_from((band, raw))
        };

        Ok(Self::new(
            take(GeographicBand::Continental)?,
            take(GeographicBand::Alaska)?,
            take(GeographicBand::Hawaii)?,
        ))
    }
}

/// The validated fee schedule, one profile per [`PathwayId`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeeSchedule {
    /// Profiles ordered as [`PathwayId::ALL`].
    pathways: Vec<PathwayFeeProfile>,
}

impl FeeSchedule {
    /// Builds a schedule, requiring exactly one profile per pathway.
    pub fn new(profiles: Vec<PathwayFeeProfile>) -> EngineResult<Self> {
        let mut slots: Vec<Option<PathwayFeeProfile>> = vec![None; PathwayId::ALL.len()];

        for profile in profiles {
            let slot = &mut slots[profile.pathway_id.index()];
            if slot.is_some() {
                return Err(EngineError::InvalidConfig {
                    message: format!("duplicate pathway '{}'", profile.pathway_id),
                });
            }
            *slot = Some(profile);
        }

        let pathways = PathwayId::ALL
            .iter()
            .zip(slots)
            .map(|(id, slot)| {
                slot.ok_or_else(|| EngineError::InvalidConfig {
                    message: format!("missing pathway '{}'", id),
                })
            })
            .collect::<EngineResult<Vec<_>>>()?;

        Ok(Self { pathways })
    }

    /// Returns the profile for a pathway.
    pub fn profile(&self, pathway_id: PathwayId) -> &PathwayFeeProfile {
        &self.pathways[pathway_id.index()]
    }

    /// Returns all profiles in [`PathwayId::ALL`] order.
    pub fn profiles(&self) -> &[PathwayFeeProfile] {
        &self.pathways
    }
}

/// The complete engine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Guideline and fee schedule metadata.
    metadata: GuidelineMetadata,
    /// The pathway fee table.
    fee_schedule: FeeSchedule,
    /// Poverty guideline tables.
    guidelines: PovertyGuidelines,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(
        metadata: GuidelineMetadata,
        fee_schedule: FeeSchedule,
        guidelines: PovertyGuidelines,
    ) -> Self {
        Self {
            metadata,
            fee_schedule,
            guidelines,
        }
    }

    /// Returns the guideline metadata.
    pub fn metadata(&self) -> &GuidelineMetadata {
        &self.metadata
    }

    /// Returns the pathway fee table.
    pub fn fee_schedule(&self) -> &FeeSchedule {
        &self.fee_schedule
    }

    /// Returns the poverty guideline tables.
    pub fn guidelines(&self) -> &PovertyGuidelines {
        &self.guidelines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FeeTreatment;

    fn profile(pathway_id: PathwayId) -> PathwayFeeProfile {
        PathwayFeeProfile {
            pathway_id,
            name: pathway_id.as_str().to_string(),
            form: "N-400".to_string(),
            fee: FeeTreatment::Payable {
                base_fee: 100,
                waiver_eligible: true,
                reduced_fee: None,
            },
        }
    }

    fn band_config(count: usize) -> BandGuidelineConfig {
        BandGuidelineConfig {
            thresholds: (1..=count as u64).map(|n| n * 1000).collect(),
            additional_person: 500,
        }
    }

    #[test]
    fn test_fee_schedule_orders_profiles_by_pathway() {
        let mut profiles: Vec<_> = PathwayId::ALL.iter().map(|id| profile(*id)).collect();
        profiles.reverse();

        let schedule = FeeSchedule::new(profiles).unwrap();
        for id in PathwayId::ALL {
            assert_eq!(schedule.profile(id).pathway_id, id);
        }
    }

    #[test]
    fn test_fee_schedule_rejects_missing_pathway() {
        let profiles: Vec<_> = PathwayId::ALL[..7].iter().map(|id| profile(*id)).collect();

        match FeeSchedule::new(profiles) {
            Err(EngineError::InvalidConfig { message }) => {
                assert!(message.contains("green_card_renewal"));
            }
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_fee_schedule_rejects_duplicate_pathway() {
        let mut profiles: Vec<_> = PathwayId::ALL.iter().map(|id| profile(*id)).collect();
        profiles.push(profile(PathwayId::CertificateN600));

        match FeeSchedule::new(profiles) {
            Err(EngineError::InvalidConfig { message }) => {
                assert!(message.contains("duplicate pathway 'certificate_n600'"));
            }
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_band_guideline_rejects_wrong_threshold_count() {
        let result = BandGuideline::try_from((GeographicBand::Hawaii, band_config(7)));

        match result {
            Err(EngineError::InvalidConfig { message }) => {
                assert_eq!(message, "band 'hawaii' has 7 thresholds, expected 8");
            }
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_band_guideline_tabulated_clamps_size() {
        let band = BandGuideline::try_from((GeographicBand::Continental, band_config(8))).unwrap();

        assert_eq!(band.tabulated(0), 1000);
        assert_eq!(band.tabulated(1), 1000);
        assert_eq!(band.tabulated(8), 8000);
        assert_eq!(band.tabulated(20), 8000);
    }

    #[test]
    fn test_poverty_guidelines_require_all_bands() {
        let mut bands = HashMap::new();
        bands.insert(GeographicBand::Continental, band_config(8));
        bands.insert(GeographicBand::Hawaii, band_config(8));

        match PovertyGuidelines::try_from(PovertyGuidelineConfig { bands }) {
            Err(EngineError::InvalidConfig { message }) => {
                assert_eq!(message, "missing poverty guideline band 'alaska'");
            }
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }
}
