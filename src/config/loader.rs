//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the fee
//! schedule and poverty guidelines from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{PathwayFeeProfile, PathwayId};

use super::types::{
    EngineConfig, FeeSchedule, FeeScheduleConfig, GuidelineMetadata, PovertyGuidelineConfig,
    PovertyGuidelines,
};

const BUILTIN_LABEL: &str = "<builtin>/config/fy2024";
const BUILTIN_METADATA: &str = include_str!("../../config/fy2024/metadata.yaml");
const BUILTIN_PATHWAYS: &str = include_str!("../../config/fy2024/pathways.yaml");
const BUILTIN_GUIDELINES: &str = include_str!("../../config/fy2024/poverty_guidelines.yaml");

/// Loads and provides access to the engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/fy2024/
/// ├── metadata.yaml            # Guideline year and sources
/// ├── pathways.yaml            # Pathway fee schedule
/// └── poverty_guidelines.yaml  # HHS poverty guidelines per band
/// ```
///
/// The same files are compiled into the crate and available through
/// [`ConfigLoader::builtin`].
///
/// # Example
///
/// ```
/// use fee_waiver_engine::config::ConfigLoader;
/// use fee_waiver_engine::models::PathwayId;
///
/// let loader = ConfigLoader::builtin().unwrap();
/// let profile = loader.pathway(PathwayId::NaturalizationStandard);
/// assert_eq!(profile.form, "N-400");
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/fy2024")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - A pathway or guideline band is missing, duplicated, or malformed
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata_path = path.join("metadata.yaml");
        let metadata = Self::read_file(&metadata_path)?;

        let pathways_path = path.join("pathways.yaml");
        let pathways = Self::read_file(&pathways_path)?;

        let guidelines_path = path.join("poverty_guidelines.yaml");
        let guidelines = Self::read_file(&guidelines_path)?;

        let loader = Self::from_sources(
            &path.display().to_string(),
            &metadata,
            &pathways,
            &guidelines,
        )?;
        debug!(path = %path.display(), year = loader.metadata().year, "Loaded configuration");
        Ok(loader)
    }

    /// Parses the configuration compiled into the crate.
    pub fn builtin() -> EngineResult<Self> {
        Self::from_sources(
            BUILTIN_LABEL,
            BUILTIN_METADATA,
            BUILTIN_PATHWAYS,
            BUILTIN_GUIDELINES,
        )
    }

    /// Parses configuration from YAML sources.
    ///
    /// `label` names the origin in error messages.
    pub fn from_sources(
        label: &str,
        metadata: &str,
        pathways: &str,
        guidelines: &str,
    ) -> EngineResult<Self> {
        let metadata: GuidelineMetadata =
            Self::parse_yaml(&format!("{}/metadata.yaml", label), metadata)?;
        let fee_schedule: FeeScheduleConfig =
            Self::parse_yaml(&format!("{}/pathways.yaml", label), pathways)?;
        let guideline_config: PovertyGuidelineConfig =
            Self::parse_yaml(&format!("{}/poverty_guidelines.yaml", label), guidelines)?;

        let config = EngineConfig::new(
            metadata,
            FeeSchedule::new(fee_schedule.pathways)?,
            PovertyGuidelines::try_from(guideline_config)?,
        );

        Ok(Self { config })
    }

    fn read_file(path: &Path) -> EngineResult<String> {
        fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path.display().to_string(),
        })
    }

    fn parse_yaml<T: serde::de::DeserializeOwned>(path: &str, content: &str) -> EngineResult<T> {
        serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Consumes the loader, returning the engine configuration.
    pub fn into_config(self) -> EngineConfig {
        self.config
    }

    /// Returns the guideline metadata.
    pub fn metadata(&self) -> &GuidelineMetadata {
        self.config.metadata()
    }

    /// Returns the fee profile for a pathway.
    pub fn pathway(&self, pathway_id: PathwayId) -> &PathwayFeeProfile {
        self.config.fee_schedule().profile(pathway_id)
    }
}
