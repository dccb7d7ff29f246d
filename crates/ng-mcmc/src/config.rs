use std::fs;
use std::path::Path;

use ng_core::errors::{ErrorInfo, NgError};
use ng_graph::StructureConfig;
use serde::{Deserialize, Serialize};

/// YAML-configurable parameters governing one sampling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleConfig {
    /// Number of matrices to record after burn-in.
    #[serde(default = "default_nsamples")]
    pub nsamples: usize,
    /// Steps between consecutive recorded matrices.
    #[serde(default = "default_thin")]
    pub thin: usize,
    /// Steps discarded before recording starts.
    #[serde(default = "default_burnin")]
    pub burnin: usize,
    /// Which move strategy drives the chain.
    #[serde(default)]
    pub variant: SamplerVariant,
    /// Structural options shared with the constructor.
    #[serde(default)]
    pub structure: StructureConfig,
    /// Master seed for the run.
    #[serde(default)]
    pub seed_policy: SeedPolicy,
}

fn default_nsamples() -> usize {
    10_000
}

fn default_thin() -> usize {
    10
}

fn default_burnin() -> usize {
    5_000
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            nsamples: default_nsamples(),
            thin: default_thin(),
            burnin: default_burnin(),
            variant: SamplerVariant::default(),
            structure: StructureConfig::default(),
            seed_policy: SeedPolicy::default(),
        }
    }
}

impl SampleConfig {
    /// Parses a YAML document; missing fields take their defaults.
    pub fn from_yaml_str(contents: &str) -> Result<Self, NgError> {
        serde_yaml::from_str(contents).map_err(|err| {
            NgError::Config(ErrorInfo::new("config-parse", err.to_string()))
        })
    }

    /// Reads and parses a YAML file, then validates it.
    pub fn load(path: &Path) -> Result<Self, NgError> {
        let contents = fs::read_to_string(path).map_err(|err| {
            NgError::Config(
                ErrorInfo::new("config-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        let config = Self::from_yaml_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects parameter combinations the sampler cannot run.
    pub fn validate(&self) -> Result<(), NgError> {
        check_sample_params(self.nsamples, self.thin)
    }
}

/// Move strategy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SamplerVariant {
    /// Integer weights shifted along alternating cycles.
    #[default]
    Weighted,
    /// Binary matrices edited by checkerboard swaps.
    Unweighted,
}

/// Deterministic seeding configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedPolicy {
    /// Seed of the sampler's random stream.
    #[serde(default = "default_master_seed")]
    pub master_seed: u64,
    /// Free-form label echoed into run summaries.
    #[serde(default)]
    pub label: Option<String>,
}

fn default_master_seed() -> u64 {
    0x05EE_D5EE_DD15_5EED_u64
}

impl Default for SeedPolicy {
    fn default() -> Self {
        Self {
            master_seed: default_master_seed(),
            label: None,
        }
    }
}

pub(crate) fn check_sample_params(nsamples: usize, thin: usize) -> Result<(), NgError> {
    if nsamples == 0 {
        return Err(NgError::Config(
            ErrorInfo::new("zero-samples", "nsamples must be at least 1")
                .with_hint("request one or more samples"),
        ));
    }
    if thin == 0 {
        return Err(NgError::Config(
            ErrorInfo::new("zero-thin", "thin must be at least 1")
                .with_hint("use thin = 1 to record after every step"),
        ));
    }
    Ok(())
}
