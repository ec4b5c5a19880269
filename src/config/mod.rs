use crate::core::{DEFAULT_TRIALS, EstimatorError, SimulationRequest, Tier, default_tiers};
use crate::evaluation::{DEFAULT_BINS, DEFAULT_CONFIDENCE_LEVEL, SummaryOptions};
use anyhow::{Context, Result};
use log::debug;
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_trials() -> u64 {
    DEFAULT_TRIALS
}

fn default_confidence_level() -> f64 {
    DEFAULT_CONFIDENCE_LEVEL
}

fn default_histogram_bins() -> usize {
    DEFAULT_BINS
}

/// Scenario file: tiers, trial count and how the results are summarized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScenarioConfig {
    #[serde(default = "default_trials")]
    #[schemars(
        title = "Trials",
        description = "Number of Monte Carlo trials",
        range(min = 1),
        default = "default_trials"
    )]
    pub trials: u64,

    #[serde(default)]
    #[schemars(
        title = "Seed",
        description = "PRNG seed; empty = fresh entropy on every run"
    )]
    pub seed: Option<u64>,

    #[serde(default = "default_confidence_level")]
    #[schemars(
        title = "Confidence Level",
        description = "Coverage of the confidence interval for the mean",
        range(min = 0.0, max = 1.0),
        default = "default_confidence_level"
    )]
    pub confidence_level: f64,

    #[serde(default)]
    #[schemars(
        title = "Bias Corrected",
        description = "Report adjusted skewness and kurtosis"
    )]
    pub bias_corrected: bool,

    #[serde(default = "default_histogram_bins")]
    #[schemars(
        title = "Histogram Bins",
        range(min = 1),
        default = "default_histogram_bins"
    )]
    pub histogram_bins: usize,

    #[serde(default = "default_tiers")]
    pub tiers: Vec<Tier>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            seed: None,
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            bias_corrected: false,
            histogram_bins: DEFAULT_BINS,
            tiers: default_tiers(),
        }
    }
}

impl ScenarioConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading scenario file {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing scenario file {}", path.display()))?;
        debug!(
            "loaded scenario from {} ({} tiers, {} trials)",
            path.display(),
            config.tiers.len(),
            config.trials
        );
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text + "\n")
            .with_context(|| format!("writing scenario file {}", path.display()))
    }

    pub fn request(&self) -> Result<SimulationRequest, EstimatorError> {
        SimulationRequest::new(self.tiers.clone(), self.trials)
    }

    pub fn summary_options(&self) -> SummaryOptions {
        SummaryOptions {
            confidence_level: self.confidence_level,
            bias_corrected: self.bias_corrected,
        }
    }

    pub fn schema() -> Schema {
        schema_for!(ScenarioConfig)
    }
}
