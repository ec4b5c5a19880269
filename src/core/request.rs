use crate::core::{EstimatorError, RevenueRange, Tier, ValueRange};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TRIALS: u64 = 1000;

/// Ordered tiers plus the number of trials to run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SimulationRequest {
    pub tiers: Vec<Tier>,
    pub trials: u64,
}

impl SimulationRequest {
    /// Checked constructor.
    pub fn new(tiers: Vec<Tier>, trials: u64) -> Result<Self, EstimatorError> {
        let request = Self { tiers, trials };
        request.validate()?;
        Ok(request)
    }

    pub fn validate(&self) -> Result<(), EstimatorError> {
        if self.trials == 0 {
            return Err(EstimatorError::InvalidTrialCount);
        }
        for tier in &self.tiers {
            tier.validate()?;
        }
        Ok(())
    }

    pub fn with_trials(mut self, trials: u64) -> Self {
        self.trials = trials;
        self
    }
}

/// The small / medium / big scenario the desktop forms shipped with.
pub fn default_tiers() -> Vec<Tier> {
    vec![
        Tier::new(
            "small",
            ValueRange { low: 5000, high: 10000 },
            ValueRange { low: 0.1, high: 0.5 },
            RevenueRange::Integer(ValueRange { low: 150, high: 450 }),
        ),
        Tier::new(
            "medium",
            ValueRange { low: 1000, high: 2500 },
            ValueRange { low: 0.02, high: 0.05 },
            RevenueRange::Integer(ValueRange { low: 7500, high: 15000 }),
        ),
        Tier::new(
            "big",
            ValueRange { low: 10, high: 500 },
            ValueRange { low: 0.002, high: 0.005 },
            RevenueRange::Integer(ValueRange { low: 50000, high: 100000 }),
        ),
    ]
}

impl Default for SimulationRequest {
    fn default() -> Self {
        Self {
            tiers: default_tiers(),
            trials: DEFAULT_TRIALS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_request_is_valid() {
        let r = SimulationRequest::default();
        assert_eq!(r.trials, 1000);
        assert_eq!(
            r.tiers.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(),
            vec!["small", "medium", "big"]
        );
        r.validate().unwrap();
    }

    #[test]
    fn zero_trials_rejected() {
        let err = SimulationRequest::new(default_tiers(), 0).unwrap_err();
        assert_eq!(err, EstimatorError::InvalidTrialCount);
    }

    #[test]
    fn inverted_tier_range_rejected() {
        let mut tiers = default_tiers();
        tiers[2].customers = ValueRange { low: 500, high: 10 };
        let err = SimulationRequest::new(tiers, 10).unwrap_err();
        assert!(matches!(err, EstimatorError::InvalidRange { ref field, .. } if field == "big.customers"));
    }
}
