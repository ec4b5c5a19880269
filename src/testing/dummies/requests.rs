use crate::core::{RevenueRange, SimulationRequest, Tier, ValueRange, default_tiers};

pub fn single_tier(
    customers: ValueRange<u64>,
    probability: ValueRange<f64>,
    revenue: RevenueRange,
) -> Tier {
    Tier::new("only", customers, probability, revenue)
}

/// One tier whose every draw is fixed, so each trial is exactly
/// `count * p * revenue`.
pub fn constant_request(count: u64, p: f64, revenue: i64, trials: u64) -> SimulationRequest {
    SimulationRequest {
        tiers: vec![single_tier(
            ValueRange::constant(count),
            ValueRange::constant(p),
            RevenueRange::Integer(ValueRange::constant(revenue)),
        )],
        trials,
    }
}

pub fn varying_request(trials: u64) -> SimulationRequest {
    SimulationRequest {
        tiers: default_tiers(),
        trials,
    }
}
