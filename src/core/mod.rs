mod error;
mod range;
mod request;
mod tier;

pub use error::EstimatorError;
pub use range::{RangeBound, ValueRange};
pub use request::{DEFAULT_TRIALS, SimulationRequest, default_tiers};
pub use tier::{RevenueRange, Tier};
