pub mod config;
pub mod core;
pub mod evaluation;
pub mod simulation;
pub mod ui;
pub mod utils;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use crate::core::{EstimatorError, RevenueRange, SimulationRequest, Tier, ValueRange};
pub use crate::evaluation::{SummaryStatistics, summarize};
pub use crate::simulation::{ResultSet, run};
