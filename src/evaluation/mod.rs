mod estimators;
mod histogram;
mod summary;

pub use estimators::{Estimator, MomentEstimator};
pub use histogram::{DEFAULT_BINS, Histogram};
pub use summary::{
    ConfidenceInterval, DEFAULT_CONFIDENCE_LEVEL, SummaryOptions, SummaryStatistics, summarize,
    summarize_with,
};
