mod estimator;
mod moment_estimator;

pub use estimator::Estimator;
pub use moment_estimator::MomentEstimator;
