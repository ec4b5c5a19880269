use thiserror::Error;

/// Failures reported by the estimator and the statistics routines.
///
/// All of them are input-validation failures: nothing here is transient, so
/// callers present the message and let the user retry with corrected input.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EstimatorError {
    #[error("invalid range for {field} ({low}, {high}): {reason}")]
    InvalidRange {
        field: String,
        low: String,
        high: String,
        reason: String,
    },

    #[error("trial count must be > 0")]
    InvalidTrialCount,

    #[error("no simulation has been run yet")]
    EmptyResult,

    #[error("could not parse {field}: {reason}")]
    Parse { field: String, reason: String },

    #[error("confidence level must be in (0, 1), got {0}")]
    InvalidConfidenceLevel(f64),

    #[error("histogram needs at least one bin")]
    InvalidBinCount,
}

impl EstimatorError {
    pub(crate) fn invalid_range<T: ToString, R: Into<String>>(
        field: &str,
        low: T,
        high: T,
        reason: R,
    ) -> Self {
        EstimatorError::InvalidRange {
            field: field.to_string(),
            low: low.to_string(),
            high: high.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn parse<R: Into<String>>(field: &str, reason: R) -> Self {
        EstimatorError::Parse {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}
