use crate::core::EstimatorError;
use rand::distr::Uniform;
use rand::distr::uniform::SampleUniform;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Scalar types a [`ValueRange`] can be declared over.
pub trait RangeBound: Copy + PartialOrd + Display + SampleUniform {
    /// Whether the value can be drawn from at all (rejects NaN / infinities).
    fn is_drawable(&self) -> bool {
        true
    }

    /// Whether `high - low` fits the type, which uniform sampling needs.
    fn span_fits(_low: Self, _high: Self) -> bool {
        true
    }
}

impl RangeBound for u64 {}

impl RangeBound for i64 {}

impl RangeBound for f64 {
    fn is_drawable(&self) -> bool {
        self.is_finite()
    }

    fn span_fits(low: Self, high: Self) -> bool {
        (high - low).is_finite()
    }
}

/// Inclusive `(low, high)` pair. A zero-width range (`low == high`) is legal
/// and always draws `low`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ValueRange<T> {
    pub low: T,
    pub high: T,
}

impl<T: RangeBound> ValueRange<T> {
    /// Checked constructor; `field` names the range in the error message.
    pub fn new(field: &str, low: T, high: T) -> Result<Self, EstimatorError> {
        let range = Self { low, high };
        range.validate(field)?;
        Ok(range)
    }

    /// Zero-width range.
    pub fn constant(value: T) -> Self {
        Self {
            low: value,
            high: value,
        }
    }

    pub fn validate(&self, field: &str) -> Result<(), EstimatorError> {
        let reason = if !self.low.is_drawable() || !self.high.is_drawable() {
            "bounds must be finite"
        } else if self.low > self.high {
            "low must not exceed high"
        } else if !T::span_fits(self.low, self.high) {
            "range is too wide to sample"
        } else {
            return Ok(());
        };
        Err(EstimatorError::invalid_range(field, self.low, self.high, reason))
    }

    pub fn is_constant(&self) -> bool {
        self.low == self.high
    }

    /// Builds the inclusive uniform distribution for this range.
    pub fn sampler(&self, field: &str) -> Result<Uniform<T>, EstimatorError> {
        self.validate(field)?;
        Uniform::new_inclusive(self.low, self.high)
            .map_err(|e| EstimatorError::invalid_range(field, self.low, self.high, e.to_string()))
    }
}

impl<T: Display> Display for ValueRange<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.low, self.high)
    }
}
