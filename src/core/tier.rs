use crate::core::{EstimatorError, ValueRange};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Per-unit revenue range. The declared kind fixes the draw type for a run:
/// integer ranges draw whole currency units, real ranges draw continuous values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum RevenueRange {
    Integer(ValueRange<i64>),
    Real(ValueRange<f64>),
}

impl RevenueRange {
    pub fn validate(&self, field: &str) -> Result<(), EstimatorError> {
        match self {
            RevenueRange::Integer(r) => r.validate(field),
            RevenueRange::Real(r) => r.validate(field),
        }
    }

    pub fn is_constant(&self) -> bool {
        match self {
            RevenueRange::Integer(r) => r.is_constant(),
            RevenueRange::Real(r) => r.is_constant(),
        }
    }
}

/// A named customer segment with independent random ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Tier {
    pub name: String,
    /// Number of customers, drawn as an integer (inclusive).
    pub customers: ValueRange<u64>,
    /// Conversion probability. Not checked against `[0, 1]`.
    pub probability: ValueRange<f64>,
    pub unit_revenue: RevenueRange,
}

impl Tier {
    pub fn new<N: Into<String>>(
        name: N,
        customers: ValueRange<u64>,
        probability: ValueRange<f64>,
        unit_revenue: RevenueRange,
    ) -> Self {
        Self {
            name: name.into(),
            customers,
            probability,
            unit_revenue,
        }
    }

    pub fn validate(&self) -> Result<(), EstimatorError> {
        self.customers.validate(&self.field("customers"))?;
        self.probability.validate(&self.field("probability"))?;
        self.unit_revenue.validate(&self.field("unit_revenue"))
    }

    /// `true` when every draw of this tier yields the same contribution.
    pub fn is_constant(&self) -> bool {
        self.customers.is_constant()
            && self.probability.is_constant()
            && self.unit_revenue.is_constant()
    }

    pub(crate) fn field(&self, what: &str) -> String {
        format!("{}.{}", self.name, what)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn revenue_range_is_tagged_by_kind() {
        let r = RevenueRange::Integer(ValueRange::constant(100));
        let v = serde_json::to_value(r).unwrap();
        assert_eq!(v, json!({"kind": "integer", "low": 100, "high": 100}));

        let back: RevenueRange =
            serde_json::from_value(json!({"kind": "real", "low": 1.5, "high": 2.5})).unwrap();
        assert_eq!(back, RevenueRange::Real(ValueRange { low: 1.5, high: 2.5 }));
    }

    #[test]
    fn validation_names_the_offending_field() {
        let tier = Tier::new(
            "medium",
            ValueRange::constant(10),
            ValueRange { low: 0.5, high: 0.1 },
            RevenueRange::Real(ValueRange::constant(1.0)),
        );
        match tier.validate().unwrap_err() {
            EstimatorError::InvalidRange { field, .. } => assert_eq!(field, "medium.probability"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn constant_tier_detection() {
        let tier = Tier::new(
            "t",
            ValueRange::constant(1),
            ValueRange::constant(1.0),
            RevenueRange::Integer(ValueRange::constant(1)),
        );
        assert!(tier.is_constant());

        let tier = Tier::new(
            "t",
            ValueRange { low: 1, high: 2 },
            ValueRange::constant(1.0),
            RevenueRange::Integer(ValueRange::constant(1)),
        );
        assert!(!tier.is_constant());
    }
}
