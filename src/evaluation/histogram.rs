use crate::core::EstimatorError;
use crate::simulation::ResultSet;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BINS: usize = 50;

/// Equal-width bin counts of a result set.
///
/// Bins are half-open `[lo, hi)` except the last, which also holds the
/// maximum. When every value is equal the range is widened to `v ± 0.5`, or
/// by enough ulps of `v` to keep the edges distinct for large magnitudes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    edges: Vec<f64>,
    counts: Vec<u64>,
}

/// `i`-th of `bins + 1` evenly spaced edges; the halved span keeps
/// `[-f64::MAX, f64::MAX]` from overflowing.
fn edge(lo: f64, hi: f64, i: usize, bins: usize) -> f64 {
    if i == bins {
        return hi;
    }
    let span = hi - lo;
    if span.is_finite() {
        lo + span / bins as f64 * i as f64
    } else {
        2.0 * (lo / 2.0 + (hi / 2.0 - lo / 2.0) * (i as f64 / bins as f64))
    }
}

/// Estimates the bin from the value's position, then settles it against the
/// stored edges so rounding never puts `v` outside `[edges[i], edges[i + 1])`.
fn bin_index(edges: &[f64], v: f64) -> usize {
    let bins = edges.len() - 1;
    let (lo, hi) = (edges[0], edges[bins]);
    let position = (v / 2.0 - lo / 2.0) / (hi / 2.0 - lo / 2.0);
    let mut idx = ((position * bins as f64) as usize).min(bins - 1);
    while idx > 0 && v < edges[idx] {
        idx -= 1;
    }
    while idx + 1 < bins && v >= edges[idx + 1] {
        idx += 1;
    }
    idx
}

impl Histogram {
    pub fn from_results(results: &ResultSet, bins: usize) -> Result<Self, EstimatorError> {
        Self::from_values(results.values(), bins)
    }

    pub fn from_values(values: &[f64], bins: usize) -> Result<Self, EstimatorError> {
        if bins == 0 {
            return Err(EstimatorError::InvalidBinCount);
        }
        let finite = || values.iter().copied().filter(|v| v.is_finite());
        let (min, max) = finite().fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
        .ok_or(EstimatorError::EmptyResult)?;

        let (lo, hi) = if min == max {
            let pad = (min.abs() * f64::EPSILON * bins as f64).max(0.5);
            ((min - pad).max(f64::MIN), (max + pad).min(f64::MAX))
        } else {
            (min, max)
        };
        let edges: Vec<f64> = (0..=bins).map(|i| edge(lo, hi, i, bins)).collect();

        let mut counts = vec![0u64; bins];
        for v in finite() {
            counts[bin_index(&edges, v)] += 1;
        }

        Ok(Self { edges, counts })
    }

    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// `(lower edge, upper edge, count)` per bin.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .map(|(i, &c)| (self.edges[i], self.edges[i + 1], c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_bins_rejected() {
        assert_eq!(
            Histogram::from_values(&[1.0], 0).unwrap_err(),
            EstimatorError::InvalidBinCount
        );
    }

    #[test]
    fn empty_input_rejected() {
        assert_eq!(
            Histogram::from_results(&ResultSet::default(), 10).unwrap_err(),
            EstimatorError::EmptyResult
        );
    }

    #[test]
    fn counts_sum_to_len_and_max_lands_in_last_bin() {
        let values: Vec<f64> = (0..=100).map(f64::from).collect();
        let h = Histogram::from_values(&values, 10).unwrap();
        assert_eq!(h.bins(), 10);
        assert_eq!(h.edges().len(), 11);
        assert_eq!(h.edges()[0], 0.0);
        assert_eq!(h.edges()[10], 100.0);
        assert_eq!(h.total(), 101);
        assert_eq!(h.counts()[0], 10);
        assert_eq!(h.counts()[9], 11);
    }

    #[test]
    fn constant_values_go_to_middle_bin() {
        let h = Histogram::from_values(&[500.0; 5], 5).unwrap();
        assert_eq!(h.edges()[0], 499.5);
        assert_eq!(h.edges()[5], 500.5);
        assert_eq!(h.counts(), &[0, 0, 5, 0, 0]);
    }

    #[test]
    fn full_f64_span_keeps_finite_edges() {
        let h = Histogram::from_values(&[-1e308, 1e308], 2).unwrap();
        assert_eq!(h.edges(), &[-1e308, 0.0, 1e308]);
        assert_eq!(h.counts(), &[1, 1]);

        let h = Histogram::from_values(&[f64::MIN, 0.0, f64::MAX], 4).unwrap();
        assert!(h.edges().iter().all(|e| e.is_finite()));
        assert_eq!(h.counts(), &[1, 0, 1, 1]);
    }

    #[test]
    fn large_constant_still_lands_in_middle_bin() {
        let h = Histogram::from_values(&[1e17; 4], 5).unwrap();
        assert!(h.edges().windows(2).all(|w| w[0] < w[1]), "{:?}", h.edges());
        assert_eq!(h.counts(), &[0, 0, 4, 0, 0]);
    }

    #[test]
    fn iter_pairs_edges_with_counts() {
        let h = Histogram::from_values(&[0.0, 1.0, 2.0, 3.0], 2).unwrap();
        let rows: Vec<_> = h.iter().collect();
        assert_eq!(rows, vec![(0.0, 1.5, 2), (1.5, 3.0, 2)]);
    }
}
