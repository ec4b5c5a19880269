use crate::core::EstimatorError;
use crate::evaluation::{Estimator, MomentEstimator};
use crate::simulation::ResultSet;
use crate::utils::math::{normal_critical_value, percentile_of_sorted};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SummaryOptions {
    /// Coverage of the normal confidence interval for the mean.
    pub confidence_level: f64,
    /// Report adjusted (G1/G2) skewness and kurtosis instead of the plain
    /// moment coefficients.
    pub bias_corrected: bool,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            bias_corrected: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
}

/// Descriptive statistics of one [`ResultSet`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub count: u64,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub variance: f64,
    pub percentile_5: f64,
    pub percentile_95: f64,
    pub skewness: f64,
    pub kurtosis: f64,
    pub min: f64,
    pub max: f64,
    pub confidence_level: f64,
    pub confidence_interval: ConfidenceInterval,
}

/// [`summarize_with`] at the default 95% level and plain moment coefficients.
pub fn summarize(results: &ResultSet) -> Result<SummaryStatistics, EstimatorError> {
    summarize_with(results, SummaryOptions::default())
}

/// Non-finite totals are left out of every statistic alike, so `count` can be
/// lower than the number of trials; a run with no finite total is
/// [`EstimatorError::EmptyResult`].
pub fn summarize_with(
    results: &ResultSet,
    options: SummaryOptions,
) -> Result<SummaryStatistics, EstimatorError> {
    let mut sorted: Vec<f64> = results.iter().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return Err(EstimatorError::EmptyResult);
    }
    if sorted.len() < results.len() {
        warn!(
            "{} of {} totals are not finite and are left out of the summary",
            results.len() - sorted.len(),
            results.len()
        );
    }
    let z = normal_critical_value(options.confidence_level);
    if z.is_nan() {
        return Err(EstimatorError::InvalidConfidenceLevel(
            options.confidence_level,
        ));
    }

    let mut moments = MomentEstimator::default();
    moments.extend(sorted.iter().copied());
    sorted.sort_by(f64::total_cmp);

    let n = moments.count();
    let mean = moments.estimation();
    let std_dev = moments.std_dev();
    let half_width = z * std_dev / (n as f64).sqrt();

    let (skewness, kurtosis) = if options.bias_corrected {
        (moments.skewness_unbiased(), moments.kurtosis_unbiased())
    } else {
        (moments.skewness(), moments.kurtosis())
    };

    Ok(SummaryStatistics {
        count: n,
        mean,
        median: percentile_of_sorted(&sorted, 50.0),
        std_dev,
        variance: moments.variance(),
        percentile_5: percentile_of_sorted(&sorted, 5.0),
        percentile_95: percentile_of_sorted(&sorted, 95.0),
        skewness,
        kurtosis,
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        confidence_level: options.confidence_level,
        confidence_interval: ConfidenceInterval {
            lower: mean - half_width,
            upper: mean + half_width,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::run;
    use crate::core::{RevenueRange, SimulationRequest, ValueRange};
    use crate::testing::dummies::{constant_request, single_tier};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn empty_results_fail() {
        let err = summarize(&ResultSet::default()).unwrap_err();
        assert_eq!(err, EstimatorError::EmptyResult);
        assert_eq!(err.to_string(), "no simulation has been run yet");
    }

    #[test]
    fn constant_results_collapse_every_statistic() {
        let s = summarize(&ResultSet::from(vec![500.0; 5])).unwrap();
        assert_eq!(s.count, 5);
        assert_eq!(s.mean, 500.0);
        assert_eq!(s.median, 500.0);
        assert_eq!(s.std_dev, 0.0);
        assert_eq!(s.variance, 0.0);
        assert_eq!(s.percentile_5, 500.0);
        assert_eq!(s.percentile_95, 500.0);
        assert_eq!(
            s.confidence_interval,
            ConfidenceInterval {
                lower: 500.0,
                upper: 500.0
            }
        );
    }

    #[test]
    fn end_to_end_constant_scenario() {
        let request = constant_request(1, 1.0, 1, 1000);
        let rs = run(&request, &mut StdRng::seed_from_u64(0)).unwrap();
        let s = summarize(&rs).unwrap();
        assert_eq!(s.mean, 1.0);
        assert_eq!(s.std_dev, 0.0);
    }

    #[test]
    fn known_sample() {
        let rs = ResultSet::from(vec![5.0, 1.0, 4.0, 2.0, 3.0]);
        let s = summarize(&rs).unwrap();
        assert!(close(s.mean, 3.0, 1e-12));
        assert_eq!(s.median, 3.0);
        assert!(close(s.variance, 2.0, 1e-12));
        assert!(close(s.std_dev, 2.0f64.sqrt(), 1e-12));
        assert!(close(s.percentile_5, 1.2, 1e-12));
        assert!(close(s.percentile_95, 4.8, 1e-12));
        assert!(close(s.skewness, 0.0, 1e-12));
        assert!(close(s.kurtosis, -1.3, 1e-12));
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 5.0);

        let half = 1.959964 * 2.0f64.sqrt() / 5.0f64.sqrt();
        assert!(close(s.confidence_interval.lower, 3.0 - half, 1e-5));
        assert!(close(s.confidence_interval.upper, 3.0 + half, 1e-5));
    }

    #[test]
    fn non_finite_totals_are_dropped_from_every_statistic() {
        let rs = ResultSet::from(vec![1.0, f64::NAN, 3.0, f64::INFINITY]);
        let s = summarize(&rs).unwrap();
        assert_eq!(s.count, 2);
        assert_eq!(s.mean, 2.0);
        assert_eq!(s.median, 2.0);
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 3.0);
        assert!(close(s.percentile_5, 1.1, 1e-12));
        assert!(close(s.percentile_95, 2.9, 1e-12));
        assert_eq!(s.variance, 1.0);
    }

    #[test]
    fn run_with_only_nan_totals_is_empty() {
        // +inf from the first tier meets -inf from the second on every trial.
        let huge = |revenue: f64| {
            single_tier(
                ValueRange::constant(10_000_000_000_000_000_000u64),
                ValueRange::constant(1.0),
                RevenueRange::Real(ValueRange::constant(revenue)),
            )
        };
        let request = SimulationRequest::new(vec![huge(1e300), huge(-1e300)], 4).unwrap();
        let rs = run(&request, &mut StdRng::seed_from_u64(0)).unwrap();
        assert_eq!(rs.len(), 4);
        assert!(rs.iter().all(f64::is_nan));
        assert_eq!(summarize(&rs).unwrap_err(), EstimatorError::EmptyResult);
    }

    #[test]
    fn even_length_median_is_midpoint() {
        let s = summarize(&ResultSet::from(vec![4.0, 1.0, 3.0, 2.0])).unwrap();
        assert_eq!(s.median, 2.5);
    }

    #[test]
    fn options_change_level_and_bias() {
        let rs = ResultSet::from(vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        let s = summarize_with(
            &rs,
            SummaryOptions {
                confidence_level: 0.99,
                bias_corrected: true,
            },
        )
        .unwrap();
        assert_eq!(s.confidence_level, 0.99);
        assert!(close(s.kurtosis, -1.2, 1e-12));
        let wide = s.confidence_interval.upper - s.confidence_interval.lower;
        let narrow = {
            let d = summarize(&rs).unwrap().confidence_interval;
            d.upper - d.lower
        };
        assert!(wide > narrow);
    }

    #[test]
    fn invalid_confidence_level_rejected() {
        let rs = ResultSet::from(vec![1.0]);
        let err = summarize_with(
            &rs,
            SummaryOptions {
                confidence_level: 1.5,
                bias_corrected: false,
            },
        )
        .unwrap_err();
        assert_eq!(err, EstimatorError::InvalidConfidenceLevel(1.5));
    }
}
