use crate::evaluation::estimators::Estimator;

/// Streaming mean plus second to fourth central moment sums.
///
/// Uses the single-pass update of Pébay (2008), which keeps a constant
/// stream exact: every delta is zero after the first observation, so the
/// mean equals the value and all moment sums stay at zero.
#[derive(Debug, Default, Clone, Copy)]
pub struct MomentEstimator {
    n: u64,
    mean: f64,
    m2: f64,
    m3: f64,
    m4: f64,
}

impl MomentEstimator {
    /// Population variance (sum of squares divided by N).
    pub fn variance(&self) -> f64 {
        if self.n == 0 {
            return f64::NAN;
        }
        self.m2 / self.n as f64
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Fisher-Pearson moment coefficient `g1 = m3 / m2^1.5`.
    ///
    /// NaN for fewer than one observation or zero variance.
    pub fn skewness(&self) -> f64 {
        let n = self.n as f64;
        if self.n == 0 || self.m2 == 0.0 {
            return f64::NAN;
        }
        let m2 = self.m2 / n;
        let m3 = self.m3 / n;
        m3 / m2.powf(1.5)
    }

    /// Excess kurtosis `g2 = m4 / m2² - 3`.
    pub fn kurtosis(&self) -> f64 {
        let n = self.n as f64;
        if self.n == 0 || self.m2 == 0.0 {
            return f64::NAN;
        }
        let m2 = self.m2 / n;
        let m4 = self.m4 / n;
        m4 / (m2 * m2) - 3.0
    }

    /// Adjusted Fisher-Pearson skewness `G1`; NaN below three observations.
    pub fn skewness_unbiased(&self) -> f64 {
        let n = self.n as f64;
        if self.n < 3 {
            return f64::NAN;
        }
        self.skewness() * (n * (n - 1.0)).sqrt() / (n - 2.0)
    }

    /// Bias-corrected excess kurtosis `G2`; NaN below four observations.
    pub fn kurtosis_unbiased(&self) -> f64 {
        let n = self.n as f64;
        if self.n < 4 {
            return f64::NAN;
        }
        ((n + 1.0) * self.kurtosis() + 6.0) * (n - 1.0) / ((n - 2.0) * (n - 3.0))
    }
}

impl Estimator for MomentEstimator {
    fn add(&mut self, v: f64) {
        if v.is_nan() {
            return;
        }
        let n1 = self.n as f64;
        self.n += 1;
        let n = self.n as f64;

        let delta = v - self.mean;
        let delta_n = delta / n;
        let delta_n2 = delta_n * delta_n;
        let term1 = delta * delta_n * n1;

        self.mean += delta_n;
        self.m4 += term1 * delta_n2 * (n * n - 3.0 * n + 3.0) + 6.0 * delta_n2 * self.m2
            - 4.0 * delta_n * self.m3;
        self.m3 += term1 * delta_n * (n - 2.0) - 3.0 * delta_n * self.m2;
        self.m2 += term1;
    }

    #[inline]
    fn estimation(&self) -> f64 {
        if self.n > 0 { self.mean } else { f64::NAN }
    }

    #[inline]
    fn count(&self) -> u64 {
        self.n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    fn fed(values: &[f64]) -> MomentEstimator {
        let mut e = MomentEstimator::default();
        e.extend(values.iter().copied());
        e
    }

    #[test]
    fn empty_is_nan() {
        let e = MomentEstimator::default();
        assert_eq!(e.count(), 0);
        assert!(e.estimation().is_nan());
        assert!(e.variance().is_nan());
        assert!(e.skewness().is_nan());
    }

    #[test]
    fn nan_observations_are_skipped() {
        let e = fed(&[1.0, f64::NAN, 3.0]);
        assert_eq!(e.count(), 2);
        assert_eq!(e.estimation(), 2.0);
    }

    #[test]
    fn constant_stream_is_exact() {
        let e = fed(&[500.0; 5]);
        assert_eq!(e.estimation(), 500.0);
        assert_eq!(e.variance(), 0.0);
        assert_eq!(e.std_dev(), 0.0);
        assert!(e.skewness().is_nan());
        assert!(e.kurtosis().is_nan());
    }

    #[test]
    fn population_moments_match_two_pass() {
        let xs = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let e = fed(&xs);
        assert!(close(e.estimation(), 5.0, 1e-12));
        assert!(close(e.variance(), 4.0, 1e-12));
        assert!(close(e.std_dev(), 2.0, 1e-12));

        // two-pass reference
        let n = xs.len() as f64;
        let m2 = xs.iter().map(|x| (x - 5.0).powi(2)).sum::<f64>() / n;
        let m3 = xs.iter().map(|x| (x - 5.0).powi(3)).sum::<f64>() / n;
        let m4 = xs.iter().map(|x| (x - 5.0).powi(4)).sum::<f64>() / n;
        assert!(close(e.skewness(), m3 / m2.powf(1.5), 1e-12));
        assert!(close(e.kurtosis(), m4 / (m2 * m2) - 3.0, 1e-12));
    }

    #[test]
    fn symmetric_data_has_zero_skew() {
        let e = fed(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert!(close(e.skewness(), 0.0, 1e-12));
        // uniform-ish five points: m4/m2^2 = 6.8/4 = 1.7
        assert!(close(e.kurtosis(), 1.7 - 3.0, 1e-12));
    }

    #[test]
    fn bias_corrected_variants() {
        let e = fed(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        // G2 = ((n+1) g2 + 6)(n-1) / ((n-2)(n-3)) = (6 * -1.3 + 6) * 4 / 6 = -1.2
        assert!(close(e.kurtosis_unbiased(), -1.2, 1e-12));
        assert!(close(e.skewness_unbiased(), 0.0, 1e-12));

        let small = fed(&[1.0, 2.0]);
        assert!(small.skewness_unbiased().is_nan());
        assert!(small.kurtosis_unbiased().is_nan());
    }
}
