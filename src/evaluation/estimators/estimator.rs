/// Online scalar accumulator.
///
/// Observations arrive one at a time through [`add`](Estimator::add); the
/// running estimate is available at any point through
/// [`estimation`](Estimator::estimation).
pub trait Estimator {
    /// Incorporates a new observation. NaN observations are ignored.
    fn add(&mut self, v: f64);

    /// Current estimate, NaN before the first observation.
    fn estimation(&self) -> f64;

    /// Number of observations incorporated so far.
    fn count(&self) -> u64;

    fn extend<I: IntoIterator<Item = f64>>(&mut self, values: I)
    where
        Self: Sized,
    {
        for v in values {
            self.add(v);
        }
    }
}
