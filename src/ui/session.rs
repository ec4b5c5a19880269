use crate::core::{EstimatorError, SimulationRequest};
use crate::evaluation::{Histogram, SummaryOptions, SummaryStatistics, summarize_with};
use crate::simulation::{ExportFormat, ResultSet, run, run_parallel};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Estimator(#[from] EstimatorError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// What the presentation layer asks the session to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Simulate(SimulationRequest),
    /// Same as `Simulate` but split over `chunks` rayon tasks.
    SimulateParallel {
        request: SimulationRequest,
        chunks: usize,
    },
    ShowSummary,
    Save {
        path: PathBuf,
        format: ExportFormat,
    },
    Histogram {
        bins: usize,
    },
    Reseed(u64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Simulated(SummaryStatistics),
    Summary(SummaryStatistics),
    Saved { path: PathBuf, rows: usize },
    Histogram(Histogram, SummaryStatistics),
    Reseeded(u64),
}

/// Presentation-side state: the generator, the last result set and its
/// summary. The estimator itself stays stateless.
pub struct Session {
    rng: StdRng,
    options: SummaryOptions,
    results: Option<ResultSet>,
    summary: Option<SummaryStatistics>,
}

impl Session {
    pub fn new(seed: Option<u64>, options: SummaryOptions) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng,
            options,
            results: None,
            summary: None,
        }
    }

    pub fn results(&self) -> Option<&ResultSet> {
        self.results.as_ref()
    }

    pub fn summary(&self) -> Option<&SummaryStatistics> {
        self.summary.as_ref()
    }

    pub fn options(&self) -> SummaryOptions {
        self.options
    }

    pub fn dispatch(&mut self, command: Command) -> Result<Outcome, SessionError> {
        let outcome = match command {
            Command::Simulate(request) => {
                let results = run(&request, &mut self.rng)?;
                self.store(results)?
            }
            Command::SimulateParallel { request, chunks } => {
                let seed = self.rng.next_u64();
                let results = run_parallel(&request, seed, chunks)?;
                self.store(results)?
            }
            Command::ShowSummary => Outcome::Summary(self.require_summary()?.clone()),
            Command::Save { path, format } => {
                let results = self.results.as_ref().ok_or(EstimatorError::EmptyResult)?;
                results.export(&path, format)?;
                info!("saved {} results to {}", results.len(), path.display());
                Outcome::Saved {
                    path,
                    rows: results.len(),
                }
            }
            Command::Histogram { bins } => {
                let results = self.results.as_ref().ok_or(EstimatorError::EmptyResult)?;
                let histogram = Histogram::from_results(results, bins)?;
                Outcome::Histogram(histogram, self.require_summary()?.clone())
            }
            Command::Reseed(seed) => {
                self.rng = StdRng::seed_from_u64(seed);
                info!("generator reseeded with {seed}");
                Outcome::Reseeded(seed)
            }
        };
        Ok(outcome)
    }

    /// Summarizes first so a failed summary leaves the previous run in place.
    fn store(&mut self, results: ResultSet) -> Result<Outcome, SessionError> {
        let summary = summarize_with(&results, self.options).inspect_err(|e| warn!("{e}"))?;
        info!(
            "simulated {} trials, mean revenue {:.2}",
            results.len(),
            summary.mean
        );
        self.results = Some(results);
        self.summary = Some(summary.clone());
        Ok(Outcome::Simulated(summary))
    }

    fn require_summary(&self) -> Result<&SummaryStatistics, EstimatorError> {
        self.summary.as_ref().ok_or(EstimatorError::EmptyResult)
    }
}
