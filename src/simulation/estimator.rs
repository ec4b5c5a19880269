use crate::core::{EstimatorError, RevenueRange, SimulationRequest, Tier};
use crate::simulation::ResultSet;
use log::debug;
use rand::distr::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

#[derive(Debug, Clone)]
enum RevenueSampler {
    Integer(Uniform<i64>),
    Real(Uniform<f64>),
}

/// Distributions for one tier, built once per run.
#[derive(Debug, Clone)]
struct TierSampler {
    customers: Uniform<u64>,
    probability: Uniform<f64>,
    unit_revenue: RevenueSampler,
}

impl TierSampler {
    fn try_new(tier: &Tier) -> Result<Self, EstimatorError> {
        let unit_revenue = match &tier.unit_revenue {
            RevenueRange::Integer(r) => {
                RevenueSampler::Integer(r.sampler(&tier.field("unit_revenue"))?)
            }
            RevenueRange::Real(r) => RevenueSampler::Real(r.sampler(&tier.field("unit_revenue"))?),
        };
        Ok(Self {
            customers: tier.customers.sampler(&tier.field("customers"))?,
            probability: tier.probability.sampler(&tier.field("probability"))?,
            unit_revenue,
        })
    }

    /// `count × probability × unit_revenue` for one draw.
    #[inline]
    fn contribution<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let count = self.customers.sample(rng) as f64;
        let probability = self.probability.sample(rng);
        let unit_revenue = match &self.unit_revenue {
            RevenueSampler::Integer(d) => d.sample(rng) as f64,
            RevenueSampler::Real(d) => d.sample(rng),
        };
        count * probability * unit_revenue
    }
}

fn prepare(request: &SimulationRequest) -> Result<Vec<TierSampler>, EstimatorError> {
    if request.trials == 0 {
        return Err(EstimatorError::InvalidTrialCount);
    }
    request.tiers.iter().map(TierSampler::try_new).collect()
}

#[inline]
fn trial<R: Rng + ?Sized>(samplers: &[TierSampler], rng: &mut R) -> f64 {
    samplers
        .iter()
        .fold(0.0, |total, s| total + s.contribution(rng))
}

/// Runs `request.trials` independent trials on the caller's generator.
///
/// The whole request is validated before the first draw, so an invalid range
/// never yields a partial [`ResultSet`]. Draw order per trial is tier by tier,
/// customers then probability then unit revenue; seeding `rng` identically
/// reproduces the result exactly.
pub fn run<R: Rng + ?Sized>(
    request: &SimulationRequest,
    rng: &mut R,
) -> Result<ResultSet, EstimatorError> {
    let samplers = prepare(request)?;
    debug!(
        "running {} trials over {} tiers",
        request.trials,
        samplers.len()
    );

    let values: Vec<f64> = (0..request.trials).map(|_| trial(&samplers, rng)).collect();
    Ok(ResultSet::from(values))
}

/// Splits the trials into `chunks` contiguous blocks and runs them on the
/// rayon pool, each block on its own `StdRng` seeded from `seed` and the
/// block index.
///
/// Output is reproducible for a given `(seed, chunks)` pair but is a
/// different random stream from [`run`] with the same seed.
pub fn run_parallel(
    request: &SimulationRequest,
    seed: u64,
    chunks: usize,
) -> Result<ResultSet, EstimatorError> {
    let samplers = prepare(request)?;
    let chunks = chunks.max(1);
    let base = request.trials / chunks as u64;
    let remainder = request.trials % chunks as u64;
    debug!(
        "running {} trials over {} tiers in {} chunks",
        request.trials,
        samplers.len(),
        chunks
    );

    let blocks: Vec<Vec<f64>> = (0..chunks)
        .into_par_iter()
        .map(|i| {
            let i = i as u64;
            let n = base + u64::from(i < remainder);
            let mut rng = StdRng::seed_from_u64(chunk_seed(seed, i));
            (0..n).map(|_| trial(&samplers, &mut rng)).collect()
        })
        .collect();

    Ok(blocks.into_iter().flatten().collect())
}

/// SplitMix64 step so neighbouring chunk indices get unrelated seeds.
fn chunk_seed(seed: u64, index: u64) -> u64 {
    let mut z = seed.wrapping_add(index.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
