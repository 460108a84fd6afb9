use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::Distribution as _;
use rand_distr::{
    Beta, Binomial, Cauchy, ChiSquared, Exp, FisherF, Gamma, Normal, Poisson, StudentT, Weibull,
    Zipf,
};

use modelgen_core::{Distribution, DistributionConfig};

use crate::errors::GenerationError;

/// Largest prime that fits in 32 bits, used to fold multi-part seeds.
const SEED_FOLD_PRIME: i64 = 4294967291;

/// Seeded source of every random draw in a generation run.
///
/// Exactly one logical stream of draws exists per engine; reseeding makes
/// all subsequent output fully determined. The ambient distribution used
/// by [`RandomEngine::next_value`] is an explicit config value, replaced
/// wholesale via [`RandomEngine::set_distribution`].
#[derive(Debug, Clone)]
pub struct RandomEngine {
    rng: ChaCha8Rng,
    distribution: DistributionConfig,
}

impl RandomEngine {
    /// Engine seeded from process entropy. Reproducibility still holds for
    /// any stream observed after an explicit reseed.
    pub fn from_entropy() -> Self {
        let seed = rand::rng().random::<u64>();
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            distribution: DistributionConfig::default(),
        }
    }

    pub fn with_seed(seed: i64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed as u64),
            distribution: DistributionConfig::default(),
        }
    }

    pub fn reseed(&mut self, seed: i64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed as u64);
    }

    /// Folds a multi-part seed into one 64-bit seed:
    /// `combined = combined * P + part` with P the largest 32-bit prime,
    /// wrapping on overflow.
    pub fn reseed_parts(&mut self, parts: &[i32]) {
        let mut combined: i64 = 0;
        for part in parts {
            combined = combined
                .wrapping_mul(SEED_FOLD_PRIME)
                .wrapping_add(i64::from(*part));
        }
        self.reseed(combined);
    }

    pub fn distribution(&self) -> DistributionConfig {
        self.distribution
    }

    pub fn set_distribution(&mut self, config: DistributionConfig) {
        self.distribution = config;
    }

    pub fn next_int(&mut self) -> i64 {
        self.rng.random()
    }

    /// Uniform integer in `[0, bound)`.
    pub fn int_below(&mut self, bound: i64) -> Result<i64, GenerationError> {
        if bound <= 0 {
            return Err(GenerationError::InvalidRange(format!(
                "bound must be positive, got {bound}"
            )));
        }
        Ok(self.rng.random_range(0..bound))
    }

    /// Uniform integer in `[lower, upper]`, endpoints included.
    pub fn int_between(&mut self, lower: i64, upper: i64) -> Result<i64, GenerationError> {
        if upper < lower {
            return Err(GenerationError::InvalidRange(format!(
                "upper limit {upper} must not be less than lower limit {lower}"
            )));
        }
        Ok(self.rng.random_range(lower..=upper))
    }

    /// Uniform real in `[0, 1)`.
    pub fn next_real(&mut self) -> f64 {
        self.rng.random()
    }

    /// Uniform real in `[lower, upper]`. Returns `lower` exactly when the
    /// bounds coincide.
    pub fn real_between(&mut self, lower: f64, upper: f64) -> Result<f64, GenerationError> {
        if upper < lower {
            return Err(GenerationError::InvalidRange(format!(
                "upper limit {upper} must not be less than lower limit {lower}"
            )));
        }
        let diff = upper - lower;
        if diff == 0.0 {
            return Ok(lower);
        }
        Ok(self.rng.random::<f64>() * diff + lower)
    }

    pub fn next_bool(&mut self) -> bool {
        self.rng.random_bool(0.5)
    }

    pub fn next_bytes(&mut self, n: usize) -> Vec<u8> {
        let mut bytes = vec![0_u8; n];
        self.rng.fill_bytes(&mut bytes);
        bytes
    }

    pub fn gaussian(&mut self, mean: f64, stddev: f64) -> Result<f64, GenerationError> {
        let normal = Normal::new(mean, stddev)
            .map_err(|err| GenerationError::InvalidRange(err.to_string()))?;
        Ok(normal.sample(&mut self.rng))
    }

    /// `length` distinct indices drawn uniformly from `[0, size)`.
    pub fn permutation(&mut self, size: usize, length: usize) -> Result<Vec<usize>, GenerationError> {
        if size == 0 || length == 0 {
            return Err(GenerationError::InvalidRange(format!(
                "permutation arguments must be positive, got size {size}, length {length}"
            )));
        }
        if length > size {
            return Err(GenerationError::InvalidRange(format!(
                "permutation length {length} exceeds size {size}"
            )));
        }
        Ok(rand::seq::index::sample(&mut self.rng, size, length).into_vec())
    }

    /// Samples the ambient distribution config.
    pub fn next_value(&mut self) -> Result<f64, GenerationError> {
        let config = self.distribution;
        self.value_from(config.distribution, &config.args)
    }

    /// Samples the given distribution with per-call parameters. Tags with
    /// no wired-up sampler fail with `UnsupportedDistribution`.
    pub fn value_from(
        &mut self,
        distribution: Distribution,
        args: &[f64],
    ) -> Result<f64, GenerationError> {
        match distribution {
            Distribution::Uniform => self.real_between(arg(distribution, args, 0)?, arg(distribution, args, 1)?),
            Distribution::Exponential => {
                let mean = arg(distribution, args, 0)?;
                if mean <= 0.0 {
                    return Err(GenerationError::InvalidRange(format!(
                        "exponential mean must be positive, got {mean}"
                    )));
                }
                let exp = Exp::new(1.0 / mean)
                    .map_err(|err| GenerationError::InvalidRange(err.to_string()))?;
                Ok(exp.sample(&mut self.rng))
            }
            Distribution::Binomial => {
                let trials = arg(distribution, args, 0)?;
                let p = arg(distribution, args, 1)?;
                if trials < 0.0 {
                    return Err(GenerationError::InvalidRange(format!(
                        "binomial trial count must be non-negative, got {trials}"
                    )));
                }
                let binomial = Binomial::new(trials as u64, p)
                    .map_err(|err| GenerationError::InvalidRange(err.to_string()))?;
                Ok(binomial.sample(&mut self.rng) as f64)
            }
            Distribution::Gaussian => {
                self.gaussian(arg(distribution, args, 0)?, arg(distribution, args, 1)?)
            }
            Distribution::Poisson => {
                let poisson = Poisson::new(arg(distribution, args, 0)?)
                    .map_err(|err| GenerationError::InvalidRange(err.to_string()))?;
                Ok(poisson.sample(&mut self.rng))
            }
            Distribution::Beta => {
                let beta = Beta::new(arg(distribution, args, 0)?, arg(distribution, args, 1)?)
                    .map_err(|err| GenerationError::InvalidRange(err.to_string()))?;
                Ok(beta.sample(&mut self.rng))
            }
            Distribution::Cauchy => {
                let cauchy = Cauchy::new(arg(distribution, args, 0)?, arg(distribution, args, 1)?)
                    .map_err(|err| GenerationError::InvalidRange(err.to_string()))?;
                Ok(cauchy.sample(&mut self.rng))
            }
            Distribution::ChiSquare => {
                let chi = ChiSquared::new(arg(distribution, args, 0)?)
                    .map_err(|err| GenerationError::InvalidRange(err.to_string()))?;
                Ok(chi.sample(&mut self.rng))
            }
            Distribution::F => {
                let f = FisherF::new(arg(distribution, args, 0)?, arg(distribution, args, 1)?)
                    .map_err(|err| GenerationError::InvalidRange(err.to_string()))?;
                Ok(f.sample(&mut self.rng))
            }
            Distribution::Gamma => {
                let gamma = Gamma::new(arg(distribution, args, 0)?, arg(distribution, args, 1)?)
                    .map_err(|err| GenerationError::InvalidRange(err.to_string()))?;
                Ok(gamma.sample(&mut self.rng))
            }
            Distribution::T => {
                let t = StudentT::new(arg(distribution, args, 0)?)
                    .map_err(|err| GenerationError::InvalidRange(err.to_string()))?;
                Ok(t.sample(&mut self.rng))
            }
            Distribution::Weibull => {
                let weibull = Weibull::new(arg(distribution, args, 0)?, arg(distribution, args, 1)?)
                    .map_err(|err| GenerationError::InvalidRange(err.to_string()))?;
                Ok(weibull.sample(&mut self.rng))
            }
            Distribution::Zipf => {
                let zipf = Zipf::new(arg(distribution, args, 0)?, arg(distribution, args, 1)?)
                    .map_err(|err| GenerationError::InvalidRange(err.to_string()))?;
                Ok(zipf.sample(&mut self.rng))
            }
            Distribution::HyperGeometric | Distribution::Pascal => {
                Err(GenerationError::UnsupportedDistribution(distribution))
            }
        }
    }
}

fn arg(distribution: Distribution, args: &[f64], index: usize) -> Result<f64, GenerationError> {
    args.get(index).copied().ok_or_else(|| {
        GenerationError::InvalidRange(format!(
            "distribution {distribution:?} requires at least {} parameter(s)",
            index + 1
        ))
    })
}
