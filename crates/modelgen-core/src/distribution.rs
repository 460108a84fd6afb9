use serde::{Deserialize, Serialize};

/// The closed catalog of distribution tags a rule may request.
///
/// Not every tag has a wired-up sampler; requesting one that does not is
/// an explicit error in the engine rather than a silent default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Distribution {
    Beta,
    Binomial,
    Cauchy,
    ChiSquare,
    Exponential,
    F,
    Gamma,
    Gaussian,
    HyperGeometric,
    Uniform,
    Pascal,
    Poisson,
    T,
    Weibull,
    Zipf,
}

/// A distribution tag plus up to two numeric parameters. Held by the
/// engine as its ambient `next_value` configuration, or passed per call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributionConfig {
    pub distribution: Distribution,
    pub args: [f64; 2],
}

impl DistributionConfig {
    pub fn new(distribution: Distribution, args: [f64; 2]) -> Self {
        Self { distribution, args }
    }
}

impl Default for DistributionConfig {
    /// Uniform on `[0, 1]`, so probability tests work out of the box.
    fn default() -> Self {
        Self {
            distribution: Distribution::Uniform,
            args: [0.0, 1.0],
        }
    }
}
