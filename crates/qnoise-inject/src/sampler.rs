//! Random-value sources for noise profiles.
//!
//! A [`Sampler`] is called with the profile's argument list and returns one
//! [`Sample`] per call. Any `FnMut(&[f64]) -> NoiseResult<Sample>` closure is
//! a sampler; [`BuiltinSampler`] and [`SequenceSampler`] cover the cases a
//! configuration file can name.

use std::fmt;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution as _, Normal, Uniform};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{NoiseError, NoiseResult};

/// One draw from a sampler: one or more scalar components.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample(Vec<f64>);

impl Sample {
    /// Wrap a list of components.
    pub fn new(components: Vec<f64>) -> Self {
        Self(components)
    }

    /// The first component.
    pub fn scalar(&self) -> NoiseResult<f64> {
        self.component(0)
    }

    /// Component `index`.
    pub fn component(&self, index: usize) -> NoiseResult<f64> {
        self.0.get(index).copied().ok_or(NoiseError::SampleTooShort {
            needed: index + 1,
            got: self.0.len(),
        })
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the sample has no components.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All components.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl From<f64> for Sample {
    fn from(value: f64) -> Self {
        Self(vec![value])
    }
}

impl From<Vec<f64>> for Sample {
    fn from(components: Vec<f64>) -> Self {
        Self(components)
    }
}

impl<const N: usize> From<[f64; N]> for Sample {
    fn from(components: [f64; N]) -> Self {
        Self(components.to_vec())
    }
}

/// A source of random values, called with a fixed argument list.
///
/// Arguments are not validated up front; a sampler reports bad arguments
/// from the first call to [`Sampler::sample`].
pub trait Sampler {
    /// Draw one sample.
    fn sample(&mut self, args: &[f64]) -> NoiseResult<Sample>;
}

impl<F> Sampler for F
where
    F: FnMut(&[f64]) -> NoiseResult<Sample>,
{
    fn sample(&mut self, args: &[f64]) -> NoiseResult<Sample> {
        self(args)
    }
}

/// Distribution kinds understood by [`BuiltinSampler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Distribution {
    /// Normal distribution; arguments are `(mean, std_dev)` pairs.
    #[serde(alias = "normal")]
    Gaussian,
    /// Uniform distribution over `[low, high)`; arguments are `(low, high)` pairs.
    Uniform,
    /// Always returns the arguments themselves.
    Constant,
}

impl Distribution {
    /// Lowercase name, as used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            Distribution::Gaussian => "gaussian",
            Distribution::Uniform => "uniform",
            Distribution::Constant => "constant",
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Seedable sampler for the distributions in [`Distribution`].
pub struct BuiltinSampler {
    distribution: Distribution,
    rng: StdRng,
}

impl BuiltinSampler {
    /// Sampler seeded from system entropy.
    pub fn new(distribution: Distribution) -> Self {
        Self {
            distribution,
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sampler.
    pub fn seeded(distribution: Distribution, seed: u64) -> Self {
        Self {
            distribution,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// The distribution drawn from.
    pub fn distribution(&self) -> Distribution {
        self.distribution
    }

    fn pairs(
        distribution: Distribution,
        args: &[f64],
    ) -> NoiseResult<impl Iterator<Item = (f64, f64)> + '_> {
        if args.is_empty() || args.len() % 2 != 0 {
            return Err(NoiseError::InvalidSamplerArgs {
                sampler: distribution.to_string(),
                expected: "a non-empty multiple of 2".to_string(),
                got: args.len(),
            });
        }
        Ok(args.chunks_exact(2).map(|pair| (pair[0], pair[1])))
    }
}

impl fmt::Debug for BuiltinSampler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuiltinSampler")
            .field("distribution", &self.distribution)
            .finish_non_exhaustive()
    }
}

impl Sampler for BuiltinSampler {
    fn sample(&mut self, args: &[f64]) -> NoiseResult<Sample> {
        let components = match self.distribution {
            Distribution::Constant => {
                if args.is_empty() {
                    return Err(NoiseError::InvalidSamplerArgs {
                        sampler: self.distribution.to_string(),
                        expected: "at least 1".to_string(),
                        got: 0,
                    });
                }
                args.to_vec()
            }
            Distribution::Gaussian => {
                let mut out = Vec::with_capacity(args.len() / 2);
                for (mean, std_dev) in Self::pairs(self.distribution, args)? {
                    let normal = Normal::new(mean, std_dev).map_err(|e| {
                        NoiseError::Sampler(format!("gaussian({mean}, {std_dev}): {e}"))
                    })?;
                    out.push(normal.sample(&mut self.rng));
                }
                out
            }
            Distribution::Uniform => {
                let mut out = Vec::with_capacity(args.len() / 2);
                for (low, high) in Self::pairs(self.distribution, args)? {
                    // A span that overflows f64 panics inside `Uniform::new`.
                    if !(low.is_finite() && high.is_finite())
                        || low > high
                        || !(high - low).is_finite()
                    {
                        return Err(NoiseError::Sampler(format!(
                            "uniform({low}, {high}): invalid range"
                        )));
                    }
                    // `Uniform::new` rejects an empty range.
                    let value = if low == high {
                        low
                    } else {
                        Uniform::new(low, high).sample(&mut self.rng)
                    };
                    out.push(value);
                }
                out
            }
        };
        trace!(distribution = %self.distribution, ?components, "sampled");
        Ok(Sample(components))
    }
}

/// Deterministic sampler cycling through a fixed list of samples.
///
/// Arguments are ignored.
#[derive(Debug, Clone)]
pub struct SequenceSampler {
    samples: Vec<Sample>,
    next: usize,
}

impl SequenceSampler {
    /// Cycle through scalar values.
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self::from_samples(values.into_iter().map(Sample::from))
    }

    /// Cycle through multi-component samples.
    pub fn from_samples(samples: impl IntoIterator<Item = Sample>) -> Self {
        Self {
            samples: samples.into_iter().collect(),
            next: 0,
        }
    }
}

impl Sampler for SequenceSampler {
    fn sample(&mut self, _args: &[f64]) -> NoiseResult<Sample> {
        if self.samples.is_empty() {
            return Err(NoiseError::Sampler("sequence sampler is empty".to_string()));
        }
        let sample = self.samples[self.next].clone();
        self.next = (self.next + 1) % self.samples.len();
        Ok(sample)
    }
}
