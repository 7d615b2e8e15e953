//! Noise profiles: a sampler, its arguments and a failure probability.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use crate::error::NoiseResult;
use crate::sampler::{Sample, Sampler};

/// Sampler, argument list and failure probability for a noisy gate.
pub struct NoiseProfile {
    sampler: Box<dyn Sampler>,
    args: Vec<f64>,
    failure_rate: f64,
    rng: StdRng,
}

impl NoiseProfile {
    /// Create a profile with failure modeling disabled.
    pub fn new(sampler: impl Sampler + 'static, args: Vec<f64>) -> Self {
        Self {
            sampler: Box::new(sampler),
            args,
            failure_rate: 0.0,
            rng: StdRng::from_entropy(),
        }
    }

    /// Set the probability that an application is replaced by identity.
    ///
    /// Values outside `[0, 1]` are clamped.
    #[must_use]
    pub fn with_failure_rate(mut self, rate: f64) -> Self {
        self.failure_rate = clamp_rate(rate);
        self
    }

    /// Seed the generator used for failure draws.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Current failure probability.
    pub fn failure_rate(&self) -> f64 {
        self.failure_rate
    }

    /// Arguments handed to the sampler.
    pub fn args(&self) -> &[f64] {
        &self.args
    }

    /// Draw a fresh sample.
    pub fn sample(&mut self) -> NoiseResult<Sample> {
        self.sampler.sample(&self.args)
    }

    /// Decide whether this application fails.
    ///
    /// A zero rate never consumes randomness.
    pub fn should_fail(&mut self) -> bool {
        if self.failure_rate <= 0.0 {
            return false;
        }
        self.rng.r#gen::<f64>() < self.failure_rate
    }

    /// Replace the fields set in `update`.
    pub fn apply(&mut self, update: ProfileUpdate) {
        let ProfileUpdate {
            sampler,
            args,
            failure_rate,
        } = update;
        if let Some(sampler) = sampler {
            self.sampler = sampler;
        }
        if let Some(args) = args {
            self.args = args;
        }
        if let Some(rate) = failure_rate {
            self.failure_rate = clamp_rate(rate);
        }
        debug!(args = ?self.args, failure_rate = self.failure_rate, "noise profile updated");
    }

    /// Move into a shared handle.
    pub fn into_shared(self) -> SharedProfile {
        SharedProfile(Rc::new(RefCell::new(self)))
    }
}

impl fmt::Debug for NoiseProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoiseProfile")
            .field("args", &self.args)
            .field("failure_rate", &self.failure_rate)
            .finish_non_exhaustive()
    }
}

fn clamp_rate(rate: f64) -> f64 {
    if rate.is_nan() {
        warn!("failure rate is NaN, using 0");
        return 0.0;
    }
    let clamped = rate.clamp(0.0, 1.0);
    if clamped != rate {
        warn!(rate, clamped, "failure rate outside [0, 1], clamping");
    }
    clamped
}

/// Partial update for a profile; unset fields stay as they are.
#[derive(Default)]
pub struct ProfileUpdate {
    sampler: Option<Box<dyn Sampler>>,
    args: Option<Vec<f64>>,
    failure_rate: Option<f64>,
}

impl ProfileUpdate {
    /// An update that changes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the sampler.
    #[must_use]
    pub fn sampler(mut self, sampler: impl Sampler + 'static) -> Self {
        self.sampler = Some(Box::new(sampler));
        self
    }

    /// Replace the sampler arguments.
    #[must_use]
    pub fn args(mut self, args: Vec<f64>) -> Self {
        self.args = Some(args);
        self
    }

    /// Replace the failure rate.
    #[must_use]
    pub fn failure_rate(mut self, rate: f64) -> Self {
        self.failure_rate = Some(rate);
        self
    }
}

impl fmt::Debug for ProfileUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileUpdate")
            .field("sampler", &self.sampler.as_ref().map(|_| ".."))
            .field("args", &self.args)
            .field("failure_rate", &self.failure_rate)
            .finish()
    }
}

/// Handle to a profile shared by several wrappers.
///
/// Cloning the handle shares the profile; an update through any clone is
/// seen by all of them.
#[derive(Clone)]
pub struct SharedProfile(Rc<RefCell<NoiseProfile>>);

impl SharedProfile {
    /// Draw a fresh sample.
    pub fn sample(&self) -> NoiseResult<Sample> {
        self.0.borrow_mut().sample()
    }

    /// Decide whether this application fails.
    pub fn should_fail(&self) -> bool {
        self.0.borrow_mut().should_fail()
    }

    /// Apply `update` in a single mutable borrow.
    pub fn update(&self, update: ProfileUpdate) {
        self.0.borrow_mut().apply(update);
    }

    /// Current failure probability.
    pub fn failure_rate(&self) -> f64 {
        self.0.borrow().failure_rate()
    }

    /// Copy of the sampler arguments.
    pub fn args(&self) -> Vec<f64> {
        self.0.borrow().args().to_vec()
    }

    /// True if both handles point at the same profile.
    pub fn ptr_eq(&self, other: &SharedProfile) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl From<NoiseProfile> for SharedProfile {
    fn from(profile: NoiseProfile) -> Self {
        profile.into_shared()
    }
}

impl fmt::Debug for SharedProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(profile) => f.debug_tuple("SharedProfile").field(&*profile).finish(),
            Err(_) => f.write_str("SharedProfile(<borrowed>)"),
        }
    }
}
