//! Noise configuration tables.
//!
//! A [`NoiseTable`] maps gate names to noise records and is read from YAML:
//!
//! ```yaml
//! rx:
//!   pdf: gaussian
//!   pdf_args: [0.0, 0.01]
//! h:
//!   pdf: uniform
//!   pdf_args: [-0.02, 0.02]
//!   epsilon: 0.001
//!   model:
//!     kind: two_axis
//!     ratio: 2.0
//! cx:
//!   pdf: gaussian
//!   pdf_args: [0.0, 0.02, 0.0, 0.005]
//!   epsilon: 0.01
//!   seed: 7
//! ```
//!
//! The table is consumed once by [`GateSet::from_table`], which builds the
//! gates circuit code uses in place of the ideal ones. Only the gates in
//! [`NOISY_GATES`] are ever replaced.
//!
//! The file is found through an explicit path or the `QNOISE_CONFIG`
//! environment variable. No file means no noise.

use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use qnoise_ir::{GateFamily, ParameterExpression, StandardGate};
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::angle::NoisyAngleFactory;
use crate::error::{NoiseError, NoiseResult};
use crate::local::NoisyGate;
use crate::op::{GateOp, NoiseWrapper};
use crate::profile::{NoiseProfile, ProfileUpdate, SharedProfile};
use crate::sampler::{BuiltinSampler, Distribution};
use crate::two_axis::{AxisOrder, TwoAxisNoise};
use crate::two_qubit::{NoisyControlledGate, WobbleAxis};

/// Environment variable naming the noise configuration file.
pub const CONFIG_ENV: &str = "QNOISE_CONFIG";

/// Gates that a noise table can replace.
pub const NOISY_GATES: [&str; 5] = ["rx", "ry", "rz", "h", "cx"];

/// Noise model for a fixed gate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NoiseModel {
    /// Failure only for fixed gates; angle noise for rotations; the
    /// control/target model for `cx`.
    #[default]
    Default,
    /// Two-axis composite rotation after (or before) the gate.
    TwoAxis {
        /// Ratio of X to Y noise.
        #[serde(default = "default_ratio")]
        ratio: f64,
        /// Rotation order.
        #[serde(default)]
        order: AxisOrder,
    },
}

/// Noise record for one gate.
///
/// A record missing `pdf` or `pdf_args` leaves its gate ideal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateNoiseConfig {
    /// Distribution to sample from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf: Option<Distribution>,

    /// Distribution arguments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_args: Option<Vec<f64>>,

    /// Failure probability.
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,

    /// Seed for reproducible runs; entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Noise model.
    #[serde(default)]
    pub model: NoiseModel,

    /// Let rotations fail like fixed gates.
    #[serde(default)]
    pub drop_on_failure: bool,

    /// Axis of the control wobble (`cx` only).
    #[serde(default)]
    pub control_axis: WobbleAxis,
}

fn default_epsilon() -> f64 {
    0.0
}

fn default_ratio() -> f64 {
    1.0
}

fn gate_seed(name: &str) -> u64 {
    let mut hasher = FxHasher::default();
    name.hash(&mut hasher);
    hasher.finish()
}

// Keeps the failure stream apart from the sampler stream under one seed.
const FAILURE_SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

impl GateNoiseConfig {
    /// Record with the given distribution and no failures.
    pub fn new(pdf: Distribution, pdf_args: Vec<f64>) -> Self {
        Self {
            pdf: Some(pdf),
            pdf_args: Some(pdf_args),
            epsilon: default_epsilon(),
            seed: None,
            model: NoiseModel::default(),
            drop_on_failure: false,
            control_axis: WobbleAxis::default(),
        }
    }

    /// True when both the distribution and its arguments are given.
    pub fn is_complete(&self) -> bool {
        self.pdf.is_some() && self.pdf_args.is_some()
    }

    /// Build the profile this record describes, if it is complete.
    pub fn profile(&self) -> Option<NoiseProfile> {
        let (Some(pdf), Some(args)) = (self.pdf, self.pdf_args.clone()) else {
            return None;
        };
        let profile = match self.seed {
            Some(seed) => NoiseProfile::new(BuiltinSampler::seeded(pdf, seed), args)
                .with_failure_rate(self.epsilon)
                .with_seed(seed ^ FAILURE_SEED_MIX),
            None => NoiseProfile::new(BuiltinSampler::new(pdf), args)
                .with_failure_rate(self.epsilon),
        };
        Some(profile)
    }
}

/// Gate name to noise record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoiseTable {
    gates: BTreeMap<String, GateNoiseConfig>,
}

impl NoiseTable {
    /// Empty table: no noise anywhere.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a YAML document.
    pub fn from_yaml_str(contents: &str) -> NoiseResult<Self> {
        serde_yaml_ng::from_str(contents).map_err(|e| NoiseError::Config(e.to_string()))
    }

    /// Load a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> NoiseResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| NoiseError::Config(format!("{}: {e}", path.display())))?;
        Self::from_yaml_str(&contents)
    }

    /// Load from `path`, or from the file named by `QNOISE_CONFIG`.
    ///
    /// Returns `Ok(None)` when neither is set or the file does not exist.
    pub fn load(path: Option<&Path>) -> NoiseResult<Option<Self>> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match std::env::var_os(CONFIG_ENV) {
                Some(value) if !value.is_empty() => PathBuf::from(value),
                _ => {
                    debug!("no noise configuration given, noise disabled");
                    return Ok(None);
                }
            },
        };

        if !path.exists() {
            debug!(path = %path.display(), "noise configuration not found, noise disabled");
            return Ok(None);
        }

        info!(path = %path.display(), "loading noise configuration");
        Self::from_file(&path).map(Some)
    }

    /// Set the record for `gate`.
    pub fn insert(&mut self, gate: impl Into<String>, config: GateNoiseConfig) {
        self.gates.insert(gate.into(), config);
    }

    /// Record for `gate`.
    pub fn get(&self, gate: &str) -> Option<&GateNoiseConfig> {
        self.gates.get(gate)
    }

    /// Seed every record from one run seed.
    ///
    /// Each record's seed mixes in a hash of its gate name, so gates with
    /// identical distributions still draw independent streams.
    pub fn reseed(&mut self, seed: u64) {
        for (name, config) in &mut self.gates {
            config.seed = Some(seed ^ gate_seed(name));
        }
    }

    /// Records in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &GateNoiseConfig)> {
        self.gates.iter().map(|(name, config)| (name.as_str(), config))
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// True when no gate has a record.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }
}

#[derive(Debug)]
enum FixedNoise {
    Failure(NoisyGate),
    TwoAxis(TwoAxisNoise),
}

impl FixedNoise {
    fn build(
        gate: StandardGate,
        config: &GateNoiseConfig,
        profile: NoiseProfile,
    ) -> NoiseResult<Self> {
        Ok(match config.model {
            NoiseModel::Default => FixedNoise::Failure(NoisyGate::new(gate, profile)),
            NoiseModel::TwoAxis { ratio, order } => {
                FixedNoise::TwoAxis(TwoAxisNoise::new(gate, ratio, order, profile)?)
            }
        })
    }

    fn instance(&self) -> Box<dyn GateOp> {
        match self {
            FixedNoise::Failure(gate) => Box::new(gate.fresh()),
            FixedNoise::TwoAxis(gate) => Box::new(gate.fresh()),
        }
    }

    fn profile(&self) -> &SharedProfile {
        match self {
            FixedNoise::Failure(gate) => gate.profile(),
            FixedNoise::TwoAxis(gate) => gate.profile(),
        }
    }
}

/// The gates circuit code uses, noisy where a table says so.
#[derive(Debug, Default)]
pub struct GateSet {
    rx: Option<NoisyAngleFactory>,
    ry: Option<NoisyAngleFactory>,
    rz: Option<NoisyAngleFactory>,
    h: Option<FixedNoise>,
    cx: Option<NoisyControlledGate>,
}

impl GateSet {
    /// All gates ideal.
    pub fn ideal() -> Self {
        Self::default()
    }

    /// Build the gate set described by `table`.
    #[instrument(skip(table), fields(records = table.len()))]
    pub fn from_table(table: &NoiseTable) -> NoiseResult<Self> {
        info!("injecting noise models");

        for (name, _) in table.iter() {
            if !NOISY_GATES.contains(&name) {
                warn!(
                    gate = name,
                    "noise configured for a gate that cannot be replaced, ignoring"
                );
            }
        }

        let mut set = Self::default();
        for name in NOISY_GATES {
            let Some((config, profile)) = table
                .get(name)
                .and_then(|config| config.profile().map(|profile| (config, profile)))
            else {
                debug!(gate = name, "no noise model for gate");
                continue;
            };
            debug!(gate = name, pdf = ?config.pdf, epsilon = config.epsilon, "building noisy gate");

            match name {
                "rx" | "ry" | "rz" => {
                    if config.model != NoiseModel::Default {
                        warn!(gate = name, "rotations only support angle noise, ignoring model");
                    }
                    let Some(family) = GateFamily::from_name(name) else {
                        continue;
                    };
                    let factory = NoisyAngleFactory::new(family, profile)
                        .with_drop_on_failure(config.drop_on_failure);
                    *set.rotation_slot(family) = Some(factory);
                }
                "h" => set.h = Some(FixedNoise::build(StandardGate::H, config, profile)?),
                "cx" => {
                    if config.model != NoiseModel::Default {
                        warn!(gate = name, "cx only supports the control/target model");
                    }
                    set.cx = Some(
                        NoisyControlledGate::new(profile)
                            .with_control_axis(config.control_axis),
                    );
                }
                _ => {}
            }
        }
        Ok(set)
    }

    fn rotation_slot(&mut self, family: GateFamily) -> &mut Option<NoisyAngleFactory> {
        match family {
            GateFamily::Rx => &mut self.rx,
            GateFamily::Ry => &mut self.ry,
            _ => &mut self.rz,
        }
    }

    fn factory(&self, family: GateFamily) -> Option<&NoisyAngleFactory> {
        match family {
            GateFamily::Rx => self.rx.as_ref(),
            GateFamily::Ry => self.ry.as_ref(),
            GateFamily::Rz => self.rz.as_ref(),
            _ => None,
        }
    }

    /// Rotation gate `family(angle)`.
    pub fn rotation(
        &self,
        family: GateFamily,
        angle: impl Into<ParameterExpression>,
    ) -> Box<dyn GateOp> {
        match self.factory(family) {
            Some(factory) => Box::new(factory.construct(angle)),
            None => Box::new(family.build(angle)),
        }
    }

    /// Gate standing in for `gate`.
    ///
    /// Rotations with a configured factory get angle noise as well.
    pub fn fixed(&self, gate: StandardGate) -> Box<dyn GateOp> {
        if let (StandardGate::H, Some(noise)) = (&gate, &self.h) {
            return noise.instance();
        }
        if let (StandardGate::CX, Some(cx)) = (&gate, &self.cx) {
            return Box::new(cx.fresh());
        }
        if let (Some(family), Some(angle)) = (gate.family(), gate.angle()) {
            if self.factory(family).is_some() {
                return self.rotation(family, angle.clone());
            }
        }
        Box::new(gate)
    }

    /// True if `name` is replaced by a noisy gate.
    pub fn is_noisy(&self, name: &str) -> bool {
        self.profile(name).is_some()
    }

    /// Names of the replaced gates.
    pub fn noisy_gates(&self) -> Vec<&'static str> {
        NOISY_GATES
            .into_iter()
            .filter(|name| self.is_noisy(name))
            .collect()
    }

    /// Profile behind the noisy gate called `name`.
    pub fn profile(&self, name: &str) -> Option<&SharedProfile> {
        match name {
            "rx" => self.rx.as_ref().map(NoisyAngleFactory::profile),
            "ry" => self.ry.as_ref().map(NoisyAngleFactory::profile),
            "rz" => self.rz.as_ref().map(NoisyAngleFactory::profile),
            "h" => self.h.as_ref().map(FixedNoise::profile),
            "cx" => self.cx.as_ref().map(NoisyControlledGate::failure_profile),
            _ => None,
        }
    }

    /// Reconfigure the noisy gate called `name`; false if it has none.
    pub fn update_model(&self, name: &str, update: ProfileUpdate) -> bool {
        match self.profile(name) {
            Some(profile) => {
                profile.update(update);
                true
            }
            None => false,
        }
    }
}
