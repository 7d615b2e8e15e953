//! qnoise stochastic noise injection
//!
//! Noisy stand-ins for ideal gates. A noisy gate is applied to qubits like
//! the gate it wraps, but every application draws fresh randomness from a
//! [`NoiseProfile`] and forwards a perturbed operation (or, on failure, the
//! identity) into the [`Circuit`](qnoise_ir::Circuit).
//!
//! # Variants
//!
//! - [`NoisyGate`]: fixed gate that fails with some probability.
//! - [`NoisyAngleFactory`] / [`NoisyAngleGate`]: rotation whose angle gets a
//!   sampled offset per qubit.
//! - [`TwoAxisNoise`]: gate plus a small X/Y rotation split by a ratio.
//! - [`NoisyControlledGate`]: `cx` with target flip noise, control wobble
//!   and total failure.
//!
//! [`inject`] picks the variant for a gate; [`NoiseTable`] and [`GateSet`]
//! build a whole set of noisy gates from a YAML file.
//!
//! # Example
//!
//! ```rust
//! use qnoise_inject::{GateOp, NoiseProfile, SequenceSampler, inject};
//! use qnoise_ir::{Circuit, GateFamily, QubitId, Qubits};
//!
//! let profile = NoiseProfile::new(SequenceSampler::new([0.1, -0.1]), vec![]);
//! let rx = inject(GateFamily::Rx, profile).into_angle_factory().unwrap();
//!
//! let mut circuit = Circuit::with_size("example", 2);
//! rx.construct(0.5)
//!     .apply(&mut circuit, &Qubits::from([QubitId(0), QubitId(1)]))
//!     .unwrap();
//!
//! assert_eq!(circuit.num_ops(), 2);
//! ```

pub mod angle;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod local;
pub mod op;
pub mod profile;
pub mod sampler;
pub mod two_axis;
pub mod two_qubit;
pub mod unitary;

pub use angle::{NoisyAngleFactory, NoisyAngleGate};
pub use config::{CONFIG_ENV, GateNoiseConfig, GateSet, NOISY_GATES, NoiseModel, NoiseTable};
pub use dispatch::{Injected, inject};
pub use error::{NoiseError, NoiseResult};
pub use local::NoisyGate;
pub use op::{GateOp, NoiseWrapper, WrapperId};
pub use profile::{NoiseProfile, ProfileUpdate, SharedProfile};
pub use sampler::{BuiltinSampler, Distribution, Sample, Sampler, SequenceSampler};
pub use two_axis::{AxisOrder, TwoAxisNoise};
pub use two_qubit::{ControlWobble, NoisyControlledGate, TargetFlipNoise, WobbleAxis};
pub use unitary::{GateMatrix, Unitary2x2, Unitary4x4};
