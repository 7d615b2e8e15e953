//! Control/target noise for `cx`.
//!
//! A noisy `cx` combines three sources driven by one profile:
//!
//! 1. [`TargetFlipNoise`]: the flip on the target is over- or under-rotated
//!    by `δt`, emitted as `cx` followed by `crx(δt)`.
//! 2. [`ControlWobble`]: the control qubit picks up a small rotation `δc`
//!    about a fixed axis (`rz` unless configured otherwise).
//! 3. Total failure: with the profile's failure probability the whole
//!    operation becomes identity on both qubits.
//!
//! A sample with two or more components supplies `[δt, δc]`; a
//! single-component sample drives both.

use num_complex::Complex64;
use qnoise_ir::{Circuit, GateFamily, QubitId, Qubits, StandardGate};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{NoiseError, NoiseResult};
use crate::op::{GateOp, NoiseWrapper, WrapperId, identity_eq};
use crate::profile::SharedProfile;
use crate::sampler::Sample;
use crate::unitary::{GateMatrix, Unitary2x2, Unitary4x4};

fn check_pair(gate_name: &str, qubits: &Qubits) -> NoiseResult<(QubitId, QubitId)> {
    match qubits.as_slice() {
        &[control, target] => Ok((control, target)),
        other => Err(NoiseError::QubitCountMismatch {
            gate_name: gate_name.to_string(),
            expected: 2,
            got: other.len(),
        }),
    }
}

/// Target block of a mis-rotated flip: `cos(δ/2)·X − i·sin(δ/2)·I`.
pub fn flip_block(delta: f64) -> Unitary2x2 {
    let c = Complex64::new((delta / 2.0).cos(), 0.0);
    let s = Complex64::new(0.0, -(delta / 2.0).sin());
    Unitary2x2::new(s, c, c, s)
}

/// Mis-rotated controlled flip on the target qubit.
#[derive(Debug)]
pub struct TargetFlipNoise {
    id: WrapperId,
    profile: SharedProfile,
}

impl TargetFlipNoise {
    /// Flip noise drawing from `profile`.
    pub fn new(profile: impl Into<SharedProfile>) -> Self {
        Self {
            id: WrapperId::next(),
            profile: profile.into(),
        }
    }

    /// Unitary for a given over-rotation, control on the first qubit.
    pub fn matrix_for(delta: f64) -> Unitary4x4 {
        Unitary4x4::controlled(&flip_block(delta))
    }

    fn emit(
        circuit: &mut Circuit,
        control: QubitId,
        target: QubitId,
        delta: f64,
    ) -> NoiseResult<()> {
        circuit.cx(control, target)?;
        circuit.crx(delta, control, target)?;
        Ok(())
    }
}

impl GateOp for TargetFlipNoise {
    fn label(&self) -> String {
        "cx_flip_noisy".to_string()
    }

    fn latex(&self) -> String {
        "CX${}_{flip}$".to_string()
    }

    fn num_qubits(&self) -> u32 {
        2
    }

    fn matrix(&self) -> NoiseResult<Option<GateMatrix>> {
        let delta = self.sample()?.scalar()?;
        Ok(Some(GateMatrix::Two(Self::matrix_for(delta))))
    }

    fn inverse(&self) -> NoiseResult<Box<dyn GateOp>> {
        Ok(Box::new(Self::new(self.profile.clone())))
    }

    fn apply(&self, circuit: &mut Circuit, qubits: &Qubits) -> NoiseResult<()> {
        let (control, target) = check_pair(&self.label(), qubits)?;
        let delta = self.sample()?.scalar()?;
        Self::emit(circuit, control, target, delta)
    }
}

impl NoiseWrapper for TargetFlipNoise {
    fn id(&self) -> WrapperId {
        self.id
    }

    fn profile(&self) -> &SharedProfile {
        &self.profile
    }
}

/// Rotation axis of the control wobble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WobbleAxis {
    /// `rx`
    #[serde(alias = "rx")]
    X,
    /// `ry`
    #[serde(alias = "ry")]
    Y,
    /// `rz`
    #[default]
    #[serde(alias = "rz")]
    Z,
}

impl WobbleAxis {
    /// Rotation family about this axis.
    pub fn family(self) -> GateFamily {
        match self {
            WobbleAxis::X => GateFamily::Rx,
            WobbleAxis::Y => GateFamily::Ry,
            WobbleAxis::Z => GateFamily::Rz,
        }
    }

    fn matrix(self, delta: f64) -> Unitary2x2 {
        match self {
            WobbleAxis::X => Unitary2x2::rx(delta),
            WobbleAxis::Y => Unitary2x2::ry(delta),
            WobbleAxis::Z => Unitary2x2::rz(delta),
        }
    }
}

/// Small rotation on the control qubit.
#[derive(Debug)]
pub struct ControlWobble {
    id: WrapperId,
    axis: WobbleAxis,
    profile: SharedProfile,
}

impl ControlWobble {
    /// Wobble about Z.
    pub fn new(profile: impl Into<SharedProfile>) -> Self {
        Self {
            id: WrapperId::next(),
            axis: WobbleAxis::Z,
            profile: profile.into(),
        }
    }

    /// Wobble about `axis`.
    #[must_use]
    pub fn with_axis(mut self, axis: WobbleAxis) -> Self {
        self.axis = axis;
        self
    }

    /// Rotation axis.
    pub fn axis(&self) -> WobbleAxis {
        self.axis
    }

    fn rotation(&self, delta: f64) -> StandardGate {
        self.axis.family().build(delta)
    }
}

impl GateOp for ControlWobble {
    fn label(&self) -> String {
        format!("{}_wobble_noisy", self.axis.family())
    }

    fn num_qubits(&self) -> u32 {
        1
    }

    fn matrix(&self) -> NoiseResult<Option<GateMatrix>> {
        let delta = self.sample()?.scalar()?;
        Ok(Some(GateMatrix::Single(self.axis.matrix(delta))))
    }

    fn inverse(&self) -> NoiseResult<Box<dyn GateOp>> {
        Ok(Box::new(Self {
            id: WrapperId::next(),
            axis: self.axis,
            profile: self.profile.clone(),
        }))
    }

    fn apply(&self, circuit: &mut Circuit, qubits: &Qubits) -> NoiseResult<()> {
        for &qubit in qubits {
            let delta = self.sample()?.scalar()?;
            circuit.apply(self.rotation(delta), &[qubit])?;
        }
        Ok(())
    }
}

impl NoiseWrapper for ControlWobble {
    fn id(&self) -> WrapperId {
        self.id
    }

    fn profile(&self) -> &SharedProfile {
        &self.profile
    }
}

/// Noisy `cx`: target flip noise, control wobble and total failure.
#[derive(Debug)]
pub struct NoisyControlledGate {
    id: WrapperId,
    target: TargetFlipNoise,
    control: ControlWobble,
    profile: SharedProfile,
}

impl NoisyControlledGate {
    /// Noisy `cx` with all sources drawing from `profile`.
    pub fn new(profile: impl Into<SharedProfile>) -> Self {
        let profile = profile.into();
        Self {
            id: WrapperId::next(),
            target: TargetFlipNoise::new(profile.clone()),
            control: ControlWobble::new(profile.clone()),
            profile,
        }
    }

    /// Change the control wobble axis.
    #[must_use]
    pub fn with_control_axis(mut self, axis: WobbleAxis) -> Self {
        self.control = self.control.with_axis(axis);
        self
    }

    /// The wrapped gate.
    pub fn base(&self) -> StandardGate {
        StandardGate::CX
    }

    /// Target flip source.
    pub fn target_noise(&self) -> &TargetFlipNoise {
        &self.target
    }

    /// Control wobble source.
    pub fn control_noise(&self) -> &ControlWobble {
        &self.control
    }

    /// Profile seen by the target flip source.
    pub fn target_profile(&self) -> &SharedProfile {
        self.target.profile()
    }

    /// Profile seen by the control wobble source.
    pub fn control_profile(&self) -> &SharedProfile {
        self.control.profile()
    }

    /// Profile used for the failure check.
    pub fn failure_profile(&self) -> &SharedProfile {
        &self.profile
    }

    /// Inverse; `cx` is self-inverse, so this is [`Self::fresh`].
    pub fn inverted(&self) -> Self {
        self.fresh()
    }

    /// Another noisy `cx` on the same profile and wobble axis.
    pub fn fresh(&self) -> Self {
        Self {
            id: WrapperId::next(),
            target: TargetFlipNoise::new(self.profile.clone()),
            control: ControlWobble {
                id: WrapperId::next(),
                axis: self.control.axis,
                profile: self.profile.clone(),
            },
            profile: self.profile.clone(),
        }
    }

    /// Split a sample into `(δt, δc)`.
    fn deltas(sample: &Sample) -> NoiseResult<(f64, f64)> {
        let target = sample.scalar()?;
        let control = if sample.len() >= 2 {
            sample.component(1)?
        } else {
            target
        };
        Ok((target, control))
    }

    /// Combined unitary for given deltas: wobble on the control after the
    /// mis-rotated flip.
    pub fn matrix_for(&self, target_delta: f64, control_delta: f64) -> Unitary4x4 {
        let wobble = Unitary4x4::kron(
            &self.control.axis.matrix(control_delta),
            &Unitary2x2::identity(),
        );
        wobble.mul(&TargetFlipNoise::matrix_for(target_delta))
    }
}

impl GateOp for NoisyControlledGate {
    fn label(&self) -> String {
        "cx_noisy".to_string()
    }

    fn latex(&self) -> String {
        "CX${}_{noisy}$".to_string()
    }

    fn num_qubits(&self) -> u32 {
        2
    }

    /// Unitary of one non-failing realization.
    fn matrix(&self) -> NoiseResult<Option<GateMatrix>> {
        let (dt, dc) = Self::deltas(&self.sample()?)?;
        Ok(Some(GateMatrix::Two(self.matrix_for(dt, dc))))
    }

    fn inverse(&self) -> NoiseResult<Box<dyn GateOp>> {
        Ok(Box::new(self.inverted()))
    }

    fn apply(&self, circuit: &mut Circuit, qubits: &Qubits) -> NoiseResult<()> {
        let (control, target) = check_pair(&self.label(), qubits)?;

        if self.should_fail() {
            trace!(%control, %target, "noisy cx failed, applying identity");
            circuit.id(control)?;
            circuit.id(target)?;
            return Ok(());
        }

        let (dt, dc) = Self::deltas(&self.sample()?)?;
        trace!(%control, %target, target_delta = dt, control_delta = dc, "applying noisy cx");
        TargetFlipNoise::emit(circuit, control, target, dt)?;
        circuit.apply(self.control.rotation(dc), &[control])?;
        Ok(())
    }
}

impl NoiseWrapper for NoisyControlledGate {
    fn id(&self) -> WrapperId {
        self.id
    }

    fn profile(&self) -> &SharedProfile {
        &self.profile
    }
}

identity_eq!(TargetFlipNoise, ControlWobble, NoisyControlledGate);
