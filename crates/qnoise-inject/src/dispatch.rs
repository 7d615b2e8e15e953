//! Picks the noisy wrapper for a gate.

use qnoise_ir::{GateFamily, GateTemplate, StandardGate};
use tracing::debug;

use crate::angle::NoisyAngleFactory;
use crate::profile::SharedProfile;
use crate::two_qubit::NoisyControlledGate;

/// Result of [`inject`].
#[derive(Debug)]
pub enum Injected {
    /// `rx`, `ry` or `rz` family: a factory for angle-perturbed gates.
    AngleFactory(NoisyAngleFactory),
    /// `cx`: control/target noise.
    ControlTarget(NoisyControlledGate),
    /// Any other gate, returned as given.
    Unchanged(GateTemplate),
}

impl Injected {
    /// Name of the gate this stands in for.
    pub fn name(&self) -> &'static str {
        match self {
            Injected::AngleFactory(factory) => factory.name(),
            Injected::ControlTarget(gate) => gate.base().name(),
            Injected::Unchanged(template) => template.name(),
        }
    }

    /// True unless the gate was passed through.
    pub fn is_noisy(&self) -> bool {
        !matches!(self, Injected::Unchanged(_))
    }

    /// The factory, if one was built.
    pub fn into_angle_factory(self) -> Option<NoisyAngleFactory> {
        match self {
            Injected::AngleFactory(factory) => Some(factory),
            _ => None,
        }
    }

    /// The noisy `cx`, if one was built.
    pub fn into_control_target(self) -> Option<NoisyControlledGate> {
        match self {
            Injected::ControlTarget(gate) => Some(gate),
            _ => None,
        }
    }
}

/// Wrap `gate` with noise drawn from `profile`.
///
/// Only the `rx`/`ry`/`rz` families and `cx` have noisy counterparts; every
/// other gate comes back unchanged. Never fails.
pub fn inject(gate: impl Into<GateTemplate>, profile: impl Into<SharedProfile>) -> Injected {
    let template = gate.into();
    match template {
        GateTemplate::Family(family @ (GateFamily::Rx | GateFamily::Ry | GateFamily::Rz)) => {
            debug!(gate = family.name(), "injecting angle noise");
            Injected::AngleFactory(NoisyAngleFactory::new(family, profile))
        }
        GateTemplate::Fixed(StandardGate::CX) => {
            debug!(gate = "cx", "injecting control/target noise");
            Injected::ControlTarget(NoisyControlledGate::new(profile))
        }
        other => {
            debug!(gate = other.name(), "no noisy counterpart, passing through");
            Injected::Unchanged(other)
        }
    }
}
