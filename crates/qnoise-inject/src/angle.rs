//! Angle-perturbation noise for single-angle rotation families.
//!
//! A rotation family such as `rx` needs its angle before it is a gate, so
//! noise is attached at the family level: [`NoisyAngleFactory`] stands in
//! for the family and builds a [`NoisyAngleGate`] for each angle it is
//! given. Every application of such a gate adds a freshly sampled offset to
//! the angle, separately for each qubit.

use qnoise_ir::{Circuit, GateFamily, ParameterExpression, Qubits, StandardGate};
use tracing::{debug, trace};

use crate::error::{NoiseError, NoiseResult};
use crate::op::{GateOp, NoiseWrapper, WrapperId, identity_eq, latex_form, require_operands};
use crate::profile::{ProfileUpdate, SharedProfile};
use crate::unitary::GateMatrix;

/// A rotation whose angle is perturbed on every application.
#[derive(Debug)]
pub struct NoisyAngleGate {
    id: WrapperId,
    family: GateFamily,
    angle: ParameterExpression,
    profile: SharedProfile,
    drop_on_failure: bool,
}

impl NoisyAngleGate {
    /// Wrap `family(angle)`.
    pub fn new(
        family: GateFamily,
        angle: impl Into<ParameterExpression>,
        profile: impl Into<SharedProfile>,
    ) -> Self {
        Self {
            id: WrapperId::next(),
            family,
            angle: angle.into(),
            profile: profile.into(),
            drop_on_failure: false,
        }
    }

    /// Wrap an existing single-angle gate.
    pub fn from_gate(gate: &StandardGate, profile: impl Into<SharedProfile>) -> NoiseResult<Self> {
        match (gate.family(), gate.angle()) {
            (Some(family), Some(angle)) => Ok(Self::new(family, angle.clone(), profile)),
            _ => Err(NoiseError::UnsupportedGate {
                gate_name: gate.name().to_string(),
                reason: "not a single-angle gate".to_string(),
            }),
        }
    }

    /// Replace the gate by identity with the profile's failure probability.
    ///
    /// Off by default: plain angle noise never drops an application.
    #[must_use]
    pub fn with_drop_on_failure(mut self, enabled: bool) -> Self {
        self.drop_on_failure = enabled;
        self
    }

    /// Gate family.
    pub fn family(&self) -> GateFamily {
        self.family
    }

    /// Unperturbed angle.
    pub fn angle(&self) -> &ParameterExpression {
        &self.angle
    }

    /// The gate without noise.
    pub fn ideal(&self) -> StandardGate {
        self.family.build(self.angle.clone())
    }

    /// Draw an offset and build the perturbed gate.
    fn perturbed(&self) -> NoiseResult<StandardGate> {
        let delta = self.sample()?.scalar()?;
        Ok(self.family.build(self.angle.offset(delta)))
    }

    /// Inverse wrapper sharing this profile.
    pub fn inverted(&self) -> Self {
        Self {
            id: WrapperId::next(),
            family: self.family,
            angle: self.angle.negated(),
            profile: self.profile.clone(),
            drop_on_failure: self.drop_on_failure,
        }
    }
}

impl GateOp for NoisyAngleGate {
    fn label(&self) -> String {
        format!("{}_noisy", self.ideal())
    }

    fn latex(&self) -> String {
        format!("{}${{}}_{{noisy}}$", latex_form(&self.ideal()))
    }

    fn num_qubits(&self) -> u32 {
        self.family.num_qubits()
    }

    /// Matrix of one perturbed realization; `None` while the angle is
    /// symbolic.
    fn matrix(&self) -> NoiseResult<Option<GateMatrix>> {
        if self.angle.is_symbolic() {
            return Ok(None);
        }
        Ok(GateMatrix::of(&self.perturbed()?))
    }

    fn inverse(&self) -> NoiseResult<Box<dyn GateOp>> {
        Ok(Box::new(self.inverted()))
    }

    fn apply(&self, circuit: &mut Circuit, qubits: &Qubits) -> NoiseResult<()> {
        require_operands(self.family.name(), qubits)?;

        // Controlled rotations: one offset for the whole operand list.
        if self.family.num_qubits() != 1 {
            if self.drop_on_failure && self.should_fail() {
                trace!(family = %self.family, %qubits, "noisy rotation dropped");
                for &qubit in qubits {
                    circuit.id(qubit)?;
                }
                return Ok(());
            }
            circuit.apply(self.perturbed()?, qubits.as_slice())?;
            return Ok(());
        }

        for &qubit in qubits {
            if self.drop_on_failure && self.should_fail() {
                trace!(family = %self.family, %qubit, "noisy rotation dropped");
                circuit.id(qubit)?;
                continue;
            }
            let gate = self.perturbed()?;
            trace!(%gate, %qubit, "applying perturbed rotation");
            circuit.apply(gate, &[qubit])?;
        }
        Ok(())
    }
}

impl NoiseWrapper for NoisyAngleGate {
    fn id(&self) -> WrapperId {
        self.id
    }

    fn profile(&self) -> &SharedProfile {
        &self.profile
    }
}

identity_eq!(NoisyAngleGate);

/// Stand-in for a rotation family that builds noisy gates.
///
/// Keeps the family's name, so code looking gates up by name sees no
/// difference. Every gate it builds shares the factory's profile.
#[derive(Debug, Clone)]
pub struct NoisyAngleFactory {
    family: GateFamily,
    profile: SharedProfile,
    drop_on_failure: bool,
}

impl NoisyAngleFactory {
    /// Factory for `family`.
    pub fn new(family: GateFamily, profile: impl Into<SharedProfile>) -> Self {
        debug!(%family, "creating noisy angle factory");
        Self {
            family,
            profile: profile.into(),
            drop_on_failure: false,
        }
    }

    /// See [`NoisyAngleGate::with_drop_on_failure`].
    #[must_use]
    pub fn with_drop_on_failure(mut self, enabled: bool) -> Self {
        self.drop_on_failure = enabled;
        self
    }

    /// Name of the wrapped family.
    pub fn name(&self) -> &'static str {
        self.family.name()
    }

    /// Wrapped family.
    pub fn family(&self) -> GateFamily {
        self.family
    }

    /// Profile shared by every constructed gate.
    pub fn profile(&self) -> &SharedProfile {
        &self.profile
    }

    /// Build a noisy gate for `angle`.
    pub fn construct(&self, angle: impl Into<ParameterExpression>) -> NoisyAngleGate {
        NoisyAngleGate::new(self.family, angle, self.profile.clone())
            .with_drop_on_failure(self.drop_on_failure)
    }

    /// Update the shared profile.
    pub fn update_model(&self, update: ProfileUpdate) {
        self.profile.update(update);
    }
}
