//! Failure-only noisy wrapper around a fixed gate.

use qnoise_ir::{Circuit, Qubits, StandardGate};
use tracing::trace;

use crate::error::{NoiseError, NoiseResult};
use crate::op::{GateOp, NoiseWrapper, WrapperId, identity_eq, latex_form, require_operands};
use crate::profile::SharedProfile;
use crate::unitary::GateMatrix;

/// Noisy version of a fixed gate.
///
/// Each application either runs the base gate or, with the profile's failure
/// probability, the identity. No sample is drawn. A single-qubit base gate
/// decides independently for every qubit it is applied to; a wider gate
/// decides once for its whole operand list.
#[derive(Debug)]
pub struct NoisyGate {
    id: WrapperId,
    base: StandardGate,
    profile: SharedProfile,
}

impl NoisyGate {
    /// Wrap `base`.
    pub fn new(base: StandardGate, profile: impl Into<SharedProfile>) -> Self {
        Self {
            id: WrapperId::next(),
            base,
            profile: profile.into(),
        }
    }

    /// The wrapped gate.
    pub fn base(&self) -> &StandardGate {
        &self.base
    }

    /// A new instance around the same gate and profile.
    pub fn fresh(&self) -> Self {
        Self::new(self.base.clone(), self.profile.clone())
    }

    /// Inverse wrapper sharing this profile.
    pub fn inverted(&self) -> NoiseResult<Self> {
        let base = self
            .base
            .inverse()
            .ok_or_else(|| NoiseError::NotInvertible(self.base.name().to_string()))?;
        Ok(Self::new(base, self.profile.clone()))
    }
}

impl GateOp for NoisyGate {
    fn label(&self) -> String {
        format!("{}_noisy", self.base)
    }

    fn latex(&self) -> String {
        format!("{}${{}}_{{noisy}}$", latex_form(&self.base))
    }

    fn num_qubits(&self) -> u32 {
        self.base.num_qubits()
    }

    /// Matrix of the base gate, i.e. of the non-failing branch.
    fn matrix(&self) -> NoiseResult<Option<GateMatrix>> {
        Ok(GateMatrix::of(&self.base))
    }

    fn inverse(&self) -> NoiseResult<Box<dyn GateOp>> {
        Ok(Box::new(self.inverted()?))
    }

    fn apply(&self, circuit: &mut Circuit, qubits: &Qubits) -> NoiseResult<()> {
        require_operands(self.base.name(), qubits)?;
        let arity = self.base.num_qubits() as usize;
        if arity == 1 {
            for &qubit in qubits {
                if self.should_fail() {
                    trace!(gate = %self.base, %qubit, "noisy gate failed, applying identity");
                    circuit.id(qubit)?;
                } else {
                    circuit.apply(self.base.clone(), &[qubit])?;
                }
            }
            return Ok(());
        }

        if qubits.len() != arity {
            return Err(NoiseError::QubitCountMismatch {
                gate_name: self.label(),
                expected: arity,
                got: qubits.len(),
            });
        }
        if self.should_fail() {
            trace!(gate = %self.base, %qubits, "noisy gate failed, applying identity");
            for &qubit in qubits {
                circuit.id(qubit)?;
            }
        } else {
            circuit.apply(self.base.clone(), qubits.as_slice())?;
        }
        Ok(())
    }
}

impl NoiseWrapper for NoisyGate {
    fn id(&self) -> WrapperId {
        self.id
    }

    fn profile(&self) -> &SharedProfile {
        &self.profile
    }
}

identity_eq!(NoisyGate);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::NoiseProfile;
    use crate::sampler::SequenceSampler;
    use qnoise_ir::QubitId;

    fn profile(rate: f64) -> NoiseProfile {
        NoiseProfile::new(SequenceSampler::new([0.0]), vec![]).with_failure_rate(rate)
    }

    #[test]
    fn test_label_and_latex() {
        let gate = NoisyGate::new(StandardGate::H, profile(0.0));
        assert_eq!(gate.label(), "h_noisy");
        assert_eq!(gate.latex(), "H${}_{noisy}$");
    }

    #[test]
    fn test_no_failure_forwards_base() {
        let gate = NoisyGate::new(StandardGate::H, profile(0.0));
        let mut circuit = Circuit::with_size("c", 3);
        gate.apply(&mut circuit, &Qubits::from(vec![QubitId(0), QubitId(1), QubitId(2)]))
            .unwrap();

        assert_eq!(circuit.count_ops().get("h"), Some(&3));
    }

    #[test]
    fn test_empty_operands_rejected() {
        let gate = NoisyGate::new(StandardGate::H, profile(1.0));
        let mut circuit = Circuit::with_size("c", 1);
        assert!(matches!(
            gate.apply(&mut circuit, &Qubits::from(Vec::new())),
            Err(NoiseError::Ir(qnoise_ir::IrError::EmptyOperands(_)))
        ));
        assert_eq!(circuit.num_ops(), 0);
    }

    #[test]
    fn test_certain_failure_applies_identity() {
        let gate = NoisyGate::new(StandardGate::CX, profile(1.0));
        let mut circuit = Circuit::with_size("c", 2);
        gate.apply(&mut circuit, &Qubits::from([QubitId(0), QubitId(1)]))
            .unwrap();

        assert_eq!(circuit.count_ops().get("id"), Some(&2));
        assert_eq!(circuit.count_ops().get("cx"), None);
    }

    #[test]
    fn test_wrong_operand_count() {
        let gate = NoisyGate::new(StandardGate::CX, profile(0.0));
        let mut circuit = Circuit::with_size("c", 3);
        let err = gate.apply(&mut circuit, &Qubits::from(QubitId(0))).unwrap_err();
        assert!(matches!(
            err,
            NoiseError::QubitCountMismatch {
                expected: 2,
                got: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_inverse_shares_profile() {
        let gate = NoisyGate::new(StandardGate::S, profile(0.0));
        let inv = gate.inverted().unwrap();

        assert_eq!(inv.base(), &StandardGate::Sdg);
        assert!(inv.profile().ptr_eq(gate.profile()));
        assert_ne!(inv, gate);
    }

    #[test]
    fn test_identity_equality() {
        let a = NoisyGate::new(StandardGate::H, profile(0.0));
        let b = NoisyGate::new(StandardGate::H, profile(0.0));
        assert_eq!(a, a);
        assert_ne!(a, b);
        assert!(a.same_wrapper(&a));
        assert!(!a.same_wrapper(&b));
    }
}
