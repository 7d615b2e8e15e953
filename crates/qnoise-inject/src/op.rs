//! The gate contract shared by ideal and noisy operations.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use qnoise_ir::{Circuit, IrError, Qubits, StandardGate};

use crate::error::{NoiseError, NoiseResult};
use crate::profile::{ProfileUpdate, SharedProfile};
use crate::sampler::Sample;
use crate::unitary::GateMatrix;

/// Anything that can be applied to qubits like a gate.
///
/// Standard gates implement this directly, so circuit code can hold a
/// `Box<dyn GateOp>` and not care whether it is noisy.
pub trait GateOp: fmt::Debug {
    /// Textual form, e.g. `rx(0.5)` or `rx(0.5)_noisy`.
    fn label(&self) -> String;

    /// LaTeX form.
    fn latex(&self) -> String {
        self.label()
    }

    /// Number of qubits one application acts on.
    fn num_qubits(&self) -> u32;

    /// Unitary of one application, if it has a meaningful one.
    ///
    /// Noisy operations draw a fresh sample for every call.
    fn matrix(&self) -> NoiseResult<Option<GateMatrix>>;

    /// Inverse operation.
    fn inverse(&self) -> NoiseResult<Box<dyn GateOp>>;

    /// Forward this operation into `circuit`.
    fn apply(&self, circuit: &mut Circuit, qubits: &Qubits) -> NoiseResult<()>;
}

impl GateOp for StandardGate {
    fn label(&self) -> String {
        self.to_string()
    }

    fn latex(&self) -> String {
        latex_form(self)
    }

    fn num_qubits(&self) -> u32 {
        StandardGate::num_qubits(self)
    }

    fn matrix(&self) -> NoiseResult<Option<GateMatrix>> {
        Ok(GateMatrix::of(self))
    }

    fn inverse(&self) -> NoiseResult<Box<dyn GateOp>> {
        StandardGate::inverse(self)
            .map(|gate| Box::new(gate) as Box<dyn GateOp>)
            .ok_or_else(|| NoiseError::NotInvertible(self.name().to_string()))
    }

    /// Single-qubit gates are applied to each qubit in turn; wider gates
    /// take the whole list as their operands.
    fn apply(&self, circuit: &mut Circuit, qubits: &Qubits) -> NoiseResult<()> {
        require_operands(self.name(), qubits)?;
        if StandardGate::num_qubits(self) == 1 {
            for &qubit in qubits {
                circuit.apply(self.clone(), &[qubit])?;
            }
        } else {
            circuit.apply(self.clone(), qubits.as_slice())?;
        }
        Ok(())
    }
}

/// Reject an empty operand list, as `Circuit::apply` does.
pub(crate) fn require_operands(name: &str, qubits: &Qubits) -> NoiseResult<()> {
    if qubits.is_empty() {
        return Err(IrError::EmptyOperands(name.to_string()).into());
    }
    Ok(())
}

/// LaTeX rendering of a standard gate.
pub(crate) fn latex_form(gate: &StandardGate) -> String {
    let params: Vec<String> = gate.parameters().iter().map(ToString::to_string).collect();
    let symbol = match gate {
        StandardGate::I => "I",
        StandardGate::X => "X",
        StandardGate::Y => "Y",
        StandardGate::Z => "Z",
        StandardGate::H => "H",
        StandardGate::S => "S",
        StandardGate::Sdg => "S^\\dagger",
        StandardGate::T => "T",
        StandardGate::Tdg => "T^\\dagger",
        StandardGate::SX => "\\sqrt{X}",
        StandardGate::SXdg => "\\sqrt{X}^\\dagger",
        StandardGate::Rx(_) => "R_x",
        StandardGate::Ry(_) => "R_y",
        StandardGate::Rz(_) => "R_z",
        StandardGate::P(_) => "P",
        StandardGate::U(..) => "U",
        StandardGate::CX => "CX",
        StandardGate::CY => "CY",
        StandardGate::CZ => "CZ",
        StandardGate::Swap => "SWAP",
        StandardGate::ISwap => "iSWAP",
        StandardGate::CRx(_) => "CR_x",
        StandardGate::CRy(_) => "CR_y",
        StandardGate::CRz(_) => "CR_z",
        StandardGate::CCX => "CCX",
    };
    if params.is_empty() {
        symbol.to_string()
    } else {
        format!("{symbol}({})", params.join(", "))
    }
}

static NEXT_WRAPPER_ID: AtomicU64 = AtomicU64::new(0);

/// Identity of one noisy wrapper instance.
///
/// Every constructor takes a fresh id, so two wrappers compare equal only if
/// they are the same instance. Optimizers must not merge or cancel two
/// independently sampled operations just because they print the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WrapperId(u64);

impl WrapperId {
    /// Allocate a fresh id.
    pub fn next() -> Self {
        WrapperId(NEXT_WRAPPER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for WrapperId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Capabilities shared by every noisy wrapper.
pub trait NoiseWrapper: GateOp {
    /// Instance identity.
    fn id(&self) -> WrapperId;

    /// The profile this wrapper samples from.
    fn profile(&self) -> &SharedProfile;

    /// Draw a fresh sample from the profile.
    fn sample(&self) -> NoiseResult<Sample> {
        self.profile().sample()
    }

    /// Decide whether this application fails.
    fn should_fail(&self) -> bool {
        self.profile().should_fail()
    }

    /// Update the profile in place; every wrapper sharing it sees the change.
    fn update_model(&self, update: ProfileUpdate) {
        self.profile().update(update);
    }

    /// Identity comparison across wrapper kinds.
    fn same_wrapper(&self, other: &dyn NoiseWrapper) -> bool {
        self.id() == other.id()
    }
}

/// `PartialEq`/`Eq` by [`WrapperId`].
macro_rules! identity_eq {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl PartialEq for $ty {
                fn eq(&self, other: &Self) -> bool {
                    $crate::op::NoiseWrapper::id(self) == $crate::op::NoiseWrapper::id(other)
                }
            }

            impl Eq for $ty {}
        )+
    };
}

pub(crate) use identity_eq;

#[cfg(test)]
mod tests {
    use super::*;
    use qnoise_ir::QubitId;

    #[test]
    fn test_wrapper_ids_are_unique() {
        let a = WrapperId::next();
        let b = WrapperId::next();
        assert_ne!(a, b);
        assert_eq!(a, a);
    }

    #[test]
    fn test_single_qubit_gate_broadcasts() {
        let mut circuit = Circuit::with_size("c", 3);
        let qubits = Qubits::from(vec![QubitId(0), QubitId(2)]);
        GateOp::apply(&StandardGate::H, &mut circuit, &qubits).unwrap();

        assert_eq!(circuit.num_ops(), 2);
        assert_eq!(circuit.instructions()[1].qubits, vec![QubitId(2)]);
    }

    #[test]
    fn test_two_qubit_gate_takes_operand_list() {
        let mut circuit = Circuit::with_size("c", 2);
        let qubits = Qubits::from([QubitId(1), QubitId(0)]);
        GateOp::apply(&StandardGate::CX, &mut circuit, &qubits).unwrap();

        assert_eq!(circuit.num_ops(), 1);
        assert_eq!(circuit.instructions()[0].qubits, vec![QubitId(1), QubitId(0)]);
    }

    #[test]
    fn test_standard_inverse_and_latex() {
        let inv = GateOp::inverse(&StandardGate::T).unwrap();
        assert_eq!(inv.label(), "tdg");
        assert!(matches!(
            GateOp::inverse(&StandardGate::ISwap),
            Err(NoiseError::NotInvertible(_))
        ));
        assert_eq!(StandardGate::Rx(0.5.into()).latex(), "R_x(0.5)");
        assert_eq!(GateOp::latex(&StandardGate::Sdg), "S^\\dagger");
    }
}
