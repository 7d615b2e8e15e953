//! One recorded gate application.

use serde::{Deserialize, Serialize};

use crate::gate::StandardGate;
use crate::qubit::QubitId;

/// A gate and the qubits it was applied to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The gate as it was applied, angles already perturbed if noisy.
    pub gate: StandardGate,
    /// Operands in gate order, controls first.
    pub qubits: Vec<QubitId>,
}

impl Instruction {
    /// Record `gate` on `qubits`.
    pub fn new(gate: StandardGate, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            gate,
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Gate name.
    pub fn name(&self) -> &str {
        self.gate.name()
    }

    /// True for `id`, which is what a failed noisy gate leaves behind.
    pub fn is_identity(&self) -> bool {
        matches!(self.gate, StandardGate::I)
    }

    /// True if `qubit` is one of the operands.
    pub fn acts_on(&self, qubit: QubitId) -> bool {
        self.qubits.contains(&qubit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_accessors() {
        let inst = Instruction::new(StandardGate::CX, [QubitId(1), QubitId(0)]);
        assert_eq!(inst.name(), "cx");
        assert!(inst.acts_on(QubitId(0)));
        assert!(!inst.acts_on(QubitId(2)));
        assert!(!inst.is_identity());
        assert!(Instruction::new(StandardGate::I, [QubitId(0)]).is_identity());
    }

    #[test]
    fn test_instruction_json() {
        let inst = Instruction::new(StandardGate::Rx(0.25.into()), [QubitId(3)]);
        let json = serde_json::to_string(&inst).unwrap();
        let back: Instruction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, inst);
    }
}
