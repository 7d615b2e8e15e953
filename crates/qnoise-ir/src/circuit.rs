//! Circuit command buffer.
//!
//! [`Circuit`] is where gate applications land: every call validates the
//! operands and appends one [`Instruction`] in program order. Whatever runs
//! afterwards (optimizers, mappers, simulators) consumes
//! [`Circuit::instructions`].

use std::collections::BTreeMap;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::instruction::Instruction;
use crate::parameter::ParameterExpression;
use crate::qubit::QubitId;

/// Ordered record of gate applications on a fixed qubit register.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Circuit {
    name: String,
    /// Number of allocated qubits; ids run `0..num_qubits`.
    num_qubits: u32,
    /// Applied instructions in program order.
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Empty circuit without qubits.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            num_qubits: 0,
            instructions: vec![],
        }
    }

    /// Circuit with qubits `0..num_qubits`.
    pub fn with_size(name: impl Into<String>, num_qubits: u32) -> Self {
        let mut circuit = Self::new(name);
        circuit.num_qubits = num_qubits;
        circuit
    }

    /// Allocate one more qubit.
    pub fn add_qubit(&mut self) -> QubitId {
        let id = QubitId(self.num_qubits);
        self.num_qubits += 1;
        id
    }

    /// Add `size` qubits, returning their ids.
    pub fn add_qubits(&mut self, size: u32) -> Vec<QubitId> {
        (0..size).map(|_| self.add_qubit()).collect()
    }

    /// Record `gate` on `qubits`.
    ///
    /// The qubit count must match the gate arity, every qubit must belong
    /// to this circuit and no qubit may appear twice.
    pub fn apply(&mut self, gate: StandardGate, qubits: &[QubitId]) -> IrResult<&mut Self> {
        let expected = gate.num_qubits();
        if qubits.is_empty() {
            return Err(IrError::EmptyOperands(gate.name().to_string()));
        }
        if qubits.len() != expected as usize {
            return Err(IrError::QubitCountMismatch {
                gate_name: gate.name().to_string(),
                expected,
                got: u32::try_from(qubits.len()).unwrap_or(u32::MAX),
            });
        }

        let mut seen = FxHashSet::default();
        for &qubit in qubits {
            if qubit.0 >= self.num_qubits {
                return Err(IrError::QubitNotFound {
                    qubit,
                    gate_name: Some(gate.name().to_string()),
                });
            }
            if !seen.insert(qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: Some(gate.name().to_string()),
                });
            }
        }

        self.instructions
            .push(Instruction::new(gate, qubits.iter().copied()));
        Ok(self)
    }

    /// `id` on `qubit`.
    pub fn id(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(StandardGate::I, &[qubit])
    }

    /// `h` on `qubit`.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(StandardGate::H, &[qubit])
    }

    /// `x` on `qubit`.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(StandardGate::X, &[qubit])
    }

    /// `rx(theta)` on `qubit`.
    pub fn rx(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(StandardGate::Rx(theta.into()), &[qubit])
    }

    /// `ry(theta)` on `qubit`.
    pub fn ry(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(StandardGate::Ry(theta.into()), &[qubit])
    }

    /// `rz(theta)` on `qubit`.
    pub fn rz(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(StandardGate::Rz(theta.into()), &[qubit])
    }

    /// `cx` with `control` first.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(StandardGate::CX, &[control, target])
    }

    /// `crx(theta)` with `control` first.
    pub fn crx(
        &mut self,
        theta: impl Into<ParameterExpression>,
        control: QubitId,
        target: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(StandardGate::CRx(theta.into()), &[control, target])
    }

    /// Circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register size.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Instructions in program order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of applied instructions.
    pub fn num_ops(&self) -> usize {
        self.instructions.len()
    }

    /// Instructions that touch `qubit`, in program order.
    pub fn ops_on(&self, qubit: QubitId) -> impl Iterator<Item = &Instruction> {
        self.instructions
            .iter()
            .filter(move |inst| inst.acts_on(qubit))
    }

    /// Count instructions by gate name.
    pub fn count_ops(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for inst in &self.instructions {
            *counts.entry(inst.name().to_string()).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_circuit() {
        let mut circuit = Circuit::with_size("bell", 2);
        circuit.h(QubitId(0)).unwrap().cx(QubitId(0), QubitId(1)).unwrap();

        assert_eq!(circuit.num_ops(), 2);
        assert_eq!(circuit.instructions()[1].qubits, vec![QubitId(0), QubitId(1)]);
        assert_eq!(circuit.count_ops().get("cx"), Some(&1));
    }

    #[test]
    fn test_rejects_unknown_qubit() {
        let mut circuit = Circuit::with_size("c", 1);
        let err = circuit.h(QubitId(4)).unwrap_err();
        assert!(matches!(err, IrError::QubitNotFound { .. }));
        assert_eq!(circuit.num_ops(), 0);
    }

    #[test]
    fn test_rejects_arity_mismatch() {
        let mut circuit = Circuit::with_size("c", 3);
        let err = circuit
            .apply(StandardGate::CX, &[QubitId(0), QubitId(1), QubitId(2)])
            .unwrap_err();
        assert!(matches!(
            err,
            IrError::QubitCountMismatch {
                expected: 2,
                got: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_duplicates() {
        let mut circuit = Circuit::with_size("c", 2);
        let err = circuit.cx(QubitId(1), QubitId(1)).unwrap_err();
        assert!(matches!(err, IrError::DuplicateQubit { .. }));
    }

    #[test]
    fn test_ops_on_qubit() {
        let mut circuit = Circuit::new("c");
        let qs = circuit.add_qubits(2);
        circuit.rx(0.1, qs[0]).unwrap();
        circuit.ry(0.2, qs[1]).unwrap();
        circuit.crx(0.3, qs[0], qs[1]).unwrap();

        let names: Vec<&str> = circuit.ops_on(qs[1]).map(Instruction::name).collect();
        assert_eq!(names, vec!["ry", "crx"]);
    }
}
