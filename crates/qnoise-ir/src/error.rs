//! Errors raised while recording gates into a circuit.

use thiserror::Error;

use crate::qubit::QubitId;

/// Rejected gate application.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Operand outside the circuit's register.
    #[error("{qubit} is not in the circuit{}", gate_context(.gate_name.as_deref()))]
    QubitNotFound {
        /// Offending qubit.
        qubit: QubitId,
        /// Gate being applied, if known.
        gate_name: Option<String>,
    },

    /// Operand count differs from the gate's arity.
    #[error("'{gate_name}' acts on {expected} qubit(s) but was given {got}")]
    QubitCountMismatch {
        /// Gate name.
        gate_name: String,
        /// Gate arity.
        expected: u32,
        /// Operands supplied.
        got: u32,
    },

    /// Same qubit used twice in one application.
    #[error("{qubit} appears more than once{}", gate_context(.gate_name.as_deref()))]
    DuplicateQubit {
        /// Repeated qubit.
        qubit: QubitId,
        /// Gate being applied, if known.
        gate_name: Option<String>,
    },

    /// Gate applied to no qubits.
    #[error("'{0}' applied to an empty qubit list")]
    EmptyOperands(String),
}

fn gate_context(gate_name: Option<&str>) -> String {
    gate_name.map(|name| format!(" (applying '{name}')")).unwrap_or_default()
}

/// Result alias for circuit operations.
pub type IrResult<T> = Result<T, IrError>;
