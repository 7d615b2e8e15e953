//! Qubit identifiers and operand lists.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a qubit within a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

/// An ordered operand list.
///
/// Gates accept either a single qubit or a sequence of them; both shapes
/// normalize into this type before an operation is forwarded, so callers
/// never need to care which one a gate expects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Qubits(Vec<QubitId>);

impl Qubits {
    /// Create an empty operand list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of qubits.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow as a slice, in caller order.
    pub fn as_slice(&self) -> &[QubitId] {
        &self.0
    }

    /// Iterate in caller order.
    pub fn iter(&self) -> std::slice::Iter<'_, QubitId> {
        self.0.iter()
    }
}

impl From<QubitId> for Qubits {
    fn from(qubit: QubitId) -> Self {
        Qubits(vec![qubit])
    }
}

impl From<Vec<QubitId>> for Qubits {
    fn from(qubits: Vec<QubitId>) -> Self {
        Qubits(qubits)
    }
}

impl From<&[QubitId]> for Qubits {
    fn from(qubits: &[QubitId]) -> Self {
        Qubits(qubits.to_vec())
    }
}

impl<const N: usize> From<[QubitId; N]> for Qubits {
    fn from(qubits: [QubitId; N]) -> Self {
        Qubits(qubits.to_vec())
    }
}

impl FromIterator<QubitId> for Qubits {
    fn from_iter<I: IntoIterator<Item = QubitId>>(iter: I) -> Self {
        Qubits(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Qubits {
    type Item = &'a QubitId;
    type IntoIter = std::slice::Iter<'a, QubitId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Qubits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "[{}]", parts.join(", "))
    }
}
