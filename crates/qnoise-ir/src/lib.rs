//! qnoise gate and circuit primitives
//!
//! The base gate library that noisy wrappers build on: standard gates and
//! their inverses, rotation angles, qubit operands and the [`Circuit`]
//! command buffer that receives every gate application.
//!
//! # Example
//!
//! ```rust
//! use qnoise_ir::{Circuit, GateFamily, QubitId};
//!
//! let mut circuit = Circuit::with_size("example", 2);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.apply(GateFamily::Rx.build(0.5), &[QubitId(1)]).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//!
//! assert_eq!(circuit.num_ops(), 3);
//! ```

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod parameter;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::{GateFamily, GateTemplate, StandardGate};
pub use instruction::Instruction;
pub use parameter::ParameterExpression;
pub use qubit::{QubitId, Qubits};
