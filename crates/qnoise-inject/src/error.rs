//! Error types for noise injection.

use thiserror::Error;

/// Errors produced while sampling noise or applying noisy gates.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum NoiseError {
    /// The sampler rejected its arguments.
    #[error("Sampler '{sampler}' expects {expected} arguments, got {got}")]
    InvalidSamplerArgs {
        /// Sampler description.
        sampler: String,
        /// What the sampler expects, e.g. "a non-empty multiple of 2".
        expected: String,
        /// Number of arguments supplied.
        got: usize,
    },

    /// The sampler failed for a reason of its own.
    #[error("Sampler failed: {0}")]
    Sampler(String),

    /// A sample did not carry enough components for the consumer.
    #[error("Sample has {got} components, at least {needed} required")]
    SampleTooShort {
        /// Components needed.
        needed: usize,
        /// Components returned.
        got: usize,
    },

    /// A noisy gate was applied to the wrong number of qubits.
    #[error("Noisy gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the noisy gate.
        gate_name: String,
        /// Required number of qubits.
        expected: usize,
        /// Qubits supplied.
        got: usize,
    },

    /// The wrapped gate has no standard-gate inverse.
    #[error("Gate '{0}' has no invertible standard form")]
    NotInvertible(String),

    /// The wrapper cannot handle this base gate.
    #[error("Gate '{gate_name}' cannot be wrapped: {reason}")]
    UnsupportedGate {
        /// Name of the rejected gate.
        gate_name: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Two-axis weight ratio outside `[0, inf)`.
    #[error("Two-axis ratio must be finite and non-negative, got {0}")]
    InvalidRatio(f64),

    /// Noise configuration could not be read or parsed.
    #[error("Noise configuration error: {0}")]
    Config(String),

    /// The circuit rejected a forwarded operation.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] qnoise_ir::IrError),
}

/// Result type for noise operations.
pub type NoiseResult<T> = Result<T, NoiseError>;
