//! Simulation errors.

use alsvid_ir::IrError;
use thiserror::Error;

/// Errors that can occur during simulation.
#[derive(Error, Debug)]
pub enum SimError {
    /// Circuit exceeds the simulator's qubit cap.
    #[error("Circuit has {num_qubits} qubits, exceeding the simulator limit of {max_qubits}")]
    CircuitTooLarge {
        /// The circuit's qubit count.
        num_qubits: usize,
        /// The configured limit.
        max_qubits: u32,
    },

    /// A gate parameter has no concrete value.
    #[error("Gate '{gate}' has an unbound symbolic parameter")]
    UnboundParameter {
        /// The gate name.
        gate: String,
    },

    /// Noise level outside the valid range.
    #[error("Noise level {value} is outside [0, 1]")]
    InvalidNoiseLevel {
        /// The offending value.
        value: f64,
    },

    /// Error probability outside the valid range.
    #[error("Error probability {value} is outside [0, 1]")]
    InvalidProbability {
        /// The offending value.
        value: f64,
    },

    /// Circuit construction failed.
    #[error("Circuit error: {0}")]
    Circuit(#[from] IrError),
}

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;
