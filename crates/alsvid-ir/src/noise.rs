//! Noise channel types.
//!
//! Noise is a first-class instruction in the IR so that a noise-injected
//! circuit is still an ordinary circuit: the simulator evaluates channel
//! instructions, the QASM emitter renders them as pragma comments, and
//! compiler passes carry them through untouched.

use serde::{Deserialize, Serialize};

/// A noise channel model.
///
/// Kept deliberately lean: the mitigation pipeline injects only
/// depolarizing channels, but the simulator evaluates the two Pauli
/// channels as well so noise models written by hand are executable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum NoiseModel {
    /// Depolarizing channel: with probability `p`, replaces the state of
    /// the target qubits with the maximally mixed state.
    Depolarizing {
        /// Error probability (0.0 to 1.0).
        p: f64,
    },

    /// Bit-flip channel: applies X with probability `p`.
    BitFlip {
        /// Flip probability (0.0 to 1.0).
        p: f64,
    },

    /// Phase-flip channel: applies Z with probability `p`.
    PhaseFlip {
        /// Flip probability (0.0 to 1.0).
        p: f64,
    },
}

impl NoiseModel {
    /// Get a human-readable name for this noise model.
    pub fn name(&self) -> &'static str {
        match self {
            NoiseModel::Depolarizing { .. } => "depolarizing",
            NoiseModel::BitFlip { .. } => "bit_flip",
            NoiseModel::PhaseFlip { .. } => "phase_flip",
        }
    }

    /// Get the error probability of this noise model.
    pub fn error_param(&self) -> f64 {
        match self {
            NoiseModel::Depolarizing { p }
            | NoiseModel::BitFlip { p }
            | NoiseModel::PhaseFlip { p } => *p,
        }
    }
}

impl std::fmt::Display for NoiseModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoiseModel::Depolarizing { p } => write!(f, "depolarizing(p={p:.4})"),
            NoiseModel::BitFlip { p } => write!(f, "bit_flip(p={p:.4})"),
            NoiseModel::PhaseFlip { p } => write!(f, "phase_flip(p={p:.4})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_model_names() {
        assert_eq!(NoiseModel::Depolarizing { p: 0.01 }.name(), "depolarizing");
        assert_eq!(NoiseModel::BitFlip { p: 0.02 }.name(), "bit_flip");
        assert_eq!(NoiseModel::PhaseFlip { p: 0.05 }.name(), "phase_flip");
    }

    #[test]
    fn test_noise_model_display() {
        let m = NoiseModel::Depolarizing { p: 0.03 };
        assert_eq!(format!("{m}"), "depolarizing(p=0.0300)");
    }

    #[test]
    fn test_error_param() {
        assert_eq!(NoiseModel::Depolarizing { p: 0.05 }.error_param(), 0.05);
    }
}
