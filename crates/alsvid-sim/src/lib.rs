//! Density-Matrix Simulation for Alsvid
//!
//! Full density-matrix simulation of circuits with mixed-state noise.
//! Memory grows as `4^n`, so the executor caps circuit width; the cap is
//! configurable via [`NoisyExecutor::with_max_qubits`].
//!
//! The observable of interest is the ground-state population, the real
//! part of the top-left density matrix element. Qubit 0 is the least
//! significant bit of the computational basis index.
//!
//! # Example
//!
//! ```rust
//! use alsvid_ir::Circuit;
//! use alsvid_sim::NoisyExecutor;
//!
//! let circuit = Circuit::bell().unwrap();
//!
//! let ideal = NoisyExecutor::ideal().execute(&circuit).unwrap();
//! assert!((ideal - 0.5).abs() < 1e-12);
//!
//! let noisy = NoisyExecutor::new(0.05).unwrap().execute(&circuit).unwrap();
//! assert!(noisy < ideal);
//! ```

mod density;
mod error;
mod executor;
mod matrices;

pub use density::DensityMatrix;
pub use error::{SimError, SimResult};
pub use executor::{inject_noise, NoisyExecutor, DEFAULT_MAX_QUBITS, DEFAULT_NOISE_LEVEL};
pub use matrices::gate_matrix;
