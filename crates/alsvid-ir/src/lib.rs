//! Alsvid Circuit Intermediate Representation
//!
//! Core data structures for representing quantum circuits in Alsvid.
//!
//! A circuit is an ordered sequence of [`Instruction`]s over a declared
//! number of qubits and classical bits. The high-level [`Circuit`] API
//! provides a builder pattern with convenience methods for the common
//! gates, plus seeded random circuit generation for benchmarking the
//! mitigation pipeline.
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use alsvid_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("bell_state", 2, 2);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.measure_all().unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert!(circuit.depth() >= 2);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `H` | 1 | Hadamard gate |
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `S`, `Sdg`, `T`, `Tdg` | 1 | Phase-family gates |
//! | `SX`, `SXdg` | 1 | sqrt(X) and its inverse |
//! | `Rx`, `Ry`, `Rz`, `P` | 1 | Rotation and phase gates |
//! | `U` | 1 | Universal single-qubit gate U(θ,φ,λ) |
//! | `CX`, `CY`, `CZ` | 2 | Controlled Paulis |
//! | `Swap` | 2 | SWAP gate |
//! | `CRz`, `CP` | 2 | Controlled rotations |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod noise;
pub mod parameter;
pub mod qubit;
pub mod random;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use noise::NoiseModel;
pub use parameter::ParameterExpression;
pub use qubit::{ClbitId, QubitId};
pub use random::{random_circuit, RandomCircuitConfig};
