//! `OpenQASM` 2.0 Parser and Emitter for Alsvid
//!
//! The interchange format between Alsvid and external compilers is
//! `OPENQASM 2.0` text written to and read from disk. This crate parses
//! and emits the subset the rest of the workspace produces.
//!
//! # Supported Features
//!
//! | Feature | Example |
//! |---------|---------|
//! | Version declaration | `OPENQASM 2.0;` |
//! | Standard include | `include "qelib1.inc";` |
//! | Register declarations | `qreg q[5];`, `creg c[5];` |
//! | Standard gates | `h q[0];`, `cx q[0], q[1];` |
//! | Parameterized gates | `rx(pi/4) q[0];` |
//! | Broadcast gate calls | `h q;` |
//! | Measurements | `measure q[0] -> c[0];`, `measure q -> c;` |
//! | Barriers and reset | `barrier q;`, `reset q[0];` |
//! | Comments | `// comment`, `/* block */` |
//!
//! # Example: Round-Trip
//!
//! ```rust
//! use alsvid_qasm::{emit, parse};
//!
//! let circuit = alsvid_ir::Circuit::bell().unwrap();
//! let qasm = emit(&circuit);
//! assert!(qasm.contains("OPENQASM 2.0;"));
//!
//! let reparsed = parse(&qasm).unwrap();
//! assert_eq!(reparsed.num_qubits(), 2);
//! assert_eq!(reparsed.instructions(), circuit.instructions());
//! ```

mod emitter;
mod error;
mod lexer;
mod parser;

pub use emitter::emit;
pub use error::{ParseError, ParseResult};
pub use parser::parse;
