//! Circuit Compilation for Alsvid
//!
//! Compiles circuits to the `{u, cx}` target basis through a sequence of
//! passes, and wraps the whole pipeline behind the [`QasmCompiler`] trait
//! so callers exchange `OPENQASM 2.0` text with the compiler the same way
//! they would with an external vendor tool.
//!
//! # Architecture
//!
//! ```text
//! QASM text ──> strip vendor header ──> parse ──> PassManager ──> emit ──> QASM text
//!                                                  │
//!                                                  ├─ InverseCancellation
//!                                                  └─ BasisTranslation
//! ```
//!
//! Compiled output carries a leading vendor comment identifying the
//! compiler, which [`strip_vendor_header`] removes before re-parsing.

pub mod compiler;
pub mod error;
pub mod manager;
pub mod pass;
pub mod passes;

pub use compiler::{compile_circuit, strip_vendor_header, PassCompiler, QasmCompiler};
pub use error::{CompileError, CompileResult};
pub use manager::PassManager;
pub use pass::Pass;
pub use passes::{BasisTranslation, InverseCancellation};
