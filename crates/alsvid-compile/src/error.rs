//! Compilation errors.

use alsvid_ir::IrError;
use alsvid_qasm::ParseError;
use thiserror::Error;

/// Errors that can occur during compilation.
#[derive(Error, Debug)]
pub enum CompileError {
    /// QASM parsing failed.
    #[error("QASM error: {0}")]
    Qasm(#[from] ParseError),

    /// Circuit construction failed.
    #[error("Circuit error: {0}")]
    Circuit(#[from] IrError),
}

/// Result type for compilation operations.
pub type CompileResult<T> = Result<T, CompileError>;
