//! Parse errors for `OpenQASM` 2.0.

use alsvid_ir::IrError;
use thiserror::Error;

/// Errors that can occur while parsing QASM source.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Lexer failed to tokenize input.
    #[error("Lexer error at line {line}: {message}")]
    Lexer {
        /// Line number (1-based).
        line: usize,
        /// Error message.
        message: String,
    },

    /// Unexpected token encountered.
    #[error("Unexpected token at line {line}: expected {expected}, found {found}")]
    UnexpectedToken {
        /// Line number (1-based).
        line: usize,
        /// What was expected.
        expected: String,
        /// What was found.
        found: String,
    },

    /// Unexpected end of input.
    #[error("Unexpected end of input")]
    UnexpectedEof,

    /// Missing or malformed version declaration.
    #[error("Expected 'OPENQASM 2.0;' version declaration")]
    MissingVersion,

    /// Unsupported QASM version.
    #[error("Unsupported QASM version {version}, only 2.0 is supported")]
    UnsupportedVersion {
        /// The declared version.
        version: String,
    },

    /// Unknown gate name.
    #[error("Unknown gate '{name}' at line {line}")]
    UnknownGate {
        /// Line number (1-based).
        line: usize,
        /// The gate name.
        name: String,
    },

    /// Wrong number of parameters for a gate.
    #[error("Gate '{gate}' at line {line} expects {expected} parameter(s), got {got}")]
    WrongParameterCount {
        /// Line number (1-based).
        line: usize,
        /// The gate name.
        gate: String,
        /// Expected parameter count.
        expected: usize,
        /// Actual parameter count.
        got: usize,
    },

    /// Register index out of bounds.
    #[error("Index {index} out of bounds for register '{register}' of size {size} at line {line}")]
    IndexOutOfBounds {
        /// Line number (1-based).
        line: usize,
        /// The register name.
        register: String,
        /// The offending index.
        index: u64,
        /// The register size.
        size: u32,
    },

    /// Reference to an undeclared register or identifier.
    #[error("Undefined identifier '{name}' at line {line}")]
    UndefinedIdentifier {
        /// Line number (1-based).
        line: usize,
        /// The identifier.
        name: String,
    },

    /// Register declared twice.
    #[error("Duplicate declaration of '{name}' at line {line}")]
    DuplicateDeclaration {
        /// Line number (1-based).
        line: usize,
        /// The register name.
        name: String,
    },

    /// Operands of a broadcast statement have mismatched register sizes.
    #[error("Mismatched register sizes in broadcast statement at line {line}")]
    BroadcastMismatch {
        /// Line number (1-based).
        line: usize,
    },

    /// Construct recognized but not supported by this subset.
    #[error("Unsupported construct '{construct}' at line {line}")]
    Unsupported {
        /// Line number (1-based).
        line: usize,
        /// The construct name.
        construct: String,
    },

    /// Circuit construction error.
    #[error("Circuit error: {0}")]
    Circuit(#[from] IrError),
}

/// Result type for QASM parsing.
pub type ParseResult<T> = Result<T, ParseError>;
