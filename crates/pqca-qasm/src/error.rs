//! Error types for the QASM parser.

use thiserror::Error;

/// Errors that can occur during parsing.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// Lexer error (invalid token).
    #[error("Lexer error at position {position}: {message}")]
    LexerError { position: usize, message: String },

    /// Unexpected token.
    #[error("Unexpected token: expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },

    /// Unexpected end of input.
    #[error("Unexpected end of input: {0}")]
    UnexpectedEof(String),

    /// Invalid version.
    #[error("Invalid OPENQASM version: {0}")]
    InvalidVersion(String),

    /// Undefined identifier.
    #[error("Undefined identifier: {0}")]
    UndefinedIdentifier(String),

    /// Duplicate declaration.
    #[error("Duplicate declaration: {0}")]
    DuplicateDeclaration(String),

    /// More than one quantum register.
    ///
    /// Update circuits act on a single flat register; named
    /// sub-registers would break the cell-index arithmetic.
    #[error("Circuit declares more than one quantum register ('{0}')")]
    TooManyQuantumRegisters(String),

    /// Invalid gate.
    #[error("Unknown gate: {0}")]
    UnknownGate(String),

    /// Wrong number of arguments.
    #[error("Gate '{gate}' expects {expected} qubits, got {got}")]
    WrongQubitCount {
        gate: String,
        expected: usize,
        got: usize,
    },

    /// Wrong number of parameters.
    #[error("Gate '{gate}' expects {expected} parameters, got {got}")]
    WrongParameterCount {
        gate: String,
        expected: usize,
        got: usize,
    },

    /// Index out of bounds.
    #[error("Index {index} out of bounds for register '{register}' of size {size}")]
    IndexOutOfBounds {
        register: String,
        index: usize,
        size: usize,
    },

    /// Unsupported language feature.
    #[error("Unsupported feature: {0}")]
    Unsupported(String),

    /// IR error during circuit construction.
    #[error("Circuit error: {0}")]
    CircuitError(#[from] pqca_ir::IrError),

    /// I/O error reading a source file.
    #[error("Failed to read QASM file: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;
