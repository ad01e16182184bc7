//! Error types for automaton construction and evaluation.

use thiserror::Error;

/// Errors produced while building or running an automaton.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PqcaError {
    /// A tessellation needs at least one cell.
    #[error("There must be at least one cell")]
    NoCells,

    /// Cells cannot be empty.
    #[error("Cell {index} is empty")]
    EmptyCell { index: usize },

    /// Every cell must have the same size.
    #[error("Cell {index} has {got} qubits, expected {expected}")]
    IrregularCellSize {
        index: usize,
        expected: usize,
        got: usize,
    },

    /// The cells must contain each qubit 0..n exactly once.
    #[error("Each qubit must appear exactly once; qubit {qubit} breaks the partition")]
    PartitionUnevenlyCoversQubits { qubit: usize },

    /// Lattice and cell dimensions must have the same length and divide
    /// component-wise.
    #[error("Lattice dimensions {dimensions:?} and cell dimensions {cell:?} must have the same length and divide component-wise")]
    IrregularCoordinateDimensions {
        dimensions: Vec<usize>,
        cell: Vec<usize>,
    },

    /// The cell circuit must fit inside a cell.
    #[error("Cannot apply a circuit with {circuit_qubits} qubits to a cell of size {cell_size}")]
    CircuitWrongShapeForCell {
        circuit_qubits: usize,
        cell_size: usize,
    },

    /// The initial state and the tessellation must agree on size.
    #[error("State has {state} bits but the tessellation covers {qubits} qubits")]
    StateSizeMismatch { state: usize, qubits: usize },

    /// Circuit construction failure.
    #[error(transparent)]
    Ir(#[from] pqca_ir::IrError),

    /// Backend failure during evaluation.
    #[error(transparent)]
    Backend(#[from] pqca_hal::BackendError),

    /// QASM parse failure while loading a cell circuit.
    #[error(transparent)]
    Parse(#[from] pqca_qasm::ParseError),
}

/// Result type for automaton operations.
pub type PqcaResult<T> = Result<T, PqcaError>;
