//! Error types for the IR crate.

use crate::qubit::{ClbitId, QubitId};
use thiserror::Error;

/// Errors that can occur in IR operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Qubit id outside the circuit's register.
    #[error("Qubit {qubit} out of range for circuit with {num_qubits} qubits")]
    QubitOutOfRange {
        /// The offending qubit.
        qubit: QubitId,
        /// Number of qubits in the circuit.
        num_qubits: u32,
    },

    /// Classical bit id outside the circuit's register.
    #[error("Classical bit {clbit} out of range for circuit with {num_clbits} bits")]
    ClbitOutOfRange {
        /// The offending classical bit.
        clbit: ClbitId,
        /// Number of classical bits in the circuit.
        num_clbits: u32,
    },

    /// The same qubit appears twice in one operation.
    #[error("Duplicate qubit {qubit} in '{name}' operation")]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Name of the operation.
        name: &'static str,
    },

    /// Gate applied to the wrong number of qubits.
    #[error("Gate '{name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        name: &'static str,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: u32,
    },

    /// Measurement with mismatched qubit and clbit operand counts.
    #[error("Measurement maps {qubits} qubits to {clbits} classical bits")]
    MeasureArityMismatch {
        /// Number of qubit operands.
        qubits: usize,
        /// Number of classical bit operands.
        clbits: usize,
    },
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
