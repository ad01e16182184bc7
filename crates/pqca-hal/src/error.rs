//! Error types for backend operations.
//!
//! Every non-successful result from compiling, submitting, or executing
//! a circuit on a backend surfaces as a [`BackendError`]. There is no
//! finer-grained taxonomy at the interface, no local recovery, and no
//! fallback backend: the evaluator call either returns a complete bit
//! sequence or fails with this type.

use thiserror::Error;

/// Errors that can occur when running circuits on a backend.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BackendError {
    /// Backend is not available.
    #[error("Backend not available: {0}")]
    Unavailable(String),

    /// Circuit exceeds backend capabilities.
    #[error("Circuit exceeds backend capabilities: {0}")]
    CircuitTooLarge(String),

    /// Backend lacks a required capability.
    #[error("Unsupported by backend: {0}")]
    Unsupported(String),

    /// Invalid circuit.
    #[error("Invalid circuit: {0}")]
    InvalidCircuit(String),

    /// Invalid number of shots.
    #[error("Invalid shots: {0}")]
    InvalidShots(String),

    /// Compilation for the backend failed.
    #[error("Compilation failed: {0}")]
    Compilation(String),

    /// Circuit execution failed.
    #[error("Execution failed: {0}")]
    Execution(String),

    /// Execution reported no observed outcomes.
    #[error("Backend reported no measurement outcomes")]
    EmptyCounts,

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;
