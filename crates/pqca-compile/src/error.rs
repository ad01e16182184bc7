//! Error types for the compilation crate.

use pqca_ir::IrError;
use thiserror::Error;

/// Errors that can occur during compilation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// Underlying IR operation failed.
    #[error("IR error: {0}")]
    Ir(#[from] IrError),

    /// A gate cannot be translated to the target basis.
    #[error("Gate '{gate}' cannot be translated to the target basis")]
    UnsupportedGate {
        /// Name of the untranslatable gate.
        gate: &'static str,
    },

    /// A correctness check failed after optimization.
    #[error("Verification failed: {0}")]
    VerificationFailed(String),
}

/// Result type for compilation operations.
pub type CompileResult<T> = Result<T, CompileError>;
