//! Backend abstraction layer.
//!
//! This crate provides a unified interface for the execution targets a
//! quantum cellular automaton can tick against: a common [`Backend`]
//! trait, [`Capabilities`] describing what a target can do, and unified
//! result handling via [`ExecutionResult`] and [`Counts`].
//!
//! # Example: running a circuit
//!
//! ```ignore
//! use pqca_hal::Backend;
//! use pqca_adapter_sim::SimulatorBackend;
//! use pqca_ir::{Circuit, QubitId};
//!
//! let backend = SimulatorBackend::new();
//!
//! let mut circuit = Circuit::new("flip", 1);
//! circuit.x(QubitId(0))?;
//! circuit.measure_all()?;
//!
//! let result = backend.run(&circuit, 1)?;
//! assert_eq!(result.counts.most_frequent(), Some(("1", 1)));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Implementing a custom backend
//!
//! ```ignore
//! use pqca_hal::{Backend, BackendResult, Capabilities, ExecutionResult};
//! use pqca_ir::Circuit;
//!
//! struct MyBackend {
//!     capabilities: Capabilities,
//! }
//!
//! impl Backend for MyBackend {
//!     fn name(&self) -> &str { "my_backend" }
//!
//!     // Sync, infallible — capabilities cached at construction.
//!     fn capabilities(&self) -> &Capabilities {
//!         &self.capabilities
//!     }
//!
//!     fn run(&self, circuit: &Circuit, shots: u32) -> BackendResult<ExecutionResult> {
//!         // Dispatch to hardware and block for counts
//!         # todo!()
//!     }
//! }
//! ```
//!
//! # Known ecosystem gap
//!
//! One hardware vendor's toolchain cannot import OpenQASM circuit
//! descriptions at all; the workaround is an external web tool that
//! emits equivalent vendor source code manually. That conversion is
//! outside this system's responsibility — such a target would be driven
//! through its own [`Backend`] implementation.

pub mod backend;
pub mod capability;
pub mod error;
pub mod result;

pub use backend::{Backend, BackendConfig, BackendFactory, validate_submission};
pub use capability::{Capabilities, GateSet};
pub use error::{BackendError, BackendResult};
pub use result::{Counts, ExecutionResult};
