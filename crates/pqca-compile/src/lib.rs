//! Compilation and transpilation for automaton update circuits.
//!
//! Before a combined preparation-and-update circuit is handed to a
//! backend it is compiled at a fixed optimization tier. The pipeline is
//! a sequence of [`Pass`]es orchestrated by a [`PassManager`]; the
//! preset tiers are built by [`PassManagerBuilder`], and [`transpile`]
//! is the one-call entry point.
//!
//! Level 1 is the default everywhere: a deliberate, low but non-trivial
//! tier trading compile time for some gate reduction.
//!
//! ```rust
//! use pqca_compile::transpile;
//! use pqca_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::new("demo", 1);
//! circuit.x(QubitId(0)).unwrap();
//! circuit.x(QubitId(0)).unwrap();
//!
//! let compiled = transpile(&circuit, None, 1).unwrap();
//! assert!(compiled.is_empty());
//! ```

pub mod error;
pub mod manager;
pub mod pass;
pub mod passes;
pub mod property;

pub use error::{CompileError, CompileResult};
pub use manager::{PassManager, PassManagerBuilder, transpile};
pub use pass::{Pass, PassKind};
pub use property::{BasisGates, PropertySet};
