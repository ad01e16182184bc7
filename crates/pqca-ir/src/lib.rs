//! Circuit intermediate representation for partitioned quantum
//! cellular automata.
//!
//! A PQCA update step is built by winding small cell circuits around a
//! lattice tessellation, so the IR keeps circuits as ordered
//! instruction lists over a fixed quantum register.
//!
//! # Example: a two-qubit cell rule
//!
//! ```rust
//! use pqca_ir::{Circuit, QubitId};
//!
//! let mut cell = Circuit::new("cx_rule", 2);
//! cell.cx(QubitId(0), QubitId(1)).unwrap();
//!
//! assert_eq!(cell.num_qubits(), 2);
//! assert_eq!(cell.depth(), 1);
//! ```

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{ClbitId, QubitId};
