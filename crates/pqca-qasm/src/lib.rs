//! `OpenQASM` 2 import for automaton update circuits.
//!
//! Update rules are commonly authored as small `OpenQASM` files and
//! wound around a tessellation afterwards. This crate parses the
//! subset those files use: a single flat quantum register, classical
//! registers, the standard gate set with constant parameter
//! expressions, `measure`, `reset`, and `barrier`.
//!
//! Gate definitions and classical control flow are rejected with
//! [`ParseError::Unsupported`]; a second `qreg` is rejected because
//! cell-index arithmetic assumes one flat register.
//!
//! # Example
//!
//! ```rust
//! use pqca_qasm::parse;
//!
//! let qasm = r#"
//!     OPENQASM 2.0;
//!     include "qelib1.inc";
//!     qreg q[2];
//!     cx q[0], q[1];
//! "#;
//!
//! let circuit = parse(qasm).unwrap();
//! assert_eq!(circuit.num_qubits(), 2);
//! ```

mod error;
mod lexer;
mod parser;

pub use error::{ParseError, ParseResult};
pub use parser::parse;

use std::path::Path;

use pqca_ir::Circuit;

/// Parse a QASM file from disk.
pub fn parse_file(path: impl AsRef<Path>) -> ParseResult<Circuit> {
    let source = std::fs::read_to_string(path)?;
    parse(&source)
}
