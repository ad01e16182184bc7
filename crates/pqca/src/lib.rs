//! Partitioned quantum cellular automata.
//!
//! A quantum cellular automaton iteratively applies an update circuit
//! to a state defined on a lattice of qubits. A *partitioned* automaton
//! derives its update circuit by tessellating the lattice into equal
//! cells and applying the same small circuit to each cell; the full
//! update is the composition of several such tessellated frames.
//!
//! The building blocks:
//!
//! - [`Tessellation`]: a partition of qubits 0..n into equal cells,
//!   built directly, from a line ([`one_dimensional`]), or from an
//!   n-dimensional lattice ([`n_dimensional`]).
//! - [`UpdateFrame`]: a cell circuit wound around every cell of a
//!   tessellation.
//! - [`Automaton`]: the classical state plus frames plus an
//!   [`Evaluator`] that runs each tick's circuit on a backend.
//!
//! # Example
//!
//! ```rust
//! use pqca::{Automaton, UpdateFrame, default_evaluator, one_dimensional};
//! use pqca_ir::{Circuit, QubitId};
//!
//! // Swap the two qubits of each cell.
//! let mut cell = Circuit::new("swap", 2);
//! cell.swap(QubitId(0), QubitId(1)).unwrap();
//!
//! let frame = UpdateFrame::from_circuit(one_dimensional(4, 2).unwrap(), cell).unwrap();
//! let mut automaton = Automaton::new(vec![1, 0, 1, 0], vec![frame], default_evaluator()).unwrap();
//!
//! automaton.tick().unwrap();
//! assert_eq!(automaton.state(), &[0, 1, 0, 1]);
//! ```

pub mod automaton;
pub mod error;
pub mod evaluate;
pub mod frame;
pub mod tessellation;
pub mod vector;

pub use automaton::{Automaton, pattern_preparation_circuit};
pub use error::{PqcaError, PqcaResult};
pub use evaluate::{Evaluator, default_evaluator, make_evaluator};
pub use frame::{UpdateFrame, wind_circuit_around_loop};
pub use tessellation::{Tessellation, n_dimensional, one_dimensional, vector_to_name};
pub use vector::Vector;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A seeded-random list of 0s and 1s, for initial states.
pub fn random_bits(how_many: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..how_many).map(|_| u8::from(rng.gen_bool(0.5))).collect()
}
