//! Local statevector simulator backend.
//!
//! The default execution target: a full statevector simulation of up
//! to 20 qubits (configurable, bounded by memory). Implements the
//! synchronous [`Backend`](pqca_hal::Backend) contract, so it plugs in
//! anywhere a hardware adapter would.
//!
//! # Example
//!
//! ```rust
//! use pqca_adapter_sim::SimulatorBackend;
//! use pqca_hal::Backend;
//! use pqca_ir::{Circuit, QubitId};
//!
//! let backend = SimulatorBackend::new().with_seed(1);
//!
//! let mut circuit = Circuit::new("bell", 2);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.measure_all().unwrap();
//!
//! let result = backend.run(&circuit, 100).unwrap();
//! assert_eq!(result.counts.get("00") + result.counts.get("11"), 100);
//! ```

mod simulator;
mod statevector;

pub use simulator::SimulatorBackend;
pub use statevector::Statevector;
