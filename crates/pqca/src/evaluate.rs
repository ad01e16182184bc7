//! Circuit evaluator factory.
//!
//! An evaluator turns a prepared automaton circuit into the next
//! classical state: measure everything, compile for the bound backend,
//! run one shot, and decode the observed bitstring.

use std::sync::Arc;

use tracing::debug;

use pqca_adapter_sim::SimulatorBackend;
use pqca_compile::{BasisGates, transpile};
use pqca_hal::{Backend, BackendError, BackendResult, GateSet};
use pqca_ir::Circuit;

/// A function that runs a preparation-and-update circuit and returns
/// the measured state, one bit per qubit, qubit 0 first.
pub type Evaluator = Box<dyn FnMut(&mut Circuit) -> BackendResult<Vec<u8>> + Send>;

/// Fixed optimization tier for evaluator compilation.
const OPTIMIZATION_LEVEL: u8 = 1;

/// Create an evaluator bound to the given backend.
///
/// The returned closure, per call:
///
/// 1. Appends a measurement over every qubit. This mutates the caller's
///    circuit; re-evaluating the same circuit appends again.
/// 2. Compiles the circuit for the backend at optimization level 1.
/// 3. Runs exactly one shot.
/// 4. Takes the single observed bitstring, reverses it (backends report
///    the mirror of qubit index order), and returns it as 0/1 bytes.
///
/// The result always has one entry per qubit. A circuit carrying a
/// classical register wider than its quantum register reads back only
/// the bits the final measurement round wrote.
///
/// Every failure surfaces as a [`BackendError`]; there is no retry and
/// no partial result.
pub fn make_evaluator(backend: Arc<dyn Backend>) -> Evaluator {
    Box::new(move |circuit: &mut Circuit| {
        let capabilities = backend.capabilities();
        if !capabilities.supports_compilation {
            return Err(BackendError::Unsupported(format!(
                "backend '{}' cannot produce a compilation plan",
                backend.name()
            )));
        }

        circuit
            .measure_all()
            .map_err(|e| BackendError::InvalidCircuit(e.to_string()))?;

        let basis_gates = match &capabilities.gate_set {
            GateSet::Any => None,
            GateSet::Named(names) => Some(BasisGates::new(names.iter().cloned())),
        };
        let compiled = transpile(circuit, basis_gates, OPTIMIZATION_LEVEL)
            .map_err(|e| BackendError::Compilation(e.to_string()))?;

        debug!(
            backend = backend.name(),
            qubits = compiled.num_qubits(),
            depth = compiled.depth(),
            "evaluating circuit"
        );

        let result = backend.run(&compiled, 1)?;
        let (bitstring, _) = result.counts.most_frequent().ok_or(BackendError::EmptyCounts)?;

        // The final measurement round wires qubit i to clbit i, so
        // after the reversal bit i is qubit i; any surplus classical
        // bits sit past the qubit count and are dropped.
        let mut bits = bitstring
            .chars()
            .rev()
            .map(|c| match c {
                '0' => Ok(0),
                '1' => Ok(1),
                other => Err(BackendError::Execution(format!(
                    "non-binary character '{other}' in outcome '{bitstring}'"
                ))),
            })
            .collect::<BackendResult<Vec<u8>>>()?;
        bits.truncate(circuit.num_qubits());
        Ok(bits)
    })
}

/// An evaluator bound to the default local simulator.
pub fn default_evaluator() -> Evaluator {
    make_evaluator(Arc::new(SimulatorBackend::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pqca_hal::{Capabilities, ExecutionResult};
    use pqca_ir::QubitId;

    #[test]
    fn test_empty_circuit_reads_zero() {
        let mut evaluate = default_evaluator();
        let mut circuit = Circuit::new("idle", 1);
        assert_eq!(evaluate(&mut circuit).unwrap(), vec![0]);
    }

    #[test]
    fn test_output_is_qubit_order() {
        // Only qubit 0 is set; the backend reports "01", and the
        // evaluator's reversal puts the set bit at index 0.
        let mut evaluate = default_evaluator();
        let mut circuit = Circuit::new("lopsided", 2);
        circuit.x(QubitId(0)).unwrap();
        assert_eq!(evaluate(&mut circuit).unwrap(), vec![1, 0]);
    }

    #[test]
    fn test_double_evaluation_appends_measurements() {
        // Re-evaluating the same circuit object is allowed: the second
        // call appends another measurement round and succeeds.
        let mut evaluate = default_evaluator();
        let mut circuit = Circuit::new("twice", 2);
        circuit.x(QubitId(1)).unwrap();

        assert_eq!(evaluate(&mut circuit).unwrap(), vec![0, 1]);
        assert_eq!(evaluate(&mut circuit).unwrap(), vec![0, 1]);
        assert_eq!(circuit.count_ops().get("measure"), Some(&2));
    }

    #[test]
    fn test_reproducible_across_runs() {
        let mut circuit = Circuit::new("fixed", 3);
        circuit.x(QubitId(1)).unwrap();

        let mut first = default_evaluator();
        let mut second = default_evaluator();
        assert_eq!(
            first(&mut circuit.clone()).unwrap(),
            second(&mut circuit.clone()).unwrap()
        );
    }

    struct NoCompileBackend {
        capabilities: Capabilities,
    }

    impl NoCompileBackend {
        fn new() -> Self {
            let mut capabilities = Capabilities::simulator(4);
            capabilities.supports_compilation = false;
            Self { capabilities }
        }
    }

    impl Backend for NoCompileBackend {
        fn name(&self) -> &str {
            "no-compile"
        }

        fn capabilities(&self) -> &Capabilities {
            &self.capabilities
        }

        fn run(&self, _circuit: &Circuit, _shots: u32) -> BackendResult<ExecutionResult> {
            unreachable!("evaluator must reject this backend before running")
        }
    }

    #[test]
    fn test_backend_without_compilation_rejected() {
        let mut evaluate = make_evaluator(Arc::new(NoCompileBackend::new()));
        let mut circuit = Circuit::new("any", 1);
        assert!(matches!(
            evaluate(&mut circuit),
            Err(BackendError::Unsupported(_))
        ));
    }

    struct SilentBackend {
        capabilities: Capabilities,
    }

    impl Backend for SilentBackend {
        fn name(&self) -> &str {
            "silent"
        }

        fn capabilities(&self) -> &Capabilities {
            &self.capabilities
        }

        fn run(&self, _circuit: &Circuit, shots: u32) -> BackendResult<ExecutionResult> {
            Ok(ExecutionResult::new(pqca_hal::Counts::new(), shots))
        }
    }

    #[test]
    fn test_backend_reporting_no_outcomes_fails() {
        // A run that comes back with no observed bitstring is an error,
        // not an empty state.
        let mut evaluate = make_evaluator(Arc::new(SilentBackend {
            capabilities: Capabilities::simulator(4),
        }));
        let mut circuit = Circuit::new("quiet", 2);
        assert!(matches!(
            evaluate(&mut circuit),
            Err(BackendError::EmptyCounts)
        ));
    }

    #[test]
    fn test_wide_classical_register_reads_one_bit_per_qubit() {
        // Extra classical bits beyond the qubit count are not reported.
        let mut evaluate = default_evaluator();
        let mut circuit = Circuit::with_clbits("wide", 2, 5);
        circuit.x(QubitId(1)).unwrap();
        assert_eq!(evaluate(&mut circuit).unwrap(), vec![0, 1]);
    }
}
