//! Simulator backend implementation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, PoisonError};
use std::time::Instant;
use tracing::{debug, instrument};

use pqca_hal::{
    Backend, BackendConfig, BackendFactory, BackendResult, Capabilities, Counts, ExecutionResult,
    validate_submission,
};
use pqca_ir::{Circuit, InstructionKind};

use crate::statevector::Statevector;

/// Default qubit limit, set by the memory cost of 2^n amplitudes.
const DEFAULT_MAX_QUBITS: u32 = 20;

/// Local statevector simulator backend.
///
/// Executes circuits shot by shot on a full statevector. Measurements
/// are read from the final state, which is exact for circuits where no
/// gate follows a measurement on the same qubit; the compilation
/// pipeline verifies that property.
pub struct SimulatorBackend {
    /// Backend configuration.
    config: BackendConfig,
    /// Cached capabilities.
    capabilities: Capabilities,
    /// Seeded RNG, if reproducible sampling was requested.
    rng: Option<Mutex<StdRng>>,
}

impl SimulatorBackend {
    /// Create a new simulator backend with default settings.
    pub fn new() -> Self {
        Self {
            config: BackendConfig::new("simulator"),
            capabilities: Capabilities::simulator(DEFAULT_MAX_QUBITS),
            rng: None,
        }
    }

    /// Create a simulator with a custom qubit limit.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self {
            config: BackendConfig::new("simulator"),
            capabilities: Capabilities::simulator(max_qubits),
            rng: None,
        }
    }

    /// Fix the sampling seed, making every run reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Some(Mutex::new(StdRng::seed_from_u64(seed)));
        self
    }

    /// Run all shots with the given RNG.
    fn run_shots(&self, circuit: &Circuit, shots: u32, rng: &mut impl Rng) -> ExecutionResult {
        let start = Instant::now();

        let num_qubits = circuit.num_qubits();
        debug!("Starting simulation: {} qubits, {} shots", num_qubits, shots);

        // Measurement wiring, qubit index to clbit index. Later
        // measurements of the same clbit win.
        let mut wiring: Vec<(usize, usize)> = Vec::new();
        for inst in circuit.instructions() {
            if let InstructionKind::Measure = inst.kind {
                for (q, c) in inst.qubits.iter().zip(&inst.clbits) {
                    wiring.push((q.0 as usize, c.0 as usize));
                }
            }
        }

        let mut counts = Counts::new();

        for shot in 0..shots {
            let mut sv = Statevector::new(num_qubits);
            for inst in circuit.instructions() {
                sv.apply(inst);
            }

            let outcome = sv.sample(rng);
            counts.record(self.outcome_to_bitstring(circuit, &wiring, outcome));

            if shot > 0 && shot % 1000 == 0 {
                debug!("Completed {} shots", shot);
            }
        }

        let elapsed = start.elapsed();
        debug!("Simulation completed in {:?}", elapsed);

        ExecutionResult::new(counts, shots).with_execution_time(elapsed.as_millis() as u64)
    }

    /// Render a sampled basis state as an outcome bitstring.
    ///
    /// With measurements present the string covers the classical
    /// register; without any, the whole quantum register is read out.
    /// Character 0 is the highest-indexed bit in both cases.
    fn outcome_to_bitstring(
        &self,
        circuit: &Circuit,
        wiring: &[(usize, usize)],
        outcome: usize,
    ) -> String {
        if wiring.is_empty() {
            return (0..circuit.num_qubits())
                .rev()
                .map(|q| if outcome >> q & 1 == 1 { '1' } else { '0' })
                .collect();
        }

        let mut clbits = vec![0u8; circuit.num_clbits()];
        for (q, c) in wiring {
            clbits[*c] = (outcome >> q & 1) as u8;
        }
        clbits
            .iter()
            .rev()
            .map(|b| if *b == 1 { '1' } else { '0' })
            .collect()
    }
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    #[instrument(skip(self, circuit))]
    fn run(&self, circuit: &Circuit, shots: u32) -> BackendResult<ExecutionResult> {
        validate_submission(&self.capabilities, circuit, shots)?;

        let result = match &self.rng {
            Some(rng) => {
                let mut rng = rng.lock().unwrap_or_else(PoisonError::into_inner);
                self.run_shots(circuit, shots, &mut *rng)
            }
            None => self.run_shots(circuit, shots, &mut rand::thread_rng()),
        };
        Ok(result)
    }
}

impl BackendFactory for SimulatorBackend {
    fn from_config(config: BackendConfig) -> BackendResult<Self> {
        let max_qubits = config
            .extra
            .get("max_qubits")
            .and_then(serde_json::value::Value::as_u64)
            .map_or(DEFAULT_MAX_QUBITS, |v| v as u32);
        let rng = config
            .extra
            .get("seed")
            .and_then(serde_json::value::Value::as_u64)
            .map(|seed| Mutex::new(StdRng::seed_from_u64(seed)));

        Ok(Self {
            config,
            capabilities: Capabilities::simulator(max_qubits),
            rng,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pqca_hal::BackendError;
    use pqca_ir::QubitId;

    #[test]
    fn test_simulator_capabilities() {
        let backend = SimulatorBackend::new();
        let caps = backend.capabilities();

        assert!(caps.is_simulator);
        assert_eq!(caps.num_qubits, 20);
    }

    #[test]
    fn test_simulator_bell_state() {
        let backend = SimulatorBackend::new();

        let mut circuit = Circuit::new("bell", 2);
        circuit.h(QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.measure_all().unwrap();

        let result = backend.run(&circuit, 1000).unwrap();
        assert_eq!(result.shots, 1000);

        // Bell state should produce only 00 and 11
        let counts = &result.counts;
        assert_eq!(counts.get("00") + counts.get("11"), 1000);
        assert_eq!(counts.get("01") + counts.get("10"), 0);
    }

    #[test]
    fn test_bitstring_is_mirror_order() {
        let backend = SimulatorBackend::new();

        // Only qubit 0 flipped: clbit 0 is 1, so the string reads "01".
        let mut circuit = Circuit::new("lopsided", 2);
        circuit.x(QubitId(0)).unwrap();
        circuit.measure_all().unwrap();

        let result = backend.run(&circuit, 10).unwrap();
        assert_eq!(result.counts.get("01"), 10);
    }

    #[test]
    fn test_no_measurements_reads_qubits() {
        let backend = SimulatorBackend::new();

        let mut circuit = Circuit::new("bare", 2);
        circuit.x(QubitId(1)).unwrap();

        let result = backend.run(&circuit, 5).unwrap();
        assert_eq!(result.counts.get("10"), 5);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let mut circuit = Circuit::new("coin", 1);
        circuit.h(QubitId(0)).unwrap();
        circuit.measure_all().unwrap();

        let a = SimulatorBackend::new().with_seed(42);
        let b = SimulatorBackend::new().with_seed(42);
        let ra = a.run(&circuit, 100).unwrap();
        let rb = b.run(&circuit, 100).unwrap();
        assert_eq!(ra.counts, rb.counts);
    }

    #[test]
    fn test_simulator_too_many_qubits() {
        let backend = SimulatorBackend::with_max_qubits(5);

        let circuit = Circuit::new("wide", 10);
        let result = backend.run(&circuit, 100);

        assert!(matches!(result, Err(BackendError::CircuitTooLarge(_))));
    }

    #[test]
    fn test_zero_shots_rejected() {
        let backend = SimulatorBackend::new();
        let circuit = Circuit::new("empty", 1);
        assert!(matches!(
            backend.run(&circuit, 0),
            Err(BackendError::InvalidShots(_))
        ));
    }

    #[test]
    fn test_from_config() {
        let config = BackendConfig::new("simulator")
            .with_extra("max_qubits", serde_json::json!(8))
            .with_extra("seed", serde_json::json!(7));
        let backend = SimulatorBackend::from_config(config).unwrap();
        assert_eq!(backend.capabilities().num_qubits, 8);
        assert!(backend.rng.is_some());
    }
}
