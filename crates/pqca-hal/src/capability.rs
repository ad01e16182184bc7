//! Backend capability descriptions.

use serde::{Deserialize, Serialize};

/// The set of gate names a backend can execute natively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GateSet {
    /// Any standard gate is accepted (typical for simulators).
    Any,
    /// Only the named gates are accepted.
    Named(Vec<String>),
}

impl GateSet {
    /// Check whether a gate name is in the set.
    pub fn contains(&self, name: &str) -> bool {
        match self {
            GateSet::Any => true,
            GateSet::Named(names) => names.iter().any(|n| n == name),
        }
    }
}

/// Capabilities of an execution backend.
///
/// Cached at backend construction; a backend that cannot report its
/// capabilities without I/O is not correctly initialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capabilities {
    /// Maximum number of qubits.
    pub num_qubits: u32,
    /// Whether the backend is a simulator.
    pub is_simulator: bool,
    /// Whether the backend can produce a compilation plan for submitted
    /// circuits. Backends without this cannot be driven by the circuit
    /// evaluator.
    pub supports_compilation: bool,
    /// Gates the backend executes natively.
    pub gate_set: GateSet,
}

impl Capabilities {
    /// Capabilities of a local statevector simulator with the given
    /// qubit cap.
    pub fn simulator(num_qubits: u32) -> Self {
        Self {
            num_qubits,
            is_simulator: true,
            supports_compilation: true,
            gate_set: GateSet::Any,
        }
    }

    /// Check whether the backend natively supports a gate.
    pub fn supports_gate(&self, name: &str) -> bool {
        self.gate_set.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulator_capabilities() {
        let caps = Capabilities::simulator(20);
        assert!(caps.is_simulator);
        assert!(caps.supports_compilation);
        assert_eq!(caps.num_qubits, 20);
        assert!(caps.supports_gate("cswap"));
    }

    #[test]
    fn test_named_gate_set() {
        let gates = GateSet::Named(vec!["cx".into(), "rz".into(), "h".into()]);
        assert!(gates.contains("cx"));
        assert!(!gates.contains("ccx"));
    }
}
