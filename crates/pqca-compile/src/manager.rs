//! Pass manager for orchestrating compilation.

use tracing::{debug, info, instrument};

use pqca_ir::Circuit;

use crate::error::CompileResult;
use crate::pass::Pass;
use crate::passes::{
    BasisTranslation, InverseCancellation, MeasurementVerification, Optimize1qGates,
};
use crate::property::{BasisGates, PropertySet};

/// Manages and executes a sequence of compilation passes.
pub struct PassManager {
    /// The passes to execute, in order.
    passes: Vec<Box<dyn Pass>>,
}

impl PassManager {
    /// Create a new empty pass manager.
    pub fn new() -> Self {
        Self { passes: vec![] }
    }

    /// Add a pass to the manager.
    pub fn add_pass(&mut self, pass: impl Pass + 'static) {
        self.passes.push(Box::new(pass));
    }

    /// Run all passes on the given circuit.
    #[instrument(skip(self, circuit, properties))]
    pub fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> CompileResult<()> {
        info!(
            "Running pass manager with {} passes on circuit with {} qubits",
            self.passes.len(),
            circuit.num_qubits()
        );

        for pass in &self.passes {
            if pass.should_run(circuit, properties) {
                debug!("Running pass: {}", pass.name());
                pass.run(circuit, properties)?;
                debug!("Pass {} completed, ops: {}", pass.name(), circuit.len());
            } else {
                debug!("Skipping pass: {}", pass.name());
            }
        }

        info!(
            "Pass manager completed, final depth: {}, ops: {}",
            circuit.depth(),
            circuit.len()
        );

        Ok(())
    }

    /// Get the number of passes.
    pub fn len(&self) -> usize {
        self.passes.len()
    }

    /// Check if the manager has no passes.
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }
}

impl Default for PassManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating pass managers with preset configurations.
pub struct PassManagerBuilder {
    /// Optimization level (0-3).
    optimization_level: u8,
    /// Target properties.
    properties: PropertySet,
}

impl PassManagerBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            optimization_level: 1,
            properties: PropertySet::new(),
        }
    }

    /// Set the optimization level.
    ///
    /// - Level 0: No optimization, only required transformations
    /// - Level 1: Light optimization (default)
    /// - Level 2: Moderate optimization
    /// - Level 3: Heavy optimization
    #[must_use]
    pub fn with_optimization_level(mut self, level: u8) -> Self {
        self.optimization_level = level.min(3);
        self
    }

    /// Set the target basis gates.
    #[must_use]
    pub fn with_basis_gates(mut self, basis_gates: BasisGates) -> Self {
        self.properties.basis_gates = Some(basis_gates);
        self
    }

    /// Build the pass manager and return it with the properties.
    pub fn build(self) -> (PassManager, PropertySet) {
        let mut pm = PassManager::new();

        // Translation is required whenever the target has a constrained
        // basis, independent of the optimization level.
        if self.properties.basis_gates.is_some() {
            pm.add_pass(BasisTranslation);
        }

        if self.optimization_level >= 1 {
            pm.add_pass(InverseCancellation);
            pm.add_pass(Optimize1qGates::new());
        }

        // Levels 2 and 3 re-run the pair to catch cancellations exposed
        // by rotation merging.
        if self.optimization_level >= 2 {
            pm.add_pass(InverseCancellation);
            pm.add_pass(Optimize1qGates::new());
        }

        // Always verify measurement ordering when anything may have
        // rewritten the instruction list.
        if self.optimization_level >= 1 || self.properties.basis_gates.is_some() {
            pm.add_pass(MeasurementVerification);
        }

        (pm, self.properties)
    }
}

impl Default for PassManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Compile a circuit for a target at the given optimization level.
///
/// This is the one-call entry point: it clones the input, builds the
/// preset pass pipeline, and returns the compiled circuit.
pub fn transpile(
    circuit: &Circuit,
    basis_gates: Option<BasisGates>,
    optimization_level: u8,
) -> CompileResult<Circuit> {
    let mut builder = PassManagerBuilder::new().with_optimization_level(optimization_level);
    if let Some(basis) = basis_gates {
        builder = builder.with_basis_gates(basis);
    }
    let (pm, mut properties) = builder.build();

    let mut compiled = circuit.clone();
    pm.run(&mut compiled, &mut properties)?;
    Ok(compiled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pqca_ir::QubitId;

    #[test]
    fn test_default_builder_is_level_one() {
        let (pm, _) = PassManagerBuilder::new().build();
        // InverseCancellation, Optimize1qGates, MeasurementVerification.
        assert_eq!(pm.len(), 3);
    }

    #[test]
    fn test_level_zero_is_empty_without_basis() {
        let (pm, _) = PassManagerBuilder::new().with_optimization_level(0).build();
        assert!(pm.is_empty());
    }

    #[test]
    fn test_transpile_level_one_cancels() {
        let mut circuit = Circuit::new("test", 2);
        circuit.h(QubitId(0)).unwrap();
        circuit.h(QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.measure_all().unwrap();

        let compiled = transpile(&circuit, None, 1).unwrap();
        assert_eq!(compiled.count_ops().get("h"), None);
        assert_eq!(compiled.count_ops().get("cx"), Some(&1));
        assert!(compiled.has_measurements());
        // The input circuit is untouched.
        assert_eq!(circuit.count_ops().get("h"), Some(&2));
    }

    #[test]
    fn test_transpile_level_zero_is_identity() {
        let mut circuit = Circuit::new("test", 1);
        circuit.h(QubitId(0)).unwrap();
        circuit.h(QubitId(0)).unwrap();

        let compiled = transpile(&circuit, None, 0).unwrap();
        assert_eq!(compiled.len(), 2);
    }

    #[test]
    fn test_transpile_with_basis() {
        let mut circuit = Circuit::new("test", 2);
        circuit.swap(QubitId(0), QubitId(1)).unwrap();

        let basis = BasisGates::new(["cx", "rz", "rx"]);
        let compiled = transpile(&circuit, Some(basis), 1).unwrap();
        assert_eq!(compiled.count_ops().get("cx"), Some(&3));
    }
}
