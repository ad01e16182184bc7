//! Translation of gates into a target basis.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use pqca_ir::{Circuit, Instruction, InstructionKind, StandardGate};

use crate::error::{CompileError, CompileResult};
use crate::pass::{Pass, PassKind};
use crate::property::{BasisGates, PropertySet};

/// Translation rounds before giving up; each rule chain (e.g.
/// S → P → Rz) terminates well within this.
const MAX_ROUNDS: usize = 4;

/// Rewrites gates outside the target basis into basis-gate sequences.
///
/// Only runs when the property set carries a basis. The rule table is
/// deliberately small: it covers the phase family, square-root-of-X,
/// Pauli-to-rotation, and Swap; everything else must be native.
pub struct BasisTranslation;

fn decompose(gate: &StandardGate, inst: &Instruction) -> Option<Vec<Instruction>> {
    let q = |i: usize| inst.qubits[i];
    let one = |g: StandardGate| vec![Instruction::single_qubit_gate(g, q(0))];
    match gate {
        StandardGate::I => Some(vec![]),
        StandardGate::S => Some(one(StandardGate::P(FRAC_PI_2))),
        StandardGate::Sdg => Some(one(StandardGate::P(-FRAC_PI_2))),
        StandardGate::T => Some(one(StandardGate::P(FRAC_PI_4))),
        StandardGate::Tdg => Some(one(StandardGate::P(-FRAC_PI_4))),
        // Equal up to global phase, which outcome statistics ignore.
        StandardGate::P(theta) => Some(one(StandardGate::Rz(*theta))),
        StandardGate::SX => Some(one(StandardGate::Rx(FRAC_PI_2))),
        StandardGate::SXdg => Some(one(StandardGate::Rx(-FRAC_PI_2))),
        StandardGate::X => Some(one(StandardGate::Rx(PI))),
        StandardGate::Y => Some(one(StandardGate::Ry(PI))),
        StandardGate::Z => Some(one(StandardGate::Rz(PI))),
        StandardGate::H => Some(one(StandardGate::U(FRAC_PI_2, 0.0, PI))),
        StandardGate::Swap => Some(vec![
            Instruction::two_qubit_gate(StandardGate::CX, q(0), q(1)),
            Instruction::two_qubit_gate(StandardGate::CX, q(1), q(0)),
            Instruction::two_qubit_gate(StandardGate::CX, q(0), q(1)),
        ]),
        _ => None,
    }
}

fn translate_once(
    instructions: Vec<Instruction>,
    basis: &BasisGates,
) -> CompileResult<(Vec<Instruction>, bool)> {
    let mut out = Vec::with_capacity(instructions.len());
    let mut changed = false;
    for inst in instructions {
        match &inst.kind {
            InstructionKind::Gate(gate) if !basis.contains(gate.name()) => {
                match decompose(gate, &inst) {
                    Some(replacement) => {
                        changed = true;
                        out.extend(replacement);
                    }
                    None => return Err(CompileError::UnsupportedGate { gate: gate.name() }),
                }
            }
            _ => out.push(inst),
        }
    }
    Ok((out, changed))
}

impl Pass for BasisTranslation {
    fn name(&self) -> &'static str {
        "basis-translation"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn should_run(&self, _circuit: &Circuit, properties: &PropertySet) -> bool {
        properties.basis_gates.is_some()
    }

    fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> CompileResult<()> {
        let Some(basis) = properties.basis_gates.clone() else {
            return Ok(());
        };

        let mut instructions: Vec<Instruction> = circuit.instructions().cloned().collect();
        for _ in 0..MAX_ROUNDS {
            let (next, changed) = translate_once(instructions, &basis)?;
            instructions = next;
            if !changed {
                circuit.set_instructions(instructions)?;
                return Ok(());
            }
        }
        // A rule produced a gate its own chain cannot reach the basis
        // from (e.g. Swap → CX with no native CX).
        let (checked, _) = translate_once(instructions, &basis)?;
        circuit.set_instructions(checked)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pqca_ir::QubitId;

    fn run_with_basis(circuit: &mut Circuit, basis: &[&str]) -> CompileResult<()> {
        let mut properties = PropertySet::new();
        properties.basis_gates = Some(BasisGates::new(basis.iter().copied()));
        BasisTranslation.run(circuit, &mut properties)
    }

    #[test]
    fn test_phase_family_to_rz() {
        let mut circuit = Circuit::new("test", 1);
        circuit.s(QubitId(0)).unwrap();
        circuit.t(QubitId(0)).unwrap();
        run_with_basis(&mut circuit, &["rz", "rx", "cx"]).unwrap();
        assert!(circuit.instructions().all(|i| i.name() == "rz"));
        assert_eq!(circuit.len(), 2);
    }

    #[test]
    fn test_swap_to_cx() {
        let mut circuit = Circuit::new("test", 2);
        circuit.swap(QubitId(0), QubitId(1)).unwrap();
        run_with_basis(&mut circuit, &["cx", "rz", "rx"]).unwrap();
        assert_eq!(circuit.count_ops().get("cx"), Some(&3));
    }

    #[test]
    fn test_untranslatable_gate_errors() {
        let mut circuit = Circuit::new("test", 3);
        circuit.ccx(QubitId(0), QubitId(1), QubitId(2)).unwrap();
        let err = run_with_basis(&mut circuit, &["cx", "rz"]);
        assert!(matches!(
            err,
            Err(CompileError::UnsupportedGate { gate: "ccx" })
        ));
    }

    #[test]
    fn test_native_gates_untouched() {
        let mut circuit = Circuit::new("test", 2);
        circuit.h(QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        run_with_basis(&mut circuit, &["h", "cx"]).unwrap();
        assert_eq!(circuit.len(), 2);
    }

    #[test]
    fn test_measure_untouched() {
        let mut circuit = Circuit::new("test", 1);
        circuit.measure_all().unwrap();
        run_with_basis(&mut circuit, &["cx"]).unwrap();
        assert!(circuit.has_measurements());
    }
}
