//! Single-qubit rotation merging.

use std::f64::consts::TAU;

use pqca_ir::{Circuit, Instruction, StandardGate};

use crate::error::CompileResult;
use crate::pass::{Pass, PassKind};
use crate::property::PropertySet;

/// Tolerance for treating a merged rotation as identity.
const EPSILON: f64 = 1e-10;

/// Rotation family of a single-qubit gate, for merging runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
    Z,
    Phase,
}

fn as_rotation(gate: &StandardGate) -> Option<(Axis, f64)> {
    match gate {
        StandardGate::Rx(theta) => Some((Axis::X, *theta)),
        StandardGate::Ry(theta) => Some((Axis::Y, *theta)),
        StandardGate::Rz(theta) => Some((Axis::Z, *theta)),
        StandardGate::P(theta) => Some((Axis::Phase, *theta)),
        _ => None,
    }
}

fn make_rotation(axis: Axis, theta: f64) -> StandardGate {
    match axis {
        Axis::X => StandardGate::Rx(theta),
        Axis::Y => StandardGate::Ry(theta),
        Axis::Z => StandardGate::Rz(theta),
        Axis::Phase => StandardGate::P(theta),
    }
}

/// Angle equivalent to identity, up to global phase.
fn is_identity_angle(theta: f64) -> bool {
    let wrapped = theta.rem_euclid(TAU);
    wrapped < EPSILON || TAU - wrapped < EPSILON
}

/// Merges runs of same-axis single-qubit rotations and removes
/// identity gates.
///
/// Merging is modulo 2π, so global phase is not tracked; outcome
/// statistics are unaffected.
pub struct Optimize1qGates;

impl Optimize1qGates {
    /// Create the pass.
    pub fn new() -> Self {
        Self
    }
}

impl Default for Optimize1qGates {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass for Optimize1qGates {
    fn name(&self) -> &'static str {
        "optimize-1q-gates"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, circuit: &mut Circuit, _properties: &mut PropertySet) -> CompileResult<()> {
        let instructions: Vec<Instruction> = circuit.instructions().cloned().collect();
        let mut kept: Vec<Option<Instruction>> = Vec::with_capacity(instructions.len());
        let mut last_touch: Vec<Option<usize>> = vec![None; circuit.num_qubits()];

        for inst in instructions {
            // Plain identity gates are dropped outright.
            if inst.as_gate() == Some(&StandardGate::I) {
                continue;
            }

            let rotation = inst.as_gate().and_then(as_rotation);
            if let Some((axis, theta)) = rotation {
                let qubit = inst.qubits[0].0 as usize;

                // Merge into the previous rotation on this wire when it
                // shares the axis.
                let merged = last_touch[qubit].and_then(|j| {
                    let prev = kept[j].as_ref()?;
                    let (prev_axis, prev_theta) = prev.as_gate().and_then(as_rotation)?;
                    (prev_axis == axis).then_some((j, prev_theta + theta))
                });

                match merged {
                    Some((j, total)) if is_identity_angle(total) => {
                        kept[j] = None;
                        last_touch[qubit] = None;
                    }
                    Some((j, total)) => {
                        kept[j] = Some(Instruction::single_qubit_gate(
                            make_rotation(axis, total),
                            inst.qubits[0],
                        ));
                    }
                    None if is_identity_angle(theta) => {}
                    None => {
                        last_touch[qubit] = Some(kept.len());
                        kept.push(Some(inst));
                    }
                }
            } else {
                let idx = kept.len();
                for q in &inst.qubits {
                    last_touch[q.0 as usize] = Some(idx);
                }
                kept.push(Some(inst));
            }
        }

        circuit.set_instructions(kept.into_iter().flatten().collect())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pqca_ir::QubitId;
    use std::f64::consts::PI;

    fn run(circuit: &mut Circuit) {
        Optimize1qGates::new()
            .run(circuit, &mut PropertySet::new())
            .unwrap();
    }

    #[test]
    fn test_merge_same_axis() {
        let mut circuit = Circuit::new("test", 1);
        circuit.rz(PI / 4.0, QubitId(0)).unwrap();
        circuit.rz(PI / 4.0, QubitId(0)).unwrap();
        run(&mut circuit);
        assert_eq!(circuit.len(), 1);
        let gate = circuit.instructions().next().unwrap().as_gate().unwrap();
        assert_eq!(gate, &StandardGate::Rz(PI / 2.0));
    }

    #[test]
    fn test_full_turn_vanishes() {
        let mut circuit = Circuit::new("test", 1);
        circuit.rx(PI, QubitId(0)).unwrap();
        circuit.rx(PI, QubitId(0)).unwrap();
        run(&mut circuit);
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_different_axes_kept() {
        let mut circuit = Circuit::new("test", 1);
        circuit.rx(0.3, QubitId(0)).unwrap();
        circuit.rz(0.4, QubitId(0)).unwrap();
        run(&mut circuit);
        assert_eq!(circuit.len(), 2);
    }

    #[test]
    fn test_identity_dropped() {
        let mut circuit = Circuit::new("test", 1);
        circuit
            .append(Instruction::single_qubit_gate(StandardGate::I, QubitId(0)))
            .unwrap();
        circuit.rz(0.0, QubitId(0)).unwrap();
        run(&mut circuit);
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_merge_blocked_by_two_qubit_gate() {
        let mut circuit = Circuit::new("test", 2);
        circuit.rz(0.3, QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.rz(0.4, QubitId(0)).unwrap();
        run(&mut circuit);
        assert_eq!(circuit.len(), 3);
    }
}
