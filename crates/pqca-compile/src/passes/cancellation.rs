//! Cancellation of adjacent self-inverse gate pairs.

use pqca_ir::{Circuit, Instruction};

use crate::error::CompileResult;
use crate::pass::{Pass, PassKind};
use crate::property::PropertySet;

/// Removes pairs of identical self-inverse gates with nothing between
/// them on their operand wires.
///
/// Adjacency is judged per wire, not per list position: gates on
/// disjoint qubits commute past each other, so a pair wound onto the
/// same cell cancels even when other cells' gates are interleaved.
pub struct InverseCancellation;

impl Pass for InverseCancellation {
    fn name(&self) -> &'static str {
        "inverse-cancellation"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, circuit: &mut Circuit, _properties: &mut PropertySet) -> CompileResult<()> {
        let instructions: Vec<Instruction> = circuit.instructions().cloned().collect();
        // Kept instructions; cancelled entries become None.
        let mut kept: Vec<Option<Instruction>> = Vec::with_capacity(instructions.len());
        // Index into `kept` of the last retained instruction touching
        // each qubit.
        let mut last_touch: Vec<Option<usize>> = vec![None; circuit.num_qubits()];

        for inst in instructions {
            // All operand wires must point at one identical retained
            // self-inverse instruction.
            let cancels_with = inst
                .as_gate()
                .is_some_and(pqca_ir::StandardGate::is_self_inverse)
                .then(|| {
                    let touchers: Vec<_> = inst
                        .qubits
                        .iter()
                        .map(|q| last_touch[q.0 as usize])
                        .collect();
                    match touchers.first().copied().flatten() {
                        Some(j)
                            if touchers.iter().all(|t| *t == Some(j))
                                && kept[j].as_ref() == Some(&inst) =>
                        {
                            Some(j)
                        }
                        _ => None,
                    }
                })
                .flatten();

            if let Some(j) = cancels_with {
                kept[j] = None;
                for q in &inst.qubits {
                    last_touch[q.0 as usize] = None;
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

    fn run(circuit: &mut Circuit) {
        InverseCancellation
            .run(circuit, &mut PropertySet::new())
            .unwrap();
    }

    #[test]
    fn test_adjacent_pair_cancels() {
        let mut circuit = Circuit::new("test", 1);
        circuit.x(QubitId(0)).unwrap();
        circuit.x(QubitId(0)).unwrap();
        run(&mut circuit);
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_interleaved_cells_cancel() {
        // Two rounds of the same wound frame: cx(0,1) cx(2,3) cx(0,1) cx(2,3).
        let mut circuit = Circuit::new("test", 4);
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.cx(QubitId(2), QubitId(3)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.cx(QubitId(2), QubitId(3)).unwrap();
        run(&mut circuit);
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_blocked_by_intervening_gate() {
        let mut circuit = Circuit::new("test", 1);
        circuit.x(QubitId(0)).unwrap();
        circuit.h(QubitId(0)).unwrap();
        circuit.x(QubitId(0)).unwrap();
        run(&mut circuit);
        assert_eq!(circuit.len(), 3);
    }

    #[test]
    fn test_blocked_by_measure() {
        let mut circuit = Circuit::new("test", 1);
        circuit.x(QubitId(0)).unwrap();
        circuit.measure_all().unwrap();
        circuit.x(QubitId(0)).unwrap();
        run(&mut circuit);
        assert_eq!(circuit.len(), 3);
    }

    #[test]
    fn test_non_self_inverse_survives() {
        let mut circuit = Circuit::new("test", 1);
        circuit.s(QubitId(0)).unwrap();
        circuit.s(QubitId(0)).unwrap();
        run(&mut circuit);
        assert_eq!(circuit.len(), 2);
    }

    #[test]
    fn test_partial_overlap_does_not_cancel() {
        // cx(0,1) then cx(1,2): shared wire but different operands.
        let mut circuit = Circuit::new("test", 3);
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.cx(QubitId(1), QubitId(2)).unwrap();
        run(&mut circuit);
        assert_eq!(circuit.len(), 2);
    }
}
