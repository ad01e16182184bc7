//! The automaton: state, update frames, and an evaluator.

use std::fmt;

use pqca_ir::{Circuit, Instruction, QubitId};

use crate::error::{PqcaError, PqcaResult};
use crate::evaluate::Evaluator;
use crate::frame::UpdateFrame;

/// A partitioned quantum cellular automaton.
///
/// Holds a classical state (one bit per lattice qubit), a list of
/// update frames whose wound circuits are applied in order, and the
/// evaluator that runs each tick's circuit.
pub struct Automaton {
    state: Vec<u8>,
    frames: Vec<UpdateFrame>,
    evaluator: Evaluator,
    update_instructions: Vec<Instruction>,
}

impl Automaton {
    /// Create an automaton from an initial state, update frames, and an
    /// evaluator.
    ///
    /// Every frame's tessellation must cover exactly as many qubits as
    /// the state has bits.
    pub fn new(
        initial_state: Vec<u8>,
        frames: Vec<UpdateFrame>,
        evaluator: Evaluator,
    ) -> PqcaResult<Self> {
        for frame in &frames {
            if frame.tessellation().size() != initial_state.len() {
                return Err(PqcaError::StateSizeMismatch {
                    state: initial_state.len(),
                    qubits: frame.tessellation().size(),
                });
            }
        }

        let update_instructions = frames
            .iter()
            .flat_map(|frame| frame.instructions().iter().cloned())
            .collect();

        Ok(Self {
            state: initial_state,
            frames,
            evaluator,
            update_instructions,
        })
    }

    /// The current state, one bit per qubit, qubit 0 first.
    pub fn state(&self) -> &[u8] {
        &self.state
    }

    /// The update frames, in application order.
    pub fn frames(&self) -> &[UpdateFrame] {
        &self.frames
    }

    /// Circuit preparing a zeroed register into the current state.
    pub fn preparation_circuit(&self) -> PqcaResult<Circuit> {
        pattern_preparation_circuit(&self.state)
    }

    /// The full circuit for one tick: preparation followed by every
    /// frame's wound instructions.
    pub fn combined_circuit(&self) -> PqcaResult<Circuit> {
        let mut circuit = self.preparation_circuit()?;
        for instruction in &self.update_instructions {
            circuit.append(instruction.clone())?;
        }
        Ok(circuit)
    }

    /// Advance the automaton by one step.
    pub fn tick(&mut self) -> PqcaResult<()> {
        let mut circuit = self.combined_circuit()?;
        self.state = (self.evaluator)(&mut circuit)?;
        Ok(())
    }

    /// Advance by `ticks` steps, returning each state reached along the
    /// way, final state included.
    pub fn iterate(&mut self, ticks: usize) -> PqcaResult<Vec<Vec<u8>>> {
        let mut states = Vec::with_capacity(ticks);
        for _ in 0..ticks {
            self.tick()?;
            states.push(self.state.clone());
        }
        Ok(states)
    }
}

impl fmt::Display for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let frames: Vec<String> = self.frames.iter().map(UpdateFrame::to_string).collect();
        write!(
            f,
            "PQCA(state={:?}, frames=[{}])",
            self.state,
            frames.join(",")
        )
    }
}

/// Circuit that encodes a classical bit pattern: X on every set bit.
pub fn pattern_preparation_circuit(pattern: &[u8]) -> PqcaResult<Circuit> {
    let mut circuit = Circuit::new("preparation", pattern.len() as u32);
    for (qubit, bit) in pattern.iter().enumerate() {
        if *bit != 0 {
            circuit.x(QubitId(qubit as u32))?;
        }
    }
    Ok(circuit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate::default_evaluator;
    use crate::tessellation::one_dimensional;

    fn cx_frame(num_qubits: usize) -> UpdateFrame {
        let mut cell = Circuit::new("cx", 2);
        cell.cx(QubitId(0), QubitId(1)).unwrap();
        UpdateFrame::from_circuit(one_dimensional(num_qubits, 2).unwrap(), cell).unwrap()
    }

    #[test]
    fn test_preparation_circuit() {
        let circuit = pattern_preparation_circuit(&[1, 0, 1]).unwrap();
        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.count_ops().get("x"), Some(&2));
    }

    #[test]
    fn test_state_size_mismatch_rejected() {
        let err = Automaton::new(vec![1, 0], vec![cx_frame(4)], default_evaluator());
        assert!(matches!(err, Err(PqcaError::StateSizeMismatch { .. })));
    }

    #[test]
    fn test_combined_circuit_shape() {
        let automaton =
            Automaton::new(vec![1, 1, 1, 1], vec![cx_frame(4)], default_evaluator()).unwrap();
        let circuit = automaton.combined_circuit().unwrap();
        // Four X preparations plus one CX per cell.
        assert_eq!(circuit.count_ops().get("x"), Some(&4));
        assert_eq!(circuit.count_ops().get("cx"), Some(&2));
    }

    #[test]
    fn test_display() {
        let automaton = Automaton::new(vec![0, 0], vec![], default_evaluator()).unwrap();
        assert_eq!(automaton.to_string(), "PQCA(state=[0, 0], frames=[])");
    }
}
