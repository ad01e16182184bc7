//! Update frames: a cell circuit wound around a tessellation.

use std::fmt;
use std::path::Path;

use pqca_ir::{Circuit, Instruction, QubitId};

use crate::error::{PqcaError, PqcaResult};
use crate::tessellation::Tessellation;

/// A cell circuit applied to every cell of a tessellation.
///
/// Holds both the original cell circuit and the wound full-lattice
/// instruction sequence. An automaton's update circuit is the
/// concatenation of its frames' instruction sequences.
#[derive(Debug, Clone)]
pub struct UpdateFrame {
    cell_circuit: Circuit,
    tessellation: Tessellation,
    instructions: Vec<Instruction>,
}

impl UpdateFrame {
    /// Wind a cell circuit around every cell of the tessellation.
    pub fn from_circuit(tessellation: Tessellation, cell_circuit: Circuit) -> PqcaResult<Self> {
        let instructions = wind_circuit_around_loop(&cell_circuit, &tessellation)?;
        Ok(Self {
            cell_circuit,
            tessellation,
            instructions,
        })
    }

    /// Load the cell circuit from QASM source.
    pub fn from_qasm_str(tessellation: Tessellation, source: &str) -> PqcaResult<Self> {
        Self::from_circuit(tessellation, pqca_qasm::parse(source)?)
    }

    /// Load the cell circuit from a QASM file.
    pub fn from_qasm_file(tessellation: Tessellation, path: impl AsRef<Path>) -> PqcaResult<Self> {
        Self::from_circuit(tessellation, pqca_qasm::parse_file(path)?)
    }

    /// The circuit applied to each cell.
    pub fn cell_circuit(&self) -> &Circuit {
        &self.cell_circuit
    }

    /// The tessellation the cell circuit is wound around.
    pub fn tessellation(&self) -> &Tessellation {
        &self.tessellation
    }

    /// The wound full-lattice instruction sequence.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }
}

impl fmt::Display for UpdateFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "UpdateFrame(circuit: {} on each cell of {})",
            self.cell_circuit.name(),
            self.tessellation
        )
    }
}

/// Repeat a cell circuit across every cell of a tessellation.
///
/// Qubit `i` of the cell circuit maps to the `i`-th qubit of each cell.
/// The cell circuit may be narrower than the cell; it must not be
/// wider.
pub fn wind_circuit_around_loop(
    circuit: &Circuit,
    tessellation: &Tessellation,
) -> PqcaResult<Vec<Instruction>> {
    if circuit.num_qubits() > tessellation.cell_size() {
        return Err(PqcaError::CircuitWrongShapeForCell {
            circuit_qubits: circuit.num_qubits(),
            cell_size: tessellation.cell_size(),
        });
    }

    let mut wound = Vec::with_capacity(circuit.len() * tessellation.num_cells());
    for cell in tessellation.cells() {
        for instruction in circuit.instructions() {
            wound.push(instruction.remapped(|q| QubitId(cell[q.0 as usize] as u32)));
        }
    }
    Ok(wound)
}
