//! Built-in cell rules for the demos.

use pqca_ir::{Circuit, IrResult, QubitId};

/// CX within each cell: the second qubit becomes the parity of both.
pub fn cx_cell() -> IrResult<Circuit> {
    let mut circuit = Circuit::new("cx", 2);
    circuit.cx(QubitId(0), QubitId(1))?;
    Ok(circuit)
}

/// Swap the two qubits of each cell. Combined with a shifted second
/// frame this transports patterns along the line.
pub fn swap_cell() -> IrResult<Circuit> {
    let mut circuit = Circuit::new("swap", 2);
    circuit.swap(QubitId(0), QubitId(1))?;
    Ok(circuit)
}

/// A coin-flip rule: Hadamard on each qubit of the cell.
pub fn coin_cell() -> IrResult<Circuit> {
    let mut circuit = Circuit::new("coin", 2);
    circuit.h(QubitId(0))?.h(QubitId(1))?;
    Ok(circuit)
}
