//! Post-optimization measurement ordering verification.

use pqca_ir::{Circuit, InstructionKind};

use crate::error::{CompileError, CompileResult};
use crate::pass::{Pass, PassKind};
use crate::property::PropertySet;

/// Final correctness check: no operation may act on a qubit after that
/// qubit has been measured.
///
/// Optimization passes rebuild the instruction list; this pass catches
/// any pass that illegally moved a gate across a measurement. Repeated
/// measurement of the same qubit is permitted.
pub struct MeasurementVerification;

impl Pass for MeasurementVerification {
    fn name(&self) -> &'static str {
        "measurement-verification"
    }

    fn kind(&self) -> PassKind {
        PassKind::Analysis
    }

    fn run(&self, circuit: &mut Circuit, _properties: &mut PropertySet) -> CompileResult<()> {
        let mut measured = vec![false; circuit.num_qubits()];

        for inst in circuit.instructions() {
            match inst.kind {
                InstructionKind::Measure => {
                    for q in &inst.qubits {
                        measured[q.0 as usize] = true;
                    }
                }
                InstructionKind::Barrier => {}
                InstructionKind::Gate(_) | InstructionKind::Reset => {
                    if let Some(q) = inst.qubits.iter().find(|q| measured[q.0 as usize]) {
                        return Err(CompileError::VerificationFailed(format!(
                            "'{}' acts on {q} after measurement",
                            inst.name()
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}
