//! Cancellation of adjacent inverse gate pairs.

use alsvid_ir::{Circuit, Instruction};

use crate::error::CompileResult;
use crate::pass::Pass;

/// Removes adjacent gate pairs that compose to the identity.
///
/// Two gates cancel when they are adjacent in program order, act on the
/// same qubits in the same order, and one is the inverse of the other.
/// Parameterized gates are never cancelled. Cancellation cascades: after
/// a pair is removed, the gates on either side may themselves cancel.
pub struct InverseCancellation;

impl Pass for InverseCancellation {
    fn name(&self) -> &'static str {
        "inverse-cancellation"
    }

    fn run(&self, circuit: &mut Circuit) -> CompileResult<bool> {
        let mut kept: Vec<Instruction> = Vec::with_capacity(circuit.num_ops());
        let mut changed = false;

        for inst in circuit.iter().cloned() {
            if let Some(prev) = kept.last() {
                if cancels(prev, &inst) {
                    kept.pop();
                    changed = true;
                    continue;
                }
            }
            kept.push(inst);
        }

        if changed {
            circuit.set_instructions(kept)?;
        }
        Ok(changed)
    }
}

fn cancels(a: &Instruction, b: &Instruction) -> bool {
    let (Some(ga), Some(gb)) = (a.as_gate(), b.as_gate()) else {
        return false;
    };
    a.qubits == b.qubits && ga.inverse().as_ref() == Some(gb)
}
