//! Translation into the `{u, cx}` target basis.

use alsvid_ir::{Circuit, Instruction, ParameterExpression, QubitId, StandardGate};

use crate::error::CompileResult;
use crate::pass::Pass;

/// Rewrites every gate into the `{u, cx}` target basis.
///
/// Each standard gate has a known decomposition; decompositions that
/// produce non-basis gates are expanded recursively. Identity gates are
/// dropped. Measures, resets and barriers pass through unchanged.
/// Decompositions are exact up to global phase, which is unobservable
/// in density-matrix simulation.
pub struct BasisTranslation;

impl Pass for BasisTranslation {
    fn name(&self) -> &'static str {
        "basis-translation"
    }

    fn run(&self, circuit: &mut Circuit) -> CompileResult<bool> {
        let mut lowered: Vec<Instruction> = Vec::with_capacity(circuit.num_ops());
        for inst in circuit.iter().cloned() {
            lower(inst, &mut lowered);
        }

        let changed = lowered != circuit.instructions();
        if changed {
            circuit.set_instructions(lowered)?;
        }
        Ok(changed)
    }
}

fn lower(inst: Instruction, out: &mut Vec<Instruction>) {
    match decompose(&inst) {
        None => out.push(inst),
        Some(sub) => {
            for s in sub {
                lower(s, out);
            }
        }
    }
}

/// One decomposition step for a single instruction.
///
/// Returns `None` when the instruction is already in the target basis
/// (or is not a gate at all), and `Some(vec![])` for gates that vanish.
#[allow(clippy::too_many_lines)]
fn decompose(inst: &Instruction) -> Option<Vec<Instruction>> {
    let gate = inst.as_gate()?;

    let pi = ParameterExpression::pi;
    let zero = || ParameterExpression::constant(0.0);
    let half_pi = || pi() / 2.into();
    let quarter_pi = || pi() / 4.into();

    let u1 = |theta, phi, lambda, q: QubitId| {
        Instruction::single_qubit_gate(StandardGate::U(theta, phi, lambda), q)
    };
    let gate1 = |g, q: QubitId| Instruction::single_qubit_gate(g, q);
    let cx = |a: QubitId, b: QubitId| Instruction::two_qubit_gate(StandardGate::CX, a, b);

    let sub = match gate.clone() {
        // Target basis.
        StandardGate::U(_, _, _) | StandardGate::CX => return None,

        // Identity vanishes.
        StandardGate::I => vec![],

        // Single-qubit gates as U(θ, φ, λ).
        StandardGate::X => vec![u1(pi(), zero(), pi(), inst.qubits[0])],
        StandardGate::Y => vec![u1(pi(), half_pi(), half_pi(), inst.qubits[0])],
        StandardGate::Z => vec![u1(zero(), zero(), pi(), inst.qubits[0])],
        StandardGate::H => vec![u1(half_pi(), zero(), pi(), inst.qubits[0])],
        StandardGate::S => vec![u1(zero(), zero(), half_pi(), inst.qubits[0])],
        StandardGate::Sdg => vec![u1(zero(), zero(), -half_pi(), inst.qubits[0])],
        StandardGate::T => vec![u1(zero(), zero(), quarter_pi(), inst.qubits[0])],
        StandardGate::Tdg => vec![u1(zero(), zero(), -quarter_pi(), inst.qubits[0])],
        StandardGate::SX => vec![u1(half_pi(), -half_pi(), half_pi(), inst.qubits[0])],
        StandardGate::SXdg => vec![u1(-half_pi(), -half_pi(), half_pi(), inst.qubits[0])],
        StandardGate::Rx(theta) => vec![u1(theta, -half_pi(), half_pi(), inst.qubits[0])],
        StandardGate::Ry(theta) => vec![u1(theta, zero(), zero(), inst.qubits[0])],
        StandardGate::Rz(theta) | StandardGate::P(theta) => {
            vec![u1(zero(), zero(), theta, inst.qubits[0])]
        }

        // Two-qubit gates over CX.
        StandardGate::CY => {
            let (a, b) = (inst.qubits[0], inst.qubits[1]);
            vec![gate1(StandardGate::Sdg, b), cx(a, b), gate1(StandardGate::S, b)]
        }
        StandardGate::CZ => {
            let (a, b) = (inst.qubits[0], inst.qubits[1]);
            vec![gate1(StandardGate::H, b), cx(a, b), gate1(StandardGate::H, b)]
        }
        StandardGate::Swap => {
            let (a, b) = (inst.qubits[0], inst.qubits[1]);
            vec![cx(a, b), cx(b, a), cx(a, b)]
        }
        StandardGate::CRz(theta) => {
            let (a, b) = (inst.qubits[0], inst.qubits[1]);
            vec![
                gate1(StandardGate::Rz(theta.half()), b),
                cx(a, b),
                gate1(StandardGate::Rz(-theta.half()), b),
                cx(a, b),
            ]
        }
        StandardGate::CP(theta) => {
            let (a, b) = (inst.qubits[0], inst.qubits[1]);
            vec![
                gate1(StandardGate::P(theta.half()), a),
                cx(a, b),
                gate1(StandardGate::P(-theta.half()), b),
                cx(a, b),
                gate1(StandardGate::P(theta.half()), b),
            ]
        }
    };
    Some(sub)
}
