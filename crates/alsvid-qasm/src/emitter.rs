//! QASM text emission.

use std::fmt::Write;

use alsvid_ir::{Circuit, Instruction, InstructionKind, StandardGate};

/// Emit a circuit as `OpenQASM` 2.0 text.
///
/// Qubits are emitted into a single register `q` and classical bits into
/// a single register `c`, matching the flat index space of the circuit.
/// Noise channels have no QASM representation and are emitted as comment
/// lines, which a subsequent parse discards.
pub fn emit(circuit: &Circuit) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "OPENQASM 2.0;");
    let _ = writeln!(out, "include \"qelib1.inc\";");

    if circuit.num_qubits() > 0 {
        let _ = writeln!(out, "qreg q[{}];", circuit.num_qubits());
    }
    if circuit.num_clbits() > 0 {
        let _ = writeln!(out, "creg c[{}];", circuit.num_clbits());
    }

    for inst in circuit.iter() {
        emit_instruction(&mut out, inst);
    }

    out
}

fn emit_instruction(out: &mut String, inst: &Instruction) {
    match &inst.kind {
        InstructionKind::Gate(gate) => {
            let _ = writeln!(
                out,
                "{}{} {};",
                gate.name(),
                format_params(gate),
                format_qubits(inst)
            );
        }
        InstructionKind::Measure => {
            let _ = writeln!(
                out,
                "measure q[{}] -> c[{}];",
                inst.qubits[0].0, inst.clbits[0].0
            );
        }
        InstructionKind::Reset => {
            let _ = writeln!(out, "reset q[{}];", inst.qubits[0].0);
        }
        InstructionKind::Barrier => {
            let _ = writeln!(out, "barrier {};", format_qubits(inst));
        }
        InstructionKind::NoiseChannel { model } => {
            let _ = writeln!(out, "// noise: {} {}", model, format_qubits(inst));
        }
    }
}

fn format_params(gate: &StandardGate) -> String {
    let params = gate.parameters();
    if params.is_empty() {
        return String::new();
    }
    let rendered: Vec<String> = params.iter().map(ToString::to_string).collect();
    format!("({})", rendered.join(", "))
}

fn format_qubits(inst: &Instruction) -> String {
    let rendered: Vec<String> = inst.qubits.iter().map(|q| format!("q[{}]", q.0)).collect();
    rendered.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use alsvid_ir::{NoiseModel, QubitId};
    use std::f64::consts::PI;

    #[test]
    fn test_emit_bell() {
        let mut circuit = Circuit::bell().unwrap();
        circuit.measure_all().unwrap();
        let qasm = emit(&circuit);

        assert!(qasm.starts_with("OPENQASM 2.0;\n"));
        assert!(qasm.contains("qreg q[2];"));
        assert!(qasm.contains("creg c[2];"));
        assert!(qasm.contains("h q[0];"));
        assert!(qasm.contains("cx q[0], q[1];"));
        assert!(qasm.contains("measure q[0] -> c[0];"));
    }

    #[test]
    fn test_roundtrip_preserves_instructions() {
        let mut circuit = Circuit::with_size("test", 3, 0);
        circuit
            .h(QubitId(0))
            .unwrap()
            .rx(0.5, QubitId(1))
            .unwrap()
            .cp(PI / 4.0, QubitId(0), QubitId(2))
            .unwrap()
            .barrier([QubitId(0), QubitId(1), QubitId(2)])
            .unwrap()
            .swap(QubitId(1), QubitId(2))
            .unwrap();

        let reparsed = parse(&emit(&circuit)).unwrap();
        assert_eq!(reparsed.instructions(), circuit.instructions());
    }

    #[test]
    fn test_roundtrip_negative_angle() {
        let mut circuit = Circuit::with_size("test", 1, 0);
        circuit.rz(-1.25, QubitId(0)).unwrap();

        let reparsed = parse(&emit(&circuit)).unwrap();
        assert_eq!(reparsed.instructions(), circuit.instructions());
    }

    #[test]
    fn test_roundtrip_pi_expression() {
        let source = "OPENQASM 2.0;\nqreg q[1];\nrx(pi/2) q[0];";
        let circuit = parse(source).unwrap();
        let reparsed = parse(&emit(&circuit)).unwrap();
        assert_eq!(reparsed.instructions(), circuit.instructions());
    }

    #[test]
    fn test_noise_channel_emitted_as_comment() {
        let mut circuit = Circuit::with_size("test", 2, 0);
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit
            .apply(alsvid_ir::Instruction::noise_channel(
                NoiseModel::Depolarizing { p: 0.05 },
                [QubitId(0), QubitId(1)],
            ))
            .unwrap();

        let qasm = emit(&circuit);
        assert!(qasm.contains("// noise: depolarizing"));

        let reparsed = parse(&qasm).unwrap();
        assert_eq!(reparsed.num_ops(), 1);
    }
}
