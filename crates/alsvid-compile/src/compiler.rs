//! QASM-in, QASM-out compiler adapter.

use tracing::debug;

use alsvid_ir::Circuit;
use alsvid_qasm::{emit, parse};

use crate::error::CompileResult;
use crate::manager::PassManager;

/// A compiler that exchanges circuits as `OPENQASM 2.0` text.
///
/// This is the boundary the rest of the pipeline sees: circuits cross it
/// as QASM text in both directions, exactly as they would when shelling
/// out to a vendor toolchain. Implementations may prepend a leading
/// vendor comment to their output; callers strip it with
/// [`strip_vendor_header`] before parsing. No guarantee is made about
/// the depth of the returned circuit relative to the input.
pub trait QasmCompiler {
    /// Get the name of this compiler.
    fn name(&self) -> &str;

    /// Compile QASM text, returning QASM text over the `{u, cx}` basis.
    fn compile(&self, qasm: &str) -> CompileResult<String>;
}

/// Strip the leading vendor comment block from compiler output.
///
/// Compilers prepend `//` comment lines identifying themselves. Leading
/// comment and blank lines are skipped up to the first line of code;
/// comments after that point are left alone.
pub fn strip_vendor_header(qasm: &str) -> &str {
    let mut rest = qasm;
    loop {
        let trimmed = rest.trim_start_matches(['\n', '\r', ' ', '\t']);
        if let Some(stripped) = trimmed.strip_prefix("//") {
            rest = match stripped.find('\n') {
                Some(idx) => &stripped[idx + 1..],
                None => "",
            };
        } else {
            return trimmed;
        }
    }
}

/// Run a circuit through a compiler, handling the QASM interchange.
///
/// Serializes the circuit, invokes the compiler, strips the vendor
/// header from the result and parses it back.
pub fn compile_circuit(compiler: &dyn QasmCompiler, circuit: &Circuit) -> CompileResult<Circuit> {
    let qasm = emit(circuit);
    debug!(compiler = compiler.name(), "compiling circuit");

    let compiled = compiler.compile(&qasm)?;
    let mut result = parse(strip_vendor_header(&compiled))?;
    result.set_name(format!("{}_compiled", circuit.name()));
    Ok(result)
}

/// The built-in pass-based compiler.
///
/// Parses the incoming QASM, runs the standard pass pipeline and emits
/// the result with a vendor comment on top.
pub struct PassCompiler {
    passes: PassManager,
}

impl PassCompiler {
    /// Create a compiler with the standard pass pipeline.
    pub fn new() -> Self {
        Self {
            passes: PassManager::standard(),
        }
    }

    /// Create a compiler with a custom pass pipeline.
    pub fn with_passes(passes: PassManager) -> Self {
        Self { passes }
    }
}

impl Default for PassCompiler {
    fn default() -> Self {
        Self::new()
    }
}

impl QasmCompiler for PassCompiler {
    fn name(&self) -> &'static str {
        "alsvid-compile"
    }

    fn compile(&self, qasm: &str) -> CompileResult<String> {
        let mut circuit = parse(strip_vendor_header(qasm))?;
        self.passes.run(&mut circuit)?;

        let mut out = format!(
            "// Compiled by {} {}\n",
            self.name(),
            env!("CARGO_PKG_VERSION")
        );
        out.push_str(&emit(&circuit));
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alsvid_ir::QubitId;

    #[test]
    fn test_strip_vendor_header() {
        let qasm = "// Compiled by vendor 1.0\n// timing: 3ms\n\nOPENQASM 2.0;\nqreg q[1];\n";
        let stripped = strip_vendor_header(qasm);
        assert!(stripped.starts_with("OPENQASM 2.0;"));
    }

    #[test]
    fn test_strip_keeps_inline_comments() {
        let qasm = "OPENQASM 2.0;\n// inline\nqreg q[1];\n";
        let stripped = strip_vendor_header(qasm);
        assert!(stripped.contains("// inline"));
    }

    #[test]
    fn test_strip_all_comments() {
        assert_eq!(strip_vendor_header("// only comments\n// here"), "");
    }

    #[test]
    fn test_compile_emits_vendor_header() {
        let compiler = PassCompiler::new();
        let out = compiler
            .compile("OPENQASM 2.0;\nqreg q[1];\nh q[0];\n")
            .unwrap();
        assert!(out.starts_with("// Compiled by alsvid-compile"));
    }

    #[test]
    fn test_compile_circuit_roundtrip() {
        let compiler = PassCompiler::new();
        let mut circuit = Circuit::with_size("test", 2, 0);
        circuit.h(QubitId(0)).unwrap();
        circuit.swap(QubitId(0), QubitId(1)).unwrap();

        let compiled = compile_circuit(&compiler, &circuit).unwrap();
        assert_eq!(compiled.num_qubits(), 2);
        assert_eq!(compiled.name(), "test_compiled");
        assert!(compiled
            .iter()
            .filter(|i| i.is_gate())
            .all(|i| matches!(i.name(), "u" | "cx")));
        assert_eq!(compiled.num_two_qubit_gates(), 3);
    }

    #[test]
    fn test_compile_cancels_inverse_pairs() {
        let compiler = PassCompiler::new();
        let out = compiler
            .compile("OPENQASM 2.0;\nqreg q[1];\nx q[0];\nx q[0];\n")
            .unwrap();

        let circuit = parse(strip_vendor_header(&out)).unwrap();
        assert_eq!(circuit.num_ops(), 0);
    }
}
