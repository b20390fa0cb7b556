//! Demo command: mitigation comparison on a random circuit.

use anyhow::{Context, Result};
use console::style;
use std::fs;
use std::path::Path;

use alsvid_compile::{compile_circuit, PassCompiler};
use alsvid_ir::{random_circuit, RandomCircuitConfig};
use alsvid_qasm::emit;
use alsvid_sim::NoisyExecutor;
use alsvid_zne::{compare, format_report, FitMethod, ZneConfig};

/// Arguments for the demo command.
pub struct DemoArgs {
    pub qubits: u32,
    pub depth: u32,
    pub density: f64,
    pub seed: u64,
    pub noise_level: f64,
    pub scale_factors: Vec<f64>,
    pub linear: bool,
    pub export: Option<String>,
    pub emit_dir: Option<String>,
}

/// Execute the demo command.
pub fn execute(args: &DemoArgs) -> Result<()> {
    let circuit = random_circuit(&RandomCircuitConfig {
        num_qubits: args.qubits,
        depth: args.depth,
        density: args.density,
        seed: args.seed,
    })?;

    println!(
        "{} Generated {} ({} qubits, depth {}, {} two-qubit gates)",
        style("→").cyan().bold(),
        style(circuit.name()).green(),
        circuit.num_qubits(),
        circuit.depth(),
        circuit.num_two_qubit_gates()
    );

    let compiler = PassCompiler::new();
    let compiled = compile_circuit(&compiler, &circuit)?;
    println!(
        "{} Compiled to depth {} with {} two-qubit gates",
        style("→").cyan().bold(),
        compiled.depth(),
        compiled.num_two_qubit_gates()
    );

    if let Some(dir) = &args.emit_dir {
        let dir = Path::new(dir);
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        fs::write(dir.join("circuit.qasm"), emit(&circuit))?;
        fs::write(dir.join("circuit_compiled.qasm"), emit(&compiled))?;
        println!("  QASM written to {}", style(dir.display()).green());
    }

    let executor = NoisyExecutor::new(args.noise_level)?;
    let config = ZneConfig {
        scale_factors: args.scale_factors.clone(),
        fit: if args.linear {
            FitMethod::Linear
        } else {
            FitMethod::Richardson
        },
    };

    let records = [
        compare("uncompiled", &circuit, &executor, &config)?,
        compare("compiled", &compiled, &executor, &config)?,
    ];

    println!();
    print!("{}", format_report(&records));

    if let Some(export) = &args.export {
        let json = serde_json::to_string_pretty(&records)?;
        fs::write(export, json).with_context(|| format!("Failed to write file: {export}"))?;
        println!();
        println!("  Report exported to {}", style(export).green());
    }

    Ok(())
}
