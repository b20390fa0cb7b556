//! Run command implementation.

use anyhow::{Context, Result};
use console::style;
use std::fs;
use std::path::Path;

use alsvid_qasm::parse;
use alsvid_sim::NoisyExecutor;
use alsvid_zne::{zero_noise_extrapolate, ZneConfig};

/// Execute the run command.
pub fn execute(input: &str, noise_level: f64, mitigate: bool) -> Result<()> {
    let path = Path::new(input);
    if !path.exists() {
        anyhow::bail!("File not found: {input}");
    }
    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {input}"))?;
    let circuit = parse(&source)?;

    println!(
        "{} Running {} ({} qubits, depth {})",
        style("→").cyan().bold(),
        style(input).green(),
        circuit.num_qubits(),
        circuit.depth()
    );

    let executor = NoisyExecutor::new(noise_level)?;
    let population = executor.execute(&circuit)?;
    println!(
        "  Ground-state population at noise {}: {}",
        style(noise_level).yellow(),
        style(format!("{population:.6}")).green().bold()
    );

    if mitigate {
        let mitigated = zero_noise_extrapolate(&executor, &circuit, &ZneConfig::default())?;
        println!(
            "  Zero-noise estimate:               {}",
            style(format!("{mitigated:.6}")).green().bold()
        );
    }

    Ok(())
}
