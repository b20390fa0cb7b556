//! Compile command implementation.

use anyhow::{Context, Result};
use console::style;
use std::fs;
use std::path::Path;

use alsvid_compile::{PassCompiler, QasmCompiler};

/// Execute the compile command.
pub fn execute(input: &str, output: Option<&str>) -> Result<()> {
    println!(
        "{} Compiling {}",
        style("→").cyan().bold(),
        style(input).green()
    );

    let path = Path::new(input);
    if !path.exists() {
        anyhow::bail!("File not found: {input}");
    }
    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {input}"))?;

    let compiled = PassCompiler::new().compile(&source)?;

    let output_path = match output {
        Some(p) => p.to_string(),
        None => {
            let stem = path.file_stem().unwrap_or_default().to_string_lossy();
            format!("{stem}_compiled.qasm")
        }
    };
    fs::write(&output_path, compiled)
        .with_context(|| format!("Failed to write file: {output_path}"))?;

    println!("{} Compilation complete", style("✓").green().bold());
    println!("  Output: {}", style(&output_path).green());

    Ok(())
}
