//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - noisy simulation and zero-noise extrapolation",
        style("Alsvid").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  alsvid-ir       Circuit intermediate representation");
    println!("  alsvid-qasm     OpenQASM 2.0 interchange format");
    println!("  alsvid-compile  Compilation passes and compiler adapter");
    println!("  alsvid-sim      Density-matrix simulator");
    println!("  alsvid-zne      Zero-noise extrapolation");
    println!("  alsvid-cli      Command-line interface");
    println!();
    println!(
        "Repository: {}",
        style("https://github.com/alsvid-dev/alsvid").underlined()
    );
    println!("License:    {}", style("Apache-2.0").dim());
}
