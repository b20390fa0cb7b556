//! Alsvid Command-Line Interface
//!
//! The main entry point for the Alsvid CLI tool.
//!
//! ```text
//!            A L S V I D
//!   Noisy Simulation and Zero-Noise
//!     Extrapolation for Circuits
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{compile, demo, run, version};

/// Alsvid - noisy circuit simulation and zero-noise extrapolation
#[derive(Parser)]
#[command(name = "alsvid")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare mitigation quality on a random circuit, uncompiled vs compiled
    Demo {
        /// Number of qubits
        #[arg(short, long, default_value = "4")]
        qubits: u32,

        /// Number of random layers
        #[arg(short, long, default_value = "10")]
        depth: u32,

        /// Fraction of qubit slots filled per layer, in (0, 1]
        #[arg(long, default_value = "0.8")]
        density: f64,

        /// RNG seed
        #[arg(short, long, default_value = "0")]
        seed: u64,

        /// Two-qubit depolarizing error rate
        #[arg(short, long, default_value = "0.05")]
        noise_level: f64,

        /// Noise amplification factors for extrapolation
        #[arg(long, value_delimiter = ',', default_values_t = [1.0, 2.0, 3.0])]
        scale_factors: Vec<f64>,

        /// Use a least-squares linear fit instead of Richardson
        #[arg(long)]
        linear: bool,

        /// Write the report as JSON to this file
        #[arg(long)]
        export: Option<String>,

        /// Write the generated and compiled QASM into this directory
        #[arg(long)]
        emit_dir: Option<String>,
    },

    /// Compile a QASM file to the {u, cx} basis
    Compile {
        /// Input file (QASM 2.0)
        #[arg(short, long)]
        input: String,

        /// Output file (defaults to <input>_compiled.qasm)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Execute a QASM file on the noisy simulator
    Run {
        /// Input file (QASM 2.0)
        #[arg(short, long)]
        input: String,

        /// Two-qubit depolarizing error rate
        #[arg(short, long, default_value = "0.05")]
        noise_level: f64,

        /// Also report a zero-noise extrapolated estimate
        #[arg(short, long)]
        mitigate: bool,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Demo {
            qubits,
            depth,
            density,
            seed,
            noise_level,
            scale_factors,
            linear,
            export,
            emit_dir,
        } => demo::execute(&demo::DemoArgs {
            qubits,
            depth,
            density,
            seed,
            noise_level,
            scale_factors,
            linear,
            export,
            emit_dir,
        }),

        Commands::Compile { input, output } => compile::execute(&input, output.as_deref()),

        Commands::Run {
            input,
            noise_level,
            mitigate,
        } => run::execute(&input, noise_level, mitigate),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
