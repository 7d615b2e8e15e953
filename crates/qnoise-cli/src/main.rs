//! qnoise Command-Line Interface
//!
//! Loads a noise table, builds the noisy gate set and applies gates to a
//! fresh circuit so the emitted instructions can be inspected.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::apply::OutputFormat;
use commands::{apply, check, gates, version};

/// qnoise - stochastic noise injection for quantum gates
#[derive(Parser)]
#[command(name = "qnoise")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Noise configuration file (YAML)
    #[arg(short, long, global = true, env = "QNOISE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a gate to a fresh circuit and print what was emitted
    Apply {
        /// Gate name (rx, ry, rz, h, cx, ...)
        #[arg(short, long)]
        gate: String,

        /// Rotation angle, required for rx/ry/rz
        #[arg(short, long, allow_hyphen_values = true)]
        angle: Option<f64>,

        /// Number of qubits the gate is applied to (defaults to its arity)
        #[arg(short, long)]
        qubits: Option<u32>,

        /// Apply the gate this many times
        #[arg(short, long, default_value = "1")]
        repeat: u32,

        /// Seed every noise source for a reproducible run
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List the gates a noise table replaces
    Gates,

    /// Validate a noise table by building and sampling every gate
    Check,

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Apply {
            gate,
            angle,
            qubits,
            repeat,
            seed,
            format,
        } => apply::execute(config, &gate, angle, qubits, repeat, seed, format),

        Commands::Gates => gates::execute(config),

        Commands::Check => check::execute(config),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
