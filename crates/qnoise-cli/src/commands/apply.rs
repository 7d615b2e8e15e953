//! Apply command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use console::style;
use serde::Serialize;

use qnoise_ir::{Circuit, Instruction, Qubits};

use super::common::{build_gate_set, load_table, operands, resolve_gate};

/// How emitted instructions are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Serialize)]
struct Report<'a> {
    gate: String,
    noisy: bool,
    num_qubits: u32,
    instructions: &'a [Instruction],
}

/// Execute the apply command.
pub fn execute(
    config: Option<&Path>,
    gate: &str,
    angle: Option<f64>,
    qubits: Option<u32>,
    repeat: u32,
    seed: Option<u64>,
    format: OutputFormat,
) -> Result<()> {
    let table = load_table(config, seed)?;
    let set = build_gate_set(table.as_ref())?;
    let op = resolve_gate(&set, gate, angle)?;

    let width = qubits.unwrap_or_else(|| op.num_qubits());
    let mut circuit = Circuit::with_size("qnoise", width);
    let targets = operands(width);

    tracing::info!(gate = %op.label(), width, repeat, "applying gate");
    for _ in 0..repeat {
        op.apply(&mut circuit, &targets)
            .with_context(|| format!("Failed to apply {}", op.label()))?;
    }

    match format {
        OutputFormat::Json => {
            let report = Report {
                gate: op.label(),
                noisy: set.is_noisy(&gate.to_lowercase()),
                num_qubits: width,
                instructions: circuit.instructions(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            println!(
                "{} {} on {} qubit(s), {} application(s)",
                style("→").cyan().bold(),
                style(op.label()).green(),
                width,
                repeat
            );
            for inst in circuit.instructions() {
                let line = format!("  {} {}", inst.gate, Qubits::from(inst.qubits.clone()));
                if inst.is_identity() {
                    println!("{}", style(line).dim());
                } else {
                    println!("{line}");
                }
            }
            println!(
                "{} {} instruction(s) emitted",
                style("✓").green().bold(),
                circuit.num_ops()
            );
        }
    }

    Ok(())
}
