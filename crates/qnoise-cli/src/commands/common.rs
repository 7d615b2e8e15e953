//! Shared helpers for CLI commands.

use std::path::Path;

use anyhow::{Context, Result};

use qnoise_inject::{GateOp, GateSet, NoiseTable};
use qnoise_ir::{GateFamily, QubitId, Qubits, StandardGate};

/// Load the noise table, if any, and optionally reseed it.
pub fn load_table(config: Option<&Path>, seed: Option<u64>) -> Result<Option<NoiseTable>> {
    let table = NoiseTable::load(config).context("Failed to load noise configuration")?;
    Ok(table.map(|mut table| {
        if let Some(seed) = seed {
            table.reseed(seed);
        }
        table
    }))
}

/// Build the gate set for a loaded table, ideal without one.
pub fn build_gate_set(table: Option<&NoiseTable>) -> Result<GateSet> {
    match table {
        Some(table) => GateSet::from_table(table).context("Invalid noise configuration"),
        None => Ok(GateSet::ideal()),
    }
}

/// Resolve a gate name (and angle for rotations) against the gate set.
pub fn resolve_gate(set: &GateSet, name: &str, angle: Option<f64>) -> Result<Box<dyn GateOp>> {
    let name = name.to_lowercase();

    if let Some(family) = GateFamily::from_name(&name) {
        let Some(angle) = angle else {
            anyhow::bail!("Gate '{name}' needs an angle (--angle)");
        };
        return Ok(set.rotation(family, angle));
    }

    if let Some(gate) = StandardGate::from_name(&name) {
        if angle.is_some() {
            tracing::warn!(gate = %name, "angle ignored for a fixed gate");
        }
        return Ok(set.fixed(gate));
    }

    anyhow::bail!("Unknown gate: '{name}'")
}

/// Qubits `0..count`.
pub fn operands(count: u32) -> Qubits {
    (0..count).map(QubitId).collect()
}
