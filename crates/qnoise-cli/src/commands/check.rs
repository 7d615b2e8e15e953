//! Check command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use super::common::{build_gate_set, load_table};

/// Execute the check command.
///
/// Sampler arguments are only validated when sampled, so every noisy gate
/// draws once here.
pub fn execute(config: Option<&Path>) -> Result<()> {
    let Some(table) = load_table(config, None)? else {
        anyhow::bail!("No noise configuration found (use --config or QNOISE_CONFIG)");
    };
    let set = build_gate_set(Some(&table))?;

    for name in set.noisy_gates() {
        let Some(profile) = set.profile(name) else {
            continue;
        };
        let sample = profile
            .sample()
            .with_context(|| format!("Noise model for '{name}' cannot be sampled"))?;
        println!(
            "  {} {} sample {:?}",
            style("✓").green(),
            style(name).bold(),
            sample.as_slice()
        );
    }

    println!(
        "{} {} of {} record(s) in use",
        style("✓").green().bold(),
        set.noisy_gates().len(),
        table.len()
    );
    Ok(())
}
