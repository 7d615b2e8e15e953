//! Gates command implementation.

use std::path::Path;

use anyhow::Result;
use console::style;

use qnoise_inject::{NOISY_GATES, NoiseModel};

use super::common::load_table;

/// Execute the gates command.
pub fn execute(config: Option<&Path>) -> Result<()> {
    let Some(table) = load_table(config, None)? else {
        println!(
            "{} No noise configuration found, all gates are ideal",
            style("○").dim()
        );
        return Ok(());
    };

    println!("{} Noise table:\n", style("qnoise").cyan().bold());

    for (name, record) in table.iter() {
        let replaced = NOISY_GATES.contains(&name);
        println!(
            "  {} {}{}",
            if replaced {
                style("●").green()
            } else {
                style("○").red()
            },
            style(name).bold(),
            if replaced { "" } else { " (not replaceable)" }
        );
        match (record.pdf, &record.pdf_args) {
            (Some(pdf), Some(args)) => println!("    Distribution: {pdf} {args:?}"),
            _ => println!("    Distribution: {}", style("incomplete, gate stays ideal").dim()),
        }
        println!("    Failure rate: {}", record.epsilon);
        if let NoiseModel::TwoAxis { ratio, order } = record.model {
            println!("    Model:        two-axis, ratio {ratio}, {order}");
        }
        if let Some(seed) = record.seed {
            println!("    Seed:         {seed}");
        }
        println!();
    }

    Ok(())
}
