//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - stochastic noise injection for quantum gates",
        style("qnoise").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qnoise-ir      Gates, qubits and the circuit command buffer");
    println!("  qnoise-inject  Noisy gate wrappers and noise tables");
    println!("  qnoise-cli     Command-line interface");
    println!();
    println!("License: {}", style("Apache-2.0").dim());
}
