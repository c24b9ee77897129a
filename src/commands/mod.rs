//! Command implementations.

pub mod list;
pub mod navigate;
pub mod session;

use colored::Colorize;

/// Print a success line.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}

/// Print a warning line.
pub fn warn(msg: &str) {
    println!("{} {}", "⚠".yellow().bold(), msg);
}

/// Print a labelled value.
pub fn field(label: &str, value: &str) {
    println!("  {} {}", format!("{label}:").bright_white().bold(), value);
}
