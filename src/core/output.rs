//! Colored output and progress reporting for the recipe
//!
//! Uses owo-colors for terminal colors and indicatif for spinners.
//!
//! Status lines go to stderr. Stdout carries only command results (the
//! resolved version, option dumps, consumer metadata JSON).

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::time::Duration;

/// Print an action header (blue, bold)
/// Example: "==> Building qilang/4.0.1-dev.a1b2c3d4"
pub fn action(message: &str) {
    eprintln!("{} {}", "==>".blue().bold(), message.bold());
}

/// Print a sub-action (cyan arrow)
/// Example: "  -> configure"
pub fn sub_action(phase: &str) {
    eprintln!("  {} {}", "->".cyan(), phase);
}

/// Print a detail line (dimmed)
pub fn detail(message: &str) {
    eprintln!("     {}", message.dimmed());
}

/// Print a success message (green)
pub fn success(message: &str) {
    eprintln!("{} {}", "==>".green().bold(), message.green());
}

/// Print an info message (cyan)
pub fn info(message: &str) {
    eprintln!("{} {}", "::".cyan(), message);
}

/// Print a warning message (yellow)
pub fn warning(message: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), message.yellow());
}

/// Print a `key=value` line, as used for option and variable dumps
pub fn key_value(key: &str, value: &str) {
    println!("  {}={}", key.bold(), value);
}

/// Create an indeterminate spinner while an external tool runs
pub fn build_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("  {spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Finish a spinner and clear it
pub fn progress_done(pb: ProgressBar) {
    pb.finish_and_clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_creation() {
        let pb = build_spinner("Building");
        progress_done(pb);
    }
}
