//! Terminal status output.
//!
//! Commands report progress Cargo-style: a bold, right-aligned label
//! followed by the message, e.g. `   Resolving dependencies...` or
//! `     Fetched 3 dependencies`. Archive downloads get a determinate bar
//! counting packages.

use std::io::Write;

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

/// Width the status label is right-aligned to. `Downloading` is the longest
/// label cpak prints.
const LABEL_WIDTH: usize = 12;

fn print_status(style: Style, label: &str, message: &str) {
    let _ = writeln!(
        std::io::stderr(),
        "{:>width$} {message}",
        style.apply_to(label),
        width = LABEL_WIDTH,
    );
}

/// Print an action status line with a bold green label, e.g.
/// `    Resolved 12 dependencies`.
pub fn status(label: &str, message: &str) {
    print_status(Style::new().green().bold(), label, message);
}

/// Informational counterpart of [`status`] with a bold cyan label, used for
/// verbose summaries that describe state rather than work done.
pub fn status_info(label: &str, message: &str) {
    print_status(Style::new().cyan().bold(), label, message);
}

/// Warning status line with a bold yellow label, e.g. for a release with no
/// published archive.
pub fn status_warn(label: &str, message: &str) {
    print_status(Style::new().yellow().bold(), label, message);
}

/// Spinner shown while resolution is talking to the registry.
///
/// Ticks on its own; finish with [`ProgressBar::finish_and_clear`] before
/// printing the closing status line.
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .expect("valid template"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Bar tracking how many package archives have been checked or downloaded.
pub fn progress_bar(len: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg:>12} [{bar:30.cyan/dim}] {pos}/{len} packages")
            .expect("valid template")
            .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    pb
}
