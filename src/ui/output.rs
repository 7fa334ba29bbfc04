//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Output is formatted consistently and respects the quiet flag.
//! Run summaries go to stdout; warnings and errors go to stderr.

use std::fmt::Display;

use crate::engine::{CleanupReport, HydrationReport};

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print a debug message (only in debug mode).
pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity == Verbosity::Debug {
        eprintln!("[debug] {}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a success message (respects quiet mode).
pub fn success(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print a heading and one line per failure (always shown).
pub fn failures(heading: &str, messages: &[String]) {
    eprintln!("warning: {}", heading);
    eprintln!("{}", format_list(messages, "  - "));
}

/// Format a list of items.
pub fn format_list<T: Display>(items: &[T], prefix: &str) -> String {
    items
        .iter()
        .map(|item| format!("{}{}", prefix, item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a hydration report, one line per non-empty section.
pub fn format_hydration(report: &HydrationReport, dry_run: bool) -> String {
    let heading = if dry_run {
        "Hydration preview (dry run):"
    } else {
        "Hydration summary:"
    };
    let mut lines = vec![heading.to_string()];

    for (name, summary) in report.sections() {
        if summary.is_empty() {
            continue;
        }
        lines.push(format!("  {:<14} {}", name, summary));
    }
    if let Some(project) = &report.project {
        let location = project.url.as_deref().unwrap_or(&project.title);
        lines.push(format!("  project        #{} {}", project.number, location));
    }
    if lines.len() == 1 {
        lines.push("  nothing to do".to_string());
    }
    lines.join("\n")
}

/// Render a cleanup report, one line per non-empty content type.
pub fn format_cleanup(report: &CleanupReport, dry_run: bool) -> String {
    let heading = if dry_run {
        "Cleanup preview (dry run):"
    } else {
        "Cleanup summary:"
    };
    let mut lines = vec![heading.to_string()];

    for (name, summary) in report.sections() {
        if summary.is_empty() {
            continue;
        }
        lines.push(format!("  {:<14} {}", name, summary));
    }
    if lines.len() == 1 {
        lines.push("  nothing to do".to_string());
    }
    lines.join("\n")
}
