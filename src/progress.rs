//! Progress output for user-facing status updates.
//!
//! Rename execution and manifest regeneration report each step here. In
//! verbose mode output is suppressed since tracing covers the same ground.

use colored::Colorize;
use std::io::{self, IsTerminal, Write};

/// Progress reporter for user-facing output
pub struct Progress {
    writer: Box<dyn Write>,
    /// When true, all output is suppressed (verbose mode uses tracing instead)
    silent: bool,
    colors_enabled: bool,
}

/// Check if we should use colors in output
pub fn should_use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }
    io::stderr().is_terminal()
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress {
    /// Create a new progress reporter writing to stderr
    pub fn new() -> Self {
        Self {
            writer: Box::new(io::stderr()),
            silent: false,
            colors_enabled: should_use_colors(),
        }
    }

    /// When verbose=true, output is suppressed (tracing handles it)
    pub fn new_with_ui(verbose: bool, colors_enabled: bool) -> Self {
        Self {
            writer: Box::new(io::stderr()),
            silent: verbose,
            colors_enabled,
        }
    }

    /// Create a progress reporter with a custom writer
    pub fn with_writer(writer: Box<dyn Write>) -> Self {
        Self {
            writer,
            silent: false,
            colors_enabled: false,
        }
    }

    pub fn silent() -> Self {
        Self {
            writer: Box::new(io::sink()),
            silent: true,
            colors_enabled: false,
        }
    }

    /// Report progress on a single rename
    pub fn rename_progress(&mut self, current: usize, total: usize, from: &str, to: &str) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let counter = format!("[{}/{}]", current, total);
            let _ = writeln!(
                self.writer,
                "{} {} {} {}",
                counter.cyan(),
                from.dimmed(),
                "→".cyan(),
                to
            );
        } else {
            let _ = writeln!(self.writer, "[{}/{}] {} -> {}", current, total, from, to);
        }
    }

    /// Report a manifest being regenerated
    pub fn manifest_progress(&mut self, current: usize, total: usize, atom: &str) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let counter = format!("[{}/{}]", current, total);
            let _ = writeln!(
                self.writer,
                "{} {}",
                counter.cyan(),
                format!("Updating Manifest for {}", atom).dimmed()
            );
        } else {
            let _ = writeln!(
                self.writer,
                "[{}/{}] Updating Manifest for {}",
                current, total, atom
            );
        }
    }

    /// Report an error during operation (non-fatal)
    pub fn warn(&mut self, message: &str) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let _ = writeln!(self.writer, "{} {}", "!".yellow().bold(), message.yellow());
        } else {
            let _ = writeln!(self.writer, "Warning: {}", message);
        }
    }

    /// Report the end of the rename phase
    pub fn rename_complete(&mut self, renamed: usize, failed: usize) {
        if self.silent {
            return;
        }
        let _ = writeln!(self.writer);
        if failed == 0 {
            if self.colors_enabled {
                let _ = writeln!(
                    self.writer,
                    "{} {}",
                    "✓".green().bold(),
                    format!("{} ebuilds renamed", renamed).green()
                );
            } else {
                let _ = writeln!(self.writer, "Rename complete. {} ebuilds renamed.", renamed);
            }
        } else if self.colors_enabled {
            let _ = writeln!(
                self.writer,
                "{} {}",
                "✗".red().bold(),
                format!("{} ebuilds renamed, {} failed", renamed, failed).red()
            );
        } else {
            let _ = writeln!(
                self.writer,
                "Rename finished with errors. {} renamed, {} failed.",
                renamed, failed
            );
        }
    }
}
