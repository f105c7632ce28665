//! Human-readable warnings and errors for stderr.

use colored::Colorize;
use tsg_common::{Diagnostic, LineMap};

pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter { color }
    }

    /// One `file:line:col - warning: message` line per diagnostic.
    pub fn render_diagnostics(
        &self,
        file_name: &str,
        source: &str,
        diagnostics: &[Diagnostic],
    ) -> String {
        if diagnostics.is_empty() {
            return String::new();
        }
        let line_map = LineMap::build(source);
        let mut out = String::new();
        for diagnostic in diagnostics {
            let position = line_map.position(diagnostic.span.start);
            let location = format!("{file_name}:{position}");
            let label = if diagnostic.is_error() { "error" } else { "warning" };
            if self.color {
                let label = if diagnostic.is_error() {
                    label.red().bold()
                } else {
                    label.yellow().bold()
                };
                out.push_str(&format!(
                    "{} - {}: {}\n",
                    location.as_str().cyan(),
                    label,
                    diagnostic.message_text
                ));
            } else {
                out.push_str(&format!("{location} - {label}: {}\n", diagnostic.message_text));
            }
        }
        out
    }

    /// An error and its cause chain on one line.
    pub fn render_error(&self, error: &anyhow::Error) -> String {
        let label = if self.color {
            "error".red().bold().to_string()
        } else {
            "error".to_string()
        };
        format!("{label}: {error:#}\n")
    }

    pub fn render_summary(&self, processed: usize, failed: usize, warnings: usize) -> String {
        let text = format!(
            "{processed} file{} processed, {failed} failed, {warnings} warning{}",
            if processed == 1 { "" } else { "s" },
            if warnings == 1 { "" } else { "s" },
        );
        if self.color {
            format!("{}\n", text.as_str().dimmed())
        } else {
            format!("{text}\n")
        }
    }
}
