//! Terminal output formatting and progress reporting.

use crate::stats::PackageStatistics;
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::time::Duration;

/// Explicit progress reporter passed to whichever component needs to emit
/// status. Owns its rendering state; no ambient global involved.
pub struct Progress {
    bar: ProgressBar,
}

impl Progress {
    /// Creates a spinner-style reporter.
    ///
    /// In test mode (and quiet mode) the bar is hidden to avoid polluting
    /// captured output.
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        if quiet || cfg!(test) {
            return Self {
                bar: ProgressBar::hidden(),
            };
        }

        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    /// Replaces the status line, overwriting whatever width the previous
    /// message rendered at.
    pub fn set_message(&self, message: String) {
        self.bar.set_message(message);
    }

    /// Clears the status line.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

/// Print a one-line success message.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_ok(writer: &mut impl Write, message: &str) -> std::io::Result<()> {
    writeln!(writer, "{} {message}", "[OK]".green())
}

/// Print the statistics summary table.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_stats_summary(
    writer: &mut impl Write,
    stats: &PackageStatistics,
) -> std::io::Result<()> {
    writeln!(writer)?;
    writeln!(
        writer,
        "{} {}",
        stats.package.name.bold(),
        format!("({})", stats.package.dist_name).dimmed()
    )?;

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Metric", "Value"]);

    table.add_row(vec![
        Cell::new("Code lines"),
        Cell::new(stats.lines.code.to_string()),
    ]);
    table.add_row(vec![
        Cell::new("Docstring lines"),
        Cell::new(stats.lines.docstring.to_string()),
    ]);
    table.add_row(vec![
        Cell::new("Comment lines"),
        Cell::new(stats.lines.comment.to_string()),
    ]);
    table.add_row(vec![
        Cell::new("Blank lines"),
        Cell::new(stats.lines.blank.to_string()),
    ]);
    table.add_row(vec![
        Cell::new("Style violations"),
        Cell::new(
            stats
                .style
                .count
                .map_or_else(|| "unavailable".to_owned(), |c| c.to_string()),
        ),
    ]);
    if let Some(doc) = &stats.doc {
        table.add_row(vec![
            Cell::new("Doc score"),
            Cell::new(format!("{}% ({} errors)", doc.score, doc.errors)),
        ]);
    }
    writeln!(writer, "{table}")?;

    // Detailed doc errors, most offending units first.
    if let Some(doc) = &stats.doc {
        for (unit_path, unit_stats) in &doc.stats.stats {
            for (tag, diagnostics) in &unit_stats.units {
                for message in &diagnostics.messages {
                    writeln!(
                        writer,
                        "  {} {unit_path}:{} {tag}: {message}",
                        "doc".yellow(),
                        diagnostics.line
                    )?;
                }
            }
        }
    }

    Ok(())
}
