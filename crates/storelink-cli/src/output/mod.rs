//! Terminal output formatting and utilities.
//!
//! This module provides consistent output formatting across all commands,
//! including colors, catalog listings and error messages.

pub mod colors;
pub mod errors;

use storelink_core::types::{ArtifactEntry, Catalog};

/// Output handler for consistent terminal formatting
pub struct OutputHandler {
    colors: colors::ColorSupport,
}

impl OutputHandler {
    /// Create a new output handler
    pub fn new() -> Self {
        Self::with_colors(colors::ColorSupport::detect())
    }

    /// Create an output handler with a fixed color mode
    pub fn with_colors(colors: colors::ColorSupport) -> Self {
        Self { colors }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        println!("{}", message);
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        println!("{} {}", self.colors.green("✓"), message);
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", self.colors.yellow("⚠"), message);
    }

    /// Print a pre-rendered block as-is
    pub fn block(&self, text: &str) {
        print!("{}", text);
    }

    /// Render one artifact as `filename  size` with a dimmed URL below
    pub fn render_entry(&self, entry: &ArtifactEntry) -> String {
        format!(
            "  {}  {}\n    {}\n",
            entry.filename,
            self.colors.dim(&entry.size_display().to_string()),
            self.colors.dim(&entry.url)
        )
    }

    /// Render the primary files grouped by architecture, optionally followed
    /// by the advanced files
    pub fn render_catalog(&self, catalog: &Catalog, advanced: bool) -> String {
        let mut out = String::new();

        let groups = catalog.group_by_arch();
        if !groups.is_empty() {
            out.push_str(&self.colors.bold("Downloads"));
            out.push('\n');
        }
        for (arch, items) in groups {
            out.push_str(&self.colors.cyan(arch.as_str()));
            out.push('\n');
            for entry in items {
                out.push_str(&self.render_entry(entry));
            }
        }

        let advanced_count = catalog.advanced().count();
        if advanced_count > 0 {
            if advanced {
                out.push_str(&self.colors.bold(&format!("Advanced files ({})", advanced_count)));
                out.push('\n');
                for entry in catalog.advanced() {
                    out.push_str(&format!("  [{}] ", entry.kind));
                    out.push_str(self.render_entry(entry).trim_start());
                }
            } else {
                out.push_str(&self.colors.dim(&format!(
                    "{} advanced file(s) hidden, pass --advanced to list them",
                    advanced_count
                )));
                out.push('\n');
            }
        }

        out
    }
}

impl Default for OutputHandler {
    fn default() -> Self {
        Self::new()
    }
}
