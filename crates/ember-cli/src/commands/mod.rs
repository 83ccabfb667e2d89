pub mod ast;
pub mod check;
pub mod repl;
pub mod run;

use anyhow::{Context, Result};
use ember_runtime::{ColorMode, Diagnostic, DiagnosticFormatter};
use std::fs;
use std::path::Path;

/// Where and how diagnostics are reported
#[derive(Debug, Clone, Copy)]
pub struct DiagnosticOutput {
    /// One compact JSON object per line instead of annotated text
    pub json: bool,
    /// Color handling for annotated text
    pub color: ColorMode,
}

impl DiagnosticOutput {
    pub fn new(json: bool, no_color: bool) -> Self {
        let color = if no_color {
            ColorMode::Never
        } else {
            ColorMode::Auto
        };
        Self { json, color }
    }

    /// Write diagnostics to stderr
    pub fn emit(&self, diagnostics: &[Diagnostic]) {
        if !self.json {
            DiagnosticFormatter::new(self.color).emit_all(diagnostics);
            return;
        }

        for diag in diagnostics {
            match diag.to_json_compact() {
                Ok(line) => eprintln!("{}", line),
                Err(err) => tracing::warn!(error = %err, "failed to serialize diagnostic"),
            }
        }
    }
}

/// Read an Ember source file
pub fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("Failed to read source file: {}", path.display()))
}

/// Attach the file path to every diagnostic
pub fn in_file(diagnostics: Vec<Diagnostic>, path: &Path) -> Vec<Diagnostic> {
    diagnostics
        .into_iter()
        .map(|diag| diag.with_file(path.display().to_string()))
        .collect()
}
