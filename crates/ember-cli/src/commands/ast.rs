//! AST dump command - print the debug representation of a program

use super::{in_file, read_source, DiagnosticOutput};
use anyhow::Result;
use ember_runtime::Ember;
use std::path::Path;

/// Parse a source file and print its tree
pub fn run(file_path: &Path, output: DiagnosticOutput) -> Result<()> {
    let source = read_source(file_path)?;

    match Ember::new().compile(&source) {
        Ok((program, _)) => {
            println!("{}", program);
            Ok(())
        }
        Err(diagnostics) => {
            output.emit(&in_file(diagnostics, file_path));
            Err(anyhow::anyhow!("Parse errors"))
        }
    }
}
