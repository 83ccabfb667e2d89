//! Check command - lex and parse Ember source files without executing

use super::{in_file, read_source, DiagnosticOutput};
use anyhow::Result;
use ember_runtime::Ember;
use std::path::Path;

/// Check an Ember source file for lexical and syntax errors
///
/// Nothing is evaluated, so runtime failures such as redeclarations are not
/// reported here.
pub fn run(file_path: &Path, output: DiagnosticOutput) -> Result<()> {
    let source = read_source(file_path)?;

    match Ember::new().compile(&source) {
        Ok((program, state)) => {
            tracing::debug!(
                statements = program.statements.len(),
                functions = state.function_names().count(),
                "check passed"
            );
            println!("{}: No errors found", file_path.display());
            Ok(())
        }
        Err(diagnostics) => {
            output.emit(&in_file(diagnostics, file_path));
            Err(anyhow::anyhow!("Check failed"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn check(source: &str) -> Result<()> {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "{}", source).unwrap();
        run(temp_file.path(), DiagnosticOutput::new(false, true))
    }

    #[test]
    fn test_check_valid_file() {
        assert!(check("let x = 42; print(x);").is_ok());
    }

    #[test]
    fn test_check_syntax_error() {
        assert!(check("let x = ;").is_err());
    }

    #[test]
    fn test_check_does_not_evaluate() {
        assert!(check("let x = 1; let x = 2; input();").is_ok());
    }

    #[test]
    fn test_check_missing_file() {
        assert!(run(Path::new("nonexistent.em"), DiagnosticOutput::new(false, true)).is_err());
    }
}
