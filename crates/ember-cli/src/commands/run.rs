//! Run command - execute Ember source files

use super::{in_file, read_source, DiagnosticOutput};
use anyhow::Result;
use ember_runtime::{Diagnostic, Ember, Execution, RuntimeConfig, StdConsole};
use std::fmt::Write as _;
use std::path::PathBuf;

/// Arguments for the run command
#[derive(Debug, Clone)]
pub struct RunArgs {
    pub file: PathBuf,
    /// Print the final variables and functions once the run ends
    pub dump_symbols: bool,
    pub output: DiagnosticOutput,
    pub runtime: RuntimeConfig,
}

/// Run an Ember source file
///
/// Program output and `input` prompts go to the process console; diagnostics
/// go to stderr. The symbol dump is printed after a runtime failure too.
pub fn run(args: RunArgs) -> Result<()> {
    let source = read_source(&args.file)?;
    tracing::debug!(file = %args.file.display(), "running");

    let runtime = Ember::with_config(args.runtime);
    let execution = match runtime.execute(&source, &mut StdConsole) {
        Ok(execution) => execution,
        Err(diagnostics) => return Err(failed(&args, diagnostics)),
    };

    if args.dump_symbols {
        if args.output.json {
            println!("{}", symbols_json(&execution));
        } else {
            print!("{}", format_symbols(&execution));
        }
    }

    match execution.failure {
        Some(diag) => Err(failed(&args, vec![diag])),
        None => Ok(()),
    }
}

fn failed(args: &RunArgs, diagnostics: Vec<Diagnostic>) -> anyhow::Error {
    args.output.emit(&in_file(diagnostics, &args.file));
    anyhow::anyhow!("Failed to execute {}", args.file.display())
}

/// Human listing of the symbol tables left by a run
fn format_symbols(execution: &Execution) -> String {
    let mut out = String::from("variables:\n");
    for (name, value) in execution.environment.iter() {
        let _ = writeln!(out, "  {} = {}", name, value.to_repr_string());
    }
    out.push_str("functions:\n");
    for name in execution.state.function_names() {
        let _ = writeln!(out, "  {}", name);
    }
    out
}

fn symbols_json(execution: &Execution) -> serde_json::Value {
    let variables: Vec<_> = execution
        .environment
        .iter()
        .map(|(name, value)| {
            serde_json::json!({
                "name": name,
                "type": value.type_name(),
                "value": value.to_string(),
            })
        })
        .collect();
    let functions: Vec<_> = execution.state.function_names().collect();

    serde_json::json!({
        "variables": variables,
        "functions": functions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_runtime::BufferedConsole;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn execute(source: &str) -> Execution {
        Ember::new()
            .run(source, &mut BufferedConsole::new())
            .unwrap()
    }

    fn args_for(file: PathBuf) -> RunArgs {
        RunArgs {
            file,
            dump_symbols: false,
            output: DiagnosticOutput::new(false, true),
            runtime: RuntimeConfig::default(),
        }
    }

    #[test]
    fn test_run_simple_program() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "let a = 1 + 2;").unwrap();

        assert!(run(args_for(temp_file.path().to_path_buf())).is_ok());
    }

    #[test]
    fn test_run_failing_program() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "let a = 1; let a = 2;").unwrap();

        assert!(run(args_for(temp_file.path().to_path_buf())).is_err());
    }

    #[test]
    fn test_run_missing_file() {
        assert!(run(args_for(PathBuf::from("nonexistent.em"))).is_err());
    }

    #[test]
    fn test_format_symbols() {
        let execution = execute("let a = 5 - 2; let s = 'hi'; function f() { a; }");
        assert_eq!(
            format_symbols(&execution),
            "variables:\n  a = 3\n  s = 'hi'\nfunctions:\n  f\n"
        );
    }

    #[test]
    fn test_format_symbols_after_failure() {
        let execution = Ember::new()
            .execute(
                "let a = 1; function f() { a; } print(1 / 0); let b = 2;",
                &mut BufferedConsole::new(),
            )
            .unwrap();
        assert!(execution.failure.is_some());
        assert_eq!(
            format_symbols(&execution),
            "variables:\n  a = 1\nfunctions:\n  f\n"
        );
    }

    #[test]
    fn test_symbols_json() {
        let json = symbols_json(&execute("let a = 1.5; function g() { 1; }"));
        assert_eq!(json["variables"][0]["name"], "a");
        assert_eq!(json["variables"][0]["type"], "float");
        assert_eq!(json["variables"][0]["value"], "1.5");
        assert_eq!(json["functions"][0], "g");
    }
}
