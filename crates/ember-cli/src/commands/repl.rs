//! REPL command implementation

use super::DiagnosticOutput;
use anyhow::Result;
use ember_runtime::{ReplCore, RuntimeConfig, StdConsole, Value};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::fmt::Write as _;

/// Meta commands understood by the REPL
#[derive(Debug, Clone, PartialEq, Eq)]
enum MetaCommand {
    Quit,
    Reset,
    Vars,
    Funcs,
    Help,
    Unknown(String),
}

impl MetaCommand {
    /// Parse a `:command` line; `None` for Ember source
    fn parse(line: &str) -> Option<Self> {
        let command = line.trim().strip_prefix(':')?;
        Some(match command.trim() {
            "quit" | "q" => MetaCommand::Quit,
            "reset" => MetaCommand::Reset,
            "vars" | "v" => MetaCommand::Vars,
            "funcs" | "f" => MetaCommand::Funcs,
            "help" | "h" => MetaCommand::Help,
            other => MetaCommand::Unknown(other.to_string()),
        })
    }
}

/// Run the interactive REPL
///
/// Program output and `input` go straight to the terminal. If `no_history`
/// is true, history is neither loaded nor saved.
pub fn run(
    no_history: bool,
    runtime: RuntimeConfig,
    output: DiagnosticOutput,
    config: &crate::config::Config,
) -> Result<()> {
    let mut rl = DefaultEditor::new()?;
    let mut repl = ReplCore::with_config(runtime);

    let history_path = config.get_history_path();
    if !no_history {
        if let Some(ref path) = history_path {
            let _ = rl.load_history(path); // missing file is fine
        }
    }

    println!("Ember v{} REPL", ember_runtime::VERSION);
    println!("Type statements to evaluate them, or :quit to exit");
    println!("Commands: :quit (or :q), :reset, :vars, :funcs, :help");
    println!();

    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                if let Some(command) = MetaCommand::parse(&line) {
                    match command {
                        MetaCommand::Quit => {
                            println!("Goodbye!");
                            break;
                        }
                        MetaCommand::Reset => {
                            repl.reset();
                            println!("REPL state reset");
                        }
                        MetaCommand::Vars => print!("{}", describe_vars(&repl)),
                        MetaCommand::Funcs => print!("{}", describe_funcs(&repl)),
                        MetaCommand::Help => print_help(),
                        MetaCommand::Unknown(name) => {
                            println!("Unknown command ':{}' (try :help)", name)
                        }
                    }
                    continue;
                }

                if line.trim().is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(&line);

                let result = repl.eval_line_with(&line, &mut StdConsole);
                output.emit(&result.diagnostics);

                if let Some(value) = result.value {
                    if !matches!(value, Value::Null) {
                        println!("{}", value);
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                println!("Use :quit or :q to exit");
            }
            Err(ReadlineError::Eof) => {
                println!("Goodbye!");
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    if !no_history {
        if let Some(path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            if let Err(err) = rl.save_history(&path) {
                tracing::warn!(error = %err, path = %path.display(), "failed to save history");
            }
        }
    }

    Ok(())
}

fn print_help() {
    println!("Ember REPL Commands:");
    println!("  :quit, :q         Exit the REPL");
    println!("  :reset            Forget all variables and functions");
    println!("  :vars, :v         List variables in declaration order");
    println!("  :funcs, :f        List declared functions");
    println!("  :help, :h         Show this help message");
    println!();
    println!("Type any Ember statement to evaluate it. A missing ';' is added.");
    println!("Examples:");
    println!("  >> let x = 42;");
    println!("  >> function show() {{ print(x * 2); }}");
    println!("  >> show();");
}

fn describe_vars(repl: &ReplCore) -> String {
    let mut out = String::new();
    let mut any = false;
    for (name, value) in repl.variables() {
        any = true;
        let _ = writeln!(
            out,
            "{:<16} {:<10} {}",
            name,
            value.type_name(),
            value.to_repr_string()
        );
    }
    if !any {
        out.push_str("No variables defined.\n");
    }
    out
}

fn describe_funcs(repl: &ReplCore) -> String {
    let names: Vec<_> = repl.functions().collect();
    if names.is_empty() {
        return "No functions defined.\n".to_string();
    }
    names.iter().map(|name| format!("{}()\n", name)).collect()
}
