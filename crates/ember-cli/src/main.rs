use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use ember_config::DiagnosticFormat;
use ember_runtime::RuntimeConfig;
use std::io;
use std::path::PathBuf;

mod commands;
mod config;

use commands::DiagnosticOutput;

/// Ember scripting language interpreter.
///
/// Ember is a small interpreted language with immutable variables, hoisted
/// functions and a handful of math and console primitives.
///
/// EXAMPLES:
///     ember run main.em            Run an Ember program
///     ember check main.em          Check syntax without running
///     ember ast main.em            Print the parsed tree
///     ember repl                   Start interactive REPL
///
/// ENVIRONMENT VARIABLES:
///     EMBER_DIAGNOSTICS    Set to 'json' for JSON diagnostics by default
///     EMBER_NO_HISTORY     Set to disable REPL history
///     EMBER_HISTORY_FILE   Custom REPL history location
///     EMBER_LOG            Log filter (falls back to RUST_LOG, default 'warn')
///     NO_COLOR             Set to disable colored output
#[derive(Parser)]
#[command(name = "ember")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an Ember source file
    ///
    /// Without a file, runs the entry script named in ember.toml.
    ///
    /// EXAMPLES:
    ///     ember run main.em                 Run a program
    ///     ember run main.em --dump-symbols  Show variables and functions afterwards
    ///     ember run main.em --json          Output diagnostics as JSON
    #[command(visible_alias = "r")]
    Run {
        /// Path to the Ember source file
        file: Option<PathBuf>,
        /// Output diagnostics in JSON format
        #[arg(long)]
        json: bool,
        /// Print declared variables and functions after the run
        #[arg(long)]
        dump_symbols: bool,
    },

    /// Check an Ember source file for syntax errors without running it
    ///
    /// EXAMPLES:
    ///     ember check main.em         Check for errors
    ///     ember check main.em --json  Output as JSON
    #[command(visible_alias = "c")]
    Check {
        /// Path to the Ember source file
        file: PathBuf,
        /// Output diagnostics in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Print the parsed tree of an Ember source file
    ///
    /// EXAMPLES:
    ///     ember ast main.em
    Ast {
        /// Path to the Ember source file
        file: PathBuf,
    },

    /// Start an interactive REPL
    ///
    /// REPL COMMANDS:
    ///     :help, :h      Show help
    ///     :quit, :q      Exit REPL
    ///     :reset         Forget all variables and functions
    ///     :vars          List variables
    ///     :funcs         List functions
    ///
    /// EXAMPLES:
    ///     ember repl                    Start the REPL
    ///     ember repl --no-history       Disable history persistence
    Repl {
        /// Disable history persistence (for privacy)
        #[arg(long)]
        no_history: bool,
    },

    /// Generate shell completions
    ///
    /// EXAMPLES:
    ///     ember completions bash > ember.bash
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let cli_config = config::Config::from_env();

    let project = ember_config::ConfigLoader::new()
        .load_from_directory(&std::env::current_dir()?)
        .context("Failed to load ember.toml")?;
    let runtime = RuntimeConfig::from(&project);
    let project_json = project.diagnostic_format() == DiagnosticFormat::Json;

    match cli.command {
        Commands::Run {
            file,
            json,
            dump_symbols,
        } => {
            let file = match file.or_else(|| project.entry_path()) {
                Some(file) => file,
                None => anyhow::bail!("No file given and ember.toml names no [run] entry"),
            };
            // Command-line flags override environment and project settings
            let use_json = json || cli_config.default_json || project_json;
            let args = commands::run::RunArgs {
                file,
                dump_symbols: dump_symbols || project.dump_symbols(),
                output: DiagnosticOutput::new(use_json, cli_config.no_color),
                runtime,
            };
            commands::run::run(args)?;
        }
        Commands::Check { file, json } => {
            let use_json = json || cli_config.default_json || project_json;
            let output = DiagnosticOutput::new(use_json, cli_config.no_color);
            commands::check::run(&file, output)?;
        }
        Commands::Ast { file } => {
            let output = DiagnosticOutput::new(cli_config.default_json, cli_config.no_color);
            commands::ast::run(&file, output)?;
        }
        Commands::Repl { no_history } => {
            let disable_history = no_history || cli_config.no_history;
            let output = DiagnosticOutput::new(cli_config.default_json, cli_config.no_color);
            commands::repl::run(disable_history, runtime, output, &cli_config)?;
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
        }
    }

    Ok(())
}

/// Logs go to stderr so program output on stdout stays clean
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_env("EMBER_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
