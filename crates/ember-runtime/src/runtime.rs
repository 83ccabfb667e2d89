//! Ember runtime API for embedding

use crate::ast::Program;
use crate::diagnostic::{error_codes, sort_diagnostics, Diagnostic};
use crate::environment::Environment;
use crate::interpreter::Interpreter;
use crate::lexer::Lexer;
use crate::parser::Parser;
use crate::span::Span;
use crate::stdlib::math::DEFAULT_TRIG_PRECISION;
use crate::stdlib::{BufferedConsole, Console};
use crate::symbol::ParserState;
use crate::value::{RuntimeError, Value};
use std::path::Path;

/// Result type for runtime operations
pub type RuntimeResult<T> = Result<T, Vec<Diagnostic>>;

/// Evaluation settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Fractional digits kept by sin/cos/tan
    pub trig_precision: u32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            trig_precision: DEFAULT_TRIG_PRECISION,
        }
    }
}

impl From<&ember_config::Config> for RuntimeConfig {
    fn from(config: &ember_config::Config) -> Self {
        Self {
            trig_precision: config.trig_precision(),
        }
    }
}

/// Final state of a run that got past parsing
#[derive(Debug, Clone)]
pub struct Execution {
    /// Value of the last top-level statement, `Value::Null` after a failure
    pub value: Value,
    /// Variable bindings left by the run
    pub environment: Environment,
    /// Variables and functions recorded while parsing
    pub state: ParserState,
    /// The runtime error that stopped the program early
    pub failure: Option<Diagnostic>,
}

impl Execution {
    /// Whether the program ran to the end
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

/// Result of [`Ember::eval`]: the final value and everything printed
#[derive(Debug, Clone, PartialEq)]
pub struct EvalOutput {
    pub value: Value,
    pub stdout: String,
}

/// Ember runtime instance
///
/// Every run starts from a fresh [`ParserState`] and [`Environment`], so
/// independent runs never see each other's names.
///
/// # Examples
///
/// ```
/// use ember_runtime::Ember;
///
/// let runtime = Ember::new();
/// let output = runtime.eval("let a = 5 - 2; let b = 5; print(b - a);").unwrap();
/// assert_eq!(output.stdout, "3\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Ember {
    config: RuntimeConfig,
}

impl Ember {
    /// Create a runtime with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a runtime with explicit settings
    pub fn with_config(config: RuntimeConfig) -> Self {
        Self { config }
    }

    /// Current settings
    pub fn config(&self) -> RuntimeConfig {
        self.config
    }

    /// Lex and parse `source` without evaluating it
    pub fn compile(&self, source: &str) -> RuntimeResult<(Program, ParserState)> {
        let mut state = ParserState::new();
        let program = compile(source, &mut state)?;
        Ok((program, state))
    }

    /// Compile and evaluate `source`, using `console` for print and input
    ///
    /// A runtime failure is an error here; use [`Ember::execute`] to keep
    /// the symbol tables the failed program left behind.
    pub fn run(&self, source: &str, console: &mut dyn Console) -> RuntimeResult<Execution> {
        let mut execution = self.execute(source, console)?;
        match execution.failure.take() {
            Some(diag) => Err(vec![diag]),
            None => Ok(execution),
        }
    }

    /// Compile and evaluate `source`, keeping the final tables on failure
    ///
    /// Only lexer and parser diagnostics are returned as `Err`. A runtime
    /// failure is recorded in [`Execution::failure`] next to the bindings
    /// made before it.
    pub fn execute(&self, source: &str, console: &mut dyn Console) -> RuntimeResult<Execution> {
        let (program, state) = self.compile(source)?;
        let mut environment = Environment::new();

        let outcome = Interpreter::new(&state, console)
            .with_trig_precision(self.config.trig_precision)
            .eval(&program, &mut environment);

        let (value, failure) = match outcome {
            Ok(value) => (value, None),
            Err(err) => {
                tracing::debug!(error = %err, "run stopped early");
                (Value::Null, Some(runtime_error_to_diagnostic(err, source)))
            }
        };

        Ok(Execution {
            value,
            environment,
            state,
            failure,
        })
    }

    /// Evaluate `source` with no console input, capturing its output
    pub fn eval(&self, source: &str) -> RuntimeResult<EvalOutput> {
        let mut console = BufferedConsole::new();
        let execution = self.run(source, &mut console)?;
        Ok(EvalOutput {
            value: execution.value,
            stdout: console.take_output(),
        })
    }

    /// Evaluate an Ember source file, capturing its output
    pub fn eval_file(&self, path: impl AsRef<Path>) -> RuntimeResult<EvalOutput> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            vec![Diagnostic::error(
                format!("Failed to read file: {}", e),
                Span::dummy(),
            )
            .with_file(path.display().to_string())]
        })?;

        self.eval(&source).map_err(|diagnostics| {
            diagnostics
                .into_iter()
                .map(|diag| diag.with_file(path.display().to_string()))
                .collect()
        })
    }
}

/// Lex and parse `source`, registering declarations into `state`
///
/// Lexer diagnostics are all reported; parsing stops at the first syntax
/// error. Every diagnostic is located against `source`.
pub fn compile(source: &str, state: &mut ParserState) -> RuntimeResult<Program> {
    let (tokens, lex_diagnostics) = Lexer::new(source).tokenize();
    if !lex_diagnostics.is_empty() {
        let mut diagnostics: Vec<_> = lex_diagnostics
            .into_iter()
            .map(|diag| diag.locate(source))
            .collect();
        sort_diagnostics(&mut diagnostics);
        return Err(diagnostics);
    }

    Parser::new(tokens, state)
        .parse()
        .map_err(|diag| vec![diag.locate(source)])
}

/// Convert a RuntimeError to a Diagnostic located in `source`
pub fn runtime_error_to_diagnostic(error: RuntimeError, source: &str) -> Diagnostic {
    let label = match &error {
        RuntimeError::UndefinedName { .. } => "not yet defined",
        RuntimeError::ImmutableRedeclaration { .. } => "already declared",
        RuntimeError::TypeMismatch { .. } => "type mismatch",
        RuntimeError::NonNumericArgument { .. } => "not numeric",
        RuntimeError::NativeOperator { .. } => "operator failed here",
        RuntimeError::Io { .. } => "console I/O failed here",
    };

    let code = error.code();
    let mut diag = Diagnostic::error_with_code(code, error.to_string(), error.span())
        .locate(source)
        .with_label(label);
    if let Some(help) = error_codes::help_for(code) {
        diag = diag.with_help(help);
    }
    diag
}
