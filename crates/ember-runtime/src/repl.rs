//! REPL core logic (UI-agnostic)

use crate::diagnostic::Diagnostic;
use crate::environment::Environment;
use crate::interpreter::Interpreter;
use crate::lexer::Lexer;
use crate::runtime::{compile, runtime_error_to_diagnostic, RuntimeConfig};
use crate::stdlib::{BufferedConsole, Console};
use crate::symbol::ParserState;
use crate::token::TokenKind;
use crate::value::Value;

/// REPL result type
#[derive(Debug, Clone, PartialEq)]
pub struct ReplResult {
    /// The value produced by evaluation (None on error)
    pub value: Option<Value>,
    /// Diagnostics from lexing, parsing or evaluation
    pub diagnostics: Vec<Diagnostic>,
    /// Output captured during execution
    pub stdout: String,
}

/// REPL core state
///
/// Maintains persistent state across multiple eval calls:
/// - Variable bindings and function declarations persist
/// - A line that fails to parse leaves no declarations behind
/// - A line that fails while running keeps the effects that already happened
#[derive(Debug, Default)]
pub struct ReplCore {
    state: ParserState,
    environment: Environment,
    config: RuntimeConfig,
}

impl ReplCore {
    /// Create a new REPL core
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a REPL core with explicit runtime settings
    pub fn with_config(config: RuntimeConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Evaluate a line, capturing its output
    ///
    /// `input` calls see end of input.
    pub fn eval_line(&mut self, input: &str) -> ReplResult {
        let mut console = BufferedConsole::new();
        let mut result = self.eval_line_with(input, &mut console);
        result.stdout = console.take_output();
        result
    }

    /// Evaluate a line against `console`
    ///
    /// A trailing `;` is added when the line's last token is not `;` or a
    /// closing brace.
    pub fn eval_line_with(&mut self, input: &str, console: &mut dyn Console) -> ReplResult {
        let source = terminate(input.trim());

        let mut state = self.state.clone();
        let program = match compile(&source, &mut state) {
            Ok(program) => program,
            Err(diagnostics) => return failure(diagnostics),
        };
        self.state = state;

        let result = Interpreter::new(&self.state, console)
            .with_trig_precision(self.config.trig_precision)
            .eval(&program, &mut self.environment);

        match result {
            Ok(value) => ReplResult {
                value: Some(value),
                diagnostics: Vec::new(),
                stdout: String::new(),
            },
            Err(err) => failure(vec![runtime_error_to_diagnostic(err, &source)]),
        }
    }

    /// Forget every variable and function
    pub fn reset(&mut self) {
        self.state.clear();
        self.environment.clear();
    }

    /// Current variable bindings in declaration order
    pub fn variables(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.environment.iter()
    }

    /// Declared function names in declaration order
    pub fn functions(&self) -> impl Iterator<Item = &str> {
        self.state.function_names()
    }
}

/// Add the `;` a REPL line may leave off
///
/// After a trailing `//` comment the `;` goes on a new line, out of the
/// comment's reach.
fn terminate(line: &str) -> String {
    let (tokens, _) = Lexer::new(line).tokenize();
    match tokens.iter().rev().find(|t| t.kind != TokenKind::Eof) {
        None => line.to_string(),
        Some(last) if matches!(last.kind, TokenKind::Semicolon | TokenKind::RightBrace) => {
            line.to_string()
        }
        Some(last) if last.span.end < line.chars().count() => format!("{}\n;", line),
        Some(_) => format!("{};", line),
    }
}

fn failure(diagnostics: Vec<Diagnostic>) -> ReplResult {
    ReplResult {
        value: None,
        diagnostics,
        stdout: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::error_codes;
    use rstest::rstest;

    #[test]
    fn test_state_persists_across_lines() {
        let mut repl = ReplCore::new();
        assert!(repl.eval_line("let a = 2;").diagnostics.is_empty());
        assert!(repl.eval_line("function double() { a * 2; }").diagnostics.is_empty());
        let result = repl.eval_line("print(double())");
        assert_eq!(result.stdout, "4\n");
        assert_eq!(result.value, Some(Value::Null));
    }

    #[test]
    fn test_semicolon_is_optional() {
        let mut repl = ReplCore::new();
        assert_eq!(repl.eval_line("1 + 1").value, Some(Value::Integer(2)));
    }

    #[rstest]
    #[case("1 + 1 // sum", Value::Integer(2))]
    #[case("1 + 1; // sum", Value::Integer(2))]
    #[case("if (True) { 3; } // branch", Value::Integer(3))]
    #[case("'a//b'", Value::string("a//b"))]
    fn test_trailing_comment(#[case] line: &str, #[case] expected: Value) {
        let mut repl = ReplCore::new();
        let result = repl.eval_line(line);
        assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
        assert_eq!(result.value, Some(expected));
    }

    #[test]
    fn test_parse_failure_keeps_no_declarations() {
        let mut repl = ReplCore::new();
        let result = repl.eval_line("function f() { 1; } let = 2;");
        assert_eq!(result.diagnostics[0].code, error_codes::SYNTAX_ERROR);
        assert_eq!(repl.functions().count(), 0);
    }

    #[test]
    fn test_runtime_failure_keeps_earlier_effects() {
        let mut repl = ReplCore::new();
        let result = repl.eval_line("let a = 1; let a = 2;");
        assert_eq!(result.value, None);
        assert_eq!(result.diagnostics[0].code, error_codes::IMMUTABLE_REDECLARATION);
        let vars: Vec<_> = repl.variables().map(|(n, v)| format!("{}={}", n, v)).collect();
        assert_eq!(vars, vec!["a=1"]);
    }

    #[test]
    fn test_redeclaration_across_lines() {
        let mut repl = ReplCore::new();
        repl.eval_line("let a = 1;");
        let result = repl.eval_line("let a = 3;");
        assert_eq!(result.diagnostics.len(), 1);
    }

    #[test]
    fn test_reset() {
        let mut repl = ReplCore::new();
        repl.eval_line("let a = 1; function f() { 1; }");
        repl.reset();
        assert_eq!(repl.variables().count(), 0);
        assert_eq!(repl.functions().count(), 0);
        assert!(repl.eval_line("let a = 2;").diagnostics.is_empty());
    }

    #[test]
    fn test_input_reads_from_console() {
        let mut repl = ReplCore::new();
        let mut console = BufferedConsole::with_input(["7"]);
        let result = repl.eval_line_with("input('? ') * 2", &mut console);
        assert_eq!(result.value, Some(Value::Float(14.0)));
        assert_eq!(console.output(), "? ");
    }

    #[test]
    fn test_console_shared_across_lines() {
        let mut repl = ReplCore::new();
        let mut console = BufferedConsole::new();

        console.push_input("first");
        repl.eval_line_with("let a = input();", &mut console);
        console.push_input("2.5");
        let result = repl.eval_line_with("input() * 2", &mut console);

        assert_eq!(result.value, Some(Value::Float(5.0)));
        let (name, value) = repl.variables().next().unwrap();
        assert_eq!((name, value.to_string()), ("a", "first".to_string()));
    }
}
