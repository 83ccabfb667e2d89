//! AST interpreter (tree-walking)
//!
//! Direct AST evaluation against a single, flat [`Environment`]:
//! - Statements run strictly in source order
//! - Operands evaluate left to right, with no short-circuiting
//! - Function calls evaluate the registered body against the caller's
//!   environment; there are no frames and no parameters
//!
//! The first failure unwinds the whole evaluation. Effects that already
//! happened (printed lines, bindings) are not rolled back.

mod expr;
mod stmt;

use crate::ast::{Block, Program, Stmt};
use crate::environment::Environment;
use crate::stdlib::math::DEFAULT_TRIG_PRECISION;
use crate::stdlib::Console;
use crate::symbol::ParserState;
use crate::value::{RuntimeError, Value};

/// Maximum nesting of function calls before evaluation is aborted
pub const MAX_CALL_DEPTH: usize = 128;

/// Maximum nesting of expressions and blocks accepted by the parser
///
/// Evaluation recurses once per level, so this bounds host stack use
/// within a single call.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Interpreter state for one evaluation run
pub struct Interpreter<'a> {
    /// Function bodies registered while parsing
    pub(super) state: &'a ParserState,
    /// Where `print` writes and `input` reads
    pub(super) console: &'a mut dyn Console,
    /// Fractional digits kept by sin/cos/tan
    pub(super) trig_precision: u32,
    /// Current function call nesting
    pub(super) call_depth: usize,
}

impl<'a> Interpreter<'a> {
    /// Create an interpreter over the functions in `state`
    pub fn new(state: &'a ParserState, console: &'a mut dyn Console) -> Self {
        Self {
            state,
            console,
            trig_precision: DEFAULT_TRIG_PRECISION,
            call_depth: 0,
        }
    }

    /// Set the number of fractional digits kept by sin/cos/tan
    pub fn with_trig_precision(mut self, digits: u32) -> Self {
        self.trig_precision = digits;
        self
    }

    /// Evaluate a program, yielding the value of its last statement
    pub fn eval(
        &mut self,
        program: &Program,
        env: &mut Environment,
    ) -> Result<Value, RuntimeError> {
        tracing::debug!(statements = program.statements.len(), "evaluating program");
        let value = self.eval_statements(&program.statements, env)?;
        tracing::debug!(bindings = env.len(), "evaluation finished");
        Ok(value)
    }

    /// Evaluate a block against the shared environment
    pub(super) fn eval_block(
        &mut self,
        block: &Block,
        env: &mut Environment,
    ) -> Result<Value, RuntimeError> {
        self.eval_statements(&block.statements, env)
    }

    fn eval_statements(
        &mut self,
        statements: &[Stmt],
        env: &mut Environment,
    ) -> Result<Value, RuntimeError> {
        let mut last_value = Value::Null;
        for stmt in statements {
            last_value = self.eval_statement(stmt, env)?;
        }
        Ok(last_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::parser::Parser;
    use crate::stdlib::BufferedConsole;
    use crate::value::NameKind;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    struct Run {
        result: Result<Value, RuntimeError>,
        output: String,
        env: Environment,
    }

    fn run_with_input(source: &str, input: &[&str]) -> Run {
        let (tokens, diagnostics) = Lexer::new(source).tokenize();
        assert!(diagnostics.is_empty(), "{:?}", diagnostics);
        let mut state = ParserState::new();
        let program = match Parser::new(tokens, &mut state).parse() {
            Ok(program) => program,
            Err(diag) => panic!("parse failed: {}", diag.message),
        };
        let mut console = BufferedConsole::with_input(input.iter().copied());
        let mut env = Environment::new();
        let result = Interpreter::new(&state, &mut console).eval(&program, &mut env);
        Run {
            result,
            output: console.take_output(),
            env,
        }
    }

    fn run(source: &str) -> Run {
        run_with_input(source, &[])
    }

    fn value_of(source: &str) -> String {
        match run(source).result {
            Ok(value) => value.to_string(),
            Err(err) => panic!("runtime error: {}", err),
        }
    }

    fn error_of(source: &str) -> RuntimeError {
        match run(source).result {
            Ok(value) => panic!("expected error, got {}", value),
            Err(err) => err,
        }
    }

    #[test]
    fn test_let_subtraction_scenario() {
        let run = run("let a = 5 - 2; let b = 5; print(b - a);");
        assert_eq!(run.output, "3\n");
        assert_eq!(run.env.lookup("a"), Some(&Value::Integer(3)));
    }

    #[test]
    fn test_if_scenario_runs_then_branch_only() {
        assert_eq!(run("if (True) { print(1); } else { print(2); }").output, "1\n");
    }

    #[test]
    fn test_hoisted_function_prints_pi() {
        let run = run("function f() { print(__PI__); } f();");
        assert_eq!(run.output, format!("{}\n", std::f64::consts::PI));
    }

    #[test]
    fn test_call_before_declaration() {
        assert_eq!(run("g(); function g() { print(\"hi\"); }").output, "hi\n");
    }

    #[test]
    fn test_function_body_shares_environment() {
        let run = run("function setup() { let x = 10; } setup(); print(x);");
        assert_eq!(run.output, "10\n");
    }

    #[test]
    fn test_call_yields_last_statement_of_body() {
        assert_eq!(value_of("function f() { 1; 2 + 3; } f();"), "5");
    }

    #[test]
    fn test_let_value_is_binding_table() {
        assert_eq!(value_of("let a = 1; let b = 'x';"), "{a: 1, b: 'x'}");
    }

    #[test]
    fn test_function_declaration_value() {
        assert_eq!(value_of("function f() { 1; }"), "<function 'f'>");
    }

    #[rstest]
    #[case("7 / 2;", "3.5")]
    #[case("6 / 3;", "2.0")]
    #[case("2 + 3 * 4;", "14")]
    #[case("(2 + 3) * 4;", "20")]
    #[case("1 + 2.5;", "3.5")]
    #[case("10 - 4 - 3;", "3")]
    #[case("'ab' + \"cd\";", "abcd")]
    #[case("1 == 1.0;", "True")]
    #[case("'a' < 'b';", "True")]
    #[case("False < True;", "True")]
    #[case("1 != 'a';", "True")]
    #[case("0 and 5;", "0")]
    #[case("2 and 5;", "5")]
    #[case("0 or 'x';", "x")]
    #[case("not 1 > 2;", "True")]
    #[case("1 < 2 and 3 > 4;", "False")]
    #[case("abs(-3);", "3")]
    #[case("abs(-2.5);", "2.5")]
    #[case("pow(2, 3);", "8.0")]
    #[case("sin(0);", "0.0")]
    #[case("cos(__PI__);", "-1.0")]
    #[case("__E__;", "2.718281828459045")]
    #[case("-__PI__;", "-3.141592653589793")]
    #[case("if (1) { 'then'; };", "None")]
    #[case("if (1) { 'then'; } else { 'else'; }", "else")]
    fn test_expression_values(#[case] source: &str, #[case] expected: &str) {
        assert_eq!(value_of(source), expected);
    }

    #[test]
    fn test_print_blank_line() {
        assert_eq!(run("print(); print('x');").output, "\nx\n");
    }

    #[test]
    fn test_input_with_prompt() {
        let run = run_with_input("let n = input('n: '); print(n + 1);", &["41"]);
        assert_eq!(run.output, "n: 42.0\n");
    }

    #[test]
    fn test_input_text_stays_text() {
        let run = run_with_input("print(input() + '!');", &["hello"]);
        assert_eq!(run.output, "hello!\n");
    }

    #[test]
    fn test_operands_evaluate_left_to_right() {
        let run = run_with_input("print(input('a') + input('b'));", &["x", "y"]);
        assert_eq!(run.output, "abxy\n");
    }

    #[test]
    fn test_immutable_redeclaration() {
        let run = run("let a = 1; print('between'); let a = 2; print('never');");
        assert!(matches!(
            run.result,
            Err(RuntimeError::ImmutableRedeclaration { ref name, .. }) if name == "a"
        ));
        assert_eq!(run.output, "between\n");
        assert_eq!(run.env.lookup("a"), Some(&Value::Integer(1)));
    }

    #[test]
    fn test_undefined_variable() {
        match error_of("print(missing);") {
            RuntimeError::UndefinedName { kind, name, .. } => {
                assert_eq!(kind, NameKind::Variable);
                assert_eq!(name, "missing");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_undefined_function() {
        let err = error_of("nope();");
        assert_eq!(err.to_string(), "Function <nope> is not yet defined");
    }

    #[rstest]
    #[case("1 / 0;")]
    #[case("1.5 / 0.0;")]
    #[case("1 + 'a';")]
    #[case("True + 1;")]
    #[case("1 < 'a';")]
    #[case("9223372036854775807 + 1;")]
    fn test_native_operator_failures(#[case] source: &str) {
        assert!(matches!(error_of(source), RuntimeError::NativeOperator { .. }));
    }

    #[test]
    fn test_not_requires_boolean() {
        assert!(matches!(error_of("not 1;"), RuntimeError::TypeMismatch { .. }));
    }

    #[test]
    fn test_math_argument_shape() {
        assert!(matches!(
            error_of("abs('ten');"),
            RuntimeError::NonNumericArgument { function: "abs", .. }
        ));
    }

    #[test]
    fn test_failure_stops_later_statements() {
        let run = run("print(1); print(1 / 0); print(2);");
        assert!(run.result.is_err());
        assert_eq!(run.output, "1\n");
    }

    #[test]
    fn test_else_branch_effects_only() {
        let run = run("if (False) { print('a'); } else { print('b'); }");
        assert_eq!(run.output, "b\n");
    }

    #[test]
    fn test_unbounded_recursion_is_an_error() {
        let err = error_of("function f() { f(); } f();");
        assert!(err.to_string().contains("call depth"), "{}", err);
    }

    #[test]
    fn test_trig_precision_setting() {
        let (tokens, _) = Lexer::new("sin(1);").tokenize();
        let mut state = ParserState::new();
        let program = Parser::new(tokens, &mut state).parse().unwrap();
        let mut console = BufferedConsole::new();
        let mut env = Environment::new();
        let value = Interpreter::new(&state, &mut console)
            .with_trig_precision(2)
            .eval(&program, &mut env)
            .unwrap();
        assert_eq!(value, Value::Float(0.84));
    }
}
