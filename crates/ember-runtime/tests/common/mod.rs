//! Shared test utilities
//!
//! Helpers for running Ember source end to end and inspecting the result.

#![allow(dead_code)]

use ember_runtime::{BufferedConsole, Diagnostic, Ember, Execution, ParserState, RuntimeResult};

pub use pretty_assertions::{assert_eq, assert_ne};

/// Run `source` with scripted console input, returning the result and output
pub fn run_with_input(source: &str, input: &[&str]) -> (RuntimeResult<Execution>, String) {
    let mut console = BufferedConsole::with_input(input.iter().copied());
    let result = Ember::new().run(source, &mut console);
    (result, console.take_output())
}

/// Output printed by `source`, panicking on any diagnostic
pub fn output_of(source: &str) -> String {
    match Ember::new().eval(source) {
        Ok(output) => output.stdout,
        Err(diags) => panic!("Expected success, got errors: {:?}", diags),
    }
}

/// Printed form of the value of the last statement of `source`
pub fn value_of(source: &str) -> String {
    match Ember::new().eval(source) {
        Ok(output) => output.value.to_string(),
        Err(diags) => panic!("Expected success, got errors: {:?}", diags),
    }
}

/// Diagnostics produced by `source`, panicking if it succeeds
pub fn errors_of(source: &str) -> Vec<Diagnostic> {
    match Ember::new().eval(source) {
        Err(diags) => {
            assert!(!diags.is_empty(), "Expected error, got empty diagnostics");
            diags
        }
        Ok(output) => panic!("Expected error, got success: {:?}", output),
    }
}

/// Assert that `source` fails with `expected_code`
///
/// # Example
/// ```
/// assert_error_code("print(x);", "EM0002");
/// ```
pub fn assert_error_code(source: &str, expected_code: &str) {
    let diags = errors_of(source);
    assert_eq!(
        diags[0].code, expected_code,
        "Expected error code {}, got {}: {}",
        expected_code, diags[0].code, diags[0].message
    );
}

/// Debug representation of the program parsed from `source`
pub fn parse_repr(source: &str) -> String {
    let mut state = ParserState::new();
    match ember_runtime::compile(source, &mut state) {
        Ok(program) => program.to_string(),
        Err(diags) => panic!("Expected parse success, got errors: {:?}", diags),
    }
}
