//! Error taxonomy and diagnostic rendering

mod common;

use common::*;
#[allow(unused_imports)]
use common::assert_eq;
use ember_runtime::{error_codes, Diagnostic, DiagnosticFormatter, DIAG_VERSION};
use rstest::rstest;

// ============================================================================
// Error taxonomy
// ============================================================================

#[rstest]
#[case::undefined_variable("print(missing);", error_codes::UNDEFINED_NAME)]
#[case::undefined_function("missing();", error_codes::UNDEFINED_NAME)]
#[case::read_before_let("print(x); let x = 1;", error_codes::UNDEFINED_NAME)]
#[case::redeclaration("let x = 1; let x = 2;", error_codes::IMMUTABLE_REDECLARATION)]
#[case::redeclaration_in_function(
    "let x = 1; function f() { let x = 2; } f();",
    error_codes::IMMUTABLE_REDECLARATION
)]
#[case::not_on_integer("not 1;", error_codes::TYPE_MISMATCH)]
#[case::not_on_string("not 'True';", error_codes::TYPE_MISMATCH)]
#[case::abs_of_text("abs('ten');", error_codes::NON_NUMERIC_ARGUMENT)]
#[case::sin_of_bool("sin(True);", error_codes::NON_NUMERIC_ARGUMENT)]
#[case::pow_of_text("pow(2, 'x');", error_codes::NON_NUMERIC_ARGUMENT)]
#[case::exponent_string("abs('1e5');", error_codes::NON_NUMERIC_ARGUMENT)]
#[case::numeric_string_in_math("abs('-3');", error_codes::NATIVE_OPERATOR)]
#[case::pow_domain("pow(-8, 0.5);", error_codes::NATIVE_OPERATOR)]
#[case::pow_overflow("pow(10, 400);", error_codes::NATIVE_OPERATOR)]
#[case::division_by_zero("1 / 0;", error_codes::NATIVE_OPERATOR)]
#[case::float_division_by_zero("1.5 / 0.0;", error_codes::NATIVE_OPERATOR)]
#[case::string_minus_int("'a' - 1;", error_codes::NATIVE_OPERATOR)]
#[case::string_plus_int("'a' + 1;", error_codes::NATIVE_OPERATOR)]
#[case::bool_arithmetic("True + 1;", error_codes::NATIVE_OPERATOR)]
#[case::mixed_ordering("1 < 'a';", error_codes::NATIVE_OPERATOR)]
#[case::overflow("9223372036854775807 + 1;", error_codes::NATIVE_OPERATOR)]
#[case::abs_overflow("abs(-9223372036854775808);", error_codes::NATIVE_OPERATOR)]
#[case::endless_recursion("function f() { f(); } f();", error_codes::NATIVE_OPERATOR)]
#[case::input_at_end("input();", error_codes::IO_ERROR)]
fn test_error_codes(#[case] source: &str, #[case] expected: &str) {
    assert_error_code(source, expected);
}

#[rstest]
#[case("print(missing);", "Variable <missing> is not yet defined")]
#[case("missing();", "Function <missing> is not yet defined")]
#[case("let x = 1; let x = 2;", "Variable <x> is immutable and cannot be declared again")]
#[case("abs('ten');", "abs() expects a numeric argument, got 'ten'")]
#[case("1 / 0;", "Division by zero")]
#[case("'a' - 1;", "Unsupported operand types for -: string and integer")]
#[case(
    "function f() { f(); } f();",
    "Maximum call depth of 128 exceeded calling <f>"
)]
fn test_error_messages(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(errors_of(source)[0].message, expected);
}

#[test]
fn test_runtime_failure_is_single_diagnostic() {
    assert_eq!(errors_of("print(1); print(a); print(b);").len(), 1);
}

#[test]
fn test_every_code_is_registered() {
    for code in [
        error_codes::TYPE_MISMATCH,
        error_codes::UNDEFINED_NAME,
        error_codes::IMMUTABLE_REDECLARATION,
        error_codes::NON_NUMERIC_ARGUMENT,
        error_codes::NATIVE_OPERATOR,
        error_codes::IO_ERROR,
        error_codes::SYNTAX_ERROR,
        error_codes::UNEXPECTED_CHARACTER,
        error_codes::UNTERMINATED_STRING,
        error_codes::GENERIC_ERROR,
    ] {
        assert!(error_codes::lookup(code).is_some(), "{} is not registered", code);
    }
}

// ============================================================================
// Locations
// ============================================================================

fn first_error(source: &str) -> Diagnostic {
    errors_of(source).remove(0)
}

#[rstest]
#[case("print(missing);", 1, 7, 7)]
#[case("let a = 1;\n\nlet a = 2;", 3, 5, 1)]
#[case("let a = 1;\nprint(a / 0);", 2, 7, 5)]
#[case("print(1);\n  print('open);", 2, 9, 7)]
#[case("let a = 1;\nlet b = tRuE;", 2, 9, 4)]
fn test_diagnostic_location(
    #[case] source: &str,
    #[case] line: usize,
    #[case] column: usize,
    #[case] length: usize,
) {
    let diag = first_error(source);
    assert_eq!((diag.line, diag.column, diag.length), (line, column, length));
}

#[test]
fn test_snippet_is_source_line() {
    let diag = first_error("let a = 1;\nprint(a + 'x');\nprint(2);");
    assert_eq!(diag.snippet, "print(a + 'x');");
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn test_human_rendering() {
    let diag = first_error("let x = 1;\nlet x = 2;");
    assert_eq!(
        diag.to_human_string(),
        "error[EM0003]: Variable <x> is immutable and cannot be declared again\n\
         \x20 --> <input>:2:5\n\
         \x20  |\n\
         \x202 | let x = 2;\n\
         \x20  |     ^ already declared\n\
         \x20  = help: Variables are immutable; pick a new name for the new value.\n"
    );
}

#[test]
fn test_plain_formatter_matches_layout() {
    let diag = first_error("print(1 / 0);");
    let rendered = DiagnosticFormatter::plain().format_to_buffer(&diag);
    let text = String::from_utf8(rendered).unwrap();

    assert!(text.starts_with("error[EM0005]: Division by zero\n"));
    assert!(text.contains("  --> <input>:1:7\n"));
    assert!(text.contains(" 1| print(1 / 0);\n"));
    assert!(text.contains("^^^^^ operator failed here"));
    assert!(!text.contains("help"));
}

#[test]
fn test_json_rendering() {
    let diag = first_error("print(missing);");
    let json: serde_json::Value = serde_json::from_str(&diag.to_json_string().unwrap()).unwrap();

    assert_eq!(json["diag_version"], DIAG_VERSION);
    assert_eq!(json["level"], "error");
    assert_eq!(json["code"], "EM0002");
    assert_eq!(json["file"], "<input>");
    assert_eq!(json["line"], 1);
    assert_eq!(json["column"], 7);
    assert_eq!(json["label"], "not yet defined");
    assert!(json.get("notes").is_none());
}
