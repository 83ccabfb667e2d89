//! End-to-end tests for the `ember` binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn ember(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("ember").unwrap();
    cmd.current_dir(dir)
        .env_remove("EMBER_DIAGNOSTICS")
        .env_remove("EMBER_DUMP_SYMBOLS")
        .env_remove("EMBER_TRIG_PRECISION")
        .env_remove("EMBER_LOG")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn write_script(dir: &TempDir, name: &str, source: &str) {
    fs::write(dir.path().join(name), source).unwrap();
}

// ============================================================================
// run
// ============================================================================

#[test]
fn test_run_prints_program_output() {
    let dir = TempDir::new().unwrap();
    write_script(&dir, "main.em", "let a = 5 - 2;\nlet b = 5;\nprint(b - a);\n");

    ember(dir.path())
        .args(["run", "main.em"])
        .assert()
        .success()
        .stdout("3\n");
}

#[test]
fn test_run_reads_console_input() {
    let dir = TempDir::new().unwrap();
    write_script(
        &dir,
        "ask.em",
        "let name = input('Name: ');\nprint('Hello ' + name);\n",
    );

    ember(dir.path())
        .args(["run", "ask.em"])
        .write_stdin("Ada\n")
        .assert()
        .success()
        .stdout("Name: Hello Ada\n");
}

#[test]
fn test_run_reports_runtime_error() {
    let dir = TempDir::new().unwrap();
    write_script(&dir, "bad.em", "print('first');\nlet x = 1;\nlet x = 2;\n");

    ember(dir.path())
        .args(["run", "bad.em"])
        .assert()
        .failure()
        .code(1)
        .stdout("first\n")
        .stderr(predicate::str::contains("error[EM0003]"))
        .stderr(predicate::str::contains("bad.em:3:5"))
        .stderr(predicate::str::contains("already declared"));
}

#[test]
fn test_run_json_diagnostics() {
    let dir = TempDir::new().unwrap();
    write_script(&dir, "bad.em", "print(missing);");

    let output = ember(dir.path())
        .args(["run", "bad.em", "--json"])
        .output()
        .unwrap();
    assert!(!output.status.success());

    let stderr = String::from_utf8(output.stderr).unwrap();
    let first = stderr.lines().next().unwrap();
    let diag: serde_json::Value = serde_json::from_str(first).unwrap();
    assert_eq!(diag["code"], "EM0002");
    assert_eq!(diag["file"], "bad.em");
    assert_eq!(diag["line"], 1);
}

#[test]
fn test_run_json_from_environment() {
    let dir = TempDir::new().unwrap();
    write_script(&dir, "bad.em", "1 / 0;");

    ember(dir.path())
        .env("EMBER_DIAGNOSTICS", "json")
        .args(["run", "bad.em"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"code\":\"EM0005\""));
}

#[test]
fn test_run_dump_symbols() {
    let dir = TempDir::new().unwrap();
    write_script(
        &dir,
        "main.em",
        "let a = 1;\nlet s = 'text';\nfunction f() { print(a); }\n",
    );

    ember(dir.path())
        .args(["run", "main.em", "--dump-symbols"])
        .assert()
        .success()
        .stdout("variables:\n  a = 1\n  s = 'text'\nfunctions:\n  f\n");
}

#[test]
fn test_run_dump_symbols_after_runtime_error() {
    let dir = TempDir::new().unwrap();
    write_script(&dir, "main.em", "let a = 1;\nprint(1 / 0);\nlet b = 2;\n");

    ember(dir.path())
        .args(["run", "main.em", "--dump-symbols"])
        .assert()
        .failure()
        .code(1)
        .stdout("variables:\n  a = 1\nfunctions:\n")
        .stderr(predicate::str::contains("error[EM0005]"))
        .stderr(predicate::str::contains("main.em:2:7"));
}

#[test]
fn test_run_deeply_nested_program_reports_error() {
    let dir = TempDir::new().unwrap();
    let source = format!("print(1{});\n", " + 1".repeat(50_000));
    write_script(&dir, "deep.em", &source);

    ember(dir.path())
        .args(["run", "deep.em"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error[EM1000]"))
        .stderr(predicate::str::contains("nests deeper than 256 levels"));
}

#[test]
fn test_run_missing_file() {
    let dir = TempDir::new().unwrap();

    ember(dir.path())
        .args(["run", "nope.em"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read source file"));
}

// ============================================================================
// ember.toml
// ============================================================================

#[test]
fn test_run_uses_project_entry() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("src")).unwrap();
    write_script(&dir, "src/app.em", "print('from entry');");
    write_script(
        &dir,
        "ember.toml",
        "[package]\nname = \"demo\"\nversion = \"0.1.0\"\n\n[run]\nentry = \"src/app.em\"\n",
    );

    ember(dir.path())
        .arg("run")
        .assert()
        .success()
        .stdout("from entry\n");
}

#[test]
fn test_run_without_file_or_entry() {
    let dir = TempDir::new().unwrap();

    ember(dir.path())
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no [run] entry"));
}

#[test]
fn test_project_trig_precision() {
    let dir = TempDir::new().unwrap();
    write_script(&dir, "ember.toml", "[run]\ntrig_precision = 2\n");
    write_script(&dir, "trig.em", "print(sin(1));");

    ember(dir.path())
        .args(["run", "trig.em"])
        .assert()
        .success()
        .stdout("0.84\n");
}

#[test]
fn test_invalid_project_config_is_reported() {
    let dir = TempDir::new().unwrap();
    write_script(&dir, "ember.toml", "[run]\nunknown_key = true\n");
    write_script(&dir, "main.em", "print(1);");

    ember(dir.path())
        .args(["run", "main.em"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load ember.toml"));
}

// ============================================================================
// check / ast
// ============================================================================

#[test]
fn test_check_valid_file() {
    let dir = TempDir::new().unwrap();
    write_script(&dir, "ok.em", "let x = 1; let x = 2;");

    ember(dir.path())
        .args(["check", "ok.em"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No errors found"));
}

#[test]
fn test_check_syntax_error() {
    let dir = TempDir::new().unwrap();
    write_script(&dir, "bad.em", "let x = 1\nprint(x);");

    ember(dir.path())
        .args(["check", "bad.em"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[EM1000]"));
}

#[test]
fn test_ast_prints_tree() {
    let dir = TempDir::new().unwrap();
    write_script(&dir, "tree.em", "print(1 + 2 * 3);");

    ember(dir.path())
        .args(["ast", "tree.em"])
        .assert()
        .success()
        .stdout("Program(\n\tPrint(Sum(Integer(1), Mul(Integer(2), Integer(3))))\n)\n");
}

// ============================================================================
// misc
// ============================================================================

#[test]
fn test_completions() {
    let dir = TempDir::new().unwrap();

    ember(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ember"));
}

#[test]
fn test_version() {
    let dir = TempDir::new().unwrap();

    ember(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
