//! Built-in primitives: console I/O and math
//!
//! Console access goes through the [`Console`] trait so the same program can
//! run against the process streams, a REPL, or scripted input in tests.

pub mod math;

use crate::span::Span;
use crate::value::{RuntimeError, Value};
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Line-oriented console used by `print` and `input`
pub trait Console {
    /// Write `text` followed by a newline
    fn write_line(&mut self, text: &str) -> io::Result<()>;

    /// Write `text` without a newline and make it visible
    fn write_prompt(&mut self, text: &str) -> io::Result<()>;

    /// Read one line without its terminator; `None` at end of input
    fn read_line(&mut self) -> io::Result<Option<String>>;
}

/// Console bound to the process stdin/stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct StdConsole;

impl Console for StdConsole {
    fn write_line(&mut self, text: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{}", text)?;
        out.flush()
    }

    fn write_prompt(&mut self, text: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        write!(out, "{}", text)?;
        out.flush()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }
}

/// In-memory console: scripted input lines and captured output
#[derive(Debug, Default, Clone)]
pub struct BufferedConsole {
    input: VecDeque<String>,
    output: String,
}

impl BufferedConsole {
    /// Create a console with no input
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a console that answers `input` calls with `lines`, in order
    pub fn with_input<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: lines.into_iter().map(Into::into).collect(),
            output: String::new(),
        }
    }

    /// Queue another input line
    pub fn push_input(&mut self, line: impl Into<String>) {
        self.input.push_back(line.into());
    }

    /// Everything written so far
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Take the captured output, leaving the buffer empty
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }
}

impl Console for BufferedConsole {
    fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.output.push_str(text);
        self.output.push('\n');
        Ok(())
    }

    fn write_prompt(&mut self, text: &str) -> io::Result<()> {
        self.output.push_str(text);
        Ok(())
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.input.pop_front())
    }
}

fn io_error(err: io::Error, span: Span) -> RuntimeError {
    RuntimeError::Io {
        message: err.to_string(),
        span,
    }
}

/// print(value?) -> None
///
/// Without a value a blank line is written.
pub fn print(
    console: &mut dyn Console,
    value: Option<&Value>,
    span: Span,
) -> Result<Value, RuntimeError> {
    let text = value.map(Value::to_display_string).unwrap_or_default();
    console.write_line(&text).map_err(|e| io_error(e, span))?;
    Ok(Value::Null)
}

/// input(prompt?) -> float | string
///
/// Numeric-shaped lines come back as floats, anything else as a string.
pub fn input(
    console: &mut dyn Console,
    prompt: Option<&Value>,
    span: Span,
) -> Result<Value, RuntimeError> {
    if let Some(prompt) = prompt {
        console
            .write_prompt(&prompt.to_display_string())
            .map_err(|e| io_error(e, span))?;
    }

    match console.read_line().map_err(|e| io_error(e, span))? {
        Some(line) => Ok(math::parse_input(line)),
        None => Err(RuntimeError::Io {
            message: "unexpected end of input".to_string(),
            span,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_writes_display_form() {
        let mut console = BufferedConsole::new();
        print(&mut console, Some(&Value::Float(2.0)), Span::dummy()).unwrap();
        print(&mut console, Some(&Value::Bool(true)), Span::dummy()).unwrap();
        assert_eq!(console.output(), "2.0\nTrue\n");
    }

    #[test]
    fn test_print_without_value_writes_blank_line() {
        let mut console = BufferedConsole::new();
        let result = print(&mut console, None, Span::dummy()).unwrap();
        assert_eq!(result, Value::Null);
        assert_eq!(console.take_output(), "\n");
        assert_eq!(console.output(), "");
    }

    #[test]
    fn test_input_shows_prompt_and_converts() {
        let mut console = BufferedConsole::with_input(["42", "forty-two"]);
        let prompt = Value::string("n? ");
        let first = input(&mut console, Some(&prompt), Span::dummy()).unwrap();
        let second = input(&mut console, None, Span::dummy()).unwrap();
        assert_eq!(first, Value::Float(42.0));
        assert_eq!(second, Value::string("forty-two"));
        assert_eq!(console.output(), "n? ");
    }

    #[test]
    fn test_input_at_end_of_input() {
        let mut console = BufferedConsole::new();
        let err = input(&mut console, None, Span::new(2, 9)).unwrap_err();
        assert!(matches!(err, RuntimeError::Io { .. }));
        assert_eq!(err.span(), Span::new(2, 9));
    }
}
