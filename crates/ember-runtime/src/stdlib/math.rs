//! Math built-ins
//!
//! Arguments are screened by shape, not by type: a value whose printed form
//! is not an optionally signed run of digits with an optional fractional part
//! is a non-numeric argument. A numeric-shaped value that is not a number,
//! such as the string `'12'`, gets past the screen and then fails in the
//! operation itself.

use crate::span::Span;
use crate::value::{RuntimeError, Value};
use regex::Regex;
use std::sync::OnceLock;

/// Default number of fractional digits kept by sin/cos/tan
pub const DEFAULT_TRIG_PRECISION: u32 = 10;

fn numeric_shape() -> &'static Regex {
    static SHAPE: OnceLock<Regex> = OnceLock::new();
    SHAPE.get_or_init(|| {
        Regex::new(r"^-?\d+(\.\d+)?$").expect("numeric shape pattern is valid")
    })
}

/// Whether `text` looks like a number
pub fn is_numeric_shaped(text: &str) -> bool {
    numeric_shape().is_match(text)
}

/// Numeric view of a math argument
///
/// Fails with NonNumericArgument when the printed form is not numeric-shaped,
/// and with NativeOperator when it is but the value is not a number.
fn numeric_argument(
    function: &'static str,
    value: &Value,
    span: Span,
) -> Result<f64, RuntimeError> {
    let text = value.to_display_string();
    if !is_numeric_shaped(&text) {
        return Err(RuntimeError::NonNumericArgument {
            function,
            value: text,
            span,
        });
    }
    value.as_f64().ok_or_else(|| RuntimeError::NativeOperator {
        msg: format!(
            "{}() needs a number, not {} '{}'",
            function,
            value.type_name(),
            text
        ),
        span,
    })
}

/// Round `value` to `digits` fractional digits
pub fn round_to(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    let rounded = scaled.round() / factor;
    // keep -0.0 out of printed results
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// abs(x: number) -> number
///
/// Integers stay integers and floats stay floats.
pub fn absolute(value: &Value, span: Span) -> Result<Value, RuntimeError> {
    if let Value::Integer(n) = value {
        return n
            .checked_abs()
            .map(Value::Integer)
            .ok_or_else(|| RuntimeError::NativeOperator {
                msg: format!("Integer overflow in abs({})", n),
                span,
            });
    }
    Ok(Value::Float(numeric_argument("abs", value, span)?.abs()))
}

/// sin(x: number) -> float, rounded to `precision` digits
pub fn sin(value: &Value, precision: u32, span: Span) -> Result<Value, RuntimeError> {
    let x = numeric_argument("sin", value, span)?;
    Ok(Value::Float(round_to(x.sin(), precision)))
}

/// cos(x: number) -> float, rounded to `precision` digits
pub fn cos(value: &Value, precision: u32, span: Span) -> Result<Value, RuntimeError> {
    let x = numeric_argument("cos", value, span)?;
    Ok(Value::Float(round_to(x.cos(), precision)))
}

/// tan(x: number) -> float, rounded to `precision` digits
pub fn tan(value: &Value, precision: u32, span: Span) -> Result<Value, RuntimeError> {
    let x = numeric_argument("tan", value, span)?;
    Ok(Value::Float(round_to(x.tan(), precision)))
}

/// pow(base: number, exponent: number) -> float
pub fn pow(base: &Value, exponent: &Value, span: Span) -> Result<Value, RuntimeError> {
    let b = numeric_argument("pow", base, span)?;
    let e = numeric_argument("pow", exponent, span)?;
    let result = b.powf(e);
    if result.is_finite() || !b.is_finite() || !e.is_finite() {
        return Ok(Value::Float(result));
    }

    // Finite inputs with a non-finite result: a negative base with a
    // fractional exponent, zero to a negative power, or overflow
    let msg = if result.is_nan() || b == 0.0 {
        "math domain error"
    } else {
        "math result too large"
    };
    Err(RuntimeError::NativeOperator {
        msg: format!("pow({}, {}): {}", base, exponent, msg),
        span,
    })
}

/// Interpret a line read by `input`
///
/// Numeric-shaped text becomes a float, even when it has no fractional part.
pub fn parse_input(line: String) -> Value {
    if is_numeric_shaped(&line) {
        if let Ok(n) = line.parse::<f64>() {
            return Value::Float(n);
        }
    }
    Value::string(line)
}
