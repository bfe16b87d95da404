//! Math pass: a line that is nothing but arithmetic gets its result appended.
//!
//! Before the grammar check, `{exp(X)}` and `{log(X)}` are replaced by the
//! value of `e^X` and `ln X`, and `{bin(X)}` by the binary digits of `X`.
//! The line text is kept as written; only the ` = RESULT` suffix is added.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use super::arithmetic::{self, format_binary, format_number, ArithmeticError, ArithmeticResult};
use crate::tokenizer::{scan, DirectiveName};

lazy_static! {
    static ref MATH_LINE: Regex = Regex::new(r"^[\d+\-*/%().^]+$").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

pub const RESULT_STYLE: &str = "color: #10B981; font-weight: bold;";

#[derive(Debug, Default, Clone, Copy)]
pub struct MathPass;

impl MathPass {
    pub fn new() -> Self {
        Self
    }

    /// Returns `line` with the evaluated suffix, or `line` untouched when it is
    /// not a math line or evaluation fails.
    pub fn process(&self, line: &str) -> String {
        match self.evaluate_line(line) {
            Ok(Some(value)) => format!(
                "{} = <span style=\"{}\">{}</span>",
                line,
                RESULT_STYLE,
                format_number(value)
            ),
            Ok(None) => line.to_string(),
            Err(e) => {
                debug!("math pass left line unchanged: {}", e);
                line.to_string()
            }
        }
    }

    /// `Ok(None)` when the line is not arithmetic at all.
    pub fn evaluate_line(&self, line: &str) -> ArithmeticResult<Option<f64>> {
        let normalized = normalize(line);
        let expanded = expand_functions(&normalized)?;
        if !MATH_LINE.is_match(&expanded) {
            return Ok(None);
        }
        arithmetic::evaluate(&expanded).map(Some)
    }
}

/// Decimal comma to dot, whitespace removed.
fn normalize(line: &str) -> String {
    WHITESPACE.replace_all(&line.replace(',', "."), "").into_owned()
}

/// Substitutes `{exp(..)}`, `{log(..)}` and `{bin(..)}` with their values.
/// Any other directive is left in place, which later fails the grammar check.
fn expand_functions(input: &str) -> ArithmeticResult<String> {
    let mut output = String::with_capacity(input.len());
    let mut cursor = 0;

    for span in scan(input) {
        let name = span.directive.name();
        let Some(args) = span.directive.args() else {
            continue;
        };
        let replacement = match name {
            DirectiveName::Exp => format_number(finite(arithmetic::evaluate(args)?.exp())?),
            DirectiveName::Log => format_number(finite(arithmetic::evaluate(args)?.ln())?),
            DirectiveName::Bin => format_binary(arithmetic::evaluate(args)?)?,
            _ => continue,
        };
        output.push_str(&input[cursor..span.span.start]);
        output.push_str(&replacement);
        cursor = span.span.end;
    }

    output.push_str(&input[cursor..]);
    Ok(output)
}

fn finite(value: f64) -> ArithmeticResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ArithmeticError::NonFinite)
    }
}
