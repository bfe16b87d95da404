//! # Restricted Arithmetic Evaluator
//!
//! Parses and evaluates plain arithmetic over `f64`: numbers, parentheses,
//! `+ - * / %` and exponentiation (`^` or `**`). Nothing else is accepted;
//! there are no identifiers, calls or host-language escapes.
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/' | '%') unary)*
//! unary   := ('+' | '-') unary | power
//! power   := primary (('^' | '**') unary)?
//! primary := number | '(' expr ')'
//! ```
//!
//! Exponentiation is right associative and binds tighter than unary minus,
//! so `-2^2` is `-4` and `2^3^2` is `512`. Values are folded while parsing,
//! so long operator chains never build a tree.
//!
//! Nesting through parentheses, signs and exponents is capped at
//! [`MAX_DEPTH`]; deeper input is a syntax error. `--` and `++` are rejected
//! outright, as the note host reads them as increment operators.

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit0, digit1, multispace0, one_of},
    combinator::{all_consuming, map, map_res, opt, recognize},
    error::{context, ErrorKind, ParseError, VerboseError, VerboseErrorKind},
    multi::fold_many0,
    sequence::{delimited, pair, preceded, tuple},
    IResult,
};
use thiserror::Error;

type ParserResult<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

/// Deepest nesting of parentheses, signs and exponents the parser follows.
pub const MAX_DEPTH: usize = 64;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArithmeticError {
    #[error("Syntax error: {0}")]
    Syntax(String),
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Result is not a finite number")]
    NonFinite,
}

pub type ArithmeticResult<T> = Result<T, ArithmeticError>;

/// A partially evaluated operand. Errors such as division by zero are carried
/// along until the whole input has parsed.
type Value = ArithmeticResult<f64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
    Power,
}

impl BinaryOperator {
    fn from_symbol(symbol: char) -> Self {
        match symbol {
            '+' => BinaryOperator::Add,
            '-' => BinaryOperator::Subtract,
            '*' => BinaryOperator::Multiply,
            '/' => BinaryOperator::Divide,
            '%' => BinaryOperator::Remainder,
            _ => BinaryOperator::Power,
        }
    }

    pub fn apply(self, left: f64, right: f64) -> ArithmeticResult<f64> {
        match self {
            BinaryOperator::Add => Ok(left + right),
            BinaryOperator::Subtract => Ok(left - right),
            BinaryOperator::Multiply => Ok(left * right),
            BinaryOperator::Divide | BinaryOperator::Remainder if right == 0.0 => {
                Err(ArithmeticError::DivisionByZero)
            }
            BinaryOperator::Divide => Ok(left / right),
            BinaryOperator::Remainder => Ok(left % right),
            BinaryOperator::Power => Ok(left.powf(right)),
        }
    }

    fn fold(self, left: Value, right: Value) -> Value {
        self.apply(left?, right?)
    }
}

/// Parses `input` completely and evaluates it. Non-finite results are errors.
#[tracing::instrument(level = "debug", skip(input), fields(len = input.len()))]
pub fn evaluate(input: &str) -> ArithmeticResult<f64> {
    if let Some(token) = ["--", "++"].into_iter().find(|token| input.contains(token)) {
        return Err(ArithmeticError::Syntax(format!("unexpected `{}`", token)));
    }

    let parsed = all_consuming(delimited(
        multispace0,
        |i| parse_expr(i, 0),
        multispace0,
    ))(input);

    let value = match parsed {
        Ok((_, value)) => value?,
        Err(nom::Err::Failure(e)) if too_deep(&e) => {
            return Err(ArithmeticError::Syntax(format!(
                "nesting deeper than {} levels",
                MAX_DEPTH
            )))
        }
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            return Err(ArithmeticError::Syntax(nom::error::convert_error(input, e)))
        }
        Err(nom::Err::Incomplete(needed)) => {
            return Err(ArithmeticError::Syntax(format!(
                "Incomplete input, {:?}",
                needed
            )))
        }
    };

    if !value.is_finite() {
        return Err(ArithmeticError::NonFinite);
    }
    Ok(value)
}

fn too_deep(error: &VerboseError<&str>) -> bool {
    error
        .errors
        .iter()
        .any(|(_, kind)| matches!(kind, VerboseErrorKind::Nom(ErrorKind::TooLarge)))
}

/// Fails hard, without backtracking, once `depth` reaches [`MAX_DEPTH`].
fn descend(input: &str, depth: usize) -> ParserResult<()> {
    if depth >= MAX_DEPTH {
        return Err(nom::Err::Failure(VerboseError::from_error_kind(
            input,
            ErrorKind::TooLarge,
        )));
    }
    Ok((input, ()))
}

fn ws<'a, T>(
    inner: impl FnMut(&'a str) -> ParserResult<'a, T>,
) -> impl FnMut(&'a str) -> ParserResult<'a, T> {
    delimited(multispace0, inner, multispace0)
}

fn parse_expr(input: &str, depth: usize) -> ParserResult<Value> {
    let (input, first) = parse_term(input, depth)?;
    fold_many0(
        pair(ws(one_of("+-")), |i| parse_term(i, depth)),
        move || first.clone(),
        |left, (op, right)| BinaryOperator::from_symbol(op).fold(left, right),
    )(input)
}

fn parse_term(input: &str, depth: usize) -> ParserResult<Value> {
    let (input, first) = parse_unary(input, depth)?;
    fold_many0(
        pair(ws(one_of("*/%")), |i| parse_unary(i, depth)),
        move || first.clone(),
        |left, (op, right)| BinaryOperator::from_symbol(op).fold(left, right),
    )(input)
}

fn parse_unary(input: &str, depth: usize) -> ParserResult<Value> {
    let (input, ()) = descend(input, depth)?;
    context(
        "unary",
        alt((
            map(
                preceded(ws(char('-')), |i| parse_unary(i, depth + 1)),
                |value: Value| value.map(|v| -v),
            ),
            preceded(ws(char('+')), |i| parse_unary(i, depth + 1)),
            |i| parse_power(i, depth),
        )),
    )(input)
}

fn parse_power(input: &str, depth: usize) -> ParserResult<Value> {
    let (input, base) = parse_primary(input, depth)?;
    let (input, exponent) = opt(preceded(
        ws(alt((tag("^"), tag("**")))),
        |i| parse_unary(i, depth + 1),
    ))(input)?;
    Ok(match exponent {
        Some(exponent) => (input, BinaryOperator::Power.fold(base, exponent)),
        None => (input, base),
    })
}

fn parse_primary(input: &str, depth: usize) -> ParserResult<Value> {
    context(
        "primary",
        alt((
            parse_number,
            delimited(
                ws(char('(')),
                |i| parse_expr(i, depth + 1),
                ws(char(')')),
            ),
        )),
    )(input)
}

fn parse_number(input: &str) -> ParserResult<Value> {
    context(
        "number",
        map_res(
            alt((
                recognize(tuple((digit1, opt(pair(char('.'), digit0))))),
                recognize(pair(char('.'), digit1)),
            )),
            |s: &str| s.parse::<f64>().map(Ok),
        ),
    )(input)
}

/// Formats a number the way the note host prints numbers: integral values
/// without a fraction, very large or very small magnitudes in exponent form.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return format!("{}", value);
    }
    let formatted = format!("{:e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => formatted,
    }
}

/// Base-2 representation of `value` truncated toward zero.
pub fn format_binary(value: f64) -> ArithmeticResult<String> {
    if !value.is_finite() {
        return Err(ArithmeticError::NonFinite);
    }
    let truncated = value.trunc() as i64;
    if truncated < 0 {
        Ok(format!("-{:b}", truncated.unsigned_abs()))
    } else {
        Ok(format!("{:b}", truncated))
    }
}
