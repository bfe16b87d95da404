//! # Directive Scanner
//!
//! Recursive-descent recognizer for the directives described in
//! [`super::token`]. Call arguments are matched by tracking parenthesis depth,
//! so `{js(Math.max(1, (2)))}` yields the argument `Math.max(1, (2))` instead
//! of stopping at the first `)`.
//!
//! Scanning never fails: text that does not form a directive with a known
//! name is skipped and left for the caller to copy verbatim.

use std::str::FromStr;

use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::char,
    combinator::{map, map_res, recognize},
    error::{context, ErrorKind, ParseError, VerboseError},
    sequence::{delimited, pair, preceded, terminated},
    IResult,
};

use super::token::{Directive, DirectiveName, DirectiveSpan, Span};

pub type ParserResult<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

/// Returns every directive in `line`, left to right, non-overlapping.
#[tracing::instrument(level = "debug", skip(line))]
pub fn scan(line: &str) -> Vec<DirectiveSpan> {
    let mut spans = Vec::new();
    let mut offset = 0;

    while let Some(found) = line[offset..].find('{') {
        let start = offset + found;
        match parse_directive(&line[start..]) {
            Ok((rest, directive)) => {
                let end = line.len() - rest.len();
                spans.push(DirectiveSpan {
                    directive,
                    span: Span { start, end },
                });
                offset = end;
            }
            Err(_) => offset = start + 1,
        }
    }

    spans
}

/// Returns the first call-form directive named `name`, if any.
pub fn find_call(line: &str, name: DirectiveName) -> Option<DirectiveSpan> {
    scan(line)
        .into_iter()
        .find(|span| span.directive.is_call_to(name))
}

/// Parses one directive at the start of `input`.
pub fn parse_directive(input: &str) -> ParserResult<Directive> {
    context(
        "directive",
        preceded(
            char('{'),
            alt((parse_member_body, parse_call_body)),
        ),
    )(input)
}

fn parse_member_body(input: &str) -> ParserResult<Directive> {
    context(
        "member directive",
        map(
            terminated(
                pair(
                    parse_name,
                    preceded(
                        char('.'),
                        take_while1(|c: char| c.is_alphanumeric() || c == '_'),
                    ),
                ),
                char('}'),
            ),
            |(name, child): (DirectiveName, &str)| Directive::Member {
                name,
                child: child.to_string(),
            },
        ),
    )(input)
}

fn parse_call_body(input: &str) -> ParserResult<Directive> {
    context(
        "call directive",
        map(
            terminated(
                pair(parse_name, delimited(char('('), balanced, char(')'))),
                char('}'),
            ),
            |(name, args): (DirectiveName, &str)| Directive::Call {
                name,
                args: args.to_string(),
            },
        ),
    )(input)
}

fn parse_name(input: &str) -> ParserResult<DirectiveName> {
    context(
        "directive name",
        map_res(
            recognize(pair(
                take_while1(|c: char| c.is_ascii_alphabetic()),
                take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
            )),
            DirectiveName::from_str,
        ),
    )(input)
}

/// Consumes text up to (not including) the `)` that closes an already opened
/// parenthesis.
fn balanced(input: &str) -> ParserResult<&str> {
    let mut depth = 0usize;
    for (index, c) in input.char_indices() {
        match c {
            '(' => depth += 1,
            ')' if depth == 0 => return Ok((&input[index..], &input[..index])),
            ')' => depth -= 1,
            _ => {}
        }
    }
    Err(nom::Err::Error(VerboseError::from_error_kind(
        input,
        ErrorKind::Char,
    )))
}
