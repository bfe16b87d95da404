//! # Directive Tokens
//!
//! Note text is free-form; the only structure the evaluator recognizes are
//! brace-delimited directives embedded in it:
//!
//! * member form: `{Weather.temp}`, `{Note.color}`
//! * call form: `{Encode(secret)}`, `{js(alert(1))}`, `{Memorize(Q:A)}`
//!
//! Directive names are matched case-sensitively against [`DirectiveName`].
//! Anything else between braces is ordinary text.

use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Names the scanner accepts in directive position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, AsRefStr, EnumIter)]
pub enum DirectiveName {
    Weather,
    Time,
    Location,
    Client,
    Random,
    Note,
    Encode,
    Memorize,
    #[strum(serialize = "exp")]
    Exp,
    #[strum(serialize = "log")]
    Log,
    #[strum(serialize = "bin")]
    Bin,
    #[strum(serialize = "js")]
    Js,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `{Name.child}`
    Member { name: DirectiveName, child: String },
    /// `{Name(args)}`; `args` is the raw text between the outer parentheses.
    Call { name: DirectiveName, args: String },
}

impl Directive {
    pub fn name(&self) -> DirectiveName {
        match self {
            Directive::Member { name, .. } | Directive::Call { name, .. } => *name,
        }
    }

    pub fn is_call_to(&self, expected: DirectiveName) -> bool {
        matches!(self, Directive::Call { name, .. } if *name == expected)
    }

    pub fn args(&self) -> Option<&str> {
        match self {
            Directive::Call { args, .. } => Some(args),
            Directive::Member { .. } => None,
        }
    }
}

/// Byte range of a directive inside its line, braces included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "start: {}, end: {}", self.start, self.end)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveSpan {
    pub directive: Directive,
    pub span: Span,
}

impl DirectiveSpan {
    /// The directive exactly as it appears in `line`.
    pub fn source<'a>(&self, line: &'a str) -> &'a str {
        &line[self.span.start..self.span.end]
    }
}
