//! Directive recognition for note lines.
//!
//! * [`token`]: directive names, shapes and spans
//! * [`scanner`]: the depth-aware scanner producing [`token::DirectiveSpan`]s

pub mod scanner;
pub mod token;

pub use scanner::{find_call, scan};
pub use token::{Directive, DirectiveName, DirectiveSpan, Span};
