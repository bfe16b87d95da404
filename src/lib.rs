//! # noted
//!
//! Evaluates the text of a note into annotated HTML. A note is plain text in
//! which a few constructs come alive:
//!
//! * arithmetic-only lines get their result appended (`2 + 2 * 5 = 12`)
//! * `{js(...)}` runs a script and reports whether it succeeded
//! * `{Memorize(question:answer)}` turns the line into a flashcard
//! * links, the `NOTED.` wordmark, ASCII emoticons and markdown-lite are styled
//! * module tokens such as `{Weather.temp}`, `{Time.day}` or `{Encode(text)}`
//!   are replaced with live values
//!
//! ```no_run
//! # async fn run() {
//! use noted::NoteEvaluator;
//!
//! let evaluator = NoteEvaluator::default();
//! let html = evaluator.evaluate(Some("It is {Time.day} :)"), "#8B5CF6").await;
//! println!("{}", html);
//! # }
//! ```
//!
//! All side effects go through the capability traits in [`provider`], so an
//! embedding host can supply its own position, weather, clock and script
//! runtime.

pub mod config;
pub mod error;
pub mod eval;
pub mod formatter;
pub mod modules;
pub mod provider;
pub mod tokenizer;

pub use config::EvaluatorConfig;
pub use error::*;
pub use eval::{EvaluatedLine, EvaluationResult, Flashcard, NoteEvaluator};
pub use formatter::{FormattingPipeline, LinePass};
pub use modules::ModuleKey;
pub use provider::Capabilities;

#[cfg(test)]
#[ctor::ctor]
fn init_tests() {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
