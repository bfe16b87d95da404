//! # Note Evaluation
//!
//! The per-line passes and the [`NoteEvaluator`] that drives them.
//!
//! * [`arithmetic`]: restricted arithmetic parser and evaluator
//! * [`math`]: appends results to arithmetic-only lines
//! * [`script`]: runs `{js(...)}` through the script host
//! * [`memorize`]: `{Memorize(...)}` flashcards
//! * [`result`]: evaluation output types

pub mod arithmetic;
pub mod evaluator;
pub mod math;
pub mod memorize;
pub mod result;
pub mod script;

pub use evaluator::NoteEvaluator;
pub use result::{EvaluatedLine, EvaluationResult, Flashcard};
