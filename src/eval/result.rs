use std::fmt;

use serde::{Deserialize, Serialize};

/// A `{Memorize(SHOWN:HIDDEN)}` line, rendered as two styled blocks.
/// Serializes as a two-element array `[shown, hidden]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct Flashcard {
    pub shown: String,
    pub hidden: String,
}

impl From<(String, String)> for Flashcard {
    fn from((shown, hidden): (String, String)) -> Self {
        Self { shown, hidden }
    }
}

impl From<Flashcard> for (String, String) {
    fn from(card: Flashcard) -> Self {
        (card.shown, card.hidden)
    }
}

impl fmt::Display for Flashcard {
    /// Both halves separated by a comma, which is how a flashcard reads once
    /// it is folded into a multi-line note.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.shown, self.hidden)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EvaluatedLine {
    Text(String),
    Flashcard(Flashcard),
}

impl fmt::Display for EvaluatedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluatedLine::Text(text) => f.write_str(text),
            EvaluatedLine::Flashcard(card) => fmt::Display::fmt(card, f),
        }
    }
}

/// Output of one evaluation call: the single produced line as is, or all
/// lines rendered and joined with `\n`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EvaluationResult {
    Single(EvaluatedLine),
    Joined(String),
}

impl EvaluationResult {
    pub fn empty() -> Self {
        EvaluationResult::Single(EvaluatedLine::Text(String::new()))
    }

    pub fn from_lines(mut lines: Vec<EvaluatedLine>) -> Self {
        match lines.len() {
            0 => Self::empty(),
            1 => EvaluationResult::Single(lines.remove(0)),
            _ => EvaluationResult::Joined(
                lines
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
        }
    }

    pub fn as_flashcard(&self) -> Option<&Flashcard> {
        match self {
            EvaluationResult::Single(EvaluatedLine::Flashcard(card)) => Some(card),
            _ => None,
        }
    }
}

impl fmt::Display for EvaluationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluationResult::Single(line) => fmt::Display::fmt(line, f),
            EvaluationResult::Joined(text) => f.write_str(text),
        }
    }
}
