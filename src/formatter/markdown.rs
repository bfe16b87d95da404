//! Markdown-lite: inline emphasis and single-line headings.
//!
//! Bold is rewritten before italic so `**x**` never becomes nested `<em>`.

use lazy_static::lazy_static;
use regex::Regex;

use super::LinePass;

pub const CODE_STYLE: &str = "background: rgba(139, 92, 246, 0.1); padding: 2px 4px; border-radius: 4px; font-family: monospace;";

lazy_static! {
    static ref RULES: Vec<(Regex, String)> = vec![
        (Regex::new(r"\*\*(.*?)\*\*").unwrap(), "<strong>$1</strong>".to_string()),
        (Regex::new(r"\*(.*?)\*").unwrap(), "<em>$1</em>".to_string()),
        (Regex::new(r"__(.*?)__").unwrap(), "<u>$1</u>".to_string()),
        (
            Regex::new(r"`(.*?)`").unwrap(),
            format!("<code style=\"{}\">$1</code>", CODE_STYLE),
        ),
        (Regex::new(r"(?m)^### (.*)$").unwrap(), heading("h3", "1.125rem")),
        (Regex::new(r"(?m)^## (.*)$").unwrap(), heading("h2", "1.25rem")),
        (Regex::new(r"(?m)^# (.*)$").unwrap(), heading("h1", "1.5rem")),
    ];
}

fn heading(tag: &str, size: &str) -> String {
    format!(
        "<{tag} style=\"font-size: {size}; font-weight: bold; margin: 0.5rem 0;\">$1</{tag}>"
    )
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownPass;

impl LinePass for MarkdownPass {
    fn name(&self) -> &str {
        "markdown"
    }

    fn process(&self, line: &str) -> String {
        RULES
            .iter()
            .fold(line.to_string(), |text, (pattern, replacement)| {
                pattern.replace_all(&text, replacement.as_str()).into_owned()
            })
    }
}
