//! ASCII emoticons to emoji.
//!
//! All shorthands are matched by one alternation ordered longest first, so at
//! any position the longest shorthand wins (`:-)` is never read as `:-` plus
//! `)`) and the result does not depend on table order.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::LinePass;

pub const EMOJI_TABLE: &[(&str, &str)] = &[
    (":)", "😊"),
    (":-)", "😊"),
    (":(", "😢"),
    (":-(", "😢"),
    (":D", "😃"),
    (":-D", "😃"),
    (";)", "😉"),
    (";-)", "😉"),
    (":P", "😛"),
    (":-P", "😛"),
    (":o", "😮"),
    (":-o", "😮"),
    ("<3", "❤️"),
    ("</3", "💔"),
    (":thumbsup:", "👍"),
    (":thumbsdown:", "👎"),
    (":fire:", "🔥"),
    (":star:", "⭐"),
    (":heart:", "❤️"),
    (":check:", "✅"),
    (":x:", "❌"),
];

lazy_static! {
    static ref EMOJI: HashMap<&'static str, &'static str> = EMOJI_TABLE.iter().copied().collect();
    static ref SHORTHAND: Regex = {
        let mut keys: Vec<&str> = EMOJI_TABLE.iter().map(|(ascii, _)| *ascii).collect();
        keys.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
        let pattern = keys
            .iter()
            .map(|key| regex::escape(key))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&pattern).unwrap()
    };
}

#[derive(Debug, Default, Clone, Copy)]
pub struct EmojiPass;

impl LinePass for EmojiPass {
    fn name(&self) -> &str {
        "emoji"
    }

    fn process(&self, line: &str) -> String {
        SHORTHAND
            .replace_all(line, |caps: &Captures| {
                let ascii = &caps[0];
                EMOJI.get(ascii).copied().unwrap_or(ascii).to_string()
            })
            .into_owned()
    }
}
