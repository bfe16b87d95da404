//! # Formatting Passes
//!
//! Pure text-to-text rewrites applied to every non-flashcard line after the
//! math and script passes. The default pipeline runs, in order:
//!
//! 1. [`url::UrlPass`]: bare links become anchors showing the host
//! 2. [`brand::BrandPass`]: the `NOTED.` wordmark is styled
//! 3. [`emoji::EmojiPass`]: ASCII emoticons become emoji
//! 4. [`markdown::MarkdownPass`]: bold, italic, underline, code and headings
//!
//! Each pass runs exactly once per line.

pub mod brand;
pub mod emoji;
pub mod markdown;
pub mod url;

use tracing::trace;

pub use self::brand::BrandPass;
pub use self::emoji::EmojiPass;
pub use self::markdown::MarkdownPass;
pub use self::url::UrlPass;

/// A single rewrite over one line of note text.
pub trait LinePass: Send + Sync {
    fn name(&self) -> &str;
    fn process(&self, line: &str) -> String;
}

pub struct FormattingPipeline {
    passes: Vec<Box<dyn LinePass>>,
}

impl Default for FormattingPipeline {
    fn default() -> Self {
        Self::new(vec![
            Box::new(UrlPass),
            Box::new(BrandPass),
            Box::new(EmojiPass),
            Box::new(MarkdownPass),
        ])
    }
}

impl std::fmt::Debug for FormattingPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.pass_names()).finish()
    }
}

impl FormattingPipeline {
    pub fn new(passes: Vec<Box<dyn LinePass>>) -> Self {
        Self { passes }
    }

    pub fn apply(&self, line: &str) -> String {
        self.passes.iter().fold(line.to_string(), |text, pass| {
            let processed = pass.process(&text);
            trace!(pass = pass.name(), "{} -> {}", text, processed);
            processed
        })
    }

    pub fn pass_names(&self) -> Vec<&str> {
        self.passes.iter().map(|pass| pass.name()).collect()
    }
}
