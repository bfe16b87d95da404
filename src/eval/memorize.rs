use tracing::debug;

use super::result::Flashcard;
use crate::tokenizer::{find_call, DirectiveName};

pub const SHOWN_STYLE: &str = "background: #F3F4F6; text-align:center; font-size: 1.3rem; color: #8B5CF6; box-shadow: 0 2px 8px rgba(139,92,246,0.15); border-radius: 8px; padding: 8px 16px; transition: box-shadow 0.2s, background 0.2s; cursor: pointer;";
pub const SHOWN_HOVER: &str = "onmouseover=\"this.style.background='#EDE9FE';this.style.boxShadow='0 4px 16px rgba(139,92,246,0.25)';\" onmouseout=\"this.style.background='#F3F4F6';this.style.boxShadow='0 2px 8px rgba(139,92,246,0.15)';\"";
pub const HIDDEN_STYLE: &str = "background: #F3F4F6; text-align:center; font-size: 1.3rem; color: #EF4444; box-shadow: 0 2px 8px rgba(239,68,68,0.15); border-radius: 8px; padding: 8px 16px; transition: box-shadow 0.2s, background 0.2s; cursor: pointer;";
pub const HIDDEN_HOVER: &str = "onmouseover=\"this.style.background='#FEE2E2';this.style.boxShadow='0 4px 16px rgba(239,68,68,0.25)';\" onmouseout=\"this.style.background='#F3F4F6';this.style.boxShadow='0 2px 8px rgba(239,68,68,0.15)';\"";

/// Turns the first `{Memorize(SHOWN:HIDDEN)}` of a line into a [`Flashcard`].
/// Fields past the second `:` are dropped; a missing hidden field is empty.
#[derive(Debug, Default, Clone, Copy)]
pub struct MemorizePass;

impl MemorizePass {
    pub fn new() -> Self {
        Self
    }

    pub fn process(&self, line: &str) -> Option<Flashcard> {
        let found = find_call(line, DirectiveName::Memorize)?;
        let args = found.directive.args()?;
        let mut fields = args.split(':');
        let shown = fields.next().unwrap_or_default();
        let hidden = fields.next().unwrap_or_default();
        debug!("flashcard at {}", found.span);

        Some(Flashcard {
            shown: format!("<div style=\"{}\" {}>{}</div>", SHOWN_STYLE, SHOWN_HOVER, shown),
            hidden: format!("<div style=\"{}\" {}>{}</div>", HIDDEN_STYLE, HIDDEN_HOVER, hidden),
        })
    }
}
