use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    provider::capability::ScriptHost,
    tokenizer::{find_call, DirectiveName},
};

pub const OK_MARKER: &str = " -> <span style=\"color: #10B981; font-weight: bold;\">OK.</span>";
pub const ERROR_MARKER: &str = " -> <span style=\"color: #FF0000; font-weight: bold;\">Error.</span>";

/// Runs the first `{js(EXPR)}` of a line and appends a success or failure
/// marker. The value produced by the script is never shown.
#[derive(Clone)]
pub struct ScriptPass {
    host: Arc<dyn ScriptHost>,
}

impl ScriptPass {
    pub fn new(host: Arc<dyn ScriptHost>) -> Self {
        Self { host }
    }

    pub async fn process(&self, line: &str) -> String {
        let Some(found) = find_call(line, DirectiveName::Js) else {
            return line.to_string();
        };
        let expression = found.directive.args().unwrap_or_default();

        match self.host.run(expression).await {
            Ok(()) => {
                debug!("script at {} succeeded", found.span);
                format!("{}{}", line, OK_MARKER)
            }
            Err(e) => {
                warn!("script at {} failed: {}", found.span, e);
                format!("{}{}", line, ERROR_MARKER)
            }
        }
    }
}
