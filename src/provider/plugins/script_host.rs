//! Runs `{js(...)}` expressions in an external interpreter.
//!
//! This executes code taken verbatim from note text with the privileges of
//! the current process. Disable it with `script.enabled = false`.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::{
    config::ScriptConfig,
    provider::{
        capability::{CapabilityType, ScriptHost},
        types::{ProviderError, ProviderResult},
    },
};

#[derive(Debug, Clone)]
pub struct ProcessScriptHost {
    config: ScriptConfig,
}

impl ProcessScriptHost {
    pub fn new(config: &ScriptConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    fn command(&self, expression: &str) -> Command {
        let mut command = Command::new(&self.config.program);
        command
            .args(&self.config.args)
            .arg(expression)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        command
    }
}

#[async_trait]
impl ScriptHost for ProcessScriptHost {
    #[tracing::instrument(level = "debug", skip(self))]
    async fn run(&self, expression: &str) -> ProviderResult<()> {
        let child = self
            .command(expression)
            .spawn()
            .map_err(|e| ProviderError::ScriptFailed(format!("{}: {}", self.config.program, e)))?;

        let output = tokio::time::timeout(self.config.timeout, child.wait_with_output())
            .await
            .map_err(|_| ProviderError::Timeout {
                capability: CapabilityType::Script,
                millis: self.config.timeout.as_millis(),
            })?
            .map_err(|e| ProviderError::ScriptFailed(e.to_string()))?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!("script exited with {}: {}", output.status, stderr.trim());
            Err(ProviderError::ScriptFailed(format!(
                "exited with {}",
                output.status
            )))
        }
    }
}
