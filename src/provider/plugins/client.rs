use std::env;

use crate::provider::{capability::ClientIntrospector, types::ClientInfo};

/// Describes the process the evaluator runs in. There is no screen on a plain
/// host, so the screen fields stay zero unless set by the embedder.
#[derive(Debug, Clone)]
pub struct HostClient {
    info: ClientInfo,
}

impl HostClient {
    pub fn new(info: ClientInfo) -> Self {
        Self { info }
    }

    pub fn detect() -> Self {
        let language = env::var("LC_ALL")
            .or_else(|_| env::var("LANG"))
            .ok()
            .and_then(|lang| lang.split('.').next().map(|l| l.replace('_', "-")))
            .filter(|lang| !lang.is_empty() && lang != "C" && lang != "POSIX")
            .unwrap_or_else(|| "en-US".to_string());

        Self::new(ClientInfo {
            user_agent: format!("noted/{}", env!("CARGO_PKG_VERSION")),
            language,
            platform: format!("{} {}", env::consts::OS, env::consts::ARCH),
            cookie_enabled: false,
            on_line: true,
            screen_width: 0,
            screen_height: 0,
        })
    }
}

impl ClientIntrospector for HostClient {
    fn client_info(&self) -> ClientInfo {
        self.info.clone()
    }
}
