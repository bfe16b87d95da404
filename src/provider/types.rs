use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::capability::CapabilityType;

/// Failure of an external lookup. The evaluator never surfaces these to its
/// caller; they become an `Error.` placeholder in the rendered note.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Capability unavailable: {0}")]
    Unavailable(CapabilityType),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Timed out after {millis}ms: {capability}")]
    Timeout {
        capability: CapabilityType,
        millis: u128,
    },

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    #[error("Script failed: {0}")]
    ScriptFailed(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type ProviderResult<T> = Result<T, ProviderError>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Current conditions plus the hourly UV forecast, keyed by ISO hour strings
/// such as `2024-06-01T14:00`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub temperature: Option<f64>,
    pub hourly_time: Vec<String>,
    pub hourly_uv_index: Vec<Option<f64>>,
}

impl WeatherReport {
    /// UV index of the first hourly slot starting with `hour_prefix`
    /// (`YYYY-MM-DDTHH`).
    pub fn uv_at(&self, hour_prefix: &str) -> Option<f64> {
        self.hourly_time
            .iter()
            .position(|time| time.starts_with(hour_prefix))
            .and_then(|index| self.hourly_uv_index.get(index).copied().flatten())
    }
}

/// Host runtime and device properties rendered by `{Client.info}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    pub user_agent: String,
    pub language: String,
    pub platform: String,
    pub cookie_enabled: bool,
    pub on_line: bool,
    pub screen_width: u32,
    pub screen_height: u32,
}
