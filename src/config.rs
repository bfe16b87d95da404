use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufReader, path::Path, time::Duration};

use crate::{Error, InternalResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    #[serde(default)]
    pub location: LocationConfig,

    #[serde(default)]
    pub weather: WeatherConfig,

    #[serde(default)]
    pub script: ScriptConfig,

    #[serde(default = "default_palette")]
    pub palette: Vec<String>,

    #[serde(default = "default_error_color")]
    pub error_color: String,
}

/// Geolocation settings. There is no position sensor on a plain host, so the
/// locator answers with the configured coordinate when one is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    #[serde(default)]
    pub latitude: Option<f64>,

    #[serde(default)]
    pub longitude: Option<f64>,

    #[serde(default = "default_fallback_latitude")]
    pub fallback_latitude: f64,

    #[serde(default = "default_fallback_longitude")]
    pub fallback_longitude: f64,

    #[serde(default = "default_location_timeout", with = "duration_ms")]
    pub timeout: Duration,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            latitude: None,
            longitude: None,
            fallback_latitude: default_fallback_latitude(),
            fallback_longitude: default_fallback_longitude(),
            timeout: default_location_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_weather_endpoint")]
    pub endpoint: String,

    /// Bound on the forecast fetch alone. It runs after the position lookup,
    /// so a weather module waits at most `location.timeout + timeout`.
    #[serde(default = "default_weather_timeout", with = "duration_ms")]
    pub timeout: Duration,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            endpoint: default_weather_endpoint(),
            timeout: default_weather_timeout(),
        }
    }
}

/// Settings for the `{js(...)}` module.
///
/// The expression is handed verbatim to `program` followed by `args`. This is
/// arbitrary code execution from note text; set `enabled` to false to make
/// every script report failure instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_script_program")]
    pub program: String,

    #[serde(default = "default_script_args")]
    pub args: Vec<String>,

    #[serde(default = "default_script_timeout", with = "duration_ms")]
    pub timeout: Duration,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            program: default_script_program(),
            args: default_script_args(),
            timeout: default_script_timeout(),
        }
    }
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            location: LocationConfig::default(),
            weather: WeatherConfig::default(),
            script: ScriptConfig::default(),
            palette: default_palette(),
            error_color: default_error_color(),
        }
    }
}

impl EvaluatorConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> InternalResult<Self> {
        from_file(path)
    }
}

pub fn from_file<T: for<'de> Deserialize<'de>, P: AsRef<Path>>(path: P) -> InternalResult<T> {
    let file = File::open(path)
        .map_err(|e| Error::Config(format!("Failed to open config file: {}", e)))?;
    let reader = BufReader::new(file);
    let config = serde_json::from_reader(reader)
        .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))?;
    Ok(config)
}

pub fn from_str<T: for<'de> Deserialize<'de>>(s: &str) -> InternalResult<T> {
    let config = serde_json::from_str(s)
        .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
    Ok(config)
}

fn default_true() -> bool {
    true
}

// San Francisco
fn default_fallback_latitude() -> f64 {
    37.7749
}
fn default_fallback_longitude() -> f64 {
    -122.4194
}

fn default_location_timeout() -> Duration {
    Duration::from_secs(2)
}

fn default_weather_endpoint() -> String {
    "https://api.open-meteo.com/v1/forecast".to_string()
}

fn default_weather_timeout() -> Duration {
    Duration::from_millis(2500)
}

fn default_script_program() -> String {
    "node".to_string()
}

fn default_script_args() -> Vec<String> {
    vec!["-e".to_string()]
}

fn default_script_timeout() -> Duration {
    Duration::from_secs(4)
}

fn default_palette() -> Vec<String> {
    [
        "#10B981", "#F59E0B", "#3B82F6", "#8B5CF6", "#EF4444", "#6366F1", "#F472B6", "#22D3EE",
    ]
    .iter()
    .map(|c| c.to_string())
    .collect()
}

fn default_error_color() -> String {
    "#FF0000".to_string()
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
