//! # Module Resolution
//!
//! Resolution runs in two steps. [`ModuleResolver::resolve`] looks up the
//! value of every referenced [`ModuleKey`] once; a single position lookup
//! serves both the weather fetch and `{Location.here}`.
//! [`ModuleResolver::substitute`] then rewrites
//! one line in a single left-to-right scan, wrapping each value in a colored
//! span. Values are inserted as produced and never scanned again.
//!
//! Lookup failures never escape: they become an `Error.` value rendered in
//! the error color.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use chrono::{DateTime, Local, Utc};
use rand::{seq::SliceRandom, Rng};
use strum::IntoEnumIterator;
use tokio::time::timeout;
use tracing::{debug, warn};

use super::key::ModuleKey;
use crate::{
    config::{EvaluatorConfig, LocationConfig},
    eval::arithmetic::format_number,
    provider::{
        capability::{Capabilities, CapabilityType},
        types::{Coordinates, ProviderError, ProviderResult, WeatherReport},
    },
    tokenizer::{scan, Directive, DirectiveName},
};

pub const ENCODE_STYLE: &str = "color: #F59E0B; font-family: monospace;";
const FAILED: &str = "Error.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleValue {
    Resolved(String),
    Failed(String),
}

impl ModuleValue {
    pub fn text(&self) -> &str {
        match self {
            ModuleValue::Resolved(text) | ModuleValue::Failed(text) => text,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ModuleValue::Failed(_))
    }
}

/// Values computed for one evaluation call.
#[derive(Debug, Clone, Default)]
pub struct ResolvedModules {
    values: HashMap<ModuleKey, ModuleValue>,
}

impl ResolvedModules {
    pub fn get(&self, key: ModuleKey) -> Option<&ModuleValue> {
        self.values.get(&key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Member-form module keys referenced anywhere in `lines`.
pub fn referenced_keys<'a>(lines: impl IntoIterator<Item = &'a str>) -> HashSet<ModuleKey> {
    lines
        .into_iter()
        .flat_map(scan)
        .filter_map(|found| ModuleKey::from_directive(&found.directive))
        .collect()
}

#[derive(Clone)]
pub struct ModuleResolver {
    capabilities: Capabilities,
    location: LocationConfig,
    weather_timeout: Duration,
    palette: Vec<String>,
    error_color: String,
}

impl ModuleResolver {
    pub fn new(capabilities: Capabilities, config: &EvaluatorConfig) -> Self {
        Self {
            capabilities,
            location: config.location.clone(),
            weather_timeout: config.weather.timeout,
            palette: config.palette.clone(),
            error_color: config.error_color.clone(),
        }
    }

    #[tracing::instrument(level = "debug", skip(self, rng))]
    pub async fn resolve<R: Rng>(
        &self,
        keys: &HashSet<ModuleKey>,
        color: &str,
        rng: &mut R,
    ) -> ResolvedModules {
        let mut values = HashMap::new();
        if keys.is_empty() {
            return ResolvedModules { values };
        }

        let now = self.capabilities.clock.now();
        let wants_weather = keys.iter().any(ModuleKey::needs_weather);
        let wants_location = keys.contains(&ModuleKey::LocationHere);

        let position = if wants_weather || wants_location {
            Some(self.position().await)
        } else {
            None
        };
        let weather = match &position {
            Some(position) if wants_weather => Some(self.weather(position, now).await),
            _ => None,
        };
        let location = match &position {
            Some(position) if wants_location => Some(format_location(position)),
            _ => None,
        };

        for key in ModuleKey::iter().filter(|key| keys.contains(key)) {
            let value = match key {
                ModuleKey::WeatherTemp => weather.as_ref().map(|(temp, _)| temp.clone()),
                ModuleKey::WeatherUv => weather.as_ref().map(|(_, uv)| uv.clone()),
                ModuleKey::LocationHere => location.clone(),
                ModuleKey::TimeDay => Some(ModuleValue::Resolved(now.format("%A").to_string())),
                ModuleKey::TimeTime => Some(ModuleValue::Resolved(
                    now.format("%-I:%M:%S %p").to_string(),
                )),
                ModuleKey::ClientInfo => Some(self.client_info()),
                ModuleKey::RandomNumber => Some(ModuleValue::Resolved(
                    rng.gen_range(100..=999u32).to_string(),
                )),
                ModuleKey::RandomHash => Some(self.random_hash(now, rng)),
                ModuleKey::NoteColor => Some(ModuleValue::Resolved(color.to_string())),
                // depends on the line, see `substitute`
                ModuleKey::NoteSize => None,
            };
            if let Some(value) = value {
                values.insert(key, value);
            }
        }

        ResolvedModules { values }
    }

    /// Rewrites every module token of `line`. Unknown and malformed tokens
    /// stay as written.
    pub fn substitute<R: Rng>(
        &self,
        line: &str,
        resolved: &ResolvedModules,
        rng: &mut R,
    ) -> String {
        let mut output = String::with_capacity(line.len());
        let mut cursor = 0;

        for found in scan(line) {
            let replacement = match &found.directive {
                Directive::Call {
                    name: DirectiveName::Encode,
                    args,
                } => Some(format!(
                    "<span style=\"{}\">{}</span>",
                    ENCODE_STYLE,
                    self.capabilities.digest.sha256_hex(args.as_bytes())
                )),
                directive => ModuleKey::from_directive(directive)
                    .and_then(|key| match key {
                        ModuleKey::NoteSize => {
                            Some(ModuleValue::Resolved(line.chars().count().to_string()))
                        }
                        key => resolved.get(key).cloned(),
                    })
                    .map(|value| self.render(&value, rng)),
            };

            if let Some(replacement) = replacement {
                output.push_str(&line[cursor..found.span.start]);
                output.push_str(&replacement);
                cursor = found.span.end;
            }
        }

        output.push_str(&line[cursor..]);
        output
    }

    fn render<R: Rng>(&self, value: &ModuleValue, rng: &mut R) -> String {
        let color = if value.is_failed() {
            self.error_color.as_str()
        } else {
            self.palette
                .choose(rng)
                .map(String::as_str)
                .unwrap_or("inherit")
        };
        format!(
            "<span style=\"color: {}; font-weight: bold;\">{}</span>",
            color,
            value.text()
        )
    }

    async fn position(&self) -> ProviderResult<Coordinates> {
        timeout(
            self.location.timeout,
            self.capabilities.locator.current_position(),
        )
        .await
        .map_err(|_| ProviderError::Timeout {
            capability: CapabilityType::Geolocation,
            millis: self.location.timeout.as_millis(),
        })?
    }

    /// Temperature and UV values from one forecast. An unknown position falls
    /// back to the configured coordinate.
    async fn weather(
        &self,
        position: &ProviderResult<Coordinates>,
        now: DateTime<Local>,
    ) -> (ModuleValue, ModuleValue) {
        let position = match position {
            Ok(position) => *position,
            Err(e) => {
                debug!("weather uses fallback position: {}", e);
                Coordinates::new(
                    self.location.fallback_latitude,
                    self.location.fallback_longitude,
                )
            }
        };

        let report = timeout(
            self.weather_timeout,
            self.capabilities.weather.current(position),
        )
        .await
        .map_err(|_| ProviderError::Timeout {
            capability: CapabilityType::Weather,
            millis: self.weather_timeout.as_millis(),
        })
        .and_then(|result| result);

        match report {
            Ok(report) => (format_temperature(&report), format_uv(&report, now)),
            Err(e) => {
                warn!("weather lookup failed: {}", e);
                (
                    ModuleValue::Failed(FAILED.to_string()),
                    ModuleValue::Failed(format!("UV Index: {}", FAILED)),
                )
            }
        }
    }

    fn client_info(&self) -> ModuleValue {
        match serde_json::to_string_pretty(&self.capabilities.client.client_info()) {
            Ok(json) => ModuleValue::Resolved(json),
            Err(e) => {
                warn!("client info not serializable: {}", e);
                ModuleValue::Failed(FAILED.to_string())
            }
        }
    }

    fn random_hash<R: Rng>(&self, now: DateTime<Local>, rng: &mut R) -> ModuleValue {
        let seed = format!("{}{}", now.timestamp_millis(), rng.gen::<f64>());
        let hex = self.capabilities.digest.sha256_hex(seed.as_bytes());
        ModuleValue::Resolved(hex.chars().take(8).collect())
    }
}

fn format_location(position: &ProviderResult<Coordinates>) -> ModuleValue {
    match position {
        Ok(position) => ModuleValue::Resolved(format!(
            "{}° N,{}° W",
            format_number(position.latitude),
            format_number(position.longitude)
        )),
        Err(e) => {
            warn!("location lookup failed: {}", e);
            ModuleValue::Failed(FAILED.to_string())
        }
    }
}

fn format_temperature(report: &WeatherReport) -> ModuleValue {
    match report.temperature {
        Some(celsius) => {
            // half-up rounding, matching how the host rounds
            let fahrenheit = (celsius * 9.0 / 5.0 + 32.0 + 0.5).floor();
            ModuleValue::Resolved(format!(
                "{}°C ({}°F)",
                format_number(celsius),
                format_number(fahrenheit)
            ))
        }
        None => ModuleValue::Failed(FAILED.to_string()),
    }
}

fn format_uv(report: &WeatherReport, now: DateTime<Local>) -> ModuleValue {
    let hour = now.with_timezone(&Utc).format("%Y-%m-%dT%H").to_string();
    match report.uv_at(&hour) {
        Some(uv) => ModuleValue::Resolved(format!("UV Index: {}", format_number(uv))),
        None => ModuleValue::Resolved("UV Index: N/A".to_string()),
    }
}
