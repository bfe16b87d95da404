//! Capability interfaces the evaluator consumes.
//!
//! Every side effect of an evaluation goes through one of these traits:
//! position, weather, hashing, script execution, host introspection and the
//! wall clock. [`Capabilities`] bundles one implementation of each; tests and
//! embedding hosts swap individual entries through the `with_*` builders.
//!
//! ```text
//! Capabilities
//!  ├── Locator             FixedLocator
//!  ├── WeatherService      OpenMeteoWeather, Unavailable
//!  ├── Digest              RingDigest
//!  ├── ScriptHost          ProcessScriptHost, Unavailable
//!  ├── ClientIntrospector  HostClient
//!  └── Clock               SystemClock
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Local};
use mockall::automock;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

use super::{
    plugins::{
        client::HostClient, clock::SystemClock, digest::RingDigest, locator::FixedLocator,
        open_meteo::OpenMeteoWeather, script_host::ProcessScriptHost, Unavailable,
    },
    types::{ClientInfo, Coordinates, ProviderResult, WeatherReport},
};
use crate::config::EvaluatorConfig;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Hash, Display)]
pub enum CapabilityType {
    Geolocation,
    Weather,
    Digest,
    Script,
    ClientInfo,
    Clock,
}

/// Current device position.
#[automock]
#[async_trait]
pub trait Locator: Send + Sync {
    async fn current_position(&self) -> ProviderResult<Coordinates>;
}

/// Current temperature and hourly UV index for a coordinate.
#[automock]
#[async_trait]
pub trait WeatherService: Send + Sync {
    async fn current(&self, position: Coordinates) -> ProviderResult<WeatherReport>;
}

/// 256-bit digest, lowercase hex.
#[automock]
pub trait Digest: Send + Sync {
    fn sha256_hex(&self, data: &[u8]) -> String;
}

/// Runs a user-authored expression in a general-purpose interpreter.
///
/// Implementations execute arbitrary code taken from note text. Only success
/// or failure is reported back; the expression's value is discarded.
#[automock]
#[async_trait]
pub trait ScriptHost: Send + Sync {
    async fn run(&self, expression: &str) -> ProviderResult<()>;
}

#[automock]
pub trait ClientIntrospector: Send + Sync {
    fn client_info(&self) -> ClientInfo;
}

#[automock]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

#[derive(Clone)]
pub struct Capabilities {
    pub locator: Arc<dyn Locator>,
    pub weather: Arc<dyn WeatherService>,
    pub digest: Arc<dyn Digest>,
    pub script: Arc<dyn ScriptHost>,
    pub client: Arc<dyn ClientIntrospector>,
    pub clock: Arc<dyn Clock>,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::from_config(&EvaluatorConfig::default())
    }
}

impl Capabilities {
    /// Default host implementations, switched by configuration.
    pub fn from_config(config: &EvaluatorConfig) -> Self {
        let weather: Arc<dyn WeatherService> = if config.weather.enabled {
            Arc::new(OpenMeteoWeather::new(&config.weather))
        } else {
            Arc::new(Unavailable::new(CapabilityType::Weather))
        };
        let script: Arc<dyn ScriptHost> = if config.script.enabled {
            Arc::new(ProcessScriptHost::new(&config.script))
        } else {
            Arc::new(Unavailable::new(CapabilityType::Script))
        };
        Self {
            locator: Arc::new(FixedLocator::from(&config.location)),
            weather,
            digest: Arc::new(RingDigest),
            script,
            client: Arc::new(HostClient::detect()),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_locator(mut self, locator: impl Locator + 'static) -> Self {
        self.locator = Arc::new(locator);
        self
    }

    pub fn with_weather(mut self, weather: impl WeatherService + 'static) -> Self {
        self.weather = Arc::new(weather);
        self
    }

    pub fn with_digest(mut self, digest: impl Digest + 'static) -> Self {
        self.digest = Arc::new(digest);
        self
    }

    pub fn with_script(mut self, script: impl ScriptHost + 'static) -> Self {
        self.script = Arc::new(script);
        self
    }

    pub fn with_client(mut self, client: impl ClientIntrospector + 'static) -> Self {
        self.client = Arc::new(client);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }
}
