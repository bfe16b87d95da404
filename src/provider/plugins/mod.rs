//! Default host implementations of the capability traits.

pub mod client;
pub mod clock;
pub mod digest;
pub mod locator;
pub mod open_meteo;
pub mod script_host;

use async_trait::async_trait;

use super::{
    capability::{CapabilityType, ScriptHost, WeatherService},
    types::{Coordinates, ProviderError, ProviderResult, WeatherReport},
};

/// Stand-in for a capability switched off by configuration. Every call fails
/// with [`ProviderError::Unavailable`].
#[derive(Debug, Clone, Copy)]
pub struct Unavailable {
    capability: CapabilityType,
}

impl Unavailable {
    pub fn new(capability: CapabilityType) -> Self {
        Self { capability }
    }
}

#[async_trait]
impl WeatherService for Unavailable {
    async fn current(&self, _position: Coordinates) -> ProviderResult<WeatherReport> {
        Err(ProviderError::Unavailable(self.capability))
    }
}

#[async_trait]
impl ScriptHost for Unavailable {
    async fn run(&self, _expression: &str) -> ProviderResult<()> {
        Err(ProviderError::Unavailable(self.capability))
    }
}
