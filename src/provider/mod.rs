//! External capabilities: traits, their default host implementations and
//! the shared value types.

pub mod capability;
pub mod plugins;
pub mod types;

pub use capability::{
    Capabilities, CapabilityType, ClientIntrospector, Clock, Digest, Locator, ScriptHost,
    WeatherService,
};
pub use types::{ClientInfo, Coordinates, ProviderError, ProviderResult, WeatherReport};
