use async_trait::async_trait;
use tracing::debug;

use crate::{
    config::LocationConfig,
    provider::{
        capability::Locator,
        types::{Coordinates, ProviderError, ProviderResult},
    },
};

/// Answers with a configured position. Without one the position is unknown,
/// which callers treat like a denied permission prompt.
#[derive(Debug, Clone, Default)]
pub struct FixedLocator {
    position: Option<Coordinates>,
}

impl FixedLocator {
    pub fn new(position: Option<Coordinates>) -> Self {
        Self { position }
    }
}

impl From<&LocationConfig> for FixedLocator {
    fn from(config: &LocationConfig) -> Self {
        let position = match (config.latitude, config.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates::new(latitude, longitude)),
            _ => None,
        };
        Self::new(position)
    }
}

#[async_trait]
impl Locator for FixedLocator {
    async fn current_position(&self) -> ProviderResult<Coordinates> {
        match self.position {
            Some(position) => Ok(position),
            None => {
                debug!("no position configured");
                Err(ProviderError::PermissionDenied(
                    "no position configured".to_string(),
                ))
            }
        }
    }
}
