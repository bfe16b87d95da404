//! Open-Meteo forecast client. No API key is involved.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::{
    config::WeatherConfig,
    provider::{
        capability::WeatherService,
        types::{Coordinates, ProviderError, ProviderResult, WeatherReport},
    },
};

#[derive(Debug, Deserialize, Serialize)]
struct ForecastResponse {
    #[serde(default)]
    current_weather: Option<CurrentWeather>,
    #[serde(default)]
    hourly: Option<Hourly>,
}

#[derive(Debug, Deserialize, Serialize)]
struct CurrentWeather {
    temperature: Option<f64>,
}

#[derive(Debug, Deserialize, Serialize, Default)]
struct Hourly {
    #[serde(default)]
    time: Vec<String>,
    #[serde(default)]
    uv_index: Vec<Option<f64>>,
}

impl From<ForecastResponse> for WeatherReport {
    fn from(response: ForecastResponse) -> Self {
        let hourly = response.hourly.unwrap_or_default();
        WeatherReport {
            temperature: response.current_weather.and_then(|c| c.temperature),
            hourly_time: hourly.time,
            hourly_uv_index: hourly.uv_index,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OpenMeteoWeather {
    endpoint: String,
    client: Client,
}

impl OpenMeteoWeather {
    pub fn new(config: &WeatherConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!("falling back to default HTTP client: {}", e);
                Client::new()
            });
        Self {
            endpoint: config.endpoint.clone(),
            client,
        }
    }

    fn forecast_url(&self, position: Coordinates) -> ProviderResult<Url> {
        Url::parse_with_params(
            &self.endpoint,
            &[
                ("latitude", position.latitude.to_string()),
                ("longitude", position.longitude.to_string()),
                ("current_weather", "true".to_string()),
                ("hourly", "uv_index".to_string()),
            ],
        )
        .map_err(|e| ProviderError::InternalError(format!("invalid weather endpoint: {}", e)))
    }
}

#[async_trait]
impl WeatherService for OpenMeteoWeather {
    #[tracing::instrument(level = "debug", skip(self))]
    async fn current(&self, position: Coordinates) -> ProviderResult<WeatherReport> {
        let url = self.forecast_url(position)?;
        debug!("fetching forecast from {}", url);

        let response: ForecastResponse = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ProviderError::FetchFailed(e.to_string()))?
            .error_for_status()
            .map_err(|e| ProviderError::ApiError(e.to_string()))?
            .json()
            .await
            .map_err(|e| ProviderError::ApiError(e.to_string()))?;

        Ok(response.into())
    }
}
