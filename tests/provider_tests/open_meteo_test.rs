use noted::{
    config::WeatherConfig,
    provider::{plugins::open_meteo::OpenMeteoWeather, Coordinates, WeatherService},
};

use crate::should_run_external_api_tests;

#[tokio::test]
async fn test_open_meteo_forecast() {
    if !should_run_external_api_tests() {
        return;
    }

    let weather = OpenMeteoWeather::new(&WeatherConfig::default());
    let report = weather
        .current(Coordinates::new(37.7749, -122.4194))
        .await
        .unwrap();

    assert!(report.temperature.is_some());
    assert!(!report.hourly_time.is_empty());
    assert_eq!(report.hourly_time.len(), report.hourly_uv_index.len());
}

#[tokio::test]
async fn test_unreachable_endpoint_fails() {
    let config = WeatherConfig {
        endpoint: "http://127.0.0.1:9/forecast".to_string(),
        ..Default::default()
    };
    let weather = OpenMeteoWeather::new(&config);
    assert!(weather.current(Coordinates::new(0.0, 0.0)).await.is_err());
}
