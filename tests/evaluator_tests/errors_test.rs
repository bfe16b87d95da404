use std::time::Duration;

use noted::{
    config::EvaluatorConfig,
    eval::script::ERROR_MARKER,
    modules::resolver::ENCODE_STYLE,
    provider::{
        capability::{MockLocator, MockWeatherService},
        Coordinates, ProviderError, WeatherReport,
    },
    EvaluatedLine, EvaluationResult, NoteEvaluator,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::{colored, offline_capabilities, offline_evaluator, seeded};

const ERROR_COLOR: &str = "#FF0000";

fn failing_locator() -> MockLocator {
    let mut locator = MockLocator::new();
    locator
        .expect_current_position()
        .returning(|| Err(ProviderError::PermissionDenied("denied".to_string())));
    locator
}

#[tokio::test]
async fn test_failed_lookups_render_as_errors() {
    let mut weather = MockWeatherService::new();
    weather
        .expect_current()
        .returning(|_| Err(ProviderError::FetchFailed("network down".to_string())));
    let capabilities = offline_capabilities()
        .with_locator(failing_locator())
        .with_weather(weather);
    let evaluator = NoteEvaluator::new(capabilities, &EvaluatorConfig::default());

    let result = evaluator
        .evaluate_with_rng(
            Some("{Weather.temp} | {Weather.uv} | {Location.here}"),
            "#fff",
            &mut seeded(),
        )
        .await;
    assert_eq!(
        result.to_string(),
        format!(
            "{} | {} | {}",
            colored(ERROR_COLOR, "Error."),
            colored(ERROR_COLOR, "UV Index: Error."),
            colored(ERROR_COLOR, "Error.")
        )
    );
}

#[tokio::test]
async fn test_failed_lookup_leaves_other_modules_resolved() {
    let mut weather = MockWeatherService::new();
    weather
        .expect_current()
        .times(1)
        .returning(|_| Err(ProviderError::FetchFailed("network down".to_string())));
    let config = EvaluatorConfig {
        palette: vec!["#6366F1".to_string()],
        ..Default::default()
    };
    let capabilities = offline_capabilities()
        .with_locator(failing_locator())
        .with_weather(weather);
    let evaluator = NoteEvaluator::new(capabilities, &config);

    let result = evaluator
        .evaluate_with_rng(
            Some("{Weather.temp} {Note.color} {Time.day} {Encode(x)}"),
            "#F59E0B",
            &mut seeded(),
        )
        .await;
    assert_eq!(
        result.to_string(),
        format!(
            "{} {} {} <span style=\"{}\">2d711642b726b04401627ca9fbac32f5c8530fb1903cc4db02258717921a4881</span>",
            colored(ERROR_COLOR, "Error."),
            colored("#6366F1", "#F59E0B"),
            colored("#6366F1", "Monday"),
            ENCODE_STYLE
        )
    );
}

#[tokio::test]
async fn test_weather_uses_fallback_position() {
    let mut weather = MockWeatherService::new();
    weather
        .expect_current()
        .withf(|position| *position == Coordinates::new(37.7749, -122.4194))
        .times(1)
        .returning(|_| {
            Ok(WeatherReport {
                temperature: Some(18.0),
                ..Default::default()
            })
        });
    let config = EvaluatorConfig {
        palette: vec!["#22D3EE".to_string()],
        ..Default::default()
    };
    let capabilities = offline_capabilities()
        .with_locator(failing_locator())
        .with_weather(weather);
    let evaluator = NoteEvaluator::new(capabilities, &config);

    let result = evaluator
        .evaluate_with_rng(Some("{Weather.temp}"), "#fff", &mut seeded())
        .await;
    assert_eq!(result.to_string(), colored("#22D3EE", "18°C (64°F)"));
}

#[tokio::test]
async fn test_weather_timeout() {
    struct Stalled;

    #[async_trait::async_trait]
    impl noted::provider::WeatherService for Stalled {
        async fn current(&self, _position: Coordinates) -> noted::provider::ProviderResult<WeatherReport> {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok(WeatherReport::default())
        }
    }

    let mut config = EvaluatorConfig::default();
    config.weather.timeout = Duration::from_millis(20);
    let evaluator = NoteEvaluator::new(offline_capabilities().with_weather(Stalled), &config);

    let result = evaluator
        .evaluate_with_rng(Some("{Weather.temp}"), "#fff", &mut seeded())
        .await;
    assert_eq!(result.to_string(), colored(ERROR_COLOR, "Error."));
}

#[tokio::test]
async fn test_disabled_script_host() {
    let mut config = EvaluatorConfig::default();
    config.script.enabled = false;
    config.weather.enabled = false;
    let evaluator = NoteEvaluator::from_config(&config);

    let result = evaluator
        .evaluate_with_rng(Some("{js(1 + 1)}"), "#fff", &mut seeded())
        .await;
    assert_eq!(result.to_string(), format!("{{js(1 + 1)}}{}", ERROR_MARKER));
}

proptest! {
    #[test]
    fn test_single_line_never_fails(line in "[a-zA-Z0-9{}().:*_#<>/ ^%+,-]{0,40}") {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let evaluator = offline_evaluator();
        let result = runtime.block_on(evaluator.evaluate_with_rng(Some(line.as_str()), "#fff", &mut seeded()));
        let is_single = matches!(result, EvaluationResult::Single(EvaluatedLine::Text(_)) | EvaluationResult::Single(EvaluatedLine::Flashcard(_)));
        prop_assert!(is_single);
    }
}
