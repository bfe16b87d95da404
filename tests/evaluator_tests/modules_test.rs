use noted::{
    config::EvaluatorConfig,
    modules::resolver::ENCODE_STYLE,
    provider::{
        capability::{MockLocator, MockWeatherService},
        plugins::{client::HostClient, locator::FixedLocator},
        ClientInfo, Coordinates, WeatherReport,
    },
    EvaluatedLine, EvaluationResult, NoteEvaluator,
};
use pretty_assertions::assert_eq;
use rand::{rngs::StdRng, SeedableRng};

use super::{colored, monday_afternoon, offline_capabilities, seeded};

const COLOR: &str = "#10B981";

fn single_color_config() -> EvaluatorConfig {
    EvaluatorConfig {
        palette: vec![COLOR.to_string()],
        ..Default::default()
    }
}

async fn render(evaluator: &NoteEvaluator, line: &str, color: &str) -> String {
    evaluator
        .evaluate_with_rng(Some(line), color, &mut seeded())
        .await
        .to_string()
}

#[tokio::test]
async fn test_time_and_note_modules() {
    let evaluator = NoteEvaluator::new(offline_capabilities(), &single_color_config());

    assert_eq!(
        render(&evaluator, "{Time.day} at {Time.time}", "#fff").await,
        format!("{} at {}", colored(COLOR, "Monday"), colored(COLOR, "2:05:09 PM"))
    );
    assert_eq!(
        render(&evaluator, "{Note.color}", "#F472B6").await,
        colored(COLOR, "#F472B6")
    );
    assert_eq!(
        render(&evaluator, "size {Note.size}", "#fff").await,
        format!("size {}", colored(COLOR, "16"))
    );
}

#[tokio::test]
async fn test_encode() {
    let evaluator = NoteEvaluator::new(offline_capabilities(), &single_color_config());
    assert_eq!(
        render(&evaluator, "{Encode(hello)}", "#fff").await,
        format!(
            "<span style=\"{}\">2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824</span>",
            ENCODE_STYLE
        )
    );
}

#[tokio::test]
async fn test_unknown_tokens_stay_verbatim() {
    let evaluator = NoteEvaluator::new(offline_capabilities(), &single_color_config());
    for line in ["{Foo.bar}", "{Weather.wind} and {note.color}", "{Time.day"] {
        assert_eq!(render(&evaluator, line, "#fff").await, line);
    }
}

#[tokio::test]
async fn test_client_info() {
    let client = HostClient::new(ClientInfo {
        user_agent: "noted/test".to_string(),
        language: "en-US".to_string(),
        platform: "linux x86_64".to_string(),
        cookie_enabled: false,
        on_line: true,
        screen_width: 1920,
        screen_height: 1080,
    });
    let evaluator = NoteEvaluator::new(
        offline_capabilities().with_client(client),
        &single_color_config(),
    );
    let rendered = render(&evaluator, "{Client.info}", "#fff").await;
    assert!(rendered.contains("\"userAgent\": \"noted/test\""), "{}", rendered);
    assert!(rendered.contains("\"screenWidth\": 1920"));
    assert!(rendered.contains("\n  \"onLine\": true"));
}

#[tokio::test]
async fn test_location_and_weather() {
    let now = monday_afternoon();
    let mut weather = MockWeatherService::new();
    weather
        .expect_current()
        .times(1)
        .returning(move |_| {
            Ok(WeatherReport {
                temperature: Some(-3.0),
                hourly_time: vec![now
                    .with_timezone(&chrono::Utc)
                    .format("%Y-%m-%dT%H:00")
                    .to_string()],
                hourly_uv_index: vec![Some(0.4)],
            })
        });
    let capabilities = offline_capabilities()
        .with_locator(FixedLocator::new(Some(Coordinates::new(51.5, -0.12))))
        .with_weather(weather);
    let evaluator = NoteEvaluator::new(capabilities, &single_color_config());

    assert_eq!(
        render(&evaluator, "{Location.here}\n{Weather.temp}\n{Weather.uv}", "#fff").await,
        format!(
            "{}\n{}\n{}",
            colored(COLOR, "51.5° N,-0.12° W"),
            colored(COLOR, "-3°C (27°F)"),
            colored(COLOR, "UV Index: 0.4"),
        )
    );
}

#[tokio::test]
async fn test_position_is_looked_up_once() {
    let mut locator = MockLocator::new();
    locator
        .expect_current_position()
        .times(1)
        .returning(|| Ok(Coordinates::new(48.85, 2.35)));
    let mut weather = MockWeatherService::new();
    weather
        .expect_current()
        .withf(|position| *position == Coordinates::new(48.85, 2.35))
        .times(1)
        .returning(|_| {
            Ok(WeatherReport {
                temperature: Some(20.0),
                ..Default::default()
            })
        });
    let capabilities = offline_capabilities()
        .with_locator(locator)
        .with_weather(weather);
    let evaluator = NoteEvaluator::new(capabilities, &single_color_config());

    assert_eq!(
        render(&evaluator, "{Weather.temp} {Location.here}", "#fff").await,
        format!(
            "{} {}",
            colored(COLOR, "20°C (68°F)"),
            colored(COLOR, "48.85° N,2.35° W")
        )
    );
}

#[tokio::test]
async fn test_random_modules_follow_the_seed() {
    let evaluator = NoteEvaluator::new(offline_capabilities(), &EvaluatorConfig::default());
    let line = Some("{Random.number} {Random.hash} {Time.day}");

    let first = evaluator
        .evaluate_with_rng(line, "#fff", &mut StdRng::seed_from_u64(99))
        .await;
    let second = evaluator
        .evaluate_with_rng(line, "#fff", &mut StdRng::seed_from_u64(99))
        .await;
    assert_eq!(first, second);

    let EvaluationResult::Single(EvaluatedLine::Text(text)) = first else {
        panic!("expected a single text line");
    };
    let number: u32 = text
        .split("font-weight: bold;\">")
        .nth(1)
        .and_then(|rest| rest.split('<').next())
        .unwrap()
        .parse()
        .unwrap();
    assert!((100..=999).contains(&number));
}
