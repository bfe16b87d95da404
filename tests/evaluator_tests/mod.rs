mod errors_test;
mod modules_test;
mod passes_test;

use chrono::{DateTime, Local, TimeZone};
use noted::{
    config::EvaluatorConfig,
    provider::{
        capability::{MockClock, MockScriptHost},
        Capabilities,
    },
    NoteEvaluator,
};
use rand::{rngs::StdRng, SeedableRng};

pub fn monday_afternoon() -> DateTime<Local> {
    Local.with_ymd_and_hms(2024, 6, 3, 14, 5, 9).unwrap()
}

/// No network and no child processes: weather is switched off, the script
/// host accepts everything and the clock is fixed.
pub fn offline_capabilities() -> Capabilities {
    let mut script = MockScriptHost::new();
    script.expect_run().returning(|_| Ok(()));
    let mut clock = MockClock::new();
    clock.expect_now().returning(monday_afternoon);
    let mut config = EvaluatorConfig::default();
    config.weather.enabled = false;
    Capabilities::from_config(&config)
        .with_script(script)
        .with_clock(clock)
}

pub fn offline_evaluator() -> NoteEvaluator {
    NoteEvaluator::new(offline_capabilities(), &EvaluatorConfig::default())
}

pub fn seeded() -> StdRng {
    StdRng::seed_from_u64(7)
}

pub fn colored(color: &str, value: &str) -> String {
    format!(
        "<span style=\"color: {}; font-weight: bold;\">{}</span>",
        color, value
    )
}
