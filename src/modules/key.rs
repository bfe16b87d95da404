use std::str::FromStr;

use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::tokenizer::Directive;

/// Member-form modules. The string form is the token body, so
/// `"Weather.temp".parse::<ModuleKey>()` matches `{Weather.temp}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, AsRefStr, EnumIter)]
pub enum ModuleKey {
    #[strum(serialize = "Weather.temp")]
    WeatherTemp,
    #[strum(serialize = "Weather.uv")]
    WeatherUv,
    #[strum(serialize = "Time.day")]
    TimeDay,
    #[strum(serialize = "Time.time")]
    TimeTime,
    #[strum(serialize = "Location.here")]
    LocationHere,
    #[strum(serialize = "Client.info")]
    ClientInfo,
    #[strum(serialize = "Random.number")]
    RandomNumber,
    #[strum(serialize = "Random.hash")]
    RandomHash,
    #[strum(serialize = "Note.color")]
    NoteColor,
    #[strum(serialize = "Note.size")]
    NoteSize,
}

impl ModuleKey {
    pub fn from_directive(directive: &Directive) -> Option<Self> {
        match directive {
            Directive::Member { name, child } => {
                Self::from_str(&format!("{}.{}", name, child)).ok()
            }
            Directive::Call { .. } => None,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ModuleKey::WeatherTemp => "current temperature in Celsius and Fahrenheit",
            ModuleKey::WeatherUv => "UV index for the current hour",
            ModuleKey::TimeDay => "weekday name",
            ModuleKey::TimeTime => "local time of day",
            ModuleKey::LocationHere => "current coordinates",
            ModuleKey::ClientInfo => "host runtime details as JSON",
            ModuleKey::RandomNumber => "random integer from 100 to 999",
            ModuleKey::RandomHash => "random 8-character hex string",
            ModuleKey::NoteColor => "the note's color",
            ModuleKey::NoteSize => "character count of the line",
        }
    }

    /// Keys served by the single weather lookup.
    pub fn needs_weather(&self) -> bool {
        matches!(self, ModuleKey::WeatherTemp | ModuleKey::WeatherUv)
    }
}
