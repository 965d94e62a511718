//! Weather snapshot models for the one-call endpoint payload

use serde::{Deserialize, Deserializer, Serialize};

/// Current conditions plus the daily forecast from one one-call response.
///
/// Only meaningful paired with the [`crate::models::Location`] it was
/// fetched for; both are returned together as explicit values and replaced
/// on the next query.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WeatherSnapshot {
    /// Current conditions at the requested coordinates
    pub current: CurrentConditions,
    /// Daily forecast, up to 8 entries (today + 7 days)
    #[serde(default)]
    pub daily: Vec<DailyForecast>,
    /// Shift in seconds from UTC, used to localize timestamps
    #[serde(default)]
    pub timezone_offset: i64,
}

/// A single weather description entry (condition text and icon id)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Condition {
    /// Human-readable condition, e.g. "light rain"
    pub description: String,
    /// Provider icon identifier, e.g. "10d"
    #[serde(default)]
    pub icon: String,
}

/// Current weather conditions
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CurrentConditions {
    /// Observation time, unix seconds UTC
    pub dt: i64,
    /// Temperature in the requested units
    pub temp: f64,
    /// Relative humidity percentage (0-100)
    pub humidity: f64,
    /// UV index
    #[serde(default)]
    pub uvi: f64,
    /// Cloud cover percentage (0-100)
    pub clouds: f64,
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// Rain rate in mm/h; absent means no rain
    #[serde(default, deserialize_with = "precipitation_rate")]
    pub rain: f64,
    /// Snow rate in mm/h; absent means no snow
    #[serde(default, deserialize_with = "precipitation_rate")]
    pub snow: f64,
    /// Weather descriptions, first entry is the primary condition
    #[serde(default)]
    pub weather: Vec<Condition>,
}

impl CurrentConditions {
    /// Primary condition text, e.g. "scattered clouds"
    #[must_use]
    pub fn description(&self) -> &str {
        self.weather
            .first()
            .map_or("unknown", |c| c.description.as_str())
    }
}

/// Morning/day/evening/night temperature readings for one forecast day
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DayTemperatures {
    pub morn: f64,
    pub day: f64,
    pub eve: f64,
    pub night: f64,
}

/// One daily forecast entry
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DailyForecast {
    /// Forecast day, unix seconds UTC
    pub dt: i64,
    /// One-line human-readable summary of the day
    #[serde(default)]
    pub summary: String,
    /// Temperature readings through the day
    pub temp: DayTemperatures,
    /// Relative humidity percentage (0-100)
    pub humidity: f64,
    /// UV index
    #[serde(default)]
    pub uvi: f64,
    /// Cloud cover percentage (0-100)
    pub clouds: f64,
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// Probability of precipitation (0.0-1.0)
    #[serde(default)]
    pub pop: f64,
    /// Total rain volume in mm; absent means none forecast
    #[serde(default)]
    pub rain: f64,
    /// Total snow volume in mm; absent means none forecast
    #[serde(default)]
    pub snow: f64,
    /// Weather descriptions, first entry is the primary condition
    #[serde(default)]
    pub weather: Vec<Condition>,
}

impl DailyForecast {
    /// Primary condition text for the day
    #[must_use]
    pub fn description(&self) -> &str {
        self.weather
            .first()
            .map_or("unknown", |c| c.description.as_str())
    }
}

/// Deserialize a precipitation field that arrives either as a bare rate or
/// as an object keyed by accumulation window, in which case the past-1-hour
/// value is taken.
fn precipitation_rate<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Rate(f64),
        Windowed {
            #[serde(rename = "1h", default)]
            one_hour: f64,
        },
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Rate(rate) => rate,
        Raw::Windowed { one_hour } => one_hour,
    })
}
