use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A resolved geographic position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Conditions reported for the current moment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub temperature_c: f64,
    pub wind_speed_kmh: f64,
    pub wind_direction_deg: f64,
    pub weather_code: i32,
    pub is_day: Option<bool>,
    /// Local time of the observation, as reported by the provider.
    pub observed_at: Option<NaiveDateTime>,
}

/// Parallel hourly series; index 0 is the nearest hour.
///
/// Providers may report gaps as `null`, so every entry is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HourlySeries {
    pub temperature_c: Vec<Option<f64>>,
    pub humidity_pct: Vec<Option<f64>>,
    pub precipitation_probability_pct: Vec<Option<f64>>,
    pub weather_code: Vec<Option<i32>>,
}

impl HourlySeries {
    pub fn humidity_now(&self) -> Option<f64> {
        self.humidity_pct.first().copied().flatten()
    }

    pub fn precipitation_now(&self) -> Option<f64> {
        self.precipitation_probability_pct.first().copied().flatten()
    }
}

/// Output of the forecast stage, before it is tied to a city.
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    pub current: CurrentWeather,
    pub hourly: HourlySeries,
}

/// Everything the weather panel displays. Replaced wholesale on every
/// successful fetch, never patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// City text the snapshot was fetched for.
    pub city: String,
    pub current: CurrentWeather,
    pub hourly: HourlySeries,
    pub fetched_at: DateTime<Utc>,
}

impl WeatherSnapshot {
    pub fn new(city: impl Into<String>, forecast: Forecast) -> Self {
        Self {
            city: city.into(),
            current: forecast.current,
            hourly: forecast.hourly,
            fetched_at: Utc::now(),
        }
    }
}
