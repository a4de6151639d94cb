use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    config::{Config, Endpoints},
    error::WeatherError,
    model::{Coordinate, CurrentWeather, Forecast, HourlySeries},
};

use super::{ForecastSource, Geocoder, truncate_body};

const GEOCODING: &str = "geocoding";
const FORECAST: &str = "forecast";

const HOURLY_FIELDS: &str =
    "temperature_2m,relativehumidity_2m,precipitation_probability,weathercode";

/// Open-Meteo reports local times without seconds.
const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Client for the keyless Open-Meteo geocoding and forecast APIs.
#[derive(Debug, Clone)]
pub struct OpenMeteo {
    endpoints: Endpoints,
    language: String,
    http: Client,
}

impl OpenMeteo {
    pub fn new(endpoints: Endpoints, language: impl Into<String>) -> Self {
        Self {
            endpoints,
            language: language.into(),
            http: Client::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.endpoints.clone(), config.language.clone())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        service: &'static str,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, WeatherError> {
        tracing::debug!(service, url, ?query, "sending request");

        let res = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|source| WeatherError::Http { service, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| WeatherError::Http { service, source })?;

        if !status.is_success() {
            return Err(WeatherError::Status {
                service,
                status,
                reason: error_reason(&body),
            });
        }

        serde_json::from_str(&body).map_err(|source| WeatherError::Decode { service, source })
    }
}

/// Open-Meteo answers bad requests with `{"error": true, "reason": "..."}`.
fn error_reason(body: &str) -> String {
    match serde_json::from_str::<OmErrorBody>(body) {
        Ok(err) => err.reason,
        Err(_) => truncate_body(body),
    }
}

#[derive(Debug, Deserialize)]
struct OmErrorBody {
    reason: String,
}

#[derive(Debug, Deserialize)]
struct OmPlace {
    latitude: f64,
    longitude: f64,
    name: Option<String>,
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmGeocodeResponse {
    // Omitted entirely when nothing matches.
    #[serde(default)]
    results: Vec<OmPlace>,
}

#[derive(Debug, Deserialize)]
struct OmCurrentWeather {
    temperature: f64,
    windspeed: f64,
    winddirection: f64,
    weathercode: i32,
    is_day: Option<u8>,
    time: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OmHourly {
    temperature_2m: Vec<Option<f64>>,
    relativehumidity_2m: Vec<Option<f64>>,
    precipitation_probability: Vec<Option<f64>>,
    weathercode: Vec<Option<i32>>,
}

#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    current_weather: OmCurrentWeather,
    #[serde(default)]
    hourly: OmHourly,
}

impl From<OmForecastResponse> for Forecast {
    fn from(res: OmForecastResponse) -> Self {
        let cw = res.current_weather;
        let observed_at = cw
            .time
            .as_deref()
            .and_then(|t| NaiveDateTime::parse_from_str(t, TIME_FORMAT).ok());

        Forecast {
            current: CurrentWeather {
                temperature_c: cw.temperature,
                wind_speed_kmh: cw.windspeed,
                wind_direction_deg: cw.winddirection,
                weather_code: cw.weathercode,
                is_day: cw.is_day.map(|d| d != 0),
                observed_at,
            },
            hourly: HourlySeries {
                temperature_c: res.hourly.temperature_2m,
                humidity_pct: res.hourly.relativehumidity_2m,
                precipitation_probability_pct: res.hourly.precipitation_probability,
                weather_code: res.hourly.weathercode,
            },
        }
    }
}

#[async_trait]
impl Geocoder for OpenMeteo {
    async fn locate(&self, city: &str) -> Result<Coordinate, WeatherError> {
        let query = [
            ("name", city.to_string()),
            ("count", "1".to_string()),
            ("language", self.language.clone()),
            ("format", "json".to_string()),
        ];

        let parsed: OmGeocodeResponse =
            self.get_json(GEOCODING, &self.endpoints.geocode, &query).await?;

        let place = parsed
            .results
            .into_iter()
            .next()
            .ok_or(WeatherError::CityNotFound)?;

        tracing::debug!(
            name = place.name.as_deref().unwrap_or("?"),
            country = place.country.as_deref().unwrap_or("?"),
            latitude = place.latitude,
            longitude = place.longitude,
            "geocoded"
        );

        Ok(Coordinate {
            latitude: place.latitude,
            longitude: place.longitude,
        })
    }
}

#[async_trait]
impl ForecastSource for OpenMeteo {
    async fn forecast(&self, at: Coordinate) -> Result<Forecast, WeatherError> {
        let query = [
            ("latitude", at.latitude.to_string()),
            ("longitude", at.longitude.to_string()),
            ("current_weather", "true".to_string()),
            ("hourly", HOURLY_FIELDS.to_string()),
        ];

        let parsed: OmForecastResponse =
            self.get_json(FORECAST, &self.endpoints.forecast, &query).await?;

        Ok(parsed.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forecast_body_maps_to_model() {
        let body = r#"{
            "latitude": 51.5,
            "longitude": -0.12,
            "current_weather": {
                "time": "2024-05-01T14:00",
                "temperature": 15.0,
                "windspeed": 10.0,
                "winddirection": 90,
                "weathercode": 1,
                "is_day": 1
            },
            "hourly": {
                "time": ["2024-05-01T00:00", "2024-05-01T01:00"],
                "temperature_2m": [11.2, 10.9],
                "relativehumidity_2m": [81, 83],
                "precipitation_probability": [null, 5],
                "weathercode": [3, 2]
            }
        }"#;

        let parsed: OmForecastResponse = serde_json::from_str(body).expect("valid body");
        let forecast = Forecast::from(parsed);

        assert_eq!(forecast.current.temperature_c, 15.0);
        assert_eq!(forecast.current.wind_direction_deg, 90.0);
        assert_eq!(forecast.current.weather_code, 1);
        assert_eq!(forecast.current.is_day, Some(true));
        assert_eq!(
            forecast.current.observed_at.map(|t| t.format("%H:%M").to_string()),
            Some("14:00".to_string())
        );
        assert_eq!(forecast.hourly.humidity_now(), Some(81.0));
        assert_eq!(forecast.hourly.precipitation_now(), None);
        assert_eq!(forecast.hourly.weather_code, vec![Some(3), Some(2)]);
    }

    #[test]
    fn missing_hourly_block_is_tolerated() {
        let body = r#"{"current_weather": {"temperature": -3.5, "windspeed": 0.0, "winddirection": 0, "weathercode": 71}}"#;

        let parsed: OmForecastResponse = serde_json::from_str(body).expect("valid body");
        let forecast = Forecast::from(parsed);

        assert!(forecast.hourly.humidity_pct.is_empty());
        assert_eq!(forecast.current.observed_at, None);
        assert_eq!(forecast.current.is_day, None);
    }

    #[test]
    fn geocode_body_without_results_parses_empty() {
        let parsed: OmGeocodeResponse =
            serde_json::from_str(r#"{"generationtime_ms": 0.5}"#).expect("valid body");
        assert!(parsed.results.is_empty());
    }

    #[test]
    fn error_reason_prefers_provider_reason() {
        let body = r#"{"error": true, "reason": "Parameter 'latitude' is required"}"#;
        assert_eq!(error_reason(body), "Parameter 'latitude' is required");
        assert_eq!(error_reason("upstream timeout"), "upstream timeout");
    }

    #[test]
    fn from_config_copies_endpoints_and_language() {
        let mut cfg = Config::default();
        cfg.language = "fr".into();
        let client = OpenMeteo::from_config(&cfg);

        assert_eq!(client.language, "fr");
        assert_eq!(client.endpoints, cfg.endpoints);
    }
}
