use crate::{
    error::WeatherError,
    model::WeatherSnapshot,
    provider::{ForecastSource, Geocoder},
};

/// Geocode `city`, then fetch the forecast for the first match.
///
/// The forecast stage only runs when geocoding produced a coordinate.
pub async fn fetch_weather(
    geocoder: &dyn Geocoder,
    forecaster: &dyn ForecastSource,
    city: &str,
) -> Result<WeatherSnapshot, WeatherError> {
    tracing::info!(city, "fetching weather");

    let at = geocoder.locate(city).await?;
    let forecast = forecaster.forecast(at).await?;

    tracing::info!(
        city,
        temperature_c = forecast.current.temperature_c,
        weather_code = forecast.current.weather_code,
        "weather fetched"
    );

    Ok(WeatherSnapshot::new(city, forecast))
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted pipeline stages shared by unit tests.

    use std::sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    use async_trait::async_trait;

    use crate::{
        error::WeatherError,
        model::{Coordinate, CurrentWeather, Forecast, HourlySeries},
        provider::{ForecastSource, Geocoder},
    };

    pub(crate) fn london() -> Coordinate {
        Coordinate {
            latitude: 51.5,
            longitude: -0.13,
        }
    }

    pub(crate) fn clear_forecast() -> Forecast {
        Forecast {
            current: CurrentWeather {
                temperature_c: 15.0,
                wind_speed_kmh: 10.0,
                wind_direction_deg: 90.0,
                weather_code: 1,
                is_day: Some(true),
                observed_at: None,
            },
            hourly: HourlySeries {
                temperature_c: vec![Some(15.0)],
                humidity_pct: vec![Some(81.0)],
                precipitation_probability_pct: vec![Some(0.0)],
                weather_code: vec![Some(1)],
            },
        }
    }

    /// Knows a fixed set of cities; everything else is not found.
    #[derive(Debug, Default)]
    pub(crate) struct FakeGeocoder {
        pub(crate) known: Vec<(String, Coordinate)>,
        pub(crate) calls: Arc<AtomicUsize>,
    }

    impl FakeGeocoder {
        pub(crate) fn with_city(city: &str, at: Coordinate) -> Self {
            Self {
                known: vec![(city.to_string(), at)],
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    #[async_trait]
    impl Geocoder for FakeGeocoder {
        async fn locate(&self, city: &str) -> Result<Coordinate, WeatherError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.known
                .iter()
                .find(|(name, _)| name == city)
                .map(|(_, at)| *at)
                .ok_or(WeatherError::CityNotFound)
        }
    }

    /// Returns one canned forecast and records every coordinate it was asked for.
    #[derive(Debug)]
    pub(crate) struct FakeForecast {
        pub(crate) forecast: Forecast,
        pub(crate) requested: Mutex<Vec<Coordinate>>,
    }

    impl FakeForecast {
        pub(crate) fn new(forecast: Forecast) -> Self {
            Self {
                forecast,
                requested: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn requested(&self) -> Vec<Coordinate> {
            self.requested.lock().map(|r| r.clone()).unwrap_or_default()
        }
    }

    #[async_trait]
    impl ForecastSource for FakeForecast {
        async fn forecast(&self, at: Coordinate) -> Result<Forecast, WeatherError> {
            if let Ok(mut requested) = self.requested.lock() {
                requested.push(at);
            }
            Ok(self.forecast.clone())
        }
    }
}
