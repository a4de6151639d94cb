use crate::{
    Config,
    error::WeatherError,
    model::{Coordinate, Forecast},
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod open_meteo;

pub use open_meteo::OpenMeteo;

/// First stage of the pipeline: place name to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// Resolve `city` to the coordinates of the best match.
    ///
    /// Returns [`WeatherError::CityNotFound`] when the service has no match.
    async fn locate(&self, city: &str) -> Result<Coordinate, WeatherError>;
}

/// Second stage of the pipeline: coordinates to current and hourly weather.
#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    async fn forecast(&self, at: Coordinate) -> Result<Forecast, WeatherError>;
}

/// Construct both pipeline stages from config. Open-Meteo serves both.
pub fn providers_from_config(config: &Config) -> (Arc<dyn Geocoder>, Arc<dyn ForecastSource>) {
    let open_meteo = Arc::new(OpenMeteo::from_config(config));
    let geocoder: Arc<dyn Geocoder> = open_meteo.clone();
    (geocoder, open_meteo)
}

/// Shorten an error body for inclusion in a message.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
