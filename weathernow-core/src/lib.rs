//! Core library for the `weather-now` widget.
//!
//! This crate defines:
//! - Configuration (default city, language, endpoints)
//! - The geocode -> forecast pipeline and its provider seams
//! - Widget state with explicit request transitions
//! - Presentation mappers and the text renderer
//!
//! It is used by `weathernow-cli`, but the widget can be driven by any front end.

pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod present;
pub mod provider;
pub mod render;
pub mod state;
pub mod widget;

pub use config::{Config, Endpoints};
pub use error::WeatherError;
pub use model::{Coordinate, CurrentWeather, Forecast, HourlySeries, WeatherSnapshot};
pub use present::{IconVariant, compass_label, description_for, icon_for};
pub use provider::{ForecastSource, Geocoder, OpenMeteo};
pub use state::{RequestState, RequestTicket, Settlement, WidgetState};
pub use widget::{CompletedFetch, PendingFetch, WeatherWidget};
