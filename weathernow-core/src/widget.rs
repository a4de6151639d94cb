use std::sync::Arc;

use crate::{
    Config,
    error::WeatherError,
    model::WeatherSnapshot,
    pipeline,
    provider::{ForecastSource, Geocoder, providers_from_config},
    state::{RequestTicket, Settlement, WidgetState},
};

/// The weather widget: input text, fetch pipeline and the state it drives.
///
/// A fetch has three steps so the loading state can be shown while the
/// network calls run: `begin_*` enters `Loading` and returns a
/// [`PendingFetch`], [`PendingFetch::run`] performs the calls without
/// borrowing the widget, and [`WeatherWidget::settle`] records the outcome.
#[derive(Debug)]
pub struct WeatherWidget {
    geocoder: Arc<dyn Geocoder>,
    forecaster: Arc<dyn ForecastSource>,
    default_city: String,
    state: WidgetState,
}

/// A fetch that has entered `Loading` but not yet run.
#[derive(Debug)]
pub struct PendingFetch {
    ticket: RequestTicket,
    city: String,
    geocoder: Arc<dyn Geocoder>,
    forecaster: Arc<dyn ForecastSource>,
}

/// A fetch that has run and is waiting to be settled.
#[derive(Debug)]
pub struct CompletedFetch {
    ticket: RequestTicket,
    outcome: Result<WeatherSnapshot, WeatherError>,
}

impl PendingFetch {
    pub fn city(&self) -> &str {
        &self.city
    }

    /// Geocode, then fetch the forecast. Never fails; the error travels in
    /// the result and becomes the widget's message on settle.
    pub async fn run(self) -> CompletedFetch {
        let outcome =
            pipeline::fetch_weather(self.geocoder.as_ref(), self.forecaster.as_ref(), &self.city)
                .await;

        if let Err(err) = &outcome {
            tracing::warn!(city = %self.city, error = %err, "weather fetch failed");
        }

        CompletedFetch {
            ticket: self.ticket,
            outcome,
        }
    }
}

impl CompletedFetch {
    pub fn outcome(&self) -> Result<&WeatherSnapshot, &WeatherError> {
        self.outcome.as_ref()
    }
}

impl WeatherWidget {
    pub fn new(
        default_city: impl Into<String>,
        geocoder: Arc<dyn Geocoder>,
        forecaster: Arc<dyn ForecastSource>,
    ) -> Self {
        let default_city = default_city.into();
        Self {
            geocoder,
            forecaster,
            state: WidgetState::new(default_city.clone()),
            default_city,
        }
    }

    /// Widget backed by the providers and default city from `config`.
    pub fn from_config(config: &Config) -> Self {
        let (geocoder, forecaster) = providers_from_config(config);
        Self::new(config.default_city.clone(), geocoder, forecaster)
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.state.set_query(text);
    }

    /// Enter `Loading` for `city`.
    pub fn begin_fetch(&mut self, city: &str) -> PendingFetch {
        let ticket = self.state.begin(city);
        PendingFetch {
            ticket,
            city: city.to_string(),
            geocoder: Arc::clone(&self.geocoder),
            forecaster: Arc::clone(&self.forecaster),
        }
    }

    /// Enter `Loading` for the default city.
    pub fn begin_mount(&mut self) -> PendingFetch {
        let city = self.default_city.clone();
        self.begin_fetch(&city)
    }

    /// Enter `Loading` for the current query, or `None` when it is blank.
    pub fn begin_submit(&mut self) -> Option<PendingFetch> {
        let city = self.state.submission()?;
        Some(self.begin_fetch(&city))
    }

    /// Record a finished fetch. Only the most recently started fetch is
    /// applied; older ones come back as [`Settlement::Superseded`].
    pub fn settle(&mut self, done: CompletedFetch) -> Settlement {
        self.state.settle(done.ticket, done.outcome)
    }

    /// Initial fetch for the default city.
    pub async fn mount(&mut self) -> Settlement {
        let done = self.begin_mount().run().await;
        self.settle(done)
    }

    /// Fetch the current query unless it is blank. Returns `None` when
    /// nothing was submitted.
    pub async fn submit(&mut self) -> Option<Settlement> {
        let done = self.begin_submit()?.run().await;
        Some(self.settle(done))
    }

    /// Run the pipeline for `city` and record the outcome. Failures end up
    /// as the widget's error message and never propagate.
    pub async fn fetch_weather(&mut self, city: &str) -> Settlement {
        let done = self.begin_fetch(city).run().await;
        self.settle(done)
    }
}
