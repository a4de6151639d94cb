//! Widget state and its transitions.
//!
//! A fetch moves the request from `Idle` or `Failed` to `Loading`, then to
//! `Idle` (snapshot replaced) or `Failed` (snapshot kept). Each `begin`
//! hands out a ticket; only the most recently issued ticket may settle, so
//! when two fetches overlap the one started last decides the final state.

use crate::{error::WeatherError, model::WeatherSnapshot};

/// Identifies one fetch from `begin` to `settle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTicket(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum RequestState {
    Idle,
    Loading { ticket: RequestTicket, city: String },
    Failed { message: String },
}

/// What happened to a settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Applied,
    /// A newer fetch was started after this one; its outcome was dropped.
    Superseded,
}

#[derive(Debug, Clone)]
pub struct WidgetState {
    query: String,
    snapshot: Option<WeatherSnapshot>,
    request: RequestState,
    issued: u64,
}

impl WidgetState {
    pub fn new(default_city: impl Into<String>) -> Self {
        Self {
            query: default_city.into(),
            snapshot: None,
            request: RequestState::Idle,
            issued: 0,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the input text. Never starts a fetch.
    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn request(&self) -> &RequestState {
        &self.request
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.request, RequestState::Loading { .. })
    }

    /// City of the fetch in flight, if any.
    pub fn loading_city(&self) -> Option<&str> {
        match &self.request {
            RequestState::Loading { city, .. } => Some(city),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.request {
            RequestState::Failed { message } => Some(message),
            _ => None,
        }
    }

    /// The city a submit would fetch, or `None` when the input is blank.
    ///
    /// The text is passed on as typed; trimming only decides whether to fetch.
    pub fn submission(&self) -> Option<String> {
        if self.query.trim().is_empty() {
            None
        } else {
            Some(self.query.clone())
        }
    }

    /// Enter `Loading` for `city`, clearing any previous error.
    pub fn begin(&mut self, city: &str) -> RequestTicket {
        self.issued += 1;
        let ticket = RequestTicket(self.issued);
        self.request = RequestState::Loading {
            ticket,
            city: city.to_string(),
        };
        ticket
    }

    /// Record the outcome of the fetch identified by `ticket`.
    pub fn settle(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<WeatherSnapshot, WeatherError>,
    ) -> Settlement {
        if ticket != RequestTicket(self.issued) {
            tracing::debug!(?ticket, latest = self.issued, "dropping superseded result");
            return Settlement::Superseded;
        }

        self.request = match outcome {
            Ok(snapshot) => {
                self.snapshot = Some(snapshot);
                RequestState::Idle
            }
            Err(err) => RequestState::Failed {
                message: err.to_string(),
            },
        };
        Settlement::Applied
    }
}

impl Default for WidgetState {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_CITY)
    }
}
