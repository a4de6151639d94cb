use reqwest::StatusCode;

/// Every way a fetch can fail. The widget only ever shows the message.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("City not found")]
    CityNotFound,

    #[error("Network error while calling {service}: {source}")]
    Http {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} request failed with status {status}: {reason}")]
    Status {
        service: &'static str,
        status: StatusCode,
        reason: String,
    },

    #[error("Failed to parse {service} response: {source}")]
    Decode {
        service: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
