use thiserror::Error;

/// Category an error is surfaced under.
///
/// All kinds end up in the same generic error panel; the distinction is kept
/// for logging and for callers that want to react differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Transport,
    Payload,
}

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Please enter a location")]
    EmptyLocation,

    #[error("Failed to send weather request: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Weather request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode weather response: {0}")]
    InvalidResponse(#[source] serde_json::Error),

    #[error("Malformed weather payload: {0}")]
    Payload(String),
}

impl WeatherError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WeatherError::EmptyLocation => ErrorKind::Validation,
            WeatherError::Request(_)
            | WeatherError::Status { .. }
            | WeatherError::InvalidResponse(_) => ErrorKind::Transport,
            WeatherError::Payload(_) => ErrorKind::Payload,
        }
    }
}
