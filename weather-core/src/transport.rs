use std::fmt::Debug;

use async_trait::async_trait;
use reqwest::Client;

use crate::{
    error::WeatherError,
    model::{LocationQuery, WeatherRequest, WeatherResponse},
};

/// Path of the weather endpoint on the server.
pub const WEATHER_PATH: &str = "/weather";

/// Anything that can resolve a location into a weather response.
#[async_trait]
pub trait WeatherTransport: Send + Sync + Debug {
    async fn fetch(&self, query: &LocationQuery) -> Result<WeatherResponse, WeatherError>;
}

/// Talks to the weather server over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    endpoint: String,
    http: Client,
}

impl HttpTransport {
    /// `base_url` is the server root, e.g. `http://localhost:8080`.
    pub fn new(base_url: &str) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: &str, http: Client) -> Self {
        Self {
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), WEATHER_PATH),
            http,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl WeatherTransport for HttpTransport {
    async fn fetch(&self, query: &LocationQuery) -> Result<WeatherResponse, WeatherError> {
        let body = WeatherRequest::from(query);
        tracing::debug!("Sending location: {}", query);
        tracing::debug!(
            "Request body: {}",
            serde_json::to_string(&body).unwrap_or_default()
        );

        // `.json()` sets `Content-Type: application/json`.
        let res = self.http.post(&self.endpoint).json(&body).send().await?;

        let status = res.status();
        let text = res.text().await?;

        if !status.is_success() {
            return Err(WeatherError::Status {
                status: status.as_u16(),
                body: truncate_body(&text),
            });
        }

        let parsed: WeatherResponse =
            serde_json::from_str(&text).map_err(WeatherError::InvalidResponse)?;

        tracing::debug!(
            source = parsed.source.as_deref().unwrap_or("-"),
            has_weather = parsed.weather.is_some(),
            "Received weather response"
        );

        Ok(parsed)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
