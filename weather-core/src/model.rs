use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::WeatherError;

/// A trimmed, non-empty location typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationQuery(String);

impl LocationQuery {
    pub fn parse(raw: &str) -> Result<Self, WeatherError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(WeatherError::EmptyLocation);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body of `POST /weather`.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherRequest<'a> {
    pub location: &'a str,
}

impl<'a> From<&'a LocationQuery> for WeatherRequest<'a> {
    fn from(query: &'a LocationQuery) -> Self {
        Self { location: query.as_str() }
    }
}

/// Envelope returned by the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeatherResponse {
    pub source: Option<String>,
    pub cached_at: Option<String>,
    pub fetched_at: Option<String>,
    pub cache_expires: Option<String>,
    /// Either a JSON-encoded string or an already structured object.
    pub weather: Option<Value>,
}

impl WeatherResponse {
    pub fn is_from_cache(&self) -> bool {
        self.source.as_deref() == Some("cache")
    }

    /// Source label shown to the user, `"API"` when the server did not say.
    pub fn source_label(&self) -> &str {
        self.non_empty_source().unwrap_or("API")
    }

    /// CSS class for the source label, `"api"` when the server did not say.
    pub fn source_class(&self) -> &str {
        self.non_empty_source().unwrap_or("api")
    }

    fn non_empty_source(&self) -> Option<&str> {
        self.source.as_deref().filter(|s| !s.is_empty())
    }

    /// Sentence describing when the data was produced, empty if unknown.
    pub fn time_info(&self) -> String {
        if self.is_from_cache() {
            format!("Retrieved from cache at: {}", or_na(self.cached_at.as_deref()))
        } else if let Some(fetched_at) = self.fetched_at.as_deref().filter(|s| !s.is_empty()) {
            format!(
                "Fetched from API at: {}. Cache expires: {}",
                fetched_at,
                or_na(self.cache_expires.as_deref())
            )
        } else {
            String::new()
        }
    }

    /// Turn the `weather` field into a typed payload.
    pub fn normalize_weather(&self) -> Result<WeatherPayload, WeatherError> {
        match &self.weather {
            Some(Value::String(encoded)) => serde_json::from_str(encoded)
                .map_err(|e| WeatherError::Payload(format!("weather string is not valid JSON: {e}"))),
            Some(value @ Value::Object(_)) => WeatherPayload::deserialize(value)
                .map_err(|e| WeatherError::Payload(format!("unexpected weather object: {e}"))),
            Some(Value::Null) | None => {
                Err(WeatherError::Payload("response has no weather data".to_string()))
            }
            Some(other) => Err(WeatherError::Payload(format!(
                "weather must be a string or an object, got {}",
                json_type_name(other)
            ))),
        }
    }
}

fn or_na(value: Option<&str>) -> &str {
    value.filter(|s| !s.is_empty()).unwrap_or("N/A")
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A loosely typed scalar field of the provider payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl Scalar {
    /// `false`, `0` and `""` count as missing.
    pub fn is_present(&self) -> bool {
        match self {
            Scalar::Flag(b) => *b,
            Scalar::Number(n) => *n != 0.0 && !n.is_nan(),
            Scalar::Text(s) => !s.is_empty(),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Flag(b) => write!(f, "{b}"),
            Scalar::Number(n) => write!(f, "{n}"),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temp: Option<Scalar>,
    pub conditions: Option<Scalar>,
    pub humidity: Option<Scalar>,
    pub windspeed: Option<Scalar>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub datetime: Option<String>,
    pub tempmax: Option<Scalar>,
    pub tempmin: Option<Scalar>,
    pub conditions: Option<Scalar>,
}

/// Normalized weather data. Fields the client does not display are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherPayload {
    pub current_conditions: Option<CurrentConditions>,
    pub days: Option<Vec<ForecastDay>>,
    pub resolved_address: Option<Scalar>,
    pub timezone: Option<Scalar>,
    pub latitude: Option<Scalar>,
    pub longitude: Option<Scalar>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: Value) -> WeatherResponse {
        serde_json::from_value(value).expect("valid envelope")
    }

    #[test]
    fn location_query_trims_input() {
        let query = LocationQuery::parse("  Paris, FR \n").unwrap();
        assert_eq!(query.as_str(), "Paris, FR");
    }

    #[test]
    fn location_query_rejects_blank_input() {
        assert!(matches!(LocationQuery::parse(""), Err(WeatherError::EmptyLocation)));
        assert!(matches!(LocationQuery::parse(" \t "), Err(WeatherError::EmptyLocation)));
    }

    #[test]
    fn request_body_has_location_key() {
        let query = LocationQuery::parse("Oslo").unwrap();
        let body = serde_json::to_value(WeatherRequest::from(&query)).unwrap();
        assert_eq!(body, json!({ "location": "Oslo" }));
    }

    #[test]
    fn cache_response_labels() {
        let resp = response(json!({ "source": "cache", "cached_at": "T1", "weather": {} }));
        assert_eq!(resp.source_label(), "cache");
        assert_eq!(resp.source_class(), "cache");
        assert_eq!(resp.time_info(), "Retrieved from cache at: T1");
    }

    #[test]
    fn fresh_response_defaults_to_api() {
        let resp = response(json!({ "fetched_at": "T2", "cache_expires": "T3", "weather": {} }));
        assert_eq!(resp.source_label(), "API");
        assert_eq!(resp.source_class(), "api");
        assert_eq!(resp.time_info(), "Fetched from API at: T2. Cache expires: T3");
    }

    #[test]
    fn empty_source_is_treated_as_absent() {
        let resp = response(json!({ "source": "", "weather": {} }));
        assert_eq!(resp.source_label(), "API");
        assert_eq!(resp.time_info(), "");
    }

    #[test]
    fn other_source_is_passed_through() {
        let resp = response(json!({ "source": "api", "fetched_at": "T2", "weather": {} }));
        assert_eq!(resp.source_label(), "api");
        assert_eq!(resp.time_info(), "Fetched from API at: T2. Cache expires: N/A");
    }

    #[test]
    fn normalize_decodes_json_string() {
        let resp = response(json!({ "weather": "{\"days\":[],\"timezone\":\"UTC\"}" }));
        let payload = resp.normalize_weather().unwrap();
        assert_eq!(payload.days, Some(vec![]));
        assert_eq!(payload.timezone, Some(Scalar::Text("UTC".into())));
    }

    #[test]
    fn normalize_accepts_object_and_ignores_extra_fields() {
        let resp = response(json!({
            "weather": {
                "queryCost": 1,
                "latitude": 48.85,
                "currentConditions": { "temp": 61.2, "icon": "rain" }
            }
        }));
        let payload = resp.normalize_weather().unwrap();
        assert_eq!(payload.latitude, Some(Scalar::Number(48.85)));
        let current = payload.current_conditions.unwrap();
        assert_eq!(current.temp, Some(Scalar::Number(61.2)));
        assert_eq!(current.conditions, None);
    }

    #[test]
    fn normalize_rejects_malformed_string() {
        let resp = response(json!({ "weather": "{bad" }));
        let err = resp.normalize_weather().unwrap_err();
        assert!(matches!(err, WeatherError::Payload(_)));
    }

    #[test]
    fn normalize_rejects_missing_and_wrong_shapes() {
        assert!(response(json!({})).normalize_weather().is_err());
        assert!(response(json!({ "weather": null })).normalize_weather().is_err());
        assert!(response(json!({ "weather": 42 })).normalize_weather().is_err());

        let nested = response(json!({ "weather": { "timezone": { "name": "UTC" } } }));
        assert!(matches!(nested.normalize_weather(), Err(WeatherError::Payload(_))));
    }

    #[test]
    fn scalar_presence_follows_falsy_rules() {
        assert!(!Scalar::Number(0.0).is_present());
        assert!(!Scalar::Text(String::new()).is_present());
        assert!(!Scalar::Flag(false).is_present());
        assert!(Scalar::Number(-3.5).is_present());
        assert!(Scalar::Text("Clear".into()).is_present());
    }

    #[test]
    fn scalar_numbers_print_without_trailing_zero() {
        assert_eq!(Scalar::Number(72.0).to_string(), "72");
        assert_eq!(Scalar::Number(72.5).to_string(), "72.5");
    }
}
