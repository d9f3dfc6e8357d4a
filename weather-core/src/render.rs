//! Markup rendering for a normalized weather payload.
//!
//! The output is a fragment meant to replace the whole content of the
//! `weatherData` container.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::model::{ForecastDay, Scalar, WeatherPayload};

/// Number of forecast days shown.
pub const FORECAST_DAYS: usize = 5;

const NOT_AVAILABLE: &str = "N/A";

/// Render current conditions, the forecast and location info as one fragment.
pub fn render_weather(payload: &WeatherPayload) -> String {
    let mut html = render_current(payload);
    html.push_str(&render_forecast(payload.days.as_deref().unwrap_or_default()));
    html.push_str(&render_location(payload));
    html
}

fn render_current(payload: &WeatherPayload) -> String {
    let current = payload.current_conditions.clone().unwrap_or_default();

    format!(
        "<div class=\"weather-summary\">\n\
         \x20 <h3>Current Conditions</h3>\n\
         \x20 <p><strong>Temperature:</strong> {} °F</p>\n\
         \x20 <p><strong>Conditions:</strong> {}</p>\n\
         \x20 <p><strong>Humidity:</strong> {}%</p>\n\
         \x20 <p><strong>Wind:</strong> {} mph</p>\n\
         </div>\n",
        value_or_na(&current.temp),
        value_or_na(&current.conditions),
        value_or_na(&current.humidity),
        value_or_na(&current.windspeed),
    )
}

fn render_forecast(days: &[ForecastDay]) -> String {
    let entries = if days.is_empty() {
        "    <p>No forecast data available</p>\n".to_string()
    } else {
        days.iter().take(FORECAST_DAYS).map(render_day).collect()
    };

    format!(
        "<div class=\"forecast\">\n\
         \x20 <h3>Next Few Days</h3>\n\
         \x20 <div class=\"forecast-days\">\n\
         {entries}\
         \x20 </div>\n\
         </div>\n"
    )
}

// Day values are shown as given; only absent ones become `N/A`.
fn render_day(day: &ForecastDay) -> String {
    let date = day.datetime.as_deref().map(format_day).unwrap_or_else(|| NOT_AVAILABLE.to_string());

    format!(
        "    <div class=\"forecast-day\">\n\
         \x20     <h4>{}</h4>\n\
         \x20     <p>High: {} °F</p>\n\
         \x20     <p>Low: {} °F</p>\n\
         \x20     <p>{}</p>\n\
         \x20   </div>\n",
        escape(&date),
        value_or_missing(&day.tempmax),
        value_or_missing(&day.tempmin),
        value_or_missing(&day.conditions),
    )
}

fn render_location(payload: &WeatherPayload) -> String {
    format!(
        "<div class=\"location-info\">\n\
         \x20 <h3>Location Information</h3>\n\
         \x20 <p><strong>Address:</strong> {}</p>\n\
         \x20 <p><strong>Timezone:</strong> {}</p>\n\
         \x20 <p><strong>Latitude:</strong> {}</p>\n\
         \x20 <p><strong>Longitude:</strong> {}</p>\n\
         </div>\n",
        value_or_na(&payload.resolved_address),
        value_or_na(&payload.timezone),
        value_or_na(&payload.latitude),
        value_or_na(&payload.longitude),
    )
}

/// Escaped value, or `N/A` when absent or falsy.
fn value_or_na(value: &Option<Scalar>) -> String {
    match value {
        Some(v) if v.is_present() => escape(&v.to_string()),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Escaped value, or `N/A` only when absent.
fn value_or_missing(value: &Option<Scalar>) -> String {
    match value {
        Some(v) => escape(&v.to_string()),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Format a forecast date like `Mon, Jan 15`.
///
/// Accepts plain dates, naive date-times and RFC 3339 timestamps. The calendar
/// date is used as given, without shifting it into the local time zone.
pub fn format_day(raw: &str) -> String {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()));

    match date {
        Some(date) => date.format("%a, %b %-d").to_string(),
        None => "Invalid Date".to_string(),
    }
}

/// Escape text for interpolation into HTML element content or attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
