//! Core library for the `weather` lookup client.
//!
//! This crate defines:
//! - The request handler that turns a typed location into a rendered view
//! - The transport seam to the weather server (HTTP by default)
//! - Response models, normalization and markup rendering
//! - Client configuration
//!
//! It is used by `weather-cli`, but can also back other front ends.

pub mod config;
pub mod error;
pub mod handler;
pub mod model;
pub mod render;
pub mod transport;
pub mod view;

pub use config::Config;
pub use error::{ErrorKind, WeatherError};
pub use handler::WeatherRequestHandler;
pub use model::{LocationQuery, WeatherPayload, WeatherResponse};
pub use render::render_weather;
pub use transport::{HttpTransport, WeatherTransport};
pub use view::{Phase, ViewState};
