use crate::{
    error::WeatherError,
    model::{LocationQuery, WeatherResponse},
    render::render_weather,
    transport::WeatherTransport,
    view::ViewState,
};

/// Drives one lookup: validate, show loading, fetch, then render or fail.
///
/// Overlapping submissions are not serialized. Each one writes the view when
/// it completes, so the last to finish wins.
#[derive(Debug)]
pub struct WeatherRequestHandler<T> {
    transport: T,
}

impl<T: WeatherTransport> WeatherRequestHandler<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run the whole flow for the raw text of the location field.
    pub async fn submit(&self, view: &mut ViewState, raw_location: &str) -> Result<(), WeatherError> {
        let query = begin(view, raw_location)?;
        let result = self.transport.fetch(&query).await;
        complete(view, &query, result)
    }
}

/// Validate the input and put the view into the loading state.
///
/// Blank input raises an alert and leaves the panels untouched.
pub fn begin(view: &mut ViewState, raw_location: &str) -> Result<LocationQuery, WeatherError> {
    let query = match LocationQuery::parse(raw_location) {
        Ok(query) => query,
        Err(err) => {
            view.show_alert(err.to_string());
            return Err(err);
        }
    };

    view.start_loading();
    Ok(query)
}

/// Apply the outcome of a request started with [`begin`].
pub fn complete(
    view: &mut ViewState,
    query: &LocationQuery,
    result: Result<WeatherResponse, WeatherError>,
) -> Result<(), WeatherError> {
    let data = match result {
        Ok(data) => data,
        Err(err) => {
            tracing::error!("Error fetching weather: {err}");
            view.show_error();
            return Err(err);
        }
    };

    view.stop_loading();
    view.location_name = query.to_string();
    view.data_source = data.source_label().to_string();
    view.data_source_class = data.source_class().to_string();
    view.time_info = data.time_info();

    match data.normalize_weather() {
        Ok(payload) => {
            view.show_results(render_weather(&payload));
            Ok(())
        }
        Err(err) => {
            tracing::error!("Error parsing weather data: {err}");
            tracing::error!("Raw weather data: {:?}", data.weather);
            view.show_error();
            Err(err)
        }
    }
}
