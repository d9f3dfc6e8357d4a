//! Explicit view state for the weather page.
//!
//! Holds everything the page shows: which panels are visible, the summary
//! labels and the rendered weather markup. The request handler only ever
//! writes through this struct.

use crate::render::escape;

/// Where the page is in the request lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Displayed,
    ErrorShown,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub loading_visible: bool,
    pub results_visible: bool,
    pub error_visible: bool,
    /// Blocking message that has to be acknowledged, e.g. a validation failure.
    pub alert: Option<String>,
    pub location_name: String,
    pub data_source: String,
    pub data_source_class: String,
    pub time_info: String,
    pub weather_html: String,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        if self.loading_visible {
            Phase::Loading
        } else if self.error_visible {
            Phase::ErrorShown
        } else if self.results_visible {
            Phase::Displayed
        } else {
            Phase::Idle
        }
    }

    pub fn show_alert(&mut self, message: impl Into<String>) {
        self.alert = Some(message.into());
    }

    /// Show the loading indicator and hide any previous outcome.
    pub fn start_loading(&mut self) {
        self.alert = None;
        self.loading_visible = true;
        self.results_visible = false;
        self.error_visible = false;
    }

    pub fn stop_loading(&mut self) {
        self.loading_visible = false;
    }

    pub fn show_error(&mut self) {
        self.loading_visible = false;
        self.error_visible = true;
    }

    pub fn show_results(&mut self, weather_html: String) {
        self.weather_html = weather_html;
        self.results_visible = true;
    }

    /// Render a standalone page with the element ids the page script expects.
    pub fn render_page(&self) -> String {
        let mut page = String::from(PAGE_HEAD);

        page.push_str(&format!(
            "    <div id=\"loadingIndicator\"{}>Loading weather data...</div>\n",
            hidden_unless(self.loading_visible)
        ));
        page.push_str(&format!(
            "    <div id=\"errorMessage\"{}>Could not fetch weather data. Please try again.</div>\n",
            hidden_unless(self.error_visible)
        ));
        page.push_str(&format!(
            "    <section id=\"weatherResults\"{}>\n",
            hidden_unless(self.results_visible)
        ));
        page.push_str(&format!(
            "      <h2>Weather for <span id=\"locationName\">{}</span></h2>\n",
            escape(&self.location_name)
        ));
        page.push_str(&format!(
            "      <p>Source: <span id=\"dataSource\" class=\"{}\">{}</span></p>\n",
            escape(&self.data_source_class),
            escape(&self.data_source)
        ));
        page.push_str(&format!(
            "      <p id=\"timeInfo\">{}</p>\n",
            escape(&self.time_info)
        ));
        page.push_str("      <div id=\"weatherData\">\n");
        page.push_str(&self.weather_html);
        page.push_str("      </div>\n");
        page.push_str("    </section>\n");
        page.push_str(PAGE_TAIL);
        page
    }
}

fn hidden_unless(visible: bool) -> &'static str {
    if visible { "" } else { " class=\"hidden\"" }
}

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>Weather App</title>
    <style>
      .hidden { display: none; }
      .cache { color: #2e7d32; }
      .api { color: #1565c0; }
    </style>
  </head>
  <body>
    <form id="weatherForm" method="post" action="/weather">
      <input id="location" name="location" type="text" placeholder="City, address or zip">
      <button type="submit">Get Weather</button>
    </form>
"#;

const PAGE_TAIL: &str = "  </body>\n</html>\n";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_view_is_idle() {
        let view = ViewState::new();
        assert_eq!(view.phase(), Phase::Idle);
        assert!(view.alert.is_none());
    }

    #[test]
    fn loading_hides_previous_outcome() {
        let mut view = ViewState::new();
        view.show_results("<p>old</p>".into());
        view.show_error();
        view.show_alert("stale");

        view.start_loading();
        assert_eq!(view.phase(), Phase::Loading);
        assert!(!view.results_visible);
        assert!(!view.error_visible);
        assert!(view.alert.is_none());
    }

    #[test]
    fn phases_follow_panels() {
        let mut view = ViewState::new();
        view.start_loading();
        view.stop_loading();
        view.show_results(String::new());
        assert_eq!(view.phase(), Phase::Displayed);

        view.start_loading();
        view.show_error();
        assert_eq!(view.phase(), Phase::ErrorShown);
        assert!(!view.loading_visible);
    }

    #[test]
    fn page_carries_dom_contract() {
        let mut view = ViewState::new();
        view.location_name = "Rome".into();
        view.data_source = "cache".into();
        view.data_source_class = "cache".into();
        view.time_info = "Retrieved from cache at: T1".into();
        view.show_results("<div class=\"weather-summary\"></div>\n".into());

        let page = view.render_page();
        for id in [
            "weatherForm",
            "location",
            "weatherResults",
            "locationName",
            "dataSource",
            "timeInfo",
            "weatherData",
            "loadingIndicator",
            "errorMessage",
        ] {
            assert!(page.contains(&format!("id=\"{id}\"")), "missing #{id}");
        }
        assert!(page.contains("<section id=\"weatherResults\">"));
        assert!(page.contains("<div id=\"loadingIndicator\" class=\"hidden\">"));
        assert!(page.contains("<span id=\"dataSource\" class=\"cache\">cache</span>"));
        assert!(page.contains("<div class=\"weather-summary\"></div>"));
    }

    #[test]
    fn page_escapes_labels() {
        let mut view = ViewState::new();
        view.location_name = "<b>Rome</b>".into();
        let page = view.render_page();
        assert!(page.contains("&lt;b&gt;Rome&lt;/b&gt;"));
    }
}
