use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::Text;
use weather_core::{
    Config, ErrorKind, HttpTransport, Phase, ViewState, WeatherRequestHandler,
    config::DEFAULT_SERVER_URL,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather lookup client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the weather server to talk to.
    Configure,

    /// Show weather for a location.
    Show {
        /// Place name, address or zip code.
        location: String,

        /// Server base URL; overrides WEATHER_SERVER_URL and the config file.
        #[arg(long)]
        server: Option<String>,

        /// Also write the resulting page as standalone HTML to this file.
        #[arg(long)]
        page: Option<PathBuf>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { location, server, page } => {
                show(&location, server.as_deref(), page).await
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;
    let current = config.server_url.clone().unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

    let url = Text::new("Weather server URL:")
        .with_default(&current)
        .prompt()
        .context("Failed to read server URL")?;

    config.set_server_url(&url)?;
    config.save()?;

    println!("Saved server URL to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(location: &str, server: Option<&str>, page: Option<PathBuf>) -> anyhow::Result<()> {
    let config = Config::load()?;
    let server_url = config.resolve_server_url(server)?;
    tracing::debug!("Using weather server {server_url}");

    let handler = WeatherRequestHandler::new(HttpTransport::new(&server_url));
    let mut view = ViewState::new();
    let outcome = handler.submit(&mut view, location).await;

    if let Some(path) = &page {
        std::fs::write(path, view.render_page())
            .with_context(|| format!("Failed to write page: {}", path.display()))?;
    }

    if let Err(err) = outcome {
        if err.kind() == ErrorKind::Validation {
            bail!("{}", view.alert.unwrap_or_else(|| err.to_string()));
        }
        bail!("Could not fetch weather data. Please try again.");
    }

    if view.phase() == Phase::Displayed {
        print_view(&view);
    }
    Ok(())
}

fn print_view(view: &ViewState) {
    println!("Weather for: {}", view.location_name);
    println!("Source: {}", view.data_source);
    if !view.time_info.is_empty() {
        println!("{}", view.time_info);
    }
    println!();
    print!("{}", view.weather_html);
}
