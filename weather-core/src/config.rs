use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Server used when nothing else is configured.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

/// Environment variable overriding the configured server.
pub const SERVER_URL_ENV: &str = "WEATHER_SERVER_URL";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// server_url = "http://localhost:8080"
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the weather server, without the `/weather` path.
    pub server_url: Option<String>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-lookup", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Validate and store the server URL.
    pub fn set_server_url(&mut self, url: &str) -> Result<()> {
        let url = validate_server_url(url)?;
        self.server_url = Some(url);
        Ok(())
    }

    /// Resolve the server URL: flag, then environment, then file, then default.
    pub fn resolve_server_url(&self, flag: Option<&str>) -> Result<String> {
        let env = std::env::var(SERVER_URL_ENV).ok();
        self.resolve_server_url_from(flag, env.as_deref())
    }

    pub fn resolve_server_url_from(&self, flag: Option<&str>, env: Option<&str>) -> Result<String> {
        let candidate = flag
            .or(env)
            .or(self.server_url.as_deref())
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_SERVER_URL);

        validate_server_url(candidate)
    }
}

/// Check that `url` is an absolute http(s) URL; returns it trimmed.
pub fn validate_server_url(url: &str) -> Result<String> {
    let trimmed = url.trim();
    let parsed = Url::parse(trimmed).with_context(|| format!("Invalid server URL '{trimmed}'"))?;

    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.trim_end_matches('/').to_string()),
        other => Err(anyhow!(
            "Unsupported scheme '{other}' in server URL '{trimmed}'.\n\
             Hint: use an http:// or https:// address."
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_resolves_to_localhost() {
        let cfg = Config::default();
        let url = cfg.resolve_server_url_from(None, None).unwrap();
        assert_eq!(url, DEFAULT_SERVER_URL);
    }

    #[test]
    fn flag_beats_env_beats_file() {
        let cfg = Config { server_url: Some("http://file.example".into()) };

        let url = cfg.resolve_server_url_from(Some("http://flag.example"), Some("http://env.example"));
        assert_eq!(url.unwrap(), "http://flag.example");

        let url = cfg.resolve_server_url_from(None, Some("http://env.example"));
        assert_eq!(url.unwrap(), "http://env.example");

        let url = cfg.resolve_server_url_from(None, None);
        assert_eq!(url.unwrap(), "http://file.example");
    }

    #[test]
    fn set_server_url_validates() {
        let mut cfg = Config::default();

        cfg.set_server_url(" https://weather.example/ ").unwrap();
        assert_eq!(cfg.server_url.as_deref(), Some("https://weather.example"));

        let err = cfg.set_server_url("ftp://weather.example").unwrap_err();
        assert!(err.to_string().contains("Unsupported scheme"));

        assert!(cfg.set_server_url("not a url").is_err());
        assert_eq!(cfg.server_url.as_deref(), Some("https://weather.example"));
    }

    #[test]
    fn config_roundtrips_through_toml() {
        let cfg = Config { server_url: Some("http://127.0.0.1:9000".into()) };
        let text = toml::to_string_pretty(&cfg).unwrap();
        assert!(text.contains("server_url = \"http://127.0.0.1:9000\""));

        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back, cfg);

        let empty: Config = toml::from_str("").unwrap();
        assert_eq!(empty, Config::default());
    }
}
