use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{env, fs, path::PathBuf};

use crate::upstream::DEFAULT_API_BASE;

/// Listening port used when neither the environment nor the config file sets one.
pub const DEFAULT_PORT: u16 = 3000;

/// Process-wide configuration, read once at startup and immutable afterwards.
///
/// Environment variables (`CWA_API_KEY`, `PORT`, `CWA_API_BASE`, `APP_ENV`)
/// take precedence over the optional TOML config file.
#[derive(Debug, Clone)]
pub struct Config {
    /// CWA open-data credential. `None` or empty means every forecast request
    /// fails with an operator-facing error; startup itself still succeeds.
    pub api_key: Option<String>,

    /// Port the HTTP server listens on.
    pub port: u16,

    /// Base URL of the CWA open-data API. Overridable for tests and staging.
    pub api_base: String,

    /// Free-form label used only in the startup log line.
    pub environment: String,
}

/// Keys accepted from the optional TOML config file.
///
/// Example TOML:
/// api_key = "CWB-..."
/// port = 3000
#[derive(Debug, Clone, Default, Deserialize)]
struct FileConfig {
    api_key: Option<String>,
    port: Option<u16>,
    api_base: Option<String>,
    environment: Option<String>,
}

impl Config {
    /// Load configuration from the config file (if present) and the process
    /// environment, environment winning.
    pub fn load() -> Result<Self> {
        let file = read_file_config()?;
        Self::from_sources(file, |key| env::var(key).ok())
    }

    fn from_sources(file: FileConfig, getenv: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = match getenv("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("PORT is not a valid port number: '{raw}'"))?,
            None => file.port.unwrap_or(DEFAULT_PORT),
        };

        Ok(Config {
            api_key: getenv("CWA_API_KEY").or(file.api_key),
            port,
            api_base: getenv("CWA_API_BASE")
                .or(file.api_base)
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            environment: getenv("APP_ENV")
                .or(file.environment)
                .unwrap_or_else(|| "development".to_string()),
        })
    }

    /// Path to the optional config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("tw", "forecast-proxy", "forecast-server")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

fn read_file_config() -> Result<FileConfig> {
    let path = Config::config_file_path()?;
    if !path.exists() {
        return Ok(FileConfig::default());
    }

    let contents = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let cfg: FileConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    Ok(cfg)
}
