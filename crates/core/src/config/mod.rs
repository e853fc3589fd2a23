//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (REELSCORE_*)
//! 2. TOML config file (if REELSCORE_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (REELSCORE_*)
/// 2. TOML config file (if REELSCORE_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Dataset file written by the scraper and served by the API.
    ///
    /// Set via REELSCORE_DATASET_PATH environment variable.
    #[serde(default = "default_dataset_path")]
    pub dataset_path: PathBuf,

    /// Titles scraped when none are given on the command line.
    #[serde(default = "default_titles")]
    pub titles: Vec<String>,

    /// User-Agent header for outbound requests. The client default is used when unset.
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Per-request timeout in milliseconds. No timeout when unset.
    #[serde(default)]
    pub timeout_ms: Option<u64>,

    /// IMDb base URL.
    #[serde(default = "default_imdb_url")]
    pub imdb_url: String,

    /// Rotten Tomatoes base URL.
    #[serde(default = "default_rotten_tomatoes_url")]
    pub rotten_tomatoes_url: String,

    /// Metacritic base URL.
    #[serde(default = "default_metacritic_url")]
    pub metacritic_url: String,

    /// Interface the API server binds to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port the API server listens on.
    ///
    /// Set via REELSCORE_PORT environment variable.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("./data/movies.json")
}

fn default_titles() -> Vec<String> {
    ["Casper", "Dumb and Dumber", "Stand by Me", "Toy Story", "Drop Dead Fred"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_imdb_url() -> String {
    "https://www.imdb.com".into()
}

fn default_rotten_tomatoes_url() -> String {
    "https://www.rottentomatoes.com".into()
}

fn default_metacritic_url() -> String {
    "https://www.metacritic.com".into()
}

fn default_host() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    8001
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset_path: default_dataset_path(),
            titles: default_titles(),
            user_agent: None,
            timeout_ms: None,
            imdb_url: default_imdb_url(),
            rotten_tomatoes_url: default_rotten_tomatoes_url(),
            metacritic_url: default_metacritic_url(),
            host: default_host(),
            port: default_port(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest, if one is configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Socket address string for the API server.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file or environment cannot be
    /// parsed, or if validation fails after loading.
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("REELSCORE_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("REELSCORE_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
