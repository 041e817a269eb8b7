use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::DEFAULT_MAX_DISTANCE_MILES;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

/// Locations of the two registry files
#[derive(Debug, Clone, Deserialize)]
pub struct DataSettings {
    #[serde(default = "default_buyers_path")]
    pub buyers_path: PathBuf,
    #[serde(default = "default_producers_path")]
    pub producers_path: PathBuf,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            buyers_path: default_buyers_path(),
            producers_path: default_producers_path(),
        }
    }
}

fn default_buyers_path() -> PathBuf { PathBuf::from("data/buyers.json") }
fn default_producers_path() -> PathBuf { PathBuf::from("data/producers.json") }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_max_distance_miles")]
    pub default_max_distance_miles: f64,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_max_distance_miles: default_max_distance_miles(),
        }
    }
}

fn default_max_distance_miles() -> f64 { DEFAULT_MAX_DISTANCE_MILES }

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,
    #[serde(default = "default_l1_cache_size")]
    pub l1_cache_size: u64,
    #[serde(default = "default_cache_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            l1_cache_size: default_l1_cache_size(),
            ttl_secs: default_cache_ttl_secs(),
        }
    }
}

fn default_cache_enabled() -> bool { true }
fn default_l1_cache_size() -> u64 { 1000 }
fn default_cache_ttl_secs() -> u64 { 300 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "full".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with MARKET_)
    /// 5. `BUYERS_PATH` / `PRODUCERS_PATH`
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., MARKET__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("MARKET")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = apply_path_overrides(settings)?;

        let settings: Self = settings.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("MARKET")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Self = settings.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the service cannot run with
    fn validate(&self) -> Result<(), ConfigError> {
        let bound = self.matching.default_max_distance_miles;
        // NaN fails this comparison too
        if !(bound > 0.0) {
            return Err(ConfigError::Message(format!(
                "matching.default_max_distance_miles must be a positive number of miles, got {}",
                bound
            )));
        }

        Ok(())
    }
}

/// Let deployments point at the registry files with plain variables
fn apply_path_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(path) = env::var("BUYERS_PATH") {
        builder = builder.set_override("data.buyers_path", path)?;
    }
    if let Ok(path) = env::var("PRODUCERS_PATH") {
        builder = builder.set_override("data.producers_path", path)?;
    }

    builder.build()
}
