use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;

use crate::language_utils;
use crate::tracks::LanguagePreference;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Language codes used when a request names none, most preferred first
    #[serde(default = "default_languages")]
    pub default_languages: Vec<String>,

    /// Caption source settings
    #[serde(default)]
    pub source: SourceConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Caption source type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceProvider {
    // @provider: YouTube InnerTube API
    #[default]
    YouTube,
    // @provider: In-memory demo catalog
    Mock,
}

impl SourceProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::YouTube => "YouTube",
            Self::Mock => "Mock",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::YouTube => "youtube".to_string(),
            Self::Mock => "mock".to_string(),
        }
    }
}

impl std::fmt::Display for SourceProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for SourceProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "youtube" => Ok(Self::YouTube),
            "mock" => Ok(Self::Mock),
            _ => Err(anyhow!("Invalid caption source: {}", s)),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    /// Address to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Caption source configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SourceConfig {
    /// Which caption source to use
    #[serde(default)]
    pub provider: SourceProvider,

    /// Accept-Language header sent upstream; affects track display names
    #[serde(default = "default_accept_language")]
    pub accept_language: String,

    /// Upstream request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            provider: SourceProvider::default(),
            accept_language: default_accept_language(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_languages() -> Vec<String> {
    vec!["pt".to_string(), "en".to_string()]
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_accept_language() -> String {
    "en-US".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.default_languages.is_empty() {
            return Err(anyhow!("default_languages must contain at least one language code"));
        }
        for code in &self.default_languages {
            language_utils::validate_language_code(code)
                .with_context(|| format!("Invalid entry in default_languages: '{}'", code))?;
        }

        if self.server.host.trim().is_empty() {
            return Err(anyhow!("server.host must not be empty"));
        }

        if self.source.timeout_secs == 0 {
            return Err(anyhow!("source.timeout_secs must be greater than zero"));
        }

        Ok(())
    }

    /// Preference list used when a request carries no languages
    pub fn default_preference(&self) -> Result<LanguagePreference> {
        LanguagePreference::new(&self.default_languages)
    }

    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Write configuration as pretty-printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig::default(),
            default_languages: default_languages(),
            source: SourceConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
