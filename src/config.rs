//! Configuration management for the `SkyChat` assistant
//!
//! Handles loading configuration from an optional file and environment
//! variables, and provides validation for all configuration settings.

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::SkyChatError;

/// Minimum plausible length of an OpenWeatherMap API key. Anything shorter
/// (including the empty string) is treated as missing; no live validation
/// against the provider is performed.
const MIN_API_KEY_LEN: usize = 16;

/// Root configuration structure for the `SkyChat` assistant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkyChatConfig {
    /// Weather provider configuration
    pub weather: WeatherConfig,
    /// LLM agent configuration
    pub agent: AgentConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Weather provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// OpenWeatherMap API key
    pub api_key: Option<String>,
    /// Geocoding endpoint URL
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,
    /// One-call endpoint URL
    #[serde(default = "default_onecall_url")]
    pub onecall_url: String,
    /// Unit system requested from the provider
    #[serde(default = "default_units")]
    pub units: String,
    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u32,
}

/// LLM agent settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// API key for the OpenAI-compatible chat endpoint
    pub api_key: Option<String>,
    /// Base URL of the OpenAI-compatible API
    #[serde(default = "default_agent_base_url")]
    pub base_url: String,
    /// Chat model identifier
    #[serde(default = "default_model")]
    pub model: String,
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tool-calling round trips per user turn
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
    /// Number of conversation messages retained between turns
    #[serde(default = "default_memory_window")]
    pub memory_window: usize,
    /// Request timeout in seconds
    #[serde(default = "default_agent_timeout")]
    pub timeout_seconds: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_geocoding_url() -> String {
    "http://api.openweathermap.org/geo/1.0/direct".to_string()
}

fn default_onecall_url() -> String {
    "https://api.openweathermap.org/data/3.0/onecall".to_string()
}

fn default_units() -> String {
    "metric".to_string()
}

fn default_weather_timeout() -> u32 {
    30
}

fn default_agent_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_iterations() -> u32 {
    3
}

fn default_memory_window() -> usize {
    20
}

fn default_agent_timeout() -> u32 {
    60
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for SkyChatConfig {
    fn default() -> Self {
        Self {
            weather: WeatherConfig::default(),
            agent: AgentConfig::default(),
            logging: LoggingConfig {
                level: default_log_level(),
                format: default_log_format(),
            },
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            geocoding_url: default_geocoding_url(),
            onecall_url: default_onecall_url(),
            units: default_units(),
            timeout_seconds: default_weather_timeout(),
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_agent_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_iterations: default_max_iterations(),
            memory_window: default_memory_window(),
            timeout_seconds: default_agent_timeout(),
        }
    }
}

/// Check whether a provider API key looks usable.
///
/// Keys shorter than 16 characters are treated as invalid or missing; any
/// longer string passes. The key is never verified against the provider.
#[must_use]
pub fn is_valid_api_key(key: &str) -> bool {
    key.len() >= MIN_API_KEY_LEN
}

impl WeatherConfig {
    /// Whether a plausible API key is configured
    #[must_use]
    pub fn has_valid_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(is_valid_api_key)
    }
}

impl SkyChatConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from a specific file path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| PathBuf::from("config.toml"));
        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides: SKYCHAT__WEATHER__API_KEY etc.
        builder = builder.add_source(
            Environment::with_prefix("SKYCHAT")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: SkyChatConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_env_keys();
        config.validate()?;

        Ok(config)
    }

    /// Fall back to the provider-conventional environment variables when the
    /// file and prefixed sources leave the keys unset.
    pub fn apply_env_keys(&mut self) {
        if self.weather.api_key.is_none() {
            self.weather.api_key = std::env::var("OPENWEATHERMAP_API_KEY").ok();
        }
        if self.agent.api_key.is_none() {
            self.agent.api_key = std::env::var("OPENAI_API_KEY").ok();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        if self.weather.timeout_seconds == 0 || self.weather.timeout_seconds > 300 {
            return Err(SkyChatError::config(
                "Weather timeout must be between 1 and 300 seconds",
            )
            .into());
        }

        if !matches!(self.weather.units.as_str(), "standard" | "metric" | "imperial") {
            return Err(SkyChatError::config(format!(
                "Unknown unit system '{}': expected standard, metric, or imperial",
                self.weather.units
            ))
            .into());
        }

        if self.agent.max_iterations == 0 {
            return Err(SkyChatError::config("Agent max_iterations must be at least 1").into());
        }

        if !(0.0..=2.0).contains(&self.agent.temperature) {
            return Err(SkyChatError::config(format!(
                "Agent temperature must be between 0.0 and 2.0, got: {}",
                self.agent.temperature
            ))
            .into());
        }

        if !matches!(
            self.logging.level.as_str(),
            "error" | "warn" | "info" | "debug" | "trace"
        ) {
            return Err(SkyChatError::config(format!(
                "Unknown log level '{}'",
                self.logging.level
            ))
            .into());
        }

        Ok(())
    }
}
