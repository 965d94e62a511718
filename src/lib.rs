//! `SkyChat` - weather-focused conversational assistant
//!
//! This library provides the core functionality: a geocoding + one-call
//! weather client, a fixed-format report renderer, a schema-declared tool
//! adapter, and the LLM chat agent that invokes it.

pub mod agent;
pub mod api;
pub mod config;
pub mod error;
pub mod format;
pub mod models;
pub mod prompts;
pub mod tool;

// Re-export core types for public API
pub use agent::{ChatAgent, ChatMessage};
pub use api::{GeocodeEntry, WeatherApiClient};
pub use config::{SkyChatConfig, is_valid_api_key};
pub use error::{ApiErrorKind, SkyChatError};
pub use format::render_report;
pub use models::{CurrentConditions, DailyForecast, Location, WeatherSnapshot};
pub use tool::{Tool, WeatherTool};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, SkyChatError>;
