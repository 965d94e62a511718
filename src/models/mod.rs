//! Data models for the `SkyChat` assistant
//!
//! The core domain models organized by concern:
//! - Location: a geocoded place (name, region, coordinates)
//! - Weather: current conditions plus the daily forecast snapshot

pub mod location;
pub mod weather;

// Re-export all public types for convenient access
pub use location::Location;
pub use weather::{Condition, CurrentConditions, DailyForecast, DayTemperatures, WeatherSnapshot};
