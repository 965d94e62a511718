//! Weather API client for OpenWeatherMap integration
//!
//! HTTP client functionality for the two-step weather pipeline: resolve a
//! place name through the geocoding endpoint, then fetch current conditions
//! and the daily forecast from the one-call endpoint. Each query is a linear
//! geocode-then-fetch sequence with early exit on failure; there is no retry
//! and no caching.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::config::WeatherConfig;
use crate::models::{Location, WeatherSnapshot};
use crate::{Result, SkyChatError};

/// Weather API client for OpenWeatherMap
#[derive(Debug, Clone)]
pub struct WeatherApiClient {
    /// HTTP client
    client: Client,
    /// Provider configuration
    config: WeatherConfig,
}

impl WeatherApiClient {
    /// Create a new weather API client
    pub fn new(config: WeatherConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_seconds.into());

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("SkyChat/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, config })
    }

    fn api_key(&self) -> &str {
        self.config.api_key.as_deref().unwrap_or_default()
    }

    /// Resolve a place name to a [`Location`] via the geocoding endpoint.
    ///
    /// The query parameter is the comma-joined `city[,state][,country]`
    /// string (state before country, included only for US cities) with a
    /// result limit of 1. The first result wins; localized name variants
    /// are dropped in the conversion.
    #[instrument(skip(self))]
    pub async fn geocode(
        &self,
        city: &str,
        country: Option<&str>,
        state: Option<&str>,
    ) -> Result<Location> {
        let query = build_query(city, country, state);
        info!("Geocoding location: '{}'", query);
        let start = Instant::now();

        let response = self
            .client
            .get(&self.config.geocoding_url)
            .query(&[
                ("q", query.as_str()),
                ("limit", "1"),
                ("appid", self.api_key()),
            ])
            .send()
            .await?;
        let response = check_status(response)?;

        let entries: Vec<GeocodeEntry> = response.json().await?;
        let entry = entries.into_iter().next().ok_or_else(|| {
            warn!("No results found for location '{}'", query);
            SkyChatError::no_results(query.clone())
        })?;

        let location = Location::from(entry);
        info!(
            "Resolved '{}' to {} ({:.4}, {:.4}) in {:.3}s",
            query,
            location.name,
            location.latitude,
            location.longitude,
            start.elapsed().as_secs_f64()
        );

        Ok(location)
    }

    /// Fetch current conditions and the daily forecast for a resolved
    /// location via the one-call endpoint.
    ///
    /// Requests the configured unit system and excludes minutely, hourly,
    /// and alert data; the response keeps up to 8 daily entries (today +
    /// 7 days) along with the timezone offset for localizing timestamps.
    #[instrument(skip(self, location), fields(name = %location.name))]
    pub async fn one_call(&self, location: &Location) -> Result<WeatherSnapshot> {
        info!(
            "Fetching weather for {} ({:.4}, {:.4})",
            location.name, location.latitude, location.longitude
        );
        let start = Instant::now();

        let response = self
            .client
            .get(&self.config.onecall_url)
            .query(&[
                ("lat", location.latitude.to_string()),
                ("lon", location.longitude.to_string()),
                ("exclude", "minutely,hourly,alerts".to_string()),
                ("units", self.config.units.clone()),
                ("appid", self.api_key().to_string()),
            ])
            .send()
            .await?;
        let response = check_status(response)?;

        let snapshot: WeatherSnapshot = response.json().await?;
        debug!(
            "One-call response carries {} daily entries",
            snapshot.daily.len()
        );
        info!(
            "Fetched weather for {} in {:.3}s",
            location.name,
            start.elapsed().as_secs_f64()
        );

        Ok(snapshot)
    }
}

/// Combine city, state, and country into the single geocoding query value.
/// State goes before country and is only included for US queries; the
/// provider resolves states nowhere else.
fn build_query(city: &str, country: Option<&str>, state: Option<&str>) -> String {
    let mut query = city.to_string();
    if let (Some(state), Some("US")) = (state, country) {
        query.push(',');
        query.push_str(state);
    }
    if let Some(country) = country {
        query.push(',');
        query.push_str(country);
    }
    query
}

/// Map a non-200 response to its status-derived error kind
fn check_status(response: Response) -> Result<Response> {
    let status = response.status().as_u16();
    if status == 200 {
        Ok(response)
    } else {
        warn!("Provider answered with status {}", status);
        Err(SkyChatError::api_status(status))
    }
}

/// Raw geocoding result as returned by the provider
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GeocodeEntry {
    /// Location name
    pub name: String,
    /// Localized name variants; dropped when converting to [`Location`]
    pub local_names: Option<HashMap<String, String>>,
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lon: f64,
    /// Country code
    pub country: String,
    /// State code (for US locations)
    pub state: Option<String>,
}

impl From<GeocodeEntry> for Location {
    fn from(entry: GeocodeEntry) -> Self {
        Location {
            name: entry.name,
            state: entry.state,
            country: entry.country,
            latitude: entry.lat,
            longitude: entry.lon,
        }
    }
}
