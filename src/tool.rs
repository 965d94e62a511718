//! Tool adapter exposing the weather pipeline to an LLM agent
//!
//! The [`Tool`] trait is the sole surface the agent runtime depends on: a
//! name, a description, a JSON schema for the arguments, and an async call.
//! [`WeatherTool`] wires the geocode → one-call → format pipeline behind it.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::api::WeatherApiClient;
use crate::format;
use crate::{Result, SkyChatError};

/// A schema-declared callable the LLM agent can invoke
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name as declared to the model
    fn name(&self) -> &str;

    /// What the tool does, phrased for the model
    fn description(&self) -> &str;

    /// JSON schema of the accepted arguments
    fn parameters_schema(&self) -> Value;

    /// Run the tool with model-provided arguments.
    ///
    /// # Errors
    /// Fails only on arguments that do not match the schema; domain-level
    /// failures are reported in the returned text so the model can relay
    /// them.
    async fn call(&self, arguments: Value) -> Result<String>;
}

/// Arguments accepted by [`WeatherTool`]
#[derive(Debug, Deserialize)]
struct WeatherQuery {
    city: String,
    country: Option<String>,
    state: Option<String>,
}

/// Tool that queries the OpenWeatherMap API
pub struct WeatherTool {
    client: WeatherApiClient,
}

impl WeatherTool {
    /// Create the tool around an API client
    #[must_use]
    pub fn new(client: WeatherApiClient) -> Self {
        Self { client }
    }

    /// Linear two-step pipeline with early exit: geocode, then one-call,
    /// then render. Stage failures become the tool's text output, prefixed
    /// with which stage failed.
    #[instrument(skip(self, query), fields(city = %query.city))]
    async fn run(&self, query: WeatherQuery) -> String {
        let location = match self
            .client
            .geocode(
                &query.city,
                query.country.as_deref(),
                query.state.as_deref(),
            )
            .await
        {
            Ok(location) => location,
            Err(e) => {
                return format!("Could not get location because of following error: {e}");
            }
        };

        let snapshot = match self.client.one_call(&location).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                return format!("Could not get weather because of following error: {e}");
            }
        };

        format::render_report(&location, &snapshot)
    }
}

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str {
        "OpenWeatherMap"
    }

    fn description(&self) -> &str {
        "A wrapper around the OpenWeatherMap API. Useful for fetching current and future \
         weather information for a specified location. Input must be at least a city \
         string (e.g. 'London'). To avoid ambiguity, a two letter country code can be \
         passed in addition to the city (e.g. 'London', 'GB'). Additionally, only for \
         cities in the US, a two letter state code can be passed (e.g. 'Ontario', 'US', 'NY')."
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "city": {
                    "type": "string",
                    "description": "The city for which to fetch weather information, e.g. 'London' or 'Berlin'."
                },
                "country": {
                    "type": "string",
                    "minLength": 2,
                    "maxLength": 2,
                    "description": "The two letter country code for the city if applicable, e.g. 'GB' or 'DE'."
                },
                "state": {
                    "type": "string",
                    "minLength": 2,
                    "maxLength": 2,
                    "description": "The two letter state code for the city if applicable, e.g. 'NY'. Only for cities in the US."
                }
            },
            "required": ["city"]
        })
    }

    async fn call(&self, arguments: Value) -> Result<String> {
        let query: WeatherQuery = serde_json::from_value(arguments)
            .map_err(|e| SkyChatError::invalid_arguments(e.to_string()))?;
        debug!("Weather tool invoked for '{}'", query.city);
        Ok(self.run(query).await)
    }
}
