//! Location model for geocoded places

use serde::{Deserialize, Serialize};

/// A place resolved by the geocoding endpoint.
///
/// Read-only after creation; a new query produces a new value. Localized
/// name variants from the provider are stripped during conversion and never
/// appear here.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Place name as returned by the geocoder
    pub name: String,
    /// State code, only populated for US locations
    pub state: Option<String>,
    /// Country code (ISO 3166-1 alpha-2)
    pub country: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Location {
    /// Human-readable location string for rendered reports.
    ///
    /// US locations with a known state render as "{city}, {state}, {country}",
    /// everything else as "{city}, {country}".
    #[must_use]
    pub fn display_name(&self) -> String {
        match &self.state {
            Some(state) if self.country == "US" => {
                format!("{}, {}, {}", self.name, state, self.country)
            }
            _ => format!("{}, {}", self.name, self.country),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(state: Option<&str>, country: &str) -> Location {
        Location {
            name: "Ontario".to_string(),
            state: state.map(str::to_string),
            country: country.to_string(),
            latitude: 43.65,
            longitude: -79.38,
        }
    }

    #[test]
    fn us_location_includes_state() {
        assert_eq!(
            location(Some("NY"), "US").display_name(),
            "Ontario, NY, US"
        );
    }

    #[test]
    fn non_us_location_omits_state() {
        assert_eq!(location(Some("ON"), "CA").display_name(), "Ontario, CA");
        assert_eq!(location(None, "CA").display_name(), "Ontario, CA");
    }

    #[test]
    fn us_location_without_state_falls_back() {
        assert_eq!(location(None, "US").display_name(), "Ontario, US");
    }
}
