//! Best-effort geolocation of the visitor for the overlay label.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SceneError;

/// Label shown when the lookup fails or is incomplete.
pub const UNKNOWN_LOCATION: &str = "Last visit from Unknown location";

/// The fields the overlay reads from the lookup response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationData {
    /// City name.
    #[serde(default)]
    pub city: Option<String>,
    /// Country name.
    #[serde(default)]
    pub country_name: Option<String>,
    /// Set by the service when it refuses the lookup (a flag or a
    /// message, depending on the service).
    #[serde(default)]
    pub error: Option<Value>,
    /// Why the lookup was refused.
    #[serde(default)]
    pub reason: Option<String>,
}

impl LocationData {
    /// Parse a JSON response body.
    pub fn from_json(body: &str) -> Result<Self, SceneError> {
        serde_json::from_str(body).map_err(|e| SceneError::Location(e.to_string()))
    }

    /// Whether the service reported an error.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.error
            .as_ref()
            .is_some_and(|e| !matches!(e, Value::Bool(false) | Value::Null))
    }

    /// City and country, when both are present and non-empty and the
    /// service did not report an error.
    #[must_use]
    pub fn place(&self) -> Option<(&str, &str)> {
        if self.is_error() {
            return None;
        }
        let city = self.city.as_deref().filter(|s| !s.is_empty())?;
        let country = self.country_name.as_deref().filter(|s| !s.is_empty())?;
        Some((city, country))
    }
}

/// Overlay text for a place.
#[must_use]
pub fn location_label(place: Option<(&str, &str)>) -> String {
    match place {
        Some((city, country)) => format!("Last visit from {city}, {country}"),
        None => UNKNOWN_LOCATION.to_owned(),
    }
}

/// Blocking source of [`LocationData`]. A single attempt; callers do not
/// retry.
pub trait LocationSource {
    /// Look up the caller's location.
    fn fetch(&self) -> Result<LocationData, SceneError>;
}

/// `ipapi`-style JSON endpoint over HTTPS.
#[cfg(feature = "net")]
#[derive(Debug, Clone)]
pub struct IpApiClient {
    endpoint: String,
}

#[cfg(feature = "net")]
impl IpApiClient {
    /// Client for `endpoint`.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

#[cfg(feature = "net")]
impl LocationSource for IpApiClient {
    fn fetch(&self) -> Result<LocationData, SceneError> {
        log::debug!("looking up visitor location at {}", self.endpoint);
        let body = ureq::get(&self.endpoint)
            .call()
            .map_err(|e| SceneError::Location(e.to_string()))?
            .into_body()
            .read_to_string()
            .map_err(|e| SceneError::Location(e.to_string()))?;
        LocationData::from_json(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_response_names_the_place() {
        let data = LocationData::from_json(
            r#"{"ip":"1.2.3.4","city":"Lisbon","country_name":"Portugal"}"#,
        )
        .unwrap();
        assert_eq!(
            location_label(data.place()),
            "Last visit from Lisbon, Portugal"
        );
        assert!(LocationData::from_json("not json").is_err());
    }

    #[test]
    fn missing_or_empty_fields_fall_back() {
        let data = LocationData::from_json(
            r#"{"error":true,"reason":"RateLimited","city":"Oslo","country_name":"Norway"}"#,
        )
        .unwrap();
        assert!(data.is_error());
        assert_eq!(data.reason.as_deref(), Some("RateLimited"));
        assert_eq!(location_label(data.place()), UNKNOWN_LOCATION);

        let data = LocationData::from_json(r#"{"city":"","country_name":"X"}"#)
            .unwrap();
        assert_eq!(location_label(data.place()), UNKNOWN_LOCATION);

        let data = LocationData::from_json("{}").unwrap();
        assert_eq!(data.place(), None);
    }
}
