//! Configuration for the geosearch client and the session driver
//!
//! Each struct comes with sensible defaults plus named presets, and can be
//! loaded from JSON so a deployment can point at another wiki or tune the
//! query policy without recompiling.

use crate::core::constants::{
    DEFAULT_CENTER, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_RESULT_LIMIT, DEFAULT_SEARCH_RADIUS_M,
    DEFAULT_WIKI_LANGUAGE, MAX_RESULT_LIMIT, MAX_SEARCH_RADIUS_M, USER_AGENT,
};
use crate::core::geo::LatLng;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How to reach the geosearch endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoSearchConfig {
    /// Full endpoint URL. When unset it is derived from `language`.
    pub endpoint: Option<String>,
    /// Wikipedia language edition, e.g. `nl` or `en`
    pub language: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for GeoSearchConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            language: DEFAULT_WIKI_LANGUAGE.to_string(),
            timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl GeoSearchConfig {
    /// Short timeout for tests against local servers
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 2,
            ..Self::default()
        }
    }

    /// Parses a config from JSON; missing fields fall back to defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Endpoint the client will issue requests against
    pub fn endpoint_url(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.clone(),
            None => format!("https://{}.wikipedia.org/w/api.php", self.language),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Whether this config can share the default HTTP client
    pub(crate) fn uses_default_client(&self) -> bool {
        self.timeout_secs == DEFAULT_REQUEST_TIMEOUT_SECS && self.user_agent == USER_AGENT
    }

    pub fn validate(&self) -> Result<()> {
        if self.endpoint.is_none() && self.language.trim().is_empty() {
            return Err(Error::Config(
                "either an endpoint or a wiki language is required".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(Error::Config("timeout_secs must be positive".to_string()));
        }
        Ok(())
    }
}

/// Query policy and concurrency limits for the session driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Radius searched around every settled center, in meters
    pub radius_m: u32,
    /// Maximum number of results requested per query
    pub limit: u32,
    /// How many queries may be outstanding at once
    pub max_in_flight: usize,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            radius_m: DEFAULT_SEARCH_RADIUS_M,
            limit: DEFAULT_RESULT_LIMIT,
            max_in_flight: 4,
        }
    }
}

impl DriverConfig {
    /// One query at a time, processed strictly in event order
    pub fn sequential() -> Self {
        Self {
            max_in_flight: 1,
            ..Self::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.radius_m == 0 || self.radius_m > MAX_SEARCH_RADIUS_M {
            return Err(Error::Config(format!(
                "radius_m must be within 1..={MAX_SEARCH_RADIUS_M}, got {}",
                self.radius_m
            )));
        }
        if self.limit == 0 || self.limit > MAX_RESULT_LIMIT {
            return Err(Error::Config(format!(
                "limit must be within 1..={MAX_RESULT_LIMIT}, got {}",
                self.limit
            )));
        }
        if self.max_in_flight == 0 {
            return Err(Error::Config("max_in_flight must be positive".to_string()));
        }
        Ok(())
    }
}

/// Everything a headless session needs, loadable from one JSON document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub source: GeoSearchConfig,
    pub driver: DriverConfig,
    /// Center queried on initial load
    pub start_center: LatLng,
}

impl Default for SessionConfig {
    fn default() -> Self {
        let (lat, lng) = DEFAULT_CENTER;
        Self {
            source: GeoSearchConfig::default(),
            driver: DriverConfig::default(),
            start_center: LatLng::new(lat, lng),
        }
    }
}

impl SessionConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.source.validate()?;
        config.driver.validate()?;
        if !config.start_center.is_valid() {
            return Err(Error::Config(format!(
                "start_center {}, {} is not a valid coordinate",
                config.start_center.lat, config.start_center.lng
            )));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoint_is_dutch_wikipedia() {
        let config = GeoSearchConfig::default();
        assert_eq!(config.endpoint_url(), "https://nl.wikipedia.org/w/api.php");
        assert!(config.uses_default_client());
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config = GeoSearchConfig::from_json_str(r#"{"language": "en"}"#).unwrap();
        assert_eq!(config.endpoint_url(), "https://en.wikipedia.org/w/api.php");
        assert_eq!(config.timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
    }

    #[test]
    fn test_explicit_endpoint_wins() {
        let config =
            GeoSearchConfig::from_json_str(r#"{"endpoint": "http://localhost:8080/api.php"}"#)
                .unwrap();
        assert_eq!(config.endpoint_url(), "http://localhost:8080/api.php");
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = GeoSearchConfig::from_json_str(r#"{"timeout_secs": 0}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_driver_config_bounds() {
        assert!(DriverConfig::default().validate().is_ok());
        assert!(DriverConfig::sequential().validate().is_ok());
        assert!(DriverConfig::from_json_str(r#"{"radius_m": 20000}"#).is_err());
        assert!(DriverConfig::from_json_str(r#"{"limit": 0}"#).is_err());
        assert!(DriverConfig::from_json_str(r#"{"max_in_flight": 0}"#).is_err());

        let config = DriverConfig::from_json_str(r#"{"limit": 50}"#).unwrap();
        assert_eq!(config.limit, 50);
        assert_eq!(config.radius_m, DEFAULT_SEARCH_RADIUS_M);
    }

    #[test]
    fn test_malformed_json_is_serialization_error() {
        let err = DriverConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_session_config_sections() {
        let config = SessionConfig::from_json_str(
            r#"{"source": {"language": "de"}, "driver": {"max_in_flight": 1}}"#,
        )
        .unwrap();
        assert_eq!(config.source.endpoint_url(), "https://de.wikipedia.org/w/api.php");
        assert_eq!(config.driver, DriverConfig::sequential());
        assert_eq!(config.start_center, LatLng::new(53.22, 6.56));

        assert!(SessionConfig::from_json_str(r#"{"start_center": {"lat": 95.0, "lng": 0.0}}"#)
            .is_err());
    }
}
