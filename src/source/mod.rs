//! Geo-query clients
//!
//! A [`GeoSource`] turns one viewport center into one bounded request against
//! an external geosearch service. Sources are stateless and single-shot: they
//! never deduplicate, filter or retry. Query cadence and deduplication belong
//! to the session driver and the accumulator.

pub mod wikipedia;

use crate::core::geo::LatLng;
use crate::data::poi::Poi;
use async_trait::async_trait;
use std::sync::Arc;

pub use wikipedia::WikipediaGeoSource;

/// Failure of a single geosearch query. The driver skips the cycle and leaves
/// session state untouched.
#[derive(Debug, thiserror::Error)]
pub enum DataSourceError {
    #[error("invalid geosearch request: {0}")]
    InvalidRequest(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("geosearch endpoint answered HTTP {0}")]
    Status(u16),

    #[error("malformed geosearch response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("geosearch API error {code}: {info}")]
    Api { code: String, info: String },

    #[error("geosearch response has no result list")]
    MissingResults,
}

/// Anything that can list POIs within a radius of a coordinate.
#[async_trait]
pub trait GeoSource: Send + Sync {
    /// Issue one query for at most `limit` POIs within `radius_m` meters of
    /// `center`, in whatever order the source returns them.
    async fn query(
        &self,
        center: LatLng,
        radius_m: u32,
        limit: u32,
    ) -> Result<Vec<Poi>, DataSourceError>;

    /// Human readable name used in log lines
    fn name(&self) -> &str {
        "geosource"
    }
}

#[async_trait]
impl<T: GeoSource + ?Sized> GeoSource for Arc<T> {
    async fn query(
        &self,
        center: LatLng,
        radius_m: u32,
        limit: u32,
    ) -> Result<Vec<Poi>, DataSourceError> {
        (**self).query(center, radius_m, limit).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Rejects requests no source should send
pub fn validate_request(center: &LatLng, radius_m: u32, limit: u32) -> Result<(), DataSourceError> {
    if !center.is_valid() {
        return Err(DataSourceError::InvalidRequest(format!(
            "center {}, {} is not a valid coordinate",
            center.lat, center.lng
        )));
    }
    if radius_m == 0 {
        return Err(DataSourceError::InvalidRequest(
            "radius must be positive".to_string(),
        ));
    }
    if limit == 0 {
        return Err(DataSourceError::InvalidRequest(
            "limit must be positive".to_string(),
        ));
    }
    Ok(())
}
