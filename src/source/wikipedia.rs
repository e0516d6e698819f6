use super::{validate_request, DataSourceError, GeoSource};
use crate::core::config::GeoSearchConfig;
use crate::core::constants::{DEFAULT_REQUEST_TIMEOUT_SECS, USER_AGENT};
use crate::core::geo::LatLng;
use crate::data::poi::Poi;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::time::Duration;

/// Shared async HTTP client for geosearch requests. No cookie store and no
/// auth headers, so requests never carry credentials.
pub(crate) static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        .pool_idle_timeout(Duration::from_secs(90))
        .build()
        .expect("failed to build reqwest async client")
});

/// Geo-query client for the MediaWiki `list=geosearch` API
#[derive(Debug, Clone)]
pub struct WikipediaGeoSource {
    client: Client,
    endpoint: String,
}

impl WikipediaGeoSource {
    pub fn new(config: &GeoSearchConfig) -> crate::Result<Self> {
        config.validate()?;

        let client = if config.uses_default_client() {
            HTTP_CLIENT.clone()
        } else {
            Client::builder()
                .user_agent(config.user_agent.as_str())
                .timeout(config.timeout())
                .build()
                .map_err(DataSourceError::Network)?
        };

        Ok(Self {
            client,
            endpoint: config.endpoint_url(),
        })
    }

    /// Builds the request URL for one query without sending it
    pub fn request_url(
        &self,
        center: LatLng,
        radius_m: u32,
        limit: u32,
    ) -> Result<Url, DataSourceError> {
        let radius = radius_m.to_string();
        let coord = center.to_string();
        let limit = limit.to_string();
        let params = [
            ("format", "json"),
            ("origin", "*"),
            ("action", "query"),
            ("list", "geosearch"),
            ("gsprimary", "all"),
            ("gsradius", radius.as_str()),
            ("gscoord", coord.as_str()),
            ("gslimit", limit.as_str()),
        ];
        Url::parse_with_params(&self.endpoint, &params).map_err(|e| {
            DataSourceError::InvalidRequest(format!("bad endpoint {}: {e}", self.endpoint))
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for WikipediaGeoSource {
    fn default() -> Self {
        Self {
            client: HTTP_CLIENT.clone(),
            endpoint: GeoSearchConfig::default().endpoint_url(),
        }
    }
}

#[async_trait]
impl GeoSource for WikipediaGeoSource {
    async fn query(
        &self,
        center: LatLng,
        radius_m: u32,
        limit: u32,
    ) -> Result<Vec<Poi>, DataSourceError> {
        validate_request(&center, radius_m, limit)?;
        let url = self.request_url(center, radius_m, limit)?;

        log::debug!("geosearch {} radius={}m limit={}", center, radius_m, limit);
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(DataSourceError::Status(response.status().as_u16()));
        }

        let body = response.text().await?;
        let pois = parse_geosearch_response(&body)?;
        log::debug!("geosearch {} returned {} articles", center, pois.len());
        Ok(pois)
    }

    fn name(&self) -> &str {
        "wikipedia"
    }
}

#[derive(Deserialize)]
struct GeoSearchResponse {
    query: Option<GeoSearchQuery>,
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct GeoSearchQuery {
    geosearch: Option<Vec<serde_json::Value>>,
}

#[derive(Deserialize)]
struct ApiError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    info: String,
}

#[derive(Deserialize)]
struct GeoSearchRecord {
    pageid: u64,
    lat: f64,
    lon: f64,
    title: String,
}

/// Parses a geosearch response body into POIs, in source order.
///
/// The body as a whole must be a well-formed API answer. Individual records
/// that are malformed are skipped so the rest of the batch survives.
pub fn parse_geosearch_response(body: &str) -> Result<Vec<Poi>, DataSourceError> {
    let response: GeoSearchResponse = serde_json::from_str(body)?;

    if let Some(error) = response.error {
        return Err(DataSourceError::Api {
            code: error.code,
            info: error.info,
        });
    }

    let records = response
        .query
        .and_then(|q| q.geosearch)
        .ok_or(DataSourceError::MissingResults)?;

    let mut pois = Vec::with_capacity(records.len());
    for (index, value) in records.into_iter().enumerate() {
        let record = match serde_json::from_value::<GeoSearchRecord>(value) {
            Ok(record) => record,
            Err(e) => {
                log::warn!("skipping malformed geosearch record #{}: {}", index, e);
                continue;
            }
        };

        let coordinates = LatLng::new(record.lat, record.lon);
        if !coordinates.is_valid() {
            log::warn!(
                "skipping geosearch record {} with invalid coordinates ({}, {})",
                record.pageid,
                record.lat,
                record.lon
            );
            continue;
        }

        pois.push(Poi::new(record.pageid, record.title, coordinates));
    }

    Ok(pois)
}
