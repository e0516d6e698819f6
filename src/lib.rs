//! # geofeed
//!
//! Incremental discovery of geotagged articles around a moving map viewport.
//!
//! Every time the view settles, a [`GeoSource`] is queried for articles within
//! a fixed radius of the center. The [`Accumulator`] merges each candidate
//! batch into a session-wide, deduplicated, never-shrinking point set, and the
//! [`Driver`] hands the full set to a [`RenderSink`] whenever it grew.

pub mod core;
pub mod data;
pub mod prelude;
pub mod rendering;
pub mod session;
pub mod source;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::{DriverConfig, GeoSearchConfig, SessionConfig},
    geo::{LatLng, LatLngBounds},
    viewport::Viewport,
};

pub use data::{geojson::FeatureCollection, poi::Poi, poi::PoiId};

pub use rendering::sink::{ChannelSink, JsonLinesSink, LogSink, RenderSink};

pub use session::{
    accumulator::{Accumulator, Reconciliation},
    driver::{CycleOutcome, Driver, DriverStats},
    events::MapEvent,
};

pub use source::{wikipedia::WikipediaGeoSource, DataSourceError, GeoSource};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Data source error: {0}")]
    DataSource(#[from] DataSourceError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Render error: {0}")]
    Render(String),
}

/// Installs `env_logger`, defaulting to `info` when `RUST_LOG` is unset.
/// Safe to call more than once.
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
