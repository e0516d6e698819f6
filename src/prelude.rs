//! Prelude module for common geofeed types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use geofeed::prelude::*;`

pub use crate::core::{
    config::{DriverConfig, GeoSearchConfig, SessionConfig},
    geo::{LatLng, LatLngBounds},
    viewport::Viewport,
};

pub use crate::data::{
    geojson::{FeatureCollection, GeoJsonFeature},
    poi::{Poi, PoiId},
};

pub use crate::rendering::sink::{ChannelSink, JsonLinesSink, LogSink, RenderSink};

pub use crate::session::{
    accumulator::{Accumulator, Reconciliation},
    driver::{CycleOutcome, Driver, DriverStats},
    events::{settled, MapEvent},
};

pub use crate::source::{DataSourceError, GeoSource, WikipediaGeoSource};

pub use crate::{Error, Result};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};

pub use futures::{Stream, StreamExt};
