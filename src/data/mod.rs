pub mod geojson;
pub mod poi;

// Re-exports for convenience
pub use geojson::{FeatureCollection, GeoJsonFeature, GeoJsonGeometry, PoiProperties};
pub use poi::{Poi, PoiId};
