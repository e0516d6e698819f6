pub mod config;
pub mod constants;
pub mod geo;
pub mod viewport;

// Re-exports for convenience
pub use config::{DriverConfig, GeoSearchConfig, SessionConfig};
pub use geo::{LatLng, LatLngBounds};
pub use viewport::Viewport;
