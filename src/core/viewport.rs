use crate::core::constants::{DEFAULT_CENTER, DEFAULT_SEARCH_RADIUS_M, DEFAULT_ZOOM};
use crate::core::geo::{LatLng, LatLngBounds};
use serde::{Deserialize, Serialize};

/// The settled view of the map as far as querying is concerned: a center and
/// the radius searched around it.
///
/// The radius is a fixed policy value and is never derived from the visible
/// bounds, so consecutive queries overlap and a single query does not always
/// cover the whole visible area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    pub center: LatLng,
    /// Radius searched around the center, in meters
    pub search_radius_m: u32,
    /// The zoom level the view settled at, when the widget reports one
    pub zoom: Option<f64>,
}

impl Viewport {
    /// Creates a viewport around `center` using the default search radius
    pub fn new(center: LatLng) -> Self {
        Self {
            center,
            search_radius_m: DEFAULT_SEARCH_RADIUS_M,
            zoom: None,
        }
    }

    /// Creates a viewport from the visible bounds, centered on their midpoint
    pub fn from_bounds(bounds: &LatLngBounds) -> Self {
        Self::new(bounds.center())
    }

    /// Overrides the search radius
    pub fn with_radius(mut self, radius_m: u32) -> Self {
        self.search_radius_m = radius_m;
        self
    }

    /// Records the zoom level the view settled at
    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = Some(zoom);
        self
    }
}

impl Default for Viewport {
    fn default() -> Self {
        let (lat, lng) = DEFAULT_CENTER;
        Self::new(LatLng::new(lat, lng)).with_zoom(DEFAULT_ZOOM)
    }
}
