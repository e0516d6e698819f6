//! Engine-wide defaults for the geosearch session.
//! Keeping them in a single place makes it easier to tweak the query policy.

/// Search radius used for every query, in meters. Fixed regardless of zoom.
pub const DEFAULT_SEARCH_RADIUS_M: u32 = 5000;

/// Maximum number of articles requested per query.
pub const DEFAULT_RESULT_LIMIT: u32 = 500;

/// Upper bound the MediaWiki geosearch module accepts for `gsradius`.
pub const MAX_SEARCH_RADIUS_M: u32 = 10_000;

/// Upper bound the MediaWiki geosearch module accepts for `gslimit`.
pub const MAX_RESULT_LIMIT: u32 = 500;

/// Wikipedia language edition queried by default.
pub const DEFAULT_WIKI_LANGUAGE: &str = "nl";

/// Initial map center `(lat, lng)`: Groningen.
pub const DEFAULT_CENTER: (f64, f64) = (53.22, 6.56);

/// Initial zoom level of the map widget.
pub const DEFAULT_ZOOM: f64 = 14.0;

/// HTTP timeout applied to each geosearch request, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// User agent sent with every request; Wikimedia rejects anonymous clients.
pub const USER_AGENT: &str = concat!("geofeed/", env!("CARGO_PKG_VERSION"));
