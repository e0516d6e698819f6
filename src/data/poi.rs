use crate::core::geo::LatLng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier assigned by the upstream data source.
///
/// Wikipedia hands out integer page ids; other sources may use string keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PoiId {
    Page(u64),
    Key(String),
}

impl From<u64> for PoiId {
    fn from(id: u64) -> Self {
        PoiId::Page(id)
    }
}

impl From<&str> for PoiId {
    fn from(key: &str) -> Self {
        PoiId::Key(key.to_string())
    }
}

impl From<String> for PoiId {
    fn from(key: String) -> Self {
        PoiId::Key(key)
    }
}

impl fmt::Display for PoiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoiId::Page(id) => write!(f, "{id}"),
            PoiId::Key(key) => f.write_str(key),
        }
    }
}

/// A geotagged article discovered near the viewport.
///
/// Fields are private: once fetched a POI is never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poi {
    id: PoiId,
    title: String,
    coordinates: LatLng,
}

impl Poi {
    pub fn new(id: impl Into<PoiId>, title: impl Into<String>, coordinates: LatLng) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            coordinates,
        }
    }

    pub fn id(&self) -> &PoiId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn coordinates(&self) -> LatLng {
        self.coordinates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_conversions() {
        assert_eq!(PoiId::from(42), PoiId::Page(42));
        assert_eq!(PoiId::from("Q42"), PoiId::Key("Q42".to_string()));
        assert_eq!(PoiId::Page(7).to_string(), "7");
        assert_eq!(PoiId::from("abc").to_string(), "abc");
    }

    #[test]
    fn test_untagged_id_serialization() {
        assert_eq!(serde_json::to_string(&PoiId::Page(12)).unwrap(), "12");
        assert_eq!(serde_json::to_string(&PoiId::from("x")).unwrap(), "\"x\"");
        let id: PoiId = serde_json::from_str("99").unwrap();
        assert_eq!(id, PoiId::Page(99));
    }

    #[test]
    fn test_poi_accessors() {
        let poi = Poi::new(1u64, "Martinitoren", LatLng::new(53.2193, 6.5682));
        assert_eq!(poi.id(), &PoiId::Page(1));
        assert_eq!(poi.title(), "Martinitoren");
        assert_eq!(poi.coordinates(), LatLng::new(53.2193, 6.5682));
    }
}
