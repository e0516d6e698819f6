use crate::data::poi::{Poi, PoiId};
use serde::{Deserialize, Serialize};

/// GeoJSON geometry. Only points are produced for discovered articles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJsonGeometry {
    Point { coordinates: [f64; 2] },
}

/// Properties attached to every article feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoiProperties {
    pub pageid: PoiId,
    pub title: String,
}

/// GeoJSON feature with geometry and properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct GeoJsonFeature {
    pub id: PoiId,
    pub geometry: GeoJsonGeometry,
    pub properties: PoiProperties,
}

impl From<&Poi> for GeoJsonFeature {
    fn from(poi: &Poi) -> Self {
        Self {
            id: poi.id().clone(),
            geometry: GeoJsonGeometry::Point {
                coordinates: poi.coordinates().to_lon_lat(),
            },
            properties: PoiProperties {
                pageid: poi.id().clone(),
                title: poi.title().to_string(),
            },
        }
    }
}

/// The point collection the rendering collaborator consumes: every known
/// article, in discovery order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    features: Vec<GeoJsonFeature>,
}

impl FeatureCollection {
    pub fn from_pois(pois: &[Poi]) -> Self {
        Self {
            features: pois.iter().map(GeoJsonFeature::from).collect(),
        }
    }

    /// Appends one article after those already present
    pub fn push(&mut self, poi: &Poi) {
        self.features.push(GeoJsonFeature::from(poi));
    }

    pub fn features(&self) -> &[GeoJsonFeature] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Serializes to a GeoJSON document
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
