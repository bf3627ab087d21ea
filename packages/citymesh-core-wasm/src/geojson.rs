use serde::Deserialize;

use crate::error::BuildError;

/// GeoJSON-like feature collection, parsed just deep enough for the
/// building pipeline.
#[derive(Deserialize, Clone)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

#[derive(Deserialize, Clone)]
pub struct Feature {
    #[serde(default)]
    pub properties: Option<serde_json::Value>,
    #[serde(default)]
    pub geometry: Option<FeatureGeometry>,
}

impl Feature {
    /// A feature participates in the build only if it carries a real
    /// properties object; `null` counts as absent.
    pub fn has_properties(&self) -> bool {
        self.properties.as_ref().is_some_and(|p| !p.is_null())
    }
}

// Geometry part of a feature
#[derive(Deserialize, Clone)]
pub struct FeatureGeometry {
    pub r#type: String,
    pub coordinates: serde_json::Value, // Using Value for flexibility with different geometry types
}

/// One polygon: exterior ring first, interior rings (holes) after. Each
/// ring position is `[lng, lat, heightHint?]`.
pub type PolygonRings = Vec<Vec<Vec<f64>>>;

pub fn parse_feature_collection(input: &str) -> Result<FeatureCollection, BuildError> {
    Ok(serde_json::from_str(input)?)
}

/// Normalize a geometry's coordinates into a list of polygons.
///
/// `Polygon` coordinates hold rings directly; `MultiPolygon` holds a list
/// of polygons. The building datasets this viewer consumes are
/// MultiPolygon-shaped, but both nestings are accepted.
pub fn polygons_of(
    geometry: &FeatureGeometry,
    feature: usize,
) -> Result<Vec<PolygonRings>, BuildError> {
    match geometry.r#type.as_str() {
        "Polygon" => {
            let rings: PolygonRings = serde_json::from_value(geometry.coordinates.clone())
                .map_err(|_| BuildError::BadGeometry { feature })?;
            Ok(vec![rings])
        }
        _ => serde_json::from_value(geometry.coordinates.clone())
            .map_err(|_| BuildError::BadGeometry { feature }),
    }
}

/// Height hint for a polygon: the third ordinate of the first ring's first
/// position. The source data carries building height in the coordinate
/// triple instead of a properties attribute; positions without a third
/// ordinate count as height zero.
pub fn height_of(polygon: &PolygonRings) -> f64 {
    polygon
        .first()
        .and_then(|ring| ring.first())
        .and_then(|position| position.get(2))
        .copied()
        .unwrap_or(0.0)
}
