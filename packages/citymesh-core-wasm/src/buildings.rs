use geo::Point;
use serde::{Deserialize, Serialize};

use crate::console_log;
use crate::error::BuildError;
use crate::extrude::{extrude_outline, ExtrudeOptions};
use crate::geojson::{self, FeatureCollection, PolygonRings};
use crate::geometry::{merge_buffer_geometries, BufferGeometry};
use crate::models::BuildStats;
use crate::projector::DEFAULT_CENTER;
use crate::shape::{project_ring, PlanarOutline};

/// Scale factor from height ordinate to extrusion depth.
pub const HEIGHT_SCALE: f64 = 0.01;

fn default_center() -> [f64; 2] {
    DEFAULT_CENTER
}
fn default_height_scale() -> f64 {
    HEIGHT_SCALE
}
fn default_curve_segments() -> u32 {
    1
}

/// Build configuration handed across the wasm boundary; every field has a
/// default so JS callers can pass nothing at all.
#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfig {
    /// Projection center as `[longitude, latitude]`. Fixed for the whole
    /// build.
    #[serde(default = "default_center")]
    pub center: [f64; 2],
    #[serde(default = "default_height_scale")]
    pub height_scale: f64,
    #[serde(default = "default_curve_segments")]
    pub curve_segments: u32,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            height_scale: HEIGHT_SCALE,
            curve_segments: 1,
        }
    }
}

/// Merged geometry plus build summary, serialized back to the caller.
#[derive(Serialize, Debug)]
pub struct BuildOutput {
    pub geometry: BufferGeometry,
    pub stats: BuildStats,
}

/// Accumulates extruded solids for the single merge pass.
///
/// Created inside one build call and consumed by it, so no state outlives
/// the pipeline run.
#[derive(Default)]
pub struct MeshAccumulator {
    solids: Vec<BufferGeometry>,
}

impl MeshAccumulator {
    pub fn push(&mut self, solid: BufferGeometry) {
        self.solids.push(solid);
    }

    pub fn len(&self) -> usize {
        self.solids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solids.is_empty()
    }

    /// Merge everything accumulated into one geometry buffer.
    pub fn merge(self) -> Result<BufferGeometry, BuildError> {
        merge_buffer_geometries(self.solids)
    }
}

/// Run the whole pipeline: parse, project, extrude, merge.
pub fn build_city(geojson_str: &str, config: &BuildConfig) -> Result<BuildOutput, BuildError> {
    let collection = geojson::parse_feature_collection(geojson_str)?;
    build_city_from_features(&collection, config)
}

pub fn build_city_from_features(
    collection: &FeatureCollection,
    config: &BuildConfig,
) -> Result<BuildOutput, BuildError> {
    let center = Point::new(config.center[0], config.center[1]);
    let mut accumulator = MeshAccumulator::default();
    let mut skipped = 0usize;

    for (feature_index, feature) in collection.features.iter().enumerate() {
        // Features without a properties object are sparse data, not errors.
        if !feature.has_properties() {
            skipped += 1;
            continue;
        }

        let geometry = feature
            .geometry
            .as_ref()
            .ok_or(BuildError::BadGeometry {
                feature: feature_index,
            })?;

        for polygon in geojson::polygons_of(geometry, feature_index)? {
            let solid = extrude_polygon(&polygon, center, config, feature_index)?;
            accumulator.push(solid);
        }
    }

    console_log!(
        "Extruded {} solids from {} features ({} skipped without properties)",
        accumulator.len(),
        collection.features.len(),
        skipped
    );

    let features_total = collection.features.len();
    let solids = accumulator.len();
    let geometry = accumulator.merge()?;

    let stats = BuildStats {
        features_total,
        features_skipped: skipped,
        solids,
        vertices: geometry.vertex_count(),
        triangles: geometry.triangle_count(),
    };

    Ok(BuildOutput { geometry, stats })
}

/// Project one polygon's rings and extrude its footprint: exterior ring as
/// the contour, interior rings as cap holes.
fn extrude_polygon(
    polygon: &PolygonRings,
    center: Point<f64>,
    config: &BuildConfig,
    feature_index: usize,
) -> Result<BufferGeometry, BuildError> {
    let mut outlines = Vec::with_capacity(polygon.len());
    for (ring_index, ring) in polygon.iter().enumerate() {
        let projected = project_ring(ring, center);
        let outline = PlanarOutline::close(projected).ok_or(BuildError::DegenerateRing {
            feature: feature_index,
            ring: ring_index,
        })?;
        outlines.push(outline);
    }

    let (contour, holes) = outlines.split_first().ok_or(BuildError::DegenerateRing {
        feature: feature_index,
        ring: 0,
    })?;

    // Height rides in the third ordinate of the footprint's first position;
    // negative values clamp to zero before scaling.
    let height = geojson::height_of(polygon).max(0.0);
    let options = ExtrudeOptions {
        curve_segments: config.curve_segments,
        depth: config.height_scale * height,
    };

    extrude_outline(contour, holes, &options)
}
