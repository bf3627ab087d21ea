use thiserror::Error;
use wasm_bindgen::JsValue;

/// Everything that can go wrong between a GeoJSON asset and a merged mesh.
///
/// Malformed features (missing `properties`) are not listed here: they are
/// expected sparse data and get filtered, not reported.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to parse GeoJSON input: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("feature {feature}: geometry is not polygonal")]
    BadGeometry { feature: usize },

    #[error("feature {feature}: ring {ring} has no points")]
    DegenerateRing { feature: usize, ring: usize },

    #[error("extrusion depth must be non-negative, got {0}")]
    NegativeDepth(f64),

    #[error("cap triangulation failed: {0}")]
    Triangulation(String),

    #[error("no building geometry to merge")]
    NothingToRender,

    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },
}

impl From<BuildError> for JsValue {
    fn from(err: BuildError) -> JsValue {
        JsValue::from_str(&err.to_string())
    }
}
