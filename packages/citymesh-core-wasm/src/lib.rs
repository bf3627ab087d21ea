use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use serde_wasm_bindgen::to_value;

// Create a console module for logging
pub mod console;
// Typed error taxonomy
pub mod error;
// Shared data structures
pub mod models;
// GeoJSON feature collection parsing
pub mod geojson;
// Geographic to planar projection
pub mod projector;
// Closed planar outlines
pub mod shape;
// Buffer geometry container and merging
pub mod geometry;
// The building mesh pipeline
pub mod buildings;
// Import our geometry functions
#[path = "../geometry_functions/extrude.rs"]
pub mod extrude;

#[cfg(test)]
mod build_test;

use buildings::{build_city, BuildConfig};
use error::BuildError;

// Enable better panic messages in console during development
#[cfg(feature = "console_error_panic_hook")]
pub use console_error_panic_hook::set_once as set_panic_hook;

#[wasm_bindgen]
extern "C" {
    // JavaScript helper that fetches a static asset and resolves to its text
    #[wasm_bindgen(js_namespace = wasmJsHelpers, catch)]
    pub fn fetch(url: &str) -> Result<js_sys::Promise, JsValue>;
}

// Use the macro from our console module
#[macro_export]
macro_rules! console_log {
    ($($t:tt)*) => ($crate::console::log(&format!($($t)*)))
}

use std::sync::Once;
static INIT: Once = Once::new();

// This sets up the wasm_bindgen start functionality
#[wasm_bindgen(start)]
pub fn start() {
    INIT.call_once(|| {
        // Set the panic hook for better error messages
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();

        console_log!("citymesh core initialized");
    });
}

/// Build the merged building mesh from GeoJSON text.
///
/// Returns `{ geometry, stats }`: `geometry` carries `vertices`, `normals`,
/// `indices` and `boundingBox` ready for a `THREE.BufferGeometry`, `stats`
/// summarizes the pass. The config object is optional; see `BuildConfig`.
#[wasm_bindgen]
pub fn build_city_mesh(geojson_str: &str, config: JsValue) -> Result<JsValue, JsValue> {
    let config = parse_config(config)?;
    let output = build_city(geojson_str, &config).map_err(JsValue::from)?;
    console_log!(
        "Merged mesh ready: {} vertices from {} solids",
        output.stats.vertices,
        output.stats.solids
    );
    Ok(to_value(&output)?)
}

/// Fetch a GeoJSON asset and build the merged building mesh from it.
///
/// A failed fetch rejects the returned promise with a fatal error instead
/// of leaving the caller waiting forever.
#[wasm_bindgen]
pub async fn load_city_from_url(url: String, config: JsValue) -> Result<JsValue, JsValue> {
    let config = parse_config(config)?;

    let promise = fetch(&url).map_err(|cause| fetch_error(&url, &cause))?;
    let fetched = JsFuture::from(promise)
        .await
        .map_err(|cause| fetch_error(&url, &cause))?;
    let geojson_str = fetched.as_string().ok_or_else(|| {
        JsValue::from(BuildError::Fetch {
            url: url.clone(),
            reason: "response was not text".to_string(),
        })
    })?;

    console_log!("Fetched {} bytes of GeoJSON from {}", geojson_str.len(), url);

    let output = build_city(&geojson_str, &config).map_err(JsValue::from)?;
    Ok(to_value(&output)?)
}

fn parse_config(config: JsValue) -> Result<BuildConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        return Ok(BuildConfig::default());
    }
    serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))
}

fn fetch_error(url: &str, cause: &JsValue) -> JsValue {
    let reason = cause
        .as_string()
        .unwrap_or_else(|| format!("{:?}", cause));
    JsValue::from(BuildError::Fetch {
        url: url.to_string(),
        reason,
    })
}

// Get information about this module's capabilities
#[wasm_bindgen]
pub fn get_core_info() -> String {
    serde_json::to_string(&serde_json::json!({
        "name": "citymesh_core_wasm",
        "version": env!("CARGO_PKG_VERSION"),
        "capabilities": [
            "haversine/rhumb planar projection",
            "earcut cap triangulation",
            "single-pass geometry merge"
        ]
    }))
    .unwrap_or_else(|_| "{}".to_string())
}
