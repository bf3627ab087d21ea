//! Browser smoke test; run with `wasm-pack test --headless --chrome`.
#![cfg(target_arch = "wasm32")]

use citymesh_core_wasm::build_city_mesh;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn builds_a_mesh_across_the_boundary() {
    let geojson = r#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": {},
            "geometry": {
                "type": "MultiPolygon",
                "coordinates": [[[
                    [120.752, 30.758, 25.0],
                    [120.753, 30.758, 25.0],
                    [120.753, 30.759, 25.0],
                    [120.752, 30.759, 25.0]
                ]]]
            }
        }]
    }"#;

    let result = build_city_mesh(geojson, JsValue::UNDEFINED);
    assert!(result.is_ok());
}
