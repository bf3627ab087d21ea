#[cfg(test)]
mod tests {
    use crate::buildings::{build_city, BuildConfig};
    use crate::error::BuildError;

    fn city_with_two_features() -> String {
        serde_json::json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": { "name": "block-a" },
                    "geometry": {
                        "type": "MultiPolygon",
                        "coordinates": [[[
                            [120.7521346, 30.7579863, 50.0],
                            [120.7530000, 30.7579863, 50.0],
                            [120.7530000, 30.7588000, 50.0],
                            [120.7521346, 30.7588000, 50.0]
                        ]]]
                    }
                },
                {
                    "type": "Feature",
                    "geometry": {
                        "type": "MultiPolygon",
                        "coordinates": [[[
                            [120.7540000, 30.7579863, 20.0],
                            [120.7548000, 30.7579863, 20.0],
                            [120.7548000, 30.7586000, 20.0]
                        ]]]
                    }
                }
            ]
        })
        .to_string()
    }

    #[test]
    fn property_less_features_are_skipped_not_fatal() {
        let output = build_city(&city_with_two_features(), &BuildConfig::default()).unwrap();

        assert_eq!(output.stats.features_total, 2);
        assert_eq!(output.stats.features_skipped, 1);
        assert_eq!(output.stats.solids, 1);

        // One square footprint: 4 corners on two layers.
        assert!(output.geometry.has_data);
        assert_eq!(output.geometry.vertex_count(), 8);
        assert_eq!(output.geometry.triangle_count(), 12);
        assert_eq!(output.stats.vertices, 8);
    }

    #[test]
    fn extrusion_depth_follows_the_height_ordinate() {
        let output = build_city(&city_with_two_features(), &BuildConfig::default()).unwrap();
        let bbox = output.geometry.bounding_box.unwrap();
        // Height ordinate 50 at the default scale of 0.01.
        assert_eq!(bbox.min[2], 0.0);
        assert_eq!(bbox.max[2], 0.5);
    }

    #[test]
    fn negative_height_clamps_to_a_flat_solid() {
        let input = serde_json::json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {},
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [[[
                        [120.752, 30.758, -10.0],
                        [120.753, 30.758, -10.0],
                        [120.753, 30.759, -10.0],
                        [120.752, 30.759, -10.0]
                    ]]]
                }
            }]
        })
        .to_string();

        let output = build_city(&input, &BuildConfig::default()).unwrap();
        assert_eq!(output.stats.solids, 1);
        let bbox = output.geometry.bounding_box.unwrap();
        assert_eq!(bbox.min[2], 0.0);
        assert_eq!(bbox.max[2], 0.0);
    }

    #[test]
    fn empty_ring_is_a_diagnosable_error() {
        let input = serde_json::json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {},
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [[[]]]
                }
            }]
        })
        .to_string();

        let err = build_city(&input, &BuildConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            BuildError::DegenerateRing { feature: 0, ring: 0 }
        ));
    }

    #[test]
    fn nothing_to_merge_is_reported_not_deferred() {
        let empty = r#"{"type": "FeatureCollection", "features": []}"#;
        assert!(matches!(
            build_city(empty, &BuildConfig::default()),
            Err(BuildError::NothingToRender)
        ));

        // Same when every feature is filtered out.
        let all_skipped = serde_json::json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [[[[120.75, 30.75, 5.0]]]]
                }
            }]
        })
        .to_string();
        assert!(matches!(
            build_city(&all_skipped, &BuildConfig::default()),
            Err(BuildError::NothingToRender)
        ));
    }

    #[test]
    fn unparseable_input_is_a_parse_error() {
        let err = build_city("not geojson at all", &BuildConfig::default()).unwrap_err();
        assert!(matches!(err, BuildError::Parse(_)));
    }

    #[test]
    fn merged_vertex_count_is_the_sum_over_solids() {
        // Two eligible square features: each contributes an 8-vertex box.
        let input = serde_json::json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": {
                        "type": "MultiPolygon",
                        "coordinates": [[[
                            [120.752, 30.758, 30.0],
                            [120.753, 30.758, 30.0],
                            [120.753, 30.759, 30.0],
                            [120.752, 30.759, 30.0]
                        ]]]
                    }
                },
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": {
                        "type": "MultiPolygon",
                        "coordinates": [[[
                            [120.755, 30.758, 60.0],
                            [120.756, 30.758, 60.0],
                            [120.756, 30.759, 60.0],
                            [120.755, 30.759, 60.0]
                        ]]]
                    }
                }
            ]
        })
        .to_string();

        let output = build_city(&input, &BuildConfig::default()).unwrap();
        assert_eq!(output.stats.solids, 2);
        assert_eq!(output.geometry.vertex_count(), 16);
        let indices = output.geometry.indices.unwrap();
        assert!(indices.iter().all(|&idx| (idx as usize) < 16));
        // The second solid's indices must address the second vertex block.
        assert!(indices.iter().any(|&idx| idx >= 8));
    }

    #[test]
    fn polygon_typed_geometry_builds_too() {
        let input = serde_json::json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[
                        [120.752, 30.758, 12.0],
                        [120.753, 30.758, 12.0],
                        [120.753, 30.759, 12.0],
                        [120.752, 30.759, 12.0]
                    ]]
                }
            }]
        })
        .to_string();

        let output = build_city(&input, &BuildConfig::default()).unwrap();
        assert_eq!(output.stats.solids, 1);
        assert_eq!(output.geometry.vertex_count(), 8);
    }
}
