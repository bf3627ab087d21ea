use geo::{Bearing, Distance, Haversine, Point, Rhumb};

/// Default projection center (longitude, latitude), the reference point of
/// the dataset this viewer was built around.
pub const DEFAULT_CENTER: [f64; 2] = [120.7521346, 30.7579863];

/// Planar units are meters divided by this factor.
const PLANAR_SCALE: f64 = 100.0;

/// Project a geographic position into the local planar frame around `center`.
///
/// Distance is the great-circle surface distance (spherical earth), bearing
/// is the rhumb-line bearing from the position toward the center, and the
/// offset is added to the center's raw longitude/latitude before scaling.
/// The result is negated on x and divided by the planar scale.
///
/// This is a stable local approximation, not a conformal projection: using
/// the center's raw degrees as an additive origin means error grows with
/// distance from the center. Positions reasonably close to the center are
/// the supported input. NaN ordinates propagate to the output uncorrected.
pub fn planar_position(position: Point<f64>, center: Point<f64>) -> [f64; 2] {
    let distance = Haversine::distance(position, center);

    // Coincident points have no defined bearing; the offset is zero anyway.
    if distance == 0.0 {
        return [-center.x() / PLANAR_SCALE, center.y() / PLANAR_SCALE];
    }

    let bearing = Rhumb::bearing(position, center).rem_euclid(360.0);
    let bearing_rad = bearing.to_radians();

    let x = center.x() + distance * bearing_rad.cos();
    let y = center.y() + distance * bearing_rad.sin();

    [-x / PLANAR_SCALE, y / PLANAR_SCALE]
}
