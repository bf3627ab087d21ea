use geo::Point;

use crate::projector::planar_position;

/// Project every position of a ring into the planar frame around `center`.
///
/// Positions with missing ordinates project to NaN rather than being
/// repaired; bad numerics stay visible instead of silently moving a
/// building.
pub fn project_ring(ring: &[Vec<f64>], center: Point<f64>) -> Vec<[f64; 2]> {
    ring.iter()
        .map(|position| {
            let lng = position.first().copied().unwrap_or(f64::NAN);
            let lat = position.get(1).copied().unwrap_or(f64::NAN);
            planar_position(Point::new(lng, lat), center)
        })
        .collect()
}

/// A closed planar outline: the projected ring with its first point
/// appended again at the end.
///
/// The closing point is appended unconditionally, so an input ring that
/// already ended on its first point closes twice over. Downstream
/// triangulation strips coincident corners, which keeps the closing rule
/// simple here: every outline ends where it started, no matter how the
/// source ring was authored.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanarOutline {
    points: Vec<[f64; 2]>,
}

impl PlanarOutline {
    /// Close a projected ring. Returns `None` for an empty ring, which the
    /// caller reports as degenerate input.
    pub fn close(mut points: Vec<[f64; 2]>) -> Option<Self> {
        let first = *points.first()?;
        points.push(first);
        Some(Self { points })
    }

    pub fn points(&self) -> &[[f64; 2]] {
        &self.points
    }
}
