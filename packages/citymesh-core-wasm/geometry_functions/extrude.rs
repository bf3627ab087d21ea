use earcutr::earcut;

use crate::error::BuildError;
use crate::geometry::{BoundingBox, BufferGeometry};
use crate::shape::PlanarOutline;

const EPSILON: f64 = 1e-10;

/// Extrusion options.
///
/// `curve_segments` is carried for parity with renderer-side extrude
/// options; polygonal footprints have no curves to tessellate, so only
/// `depth` shapes the output. No bevel support.
#[derive(Clone, Copy, Debug)]
pub struct ExtrudeOptions {
    pub curve_segments: u32,
    pub depth: f64,
}

impl Default for ExtrudeOptions {
    fn default() -> Self {
        Self {
            curve_segments: 1,
            depth: 1.0,
        }
    }
}

/// Helper function to check if points are in clockwise order
fn is_clockwise(points: &[[f64; 2]]) -> bool {
    let mut area = 0.0;
    for i in 0..points.len() {
        let j = (i + 1) % points.len();
        area += points[i][0] * points[j][1];
        area -= points[j][0] * points[i][1];
    }
    area <= 0.0
}

/// Merge coincident corners in a contour.
///
/// Outlines arrive explicitly closed (last point repeats the first) and
/// source rings are often closed a second time over; triangulation wants
/// each corner exactly once. The threshold scales with coordinate
/// magnitude.
fn merge_overlapping_points(points: &mut Vec<[f64; 2]>) {
    fn threshold_sq(a: [f64; 2], b: [f64; 2]) -> f64 {
        let scale = a[0].abs().max(a[1].abs()).max(b[0].abs()).max(b[1].abs());
        EPSILON * EPSILON * scale * scale
    }

    fn dist_sq(a: [f64; 2], b: [f64; 2]) -> f64 {
        let dx = b[0] - a[0];
        let dy = b[1] - a[1];
        dx * dx + dy * dy
    }

    let mut i = 1;
    while i < points.len() {
        if dist_sq(points[i - 1], points[i]) <= threshold_sq(points[i - 1], points[i]) {
            points.remove(i);
        } else {
            i += 1;
        }
    }

    // The closing point duplicates the first; drop it before triangulation.
    while points.len() > 1 {
        let first = points[0];
        let last = points[points.len() - 1];
        if dist_sq(first, last) <= threshold_sq(first, last) {
            points.pop();
        } else {
            break;
        }
    }
}

/// Vertex normals for an indexed mesh: per-face normals accumulated onto
/// each referenced vertex, then renormalized.
fn compute_vertex_normals(positions: &[f32], indices: &[u32]) -> Vec<f32> {
    let mut normals = vec![0.0f32; positions.len()];

    for tri in indices.chunks_exact(3) {
        let a = tri[0] as usize;
        let b = tri[1] as usize;
        let c = tri[2] as usize;

        let ax = positions[a * 3];
        let ay = positions[a * 3 + 1];
        let az = positions[a * 3 + 2];

        let v1x = positions[b * 3] - ax;
        let v1y = positions[b * 3 + 1] - ay;
        let v1z = positions[b * 3 + 2] - az;

        let v2x = positions[c * 3] - ax;
        let v2y = positions[c * 3 + 1] - ay;
        let v2z = positions[c * 3 + 2] - az;

        // Cross product to get the face normal
        let nx = v1y * v2z - v1z * v2y;
        let ny = v1z * v2x - v1x * v2z;
        let nz = v1x * v2y - v1y * v2x;

        let len = (nx * nx + ny * ny + nz * nz).sqrt();
        let (nnx, nny, nnz) = if len > 0.0 {
            (nx / len, ny / len, nz / len)
        } else {
            (0.0, 0.0, 1.0)
        };

        for &vertex in &[a, b, c] {
            normals[vertex * 3] += nnx;
            normals[vertex * 3 + 1] += nny;
            normals[vertex * 3 + 2] += nnz;
        }
    }

    for vertex in 0..positions.len() / 3 {
        let i = vertex * 3;
        let len = (normals[i] * normals[i]
            + normals[i + 1] * normals[i + 1]
            + normals[i + 2] * normals[i + 2])
            .sqrt();
        if len > 0.0 {
            normals[i] /= len;
            normals[i + 1] /= len;
            normals[i + 2] /= len;
        } else {
            normals[i] = 0.0;
            normals[i + 1] = 0.0;
            normals[i + 2] = 1.0;
        }
    }

    normals
}

fn side_walls(indices: &mut Vec<u32>, ring_start: u32, ring_len: u32, top_offset: u32) {
    for i in 0..ring_len {
        let next = (i + 1) % ring_len;
        let a = ring_start + i;
        let b = ring_start + next;
        let a_top = a + top_offset;
        let b_top = b + top_offset;

        // First triangle of the quad
        indices.push(a);
        indices.push(a_top);
        indices.push(b);

        // Second triangle of the quad
        indices.push(b);
        indices.push(a_top);
        indices.push(b_top);
    }
}

/// Extrude a closed planar outline into an indexed solid.
///
/// The contour and holes are wound consistently (contour clockwise, holes
/// counter-clockwise), deduplicated, capped top and bottom with an earcut
/// triangulation, and walled with one quad per ring edge. The axis-aligned
/// bounding box is computed and cached on the result.
///
/// A contour that degenerates below three distinct corners extrudes to an
/// empty geometry rather than an error: sliver footprints are expected in
/// sparse map data. A negative depth is rejected.
pub fn extrude_outline(
    contour: &PlanarOutline,
    holes: &[PlanarOutline],
    options: &ExtrudeOptions,
) -> Result<BufferGeometry, BuildError> {
    if options.depth < 0.0 {
        return Err(BuildError::NegativeDepth(options.depth));
    }

    let mut contour_points = contour.points().to_vec();
    merge_overlapping_points(&mut contour_points);
    if !is_clockwise(&contour_points) {
        contour_points.reverse();
    }

    if contour_points.len() < 3 {
        return Ok(BufferGeometry::empty());
    }

    let mut hole_rings: Vec<Vec<[f64; 2]>> = Vec::with_capacity(holes.len());
    for hole in holes {
        let mut points = hole.points().to_vec();
        merge_overlapping_points(&mut points);
        if points.len() < 3 {
            continue;
        }
        if is_clockwise(&points) {
            points.reverse();
        }
        hole_rings.push(points);
    }

    // Flatten contour and holes for the cap triangulation.
    let mut data: Vec<f64> = Vec::new();
    for point in &contour_points {
        data.push(point[0]);
        data.push(point[1]);
    }
    let mut hole_indices: Vec<usize> = Vec::new();
    let mut idx_offset = contour_points.len();
    for hole in &hole_rings {
        hole_indices.push(idx_offset);
        for point in hole {
            data.push(point[0]);
            data.push(point[1]);
        }
        idx_offset += hole.len();
    }

    let cap_triangles = earcut(&data, &hole_indices, 2)
        .map_err(|e| BuildError::Triangulation(format!("{:?}", e)))?;

    // Two vertex layers: every ring point at z = 0, then again at z = depth.
    let layer: Vec<[f64; 2]> = contour_points
        .iter()
        .chain(hole_rings.iter().flatten())
        .copied()
        .collect();
    let layer_len = layer.len();

    let mut vertices: Vec<f32> = Vec::with_capacity(layer_len * 6);
    for point in &layer {
        vertices.push(point[0] as f32);
        vertices.push(point[1] as f32);
        vertices.push(0.0);
    }
    for point in &layer {
        vertices.push(point[0] as f32);
        vertices.push(point[1] as f32);
        vertices.push(options.depth as f32);
    }

    let mut indices: Vec<u32> = Vec::new();
    let top_offset = layer_len as u32;

    // Bottom cap faces -z; reverse the earcut winding.
    for tri in cap_triangles.chunks_exact(3) {
        indices.push(tri[2] as u32);
        indices.push(tri[1] as u32);
        indices.push(tri[0] as u32);
    }

    // Top cap keeps the earcut winding, offset into the top layer.
    for tri in cap_triangles.chunks_exact(3) {
        indices.push(tri[0] as u32 + top_offset);
        indices.push(tri[1] as u32 + top_offset);
        indices.push(tri[2] as u32 + top_offset);
    }

    let mut ring_start = 0u32;
    side_walls(&mut indices, ring_start, contour_points.len() as u32, top_offset);
    ring_start += contour_points.len() as u32;
    for hole in &hole_rings {
        side_walls(&mut indices, ring_start, hole.len() as u32, top_offset);
        ring_start += hole.len() as u32;
    }

    let normals = compute_vertex_normals(&vertices, &indices);
    let bounding_box = BoundingBox::from_vertices(&vertices);

    Ok(BufferGeometry {
        vertices,
        normals: Some(normals),
        indices: Some(indices),
        bounding_box,
        has_data: true,
    })
}
