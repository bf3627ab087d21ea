use serde::Serialize;

use crate::error::BuildError;

/// Axis-aligned bounds of a geometry, cached so the renderer can run
/// culling and frustum tests without touching the vertex buffer.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl BoundingBox {
    pub fn from_vertices(vertices: &[f32]) -> Option<Self> {
        if vertices.len() < 3 {
            return None;
        }

        let mut min = [f32::INFINITY; 3];
        let mut max = [f32::NEG_INFINITY; 3];
        for vertex in vertices.chunks_exact(3) {
            for axis in 0..3 {
                min[axis] = min[axis].min(vertex[axis]);
                max[axis] = max[axis].max(vertex[axis]);
            }
        }

        Some(Self { min, max })
    }

    pub fn union(self, other: Self) -> Self {
        let mut min = self.min;
        let mut max = self.max;
        for axis in 0..3 {
            min[axis] = min[axis].min(other.min[axis]);
            max[axis] = max[axis].max(other.max[axis]);
        }
        Self { min, max }
    }
}

/// Mesh data in the attribute layout a `THREE.BufferGeometry` consumes
/// directly on the JS side.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BufferGeometry {
    pub vertices: Vec<f32>,
    pub normals: Option<Vec<f32>>,
    pub indices: Option<Vec<u32>>,
    pub bounding_box: Option<BoundingBox>,
    pub has_data: bool,
}

impl BufferGeometry {
    pub fn empty() -> Self {
        Self {
            vertices: Vec::new(),
            normals: None,
            indices: None,
            bounding_box: None,
            has_data: false,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        match &self.indices {
            Some(indices) => indices.len() / 3,
            None => self.vertex_count() / 3,
        }
    }
}

/// Merge solids into one geometry buffer.
///
/// Purely a batching step: every vertex is carried over unchanged, indices
/// are rebased by the running vertex offset, and bounding boxes are
/// unioned. An empty input set is a caller error, reported instead of
/// handing the renderer nothing.
pub fn merge_buffer_geometries(solids: Vec<BufferGeometry>) -> Result<BufferGeometry, BuildError> {
    if solids.is_empty() {
        return Err(BuildError::NothingToRender);
    }

    let mut merged_vertices = Vec::new();
    let mut merged_normals = Vec::new();
    let mut merged_indices = Vec::new();
    let mut bounding_box: Option<BoundingBox> = None;
    let mut vertex_offset = 0u32;

    for solid in solids {
        let solid_vertex_count = (solid.vertices.len() / 3) as u32;
        merged_vertices.extend_from_slice(&solid.vertices);

        if let Some(normals) = solid.normals {
            merged_normals.extend_from_slice(&normals);
        }

        if let Some(indices) = solid.indices {
            merged_indices.extend(indices.iter().map(|&idx| idx + vertex_offset));
        }

        bounding_box = match (bounding_box, solid.bounding_box) {
            (Some(a), Some(b)) => Some(a.union(b)),
            (a, b) => a.or(b),
        };

        vertex_offset += solid_vertex_count;
    }

    Ok(BufferGeometry {
        has_data: !merged_vertices.is_empty(),
        bounding_box,
        vertices: merged_vertices,
        normals: if merged_normals.is_empty() {
            None
        } else {
            Some(merged_normals)
        },
        indices: if merged_indices.is_empty() {
            None
        } else {
            Some(merged_indices)
        },
    })
}
