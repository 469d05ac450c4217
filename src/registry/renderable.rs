//! CPU-side model data produced by a loader
//!
//! A [`Renderable`] is what an asset entry caches once its load completes. It
//! carries plain mesh arrays; GPU buffers are created by the renderer when an
//! instance is actually anchored into the scene.

use cgmath::Vector3;

use crate::gfx::picking::AABB;

/// One triangulated mesh with per-vertex normals
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Builds a mesh, computing smooth normals when none (or mismatched) are given
    pub fn new(positions: Vec<f32>, normals: Vec<f32>, indices: Vec<u32>) -> Self {
        let normals = if !normals.is_empty() && normals.len() == positions.len() {
            normals
        } else {
            Self::calculate_vertex_normals(&positions, &indices)
        };

        Self {
            positions,
            normals,
            indices,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn vertex_positions(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.positions.chunks_exact(3).map(|p| [p[0], p[1], p[2]])
    }

    /// Averages face normals into each vertex they touch
    pub fn calculate_vertex_normals(positions: &[f32], indices: &[u32]) -> Vec<f32> {
        let vertex_count = positions.len() / 3;
        let mut normals = vec![0.0; vertex_count * 3];

        let vertex = |i: usize| {
            Vector3::new(positions[i * 3], positions[i * 3 + 1], positions[i * 3 + 2])
        };

        for triangle in indices.chunks_exact(3) {
            let [i0, i1, i2] = [
                triangle[0] as usize,
                triangle[1] as usize,
                triangle[2] as usize,
            ];
            if i0 >= vertex_count || i1 >= vertex_count || i2 >= vertex_count {
                continue;
            }

            let face_normal = (vertex(i1) - vertex(i0)).cross(vertex(i2) - vertex(i0));

            for &vertex_idx in &[i0, i1, i2] {
                normals[vertex_idx * 3] += face_normal.x;
                normals[vertex_idx * 3 + 1] += face_normal.y;
                normals[vertex_idx * 3 + 2] += face_normal.z;
            }
        }

        for normal in normals.chunks_exact_mut(3) {
            let length = (normal[0].powi(2) + normal[1].powi(2) + normal[2].powi(2)).sqrt();
            if length > 0.0 {
                normal.iter_mut().for_each(|n| *n /= length);
            }
        }

        normals
    }
}

/// A loaded, displayable model
#[derive(Debug, Clone, PartialEq)]
pub struct Renderable {
    pub name: String,
    pub meshes: Vec<MeshData>,
    pub bounds: AABB,
}

impl Renderable {
    pub fn new(name: impl Into<String>, meshes: Vec<MeshData>) -> Self {
        let vertices: Vec<[f32; 3]> = meshes
            .iter()
            .flat_map(|mesh| mesh.vertex_positions())
            .collect();

        Self {
            name: name.into(),
            bounds: AABB::from_vertices(&vertices),
            meshes,
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(MeshData::triangle_count).sum()
    }

    /// Offset that puts the lowest point of the model on y = 0
    pub fn rest_offset(&self) -> f32 {
        -self.bounds.min.y
    }
}
