//! Vertex/index buffers uploaded from CPU meshes

use std::f32::consts::TAU;

use wgpu::util::DeviceExt;

use super::vertex::Vertex3D;
use crate::registry::MeshData;

pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

impl GpuMesh {
    pub fn upload(device: &wgpu::Device, mesh: &MeshData, label: &str) -> Self {
        let vertices = Vertex3D::from_mesh(mesh);

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Vertex Buffer", label)),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Index Buffer", label)),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        }
    }

    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

/// Quad spanning -1..1 on X and Z, facing +Y
pub fn unit_quad() -> MeshData {
    MeshData::new(
        vec![
            -1.0, 0.0, -1.0, //
            1.0, 0.0, -1.0, //
            1.0, 0.0, 1.0, //
            -1.0, 0.0, 1.0,
        ],
        [0.0, 1.0, 0.0].repeat(4),
        vec![0, 2, 1, 0, 3, 2],
    )
}

/// Flat ring on the XZ plane with outer radius 1, used for the focus reticle
pub fn ring(inner_radius: f32, segments: u32) -> MeshData {
    let segments = segments.max(3);
    let mut positions = Vec::with_capacity(segments as usize * 6);

    for i in 0..segments {
        let angle = i as f32 / segments as f32 * TAU;
        let (sin, cos) = angle.sin_cos();
        positions.extend_from_slice(&[cos, 0.0, sin]);
        positions.extend_from_slice(&[cos * inner_radius, 0.0, sin * inner_radius]);
    }

    let mut indices = Vec::with_capacity(segments as usize * 6);
    for i in 0..segments {
        let outer = i * 2;
        let inner = outer + 1;
        let next_outer = (outer + 2) % (segments * 2);
        let next_inner = next_outer + 1;
        indices.extend_from_slice(&[outer, inner, next_outer, next_outer, inner, next_inner]);
    }

    let normals = [0.0, 1.0, 0.0].repeat(segments as usize * 2);
    MeshData::new(positions, normals, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_quad() {
        let quad = unit_quad();
        assert_eq!(quad.vertex_count(), 4);
        assert_eq!(quad.triangle_count(), 2);
    }

    #[test]
    fn test_ring_indices_stay_in_range() {
        let ring = ring(0.8, 32);
        assert_eq!(ring.vertex_count(), 64);
        assert_eq!(ring.triangle_count(), 64);
        assert!(ring.indices.iter().all(|&i| (i as usize) < ring.vertex_count()));
    }
}
