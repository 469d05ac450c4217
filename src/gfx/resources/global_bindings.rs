//! Per-frame uniforms shared by every draw: camera and light
//!
//! Bound to slot 0 in all pipelines. The layout MUST match `Globals` in
//! `placer.wgsl`.

use cgmath::{InnerSpace, Vector3};

use super::uniform_buffer::{uniform_bind_group, uniform_layout, UniformBuffer};
use crate::gfx::camera::camera_utils::CameraUniform;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUBOContent {
    view_position: [f32; 4],
    view_proj: [[f32; 4]; 4],
    /// Direction the light travels, w unused
    light_direction: [f32; 4],
    /// rgb color, a ambient strength
    light_color: [f32; 4],
}

/// Single directional light
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LightConfig {
    pub direction: Vector3<f32>,
    pub color: [f32; 3],
    pub ambient: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            direction: Vector3::new(-0.4, -1.0, -0.6),
            color: [1.0, 1.0, 1.0],
            ambient: 0.35,
        }
    }
}

impl GlobalUBOContent {
    pub fn new(camera: CameraUniform, light: LightConfig) -> Self {
        let direction = light.direction.normalize();
        Self {
            view_position: camera.view_position,
            view_proj: camera.view_proj,
            light_direction: [direction.x, direction.y, direction.z, 0.0],
            light_color: [light.color[0], light.color[1], light.color[2], light.ambient],
        }
    }
}

pub type GlobalUBO = UniformBuffer<GlobalUBOContent>;

pub struct GlobalBindings {
    ubo: GlobalUBO,
    layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device) -> Self {
        let ubo = GlobalUBO::new(device);
        let layout = uniform_layout(
            device,
            wgpu::ShaderStages::VERTEX_FRAGMENT,
            "Globals Bind Group Layout",
        );
        let bind_group = uniform_bind_group(device, &layout, &ubo, "Globals Bind Group");

        Self {
            ubo,
            layout,
            bind_group,
        }
    }

    pub fn update(&mut self, queue: &wgpu::Queue, camera: CameraUniform, light: LightConfig) {
        self.ubo
            .update_content(queue, GlobalUBOContent::new(camera, light));
    }

    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_matches_shader_layout() {
        // vec4 + mat4x4 + vec4 + vec4
        assert_eq!(std::mem::size_of::<GlobalUBOContent>(), 16 + 64 + 16 + 16);
    }

    #[test]
    fn test_light_direction_is_normalized() {
        let content = GlobalUBOContent::new(CameraUniform::default(), LightConfig::default());
        let [x, y, z, _] = content.light_direction;
        assert!(((x * x + y * y + z * z).sqrt() - 1.0).abs() < 1e-5);
        assert_eq!(content.light_color[3], 0.35);
    }
}
