//! wgpu renderer for the desktop view
//!
//! One lit pipeline for anchored models and one translucent pipeline for the
//! detected planes and the focus reticle, both fed from a [`DrawList`]. The UI
//! is drawn on top through a callback that gets the frame's encoder.

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, info};
use thiserror::Error;
use wgpu::{Device, TextureFormat};

use super::gpu_mesh::{ring, unit_quad, GpuMesh};
use super::pipeline_manager::{PipelineConfig, PipelineError, PipelineManager};
use crate::gfx::camera::camera_utils::{convert_matrix4_to_array, CameraUniform};
use crate::gfx::resources::uniform_buffer::{uniform_bind_group, uniform_layout};
use crate::gfx::resources::{GlobalBindings, LightConfig, TextureResource, UniformBuffer};
use crate::gfx::scene::{DrawCommand, DrawList, Geometry, Layer};
use crate::registry::Renderable;

const SOLID_PIPELINE: &str = "Solid";
const OVERLAY_PIPELINE: &str = "Overlay";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable graphics adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to open graphics device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("failed to build pipelines: {0:?}")]
    Pipelines(Vec<PipelineError>),
}

/// Per-draw uniforms; MUST match `Object` in `placer.wgsl`
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    model: [[f32; 4]; 4],
    color: [f32; 4],
    params: [f32; 4],
}

impl ObjectUniform {
    pub fn from_command(command: &DrawCommand) -> Self {
        Self {
            model: convert_matrix4_to_array(command.transform),
            color: command.color,
            params: [if command.lit { 0.0 } else { 1.0 }, 0.0, 0.0, 0.0],
        }
    }
}

struct ObjectSlot {
    buffer: UniformBuffer<ObjectUniform>,
    bind_group: wgpu::BindGroup,
}

/// GPU copies of a model's meshes, keeping the model alive while cached
struct ModelMeshes {
    _renderable: Arc<Renderable>,
    meshes: Vec<GpuMesh>,
}

pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    format: TextureFormat,
    pipeline_manager: PipelineManager,
    global_bindings: GlobalBindings,
    light_config: LightConfig,
    object_layout: wgpu::BindGroupLayout,
    object_slots: Vec<ObjectSlot>,
    plane_mesh: GpuMesh,
    reticle_mesh: GpuMesh,
    model_meshes: HashMap<usize, ModelMeshes>,
}

impl RenderEngine {
    /// Creates a render engine for the given window
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
    ) -> Result<RenderEngine, RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        info!("Using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits {
                    max_texture_dimension_2d: 4096,
                    ..wgpu::Limits::downlevel_defaults()
                },
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .unwrap_or(surface_capabilities.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_capabilities.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, "depth_texture");

        let global_bindings = GlobalBindings::new(&device);
        let object_layout = uniform_layout(
            &device,
            wgpu::ShaderStages::VERTEX_FRAGMENT,
            "Object Bind Group Layout",
        );

        let plane_mesh = GpuMesh::upload(&device, &unit_quad(), "Plane");
        let reticle_mesh = GpuMesh::upload(&device, &ring(0.75, 48), "Reticle");

        let device_handle: Arc<Device> = device.into();
        let queue_handle: Arc<wgpu::Queue> = queue.into();
        let mut pipeline_manager = PipelineManager::new(device_handle.clone());

        pipeline_manager.load_shader("placer", include_str!("placer.wgsl"));

        let layouts = vec![global_bindings.layout().clone(), object_layout.clone()];
        pipeline_manager.register_pipeline(
            SOLID_PIPELINE,
            PipelineConfig::default()
                .with_label("SOLID")
                .with_shader("placer")
                .with_cull_mode(None)
                .with_depth_format(TextureResource::DEPTH_FORMAT)
                .with_bind_group_layouts(layouts.clone())
                .with_color_target(format, wgpu::BlendState::REPLACE),
        );
        pipeline_manager.register_pipeline(
            OVERLAY_PIPELINE,
            PipelineConfig::default()
                .with_label("OVERLAY")
                .with_shader("placer")
                .with_cull_mode(None)
                .with_depth_format(TextureResource::DEPTH_FORMAT)
                .with_depth_write(false)
                .with_bind_group_layouts(layouts)
                .with_color_target(format, wgpu::BlendState::ALPHA_BLENDING),
        );
        pipeline_manager
            .create_all_pipelines()
            .map_err(RenderError::Pipelines)?;

        Ok(RenderEngine {
            surface,
            device: device_handle,
            queue: queue_handle,
            config,
            depth_texture,
            format,
            pipeline_manager,
            global_bindings,
            light_config: LightConfig::default(),
            object_layout,
            object_slots: Vec::new(),
            plane_mesh,
            reticle_mesh,
            model_meshes: HashMap::new(),
        })
    }

    /// Renders one frame, then lets `ui_callback` draw on top of it
    pub fn render_frame<F>(
        &mut self,
        draw_list: &DrawList,
        ui_callback: F,
    ) -> Result<(), wgpu::SurfaceError>
    where
        F: FnOnce(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView),
    {
        // Solid first, overlays after, in one pass
        let ordered: Vec<&DrawCommand> = draw_list
            .layer(Layer::Solid)
            .chain(draw_list.layer(Layer::Overlay))
            .collect();
        self.prepare(&ordered);

        let surface_texture = self.surface.get_current_texture()?;
        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.08,
                            g: 0.09,
                            b: 0.11,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_bind_group(0, self.global_bindings.bind_group(), &[]);

            let mut current_layer = None;
            for (slot, command) in self.object_slots.iter().zip(ordered.iter()) {
                if current_layer != Some(command.layer) {
                    let name = match command.layer {
                        Layer::Solid => SOLID_PIPELINE,
                        Layer::Overlay => OVERLAY_PIPELINE,
                    };
                    let Some(pipeline) = self.pipeline_manager.get_pipeline(name) else {
                        continue;
                    };
                    render_pass.set_pipeline(pipeline);
                    current_layer = Some(command.layer);
                }

                render_pass.set_bind_group(1, &slot.bind_group, &[]);
                match &command.geometry {
                    Geometry::Plane => self.plane_mesh.draw(&mut render_pass),
                    Geometry::Reticle => self.reticle_mesh.draw(&mut render_pass),
                    Geometry::Model(renderable) => {
                        if let Some(model) = self.model_meshes.get(&model_key(renderable)) {
                            for mesh in &model.meshes {
                                mesh.draw(&mut render_pass);
                            }
                        }
                    }
                }
            }
        }

        ui_callback(
            &self.device,
            &self.queue,
            &mut encoder,
            &surface_texture_view,
        );

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }

    /// Uploads new models and writes one uniform slot per command
    fn prepare(&mut self, commands: &[&DrawCommand]) {
        for command in commands {
            if let Geometry::Model(renderable) = &command.geometry {
                let key = model_key(renderable);
                if !self.model_meshes.contains_key(&key) {
                    debug!("Uploading '{}' to the GPU", renderable.name);
                    let meshes = renderable
                        .meshes
                        .iter()
                        .map(|mesh| GpuMesh::upload(&self.device, mesh, &renderable.name))
                        .collect();
                    self.model_meshes.insert(
                        key,
                        ModelMeshes {
                            _renderable: renderable.clone(),
                            meshes,
                        },
                    );
                }
            }
        }

        while self.object_slots.len() < commands.len() {
            let buffer = UniformBuffer::new(&self.device);
            let bind_group = uniform_bind_group(
                &self.device,
                &self.object_layout,
                &buffer,
                "Object Bind Group",
            );
            self.object_slots.push(ObjectSlot { buffer, bind_group });
        }

        for (slot, command) in self.object_slots.iter_mut().zip(commands) {
            slot.buffer
                .update_content(&self.queue, ObjectUniform::from_command(command));
        }
    }

    /// Updates camera and light uniforms for the next frame
    pub fn update(&mut self, camera_uniform: CameraUniform) {
        self.global_bindings
            .update(&self.queue, camera_uniform, self.light_config);
    }

    pub fn set_light(&mut self, light_config: LightConfig) {
        self.light_config = light_config;
    }

    /// Resizes the surface and recreates the depth buffer; zero sizes are ignored
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
    }

    /// Reconfigures the surface at its current size, after it was lost
    pub fn reconfigure(&mut self) {
        self.resize(self.config.width, self.config.height);
    }

    pub fn get_surface_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.format
    }
}

fn model_key(renderable: &Arc<Renderable>) -> usize {
    Arc::as_ptr(renderable) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Matrix4, Vector3};

    #[test]
    fn test_object_uniform_layout() {
        assert_eq!(std::mem::size_of::<ObjectUniform>(), 64 + 16 + 16);
    }

    #[test]
    fn test_unlit_flag() {
        let command = DrawCommand {
            geometry: Geometry::Plane,
            transform: Matrix4::from_translation(Vector3::new(1.0, 2.0, 3.0)),
            color: [1.0, 0.0, 0.0, 0.5],
            lit: false,
            layer: Layer::Overlay,
        };
        let uniform = ObjectUniform::from_command(&command);
        assert_eq!(uniform.params[0], 1.0);
        assert_eq!(uniform.model[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(uniform.color, [1.0, 0.0, 0.0, 0.5]);
    }
}
