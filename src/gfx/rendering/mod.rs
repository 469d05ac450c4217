//! Core rendering functionality
//!
//! Pipelines, GPU meshes and frame rendering.

pub mod gpu_mesh;
pub mod pipeline_manager;
pub mod render_engine;
pub mod vertex;

pub use gpu_mesh::GpuMesh;
pub use pipeline_manager::{PipelineConfig, PipelineError, PipelineManager};
pub use render_engine::{RenderEngine, RenderError};
pub use vertex::Vertex3D;
