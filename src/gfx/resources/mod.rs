//! GPU resource management
//!
//! Uniform buffers, bind groups and the depth texture.

pub mod global_bindings;
pub mod texture_resource;
pub mod uniform_buffer;

pub use global_bindings::{GlobalBindings, GlobalUBOContent, LightConfig};
pub use texture_resource::TextureResource;
pub use uniform_buffer::UniformBuffer;
