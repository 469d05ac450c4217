//! What the renderer draws each frame, derived from the session
//!
//! The session owns planes, the reticle and anchored instances; this module
//! turns them into a flat list of [`DrawCommand`]s so that the GPU side only
//! deals with meshes, transforms and colors.

pub mod draw_list;

pub use draw_list::{DrawCommand, DrawList, Geometry, Layer};
