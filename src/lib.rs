//! Placer
//!
//! Pick a 3D model from a thumbnail strip, aim a focus reticle at a detected
//! plane, and anchor the model into the scene. Built on wgpu, winit and imgui,
//! with a simulated tracking session standing in for the camera feed.

pub mod app;
pub mod config;
pub mod error;
pub mod gfx;
pub mod overlay;
pub mod placement;
pub mod prelude;
pub mod registry;
pub mod session;
pub mod ui;

pub use app::PlacerApp;
pub use config::PlacerConfig;
pub use error::{Error, Result};
