//! # Graphics Module
//!
//! Desktop stand-in for the device camera view: an orbit camera looking at
//! the simulated world, with detected planes, the focus reticle and anchored
//! models drawn by a small wgpu renderer.
//!
//! - **Camera** ([`camera`]) - orbit camera with mouse and WASD controls
//! - **Picking** ([`picking`]) - screen rays and ray/plane intersection
//! - **Rendering** ([`rendering`]) - pipelines, meshes and frame submission
//! - **Resources** ([`resources`]) - uniform buffers and the depth texture
//! - **Scene** ([`scene`]) - per-frame draw list built from the session
//!
//! ```no_run
//! use placer::gfx::{scene::DrawList, RenderEngine};
//! use placer::session::SimulatedSession;
//!
//! # async fn frame(engine: &mut RenderEngine, session: &SimulatedSession) {
//! let list = DrawList::from_session(session);
//! engine.render_frame(&list, |_, _, _, _| {}).unwrap();
//! # }
//! ```

pub mod camera;
pub mod picking;
pub mod rendering;
pub mod resources;
pub mod scene;

pub use camera::orbit_camera::OrbitCamera;
pub use rendering::render_engine::RenderEngine;
