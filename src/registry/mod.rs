//! # Model Registry
//!
//! Discovers placeable models in a resource directory and caches their loaded
//! renderables.
//!
//! ## Layout
//!
//! The directory holds one model file per asset plus a thumbnail with the same
//! stem:
//!
//! ```text
//! assets/models/
//!   toy_car.obj
//!   toy_car.png
//!   lunar_rover.obj
//!   lunar_rover.png
//! ```
//!
//! ## Loading
//!
//! [`ModelRegistry::build`] is synchronous for the scan and the thumbnails and
//! asynchronous for the models: each model becomes a future from the
//! [`AssetLoader`], spawned on the executor the caller passes in. Completions
//! are applied on the caller's thread by [`ModelRegistry::poll_completions`].
//!
//! ```no_run
//! use std::sync::Arc;
//! use futures::executor::ThreadPool;
//! use placer::registry::{ModelRegistry, ObjLoader, ScanOptions};
//!
//! let pool = ThreadPool::new().unwrap();
//! let mut registry = ModelRegistry::build(
//!     &ScanOptions::new("assets/models"),
//!     Arc::new(ObjLoader::new()),
//!     &pool,
//! ).unwrap();
//!
//! // once per frame
//! for event in registry.poll_completions() {
//!     println!("{:?}", event);
//! }
//! ```

pub mod entry;
pub mod loader;
pub mod model_registry;
pub mod renderable;

pub use entry::{AssetEntry, AssetIntegrityError, EntryId, LoadStatus, Thumbnail};
pub use loader::{AssetLoader, LoadError, ObjLoader};
pub use model_registry::{LoadEvent, ModelRegistry, RegistryError, ScanOptions};
pub use renderable::{MeshData, Renderable};
