//! # Placer Prelude
//!
//! Commonly used types in one import, for tools and tests that drive the
//! placement flow without the window.
//!
//! ```no_run
//! use placer::prelude::*;
//!
//! let config = PlacerConfig::load(None).unwrap();
//! let pool = futures::executor::ThreadPool::new().unwrap();
//! let registry = ModelRegistry::build(
//!     &ScanOptions::from(&config),
//!     std::sync::Arc::new(ObjLoader::new()),
//!     &pool,
//! )
//! .unwrap();
//!
//! let mut store = PlacementStore::new();
//! let mut host = SceneHost::new(SimulatedSession::new(), &config.session);
//! if let Some(entry) = registry.find("toy_car") {
//!     store.dispatch(PlacementAction::Pick(entry.id())).unwrap();
//!     store.dispatch(PlacementAction::Confirm).unwrap();
//! }
//! host.observe(&mut store, &registry);
//! ```

// Application
pub use crate::app::PlacerApp;
pub use crate::config::{PlacerConfig, SessionCapabilities};
pub use crate::error::{Error, Result};

// Assets
pub use crate::registry::{
    AssetEntry, AssetLoader, EntryId, LoadStatus, ModelRegistry, ObjLoader, Renderable,
    ScanOptions,
};

// Placement flow
pub use crate::placement::{Phase, PlacementAction, PlacementState, PlacementStore};
pub use crate::session::{
    Anchor, ArSession, PlaneAlignment, PlacementOutcome, SceneHost, SimulatedSession,
    WorldTrackingConfig,
};

// Overlay
pub use crate::overlay::{JoystickData, OverlayScene};

pub use cgmath::{Matrix4, Vector2, Vector3};
