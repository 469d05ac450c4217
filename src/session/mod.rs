//! # Scene Host
//!
//! Bridges the placement store to a live tracking session.
//!
//! The host configures the session once at startup (plane detection,
//! environment texturing, and mesh reconstruction when the session supports
//! it), then on every tick looks at the placement store. A confirmed entry is
//! taken out of the store and, if its renderable has loaded, attached to a new
//! plane anchor. Anchors are only ever added.
//!
//! [`SimulatedSession`] stands in for a camera session on the desktop.

pub mod anchor;
pub mod config;
pub mod host;
pub mod simulated;
pub mod traits;

pub use anchor::{Anchor, AnchorId, AnchorTarget, PlaneAlignment};
pub use config::{SceneReconstruction, WorldTrackingConfig};
pub use host::{DropReason, PlacementOutcome, SceneHost};
pub use simulated::{AnchoredInstance, DetectedPlane, FocusReticle, SimulatedSession};
pub use traits::ArSession;
