//! Interface between the scene host and a tracking platform

use super::anchor::{Anchor, AnchorId};
use super::config::WorldTrackingConfig;

/// A live camera/tracking session with an append-only anchor graph
///
/// Implementations own everything about tracking, plane detection and
/// rendering of anchored content. The scene host only configures the session
/// once and appends anchors.
pub trait ArSession {
    /// Whether the session can reconstruct a scene mesh
    fn supports_scene_reconstruction(&self) -> bool;

    /// Starts (or restarts) tracking with the given configuration
    fn run(&mut self, config: &WorldTrackingConfig);

    /// Adds an anchor and its children to the live scene
    fn add_anchor(&mut self, anchor: Anchor) -> AnchorId;
}
