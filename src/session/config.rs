//! World-tracking configuration handed to a session when it starts

use crate::config::{EnvironmentTexturing, PlaneDetection, SessionCapabilities};

/// Scene geometry the session should reconstruct
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SceneReconstruction {
    #[default]
    None,
    Mesh,
}

/// Configuration a session runs with
///
/// Built once by the scene host from the requested [`SessionCapabilities`]
/// and what the session says it supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldTrackingConfig {
    pub plane_detection: PlaneDetection,
    pub environment_texturing: EnvironmentTexturing,
    pub scene_reconstruction: SceneReconstruction,
}

impl WorldTrackingConfig {
    /// Resolves requested capabilities against session support
    pub fn resolve(requested: &SessionCapabilities, supports_mesh: bool) -> Self {
        let scene_reconstruction = if requested.mesh_reconstruction && supports_mesh {
            SceneReconstruction::Mesh
        } else {
            SceneReconstruction::None
        };

        Self {
            plane_detection: requested.plane_detection,
            environment_texturing: requested.environment_texturing,
            scene_reconstruction,
        }
    }
}

impl Default for WorldTrackingConfig {
    fn default() -> Self {
        Self::resolve(&SessionCapabilities::default(), false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_only_when_supported() {
        let requested = SessionCapabilities::default();

        let unsupported = WorldTrackingConfig::resolve(&requested, false);
        assert_eq!(unsupported.scene_reconstruction, SceneReconstruction::None);

        let supported = WorldTrackingConfig::resolve(&requested, true);
        assert_eq!(supported.scene_reconstruction, SceneReconstruction::Mesh);
        assert_eq!(supported.plane_detection, PlaneDetection::ALL);
        assert_eq!(supported.environment_texturing, EnvironmentTexturing::Automatic);
    }

    #[test]
    fn test_mesh_can_be_declined() {
        let requested = SessionCapabilities::default().with_mesh_reconstruction(false);
        let config = WorldTrackingConfig::resolve(&requested, true);
        assert_eq!(config.scene_reconstruction, SceneReconstruction::None);
    }
}
