//! Desktop stand-in for a camera tracking session
//!
//! There is no camera here: the "world" is a floor and a wall that appear
//! according to the plane detection the session was run with. The app aims a
//! reticle at them from the screen center every frame, and anchors land
//! wherever the reticle is.

use std::sync::Arc;

use cgmath::{Matrix4, Vector3, Zero};
use log::{debug, info};

use super::anchor::{Anchor, AnchorId, AnchorTarget, PlaneAlignment};
use super::config::{SceneReconstruction, WorldTrackingConfig};
use super::traits::ArSession;
use crate::gfx::picking::{BoundedPlane, Ray};
use crate::registry::Renderable;

/// Distance at which the reticle floats when the ray hits nothing
pub const FLOATING_RETICLE_DISTANCE: f32 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectedPlane {
    pub alignment: PlaneAlignment,
    pub plane: BoundedPlane,
}

impl DetectedPlane {
    pub fn floor() -> Self {
        Self {
            alignment: PlaneAlignment::Horizontal,
            plane: BoundedPlane::new(
                Vector3::zero(),
                Vector3::unit_y(),
                Vector3::unit_x(),
                [4.0, 4.0],
            ),
        }
    }

    pub fn back_wall() -> Self {
        Self {
            alignment: PlaneAlignment::Vertical,
            plane: BoundedPlane::new(
                Vector3::new(0.0, 1.5, -3.0),
                Vector3::unit_z(),
                Vector3::unit_x(),
                [4.0, 1.5],
            ),
        }
    }
}

/// Where the next anchor would go
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusReticle {
    pub position: Vector3<f32>,
    pub normal: Vector3<f32>,
    /// Index into [`SimulatedSession::planes`] of the plane under the reticle
    pub plane: Option<usize>,
}

impl FocusReticle {
    pub fn on_plane(&self) -> bool {
        self.plane.is_some()
    }
}

/// An anchored renderable with its resolved world transform
#[derive(Debug, Clone)]
pub struct AnchoredInstance {
    pub anchor: AnchorId,
    pub transform: Matrix4<f32>,
    pub renderable: Arc<Renderable>,
}

pub struct SimulatedSession {
    mesh_support: bool,
    running: Option<WorldTrackingConfig>,
    planes: Vec<DetectedPlane>,
    reticle: Option<FocusReticle>,
    instances: Vec<AnchoredInstance>,
    next_anchor: u64,
}

impl SimulatedSession {
    pub fn new() -> Self {
        Self {
            mesh_support: false,
            running: None,
            planes: Vec::new(),
            reticle: None,
            instances: Vec::new(),
            next_anchor: 0,
        }
    }

    /// Pretend the device can reconstruct a scene mesh
    pub fn with_mesh_support(mut self, supported: bool) -> Self {
        self.mesh_support = supported;
        self
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    pub fn running_config(&self) -> Option<&WorldTrackingConfig> {
        self.running.as_ref()
    }

    pub fn planes(&self) -> &[DetectedPlane] {
        &self.planes
    }

    pub fn reticle(&self) -> Option<&FocusReticle> {
        self.reticle.as_ref()
    }

    pub fn instances(&self) -> &[AnchoredInstance] {
        &self.instances
    }

    /// Re-aims the reticle along `ray`, keeping the nearest plane hit
    pub fn update_focus(&mut self, ray: &Ray) {
        let nearest = self
            .planes
            .iter()
            .enumerate()
            .filter_map(|(index, detected)| {
                detected.plane.intersect_ray(ray).map(|t| (index, t))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1));

        self.reticle = Some(match nearest {
            Some((index, t)) => FocusReticle {
                position: ray.point_at(t),
                normal: self.planes[index].plane.normal,
                plane: Some(index),
            },
            None => FocusReticle {
                position: ray.point_at(FLOATING_RETICLE_DISTANCE),
                normal: -ray.direction,
                plane: None,
            },
        });
    }

    /// Picks the spot for an anchor: the reticle if it sits on an accepted
    /// plane, else the first accepted plane's center, else the world origin
    ///
    /// Also returns the alignment of the plane the spot lies on, if any.
    fn resolve_position(
        &self,
        alignment: PlaneAlignment,
    ) -> (Vector3<f32>, Option<PlaneAlignment>) {
        let reticle_plane = self
            .reticle
            .as_ref()
            .and_then(|reticle| Some((reticle, self.planes.get(reticle.plane?)?)));
        if let Some((reticle, detected)) = reticle_plane {
            if alignment.accepts(detected.alignment) {
                return (reticle.position, Some(detected.alignment));
            }
        }

        self.planes
            .iter()
            .find(|detected| alignment.accepts(detected.alignment))
            .map(|detected| (detected.plane.center, Some(detected.alignment)))
            .unwrap_or_else(|| (Vector3::zero(), None))
    }
}

impl Default for SimulatedSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ArSession for SimulatedSession {
    fn supports_scene_reconstruction(&self) -> bool {
        self.mesh_support
    }

    fn run(&mut self, config: &WorldTrackingConfig) {
        self.planes.clear();
        // Reticle plane indices refer to the previous run
        self.reticle = None;
        if config.plane_detection.horizontal {
            self.planes.push(DetectedPlane::floor());
        }
        if config.plane_detection.vertical {
            self.planes.push(DetectedPlane::back_wall());
        }
        if config.scene_reconstruction == SceneReconstruction::Mesh {
            debug!("Scene mesh requested; the simulated world has none to offer");
        }

        info!("Simulated session running with {} planes", self.planes.len());
        self.running = Some(*config);
    }

    fn add_anchor(&mut self, anchor: Anchor) -> AnchorId {
        let AnchorTarget::Plane { alignment } = anchor.target;
        let (position, surface) = self.resolve_position(alignment);

        self.next_anchor += 1;
        let id = AnchorId(self.next_anchor);

        for renderable in anchor.children() {
            // Sit the model on a floor-like surface instead of sinking it halfway
            let rest = match surface {
                Some(PlaneAlignment::Horizontal) => {
                    Vector3::new(0.0, renderable.rest_offset(), 0.0)
                }
                _ => Vector3::zero(),
            };
            self.instances.push(AnchoredInstance {
                anchor: id,
                transform: Matrix4::from_translation(position + rest),
                renderable: renderable.clone(),
            });
        }

        debug!("{} resolved at {:?}", id, position);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PlaneDetection, SessionCapabilities};
    use crate::registry::MeshData;
    use cgmath::InnerSpace;

    fn running(detection: PlaneDetection) -> SimulatedSession {
        let mut session = SimulatedSession::new();
        let caps = SessionCapabilities::default().with_plane_detection(detection);
        session.run(&WorldTrackingConfig::resolve(&caps, false));
        session
    }

    fn cube() -> Arc<Renderable> {
        // Unit tall triangle starting half a unit below its origin
        let mesh = MeshData::new(
            vec![0.0, -0.5, 0.0, 1.0, -0.5, 0.0, 0.0, 0.5, 0.0],
            Vec::new(),
            vec![0, 1, 2],
        );
        Arc::new(Renderable::new("cube", vec![mesh]))
    }

    #[test]
    fn test_planes_follow_detection_flags() {
        assert_eq!(running(PlaneDetection::ALL).planes().len(), 2);
        assert!(running(PlaneDetection::NONE).planes().is_empty());

        let horizontal = running(PlaneDetection {
            horizontal: true,
            vertical: false,
        });
        assert_eq!(horizontal.planes().len(), 1);
        assert_eq!(horizontal.planes()[0].alignment, PlaneAlignment::Horizontal);
    }

    #[test]
    fn test_reticle_snaps_to_nearest_plane() {
        let mut session = running(PlaneDetection::ALL);
        let ray = Ray::new(Vector3::new(0.0, 2.0, 2.0), Vector3::new(0.0, -1.0, -1.0));
        session.update_focus(&ray);

        let reticle = session.reticle().unwrap();
        assert!(reticle.on_plane());
        assert!(reticle.position.magnitude() < 1e-5);
        assert_eq!(reticle.normal, Vector3::unit_y());
    }

    #[test]
    fn test_reticle_floats_without_hit() {
        let mut session = running(PlaneDetection::NONE);
        let ray = Ray::new(Vector3::zero(), Vector3::unit_z());
        session.update_focus(&ray);

        let reticle = session.reticle().unwrap();
        assert!(!reticle.on_plane());
        assert_eq!(reticle.position, Vector3::new(0.0, 0.0, FLOATING_RETICLE_DISTANCE));
    }

    #[test]
    fn test_anchor_lands_on_reticle_and_rests_on_surface() {
        let mut session = running(PlaneDetection::ALL);
        let ray = Ray::new(Vector3::new(1.0, 3.0, 1.0), Vector3::new(0.0, -1.0, 0.0));
        session.update_focus(&ray);

        let id = session.add_anchor(Anchor::on_plane(PlaneAlignment::Any).with_child(cube()));

        let instance = &session.instances()[0];
        assert_eq!(instance.anchor, id);
        let translation = instance.transform.w.truncate();
        assert!((translation - Vector3::new(1.0, 0.5, 1.0)).magnitude() < 1e-5);
    }

    #[test]
    fn test_anchor_without_reticle_uses_plane_center() {
        let mut session = running(PlaneDetection {
            horizontal: false,
            vertical: true,
        });
        session.add_anchor(Anchor::on_plane(PlaneAlignment::Vertical).with_child(cube()));

        let translation = session.instances()[0].transform.w.truncate();
        assert_eq!(translation, Vector3::new(0.0, 1.5, -3.0));
    }

    #[test]
    fn test_anchor_ids_are_unique() {
        let mut session = running(PlaneDetection::NONE);
        let first = session.add_anchor(Anchor::default().with_child(cube()));
        let second = session.add_anchor(Anchor::default().with_child(cube()));
        assert_ne!(first, second);
        assert_eq!(session.instances().len(), 2);
        assert_eq!(session.instances()[0].transform.w.truncate(), Vector3::zero());
    }

    #[test]
    fn test_restart_with_fewer_planes_forgets_reticle() {
        let mut session = running(PlaneDetection::ALL);
        let ray = Ray::new(Vector3::new(0.0, 1.5, 0.0), -Vector3::unit_z());
        session.update_focus(&ray);
        assert_eq!(session.reticle().unwrap().plane, Some(1));

        let caps = SessionCapabilities::default().with_plane_detection(PlaneDetection {
            horizontal: true,
            vertical: false,
        });
        session.run(&WorldTrackingConfig::resolve(&caps, false));
        assert!(session.reticle().is_none());

        session.add_anchor(Anchor::default().with_child(cube()));
        let translation = session.instances()[0].transform.w.truncate();
        assert_eq!(translation, Vector3::new(0.0, 0.5, 0.0));
    }

    #[test]
    fn test_stale_reticle_plane_falls_back() {
        let mut session = running(PlaneDetection {
            horizontal: true,
            vertical: false,
        });
        session.reticle = Some(FocusReticle {
            position: Vector3::new(0.0, 1.5, -3.0),
            normal: Vector3::unit_z(),
            plane: Some(5),
        });

        session.add_anchor(Anchor::default().with_child(cube()));
        let translation = session.instances()[0].transform.w.truncate();
        assert_eq!(translation, Vector3::new(0.0, 0.5, 0.0));
    }

    #[test]
    fn test_wall_hit_is_not_lifted() {
        let mut session = running(PlaneDetection::ALL);
        let ray = Ray::new(Vector3::new(1.0, 1.0, 0.0), -Vector3::unit_z());
        session.update_focus(&ray);

        session.add_anchor(Anchor::default().with_child(cube()));
        let translation = session.instances()[0].transform.w.truncate();
        assert!((translation - Vector3::new(1.0, 1.0, -3.0)).magnitude() < 1e-5);
    }
}
