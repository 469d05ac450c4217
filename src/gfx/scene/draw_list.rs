use std::sync::Arc;

use cgmath::{InnerSpace, Matrix4, Vector3};

use crate::registry::Renderable;
use crate::session::{PlaneAlignment, SimulatedSession};

pub const HORIZONTAL_PLANE_COLOR: [f32; 4] = [0.25, 0.65, 0.95, 0.25];
pub const VERTICAL_PLANE_COLOR: [f32; 4] = [0.95, 0.65, 0.25, 0.2];
pub const RETICLE_ON_PLANE_COLOR: [f32; 4] = [1.0, 0.85, 0.1, 0.9];
pub const RETICLE_SEARCHING_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 0.5];
pub const MODEL_COLOR: [f32; 4] = [0.82, 0.82, 0.86, 1.0];

/// Reticle size in world units
pub const RETICLE_RADIUS: f32 = 0.12;

#[derive(Debug, Clone)]
pub enum Geometry {
    /// The shared unit quad
    Plane,
    /// The shared reticle ring
    Reticle,
    Model(Arc<Renderable>),
}

/// Solid geometry is drawn first with depth writes, overlays after without
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Solid,
    Overlay,
}

#[derive(Debug, Clone)]
pub struct DrawCommand {
    pub geometry: Geometry,
    pub transform: Matrix4<f32>,
    pub color: [f32; 4],
    pub lit: bool,
    pub layer: Layer,
}

#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    /// Snapshot of everything the session shows
    pub fn from_session(session: &SimulatedSession) -> Self {
        let mut commands = Vec::new();

        for instance in session.instances() {
            commands.push(DrawCommand {
                geometry: Geometry::Model(instance.renderable.clone()),
                transform: instance.transform,
                color: MODEL_COLOR,
                lit: true,
                layer: Layer::Solid,
            });
        }

        for detected in session.planes() {
            let color = match detected.alignment {
                PlaneAlignment::Vertical => VERTICAL_PLANE_COLOR,
                _ => HORIZONTAL_PLANE_COLOR,
            };
            commands.push(DrawCommand {
                geometry: Geometry::Plane,
                transform: detected.plane.quad_transform(),
                color,
                lit: false,
                layer: Layer::Overlay,
            });
        }

        if let Some(reticle) = session.reticle() {
            let color = if reticle.on_plane() {
                RETICLE_ON_PLANE_COLOR
            } else {
                RETICLE_SEARCHING_COLOR
            };
            // Lift slightly off the surface so it does not z-fight the plane
            let position = reticle.position + reticle.normal * 0.002;
            commands.push(DrawCommand {
                geometry: Geometry::Reticle,
                transform: oriented(position, reticle.normal) * Matrix4::from_scale(RETICLE_RADIUS),
                color,
                lit: false,
                layer: Layer::Overlay,
            });
        }

        Self { commands }
    }

    pub fn layer(&self, layer: Layer) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(move |command| command.layer == layer)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Translation to `position` with local +Y turned onto `normal`
fn oriented(position: Vector3<f32>, normal: Vector3<f32>) -> Matrix4<f32> {
    let up = normal.normalize();
    let reference = if up.y.abs() > 0.99 {
        Vector3::unit_x()
    } else {
        Vector3::unit_y()
    };
    let tangent = reference.cross(up).normalize();
    let bitangent = up.cross(tangent);

    Matrix4::from_cols(
        tangent.extend(0.0),
        up.extend(0.0),
        bitangent.extend(0.0),
        position.extend(1.0),
    )
}
