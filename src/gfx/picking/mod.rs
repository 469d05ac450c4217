//! # Ray Casting
//!
//! Geometry used to aim the focus reticle: converting a screen position into a
//! world-space ray, and intersecting that ray with bounded planes.
//!
//! ## How it works
//!
//! 1. **Screen to Ray**: Unproject the screen point through the inverse
//!    view-projection matrix at the near and far planes
//! 2. **Ray-Plane Intersection**: Solve for the distance along the ray where it
//!    crosses the plane, rejecting hits behind the origin or outside the
//!    plane's extent
//! 3. **Nearest Hit**: The caller keeps the closest hit over all candidates
//!
//! ## Usage
//!
//! ```no_run
//! use placer::gfx::picking::{screen_to_ray, BoundedPlane};
//! use cgmath::Vector3;
//! # let camera: placer::gfx::OrbitCamera = unimplemented!();
//!
//! let ray = screen_to_ray((600.0, 400.0), (1200.0, 800.0), &camera);
//! let floor = BoundedPlane::new(Vector3::new(0.0, 0.0, 0.0), Vector3::unit_y(), Vector3::unit_x(), [2.0, 2.0]);
//! if let Some(hit) = floor.intersect_ray(&ray) {
//!     println!("reticle at {:?}", ray.point_at(hit));
//! }
//! ```

use cgmath::{
    EuclideanSpace, InnerSpace, Matrix4, SquareMatrix, Vector3, Vector4, Zero,
};

use crate::gfx::camera::orbit_camera::OrbitCamera;

/// A 3D ray for intersection testing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Ray origin point in world space
    pub origin: Vector3<f32>,
    /// Ray direction (normalized)
    pub direction: Vector3<f32>,
}

impl Ray {
    /// Create a new ray
    pub fn new(origin: Vector3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vector3<f32> {
        self.origin + self.direction * t
    }
}

/// Axis-aligned bounds of a model's vertices
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner of the bounding box
    pub min: Vector3<f32>,
    /// Maximum corner of the bounding box
    pub max: Vector3<f32>,
}

impl AABB {
    /// Create a new AABB
    pub fn new(min: Vector3<f32>, max: Vector3<f32>) -> Self {
        Self { min, max }
    }

    /// Create AABB from a set of vertices
    pub fn from_vertices(vertices: &[[f32; 3]]) -> Self {
        if vertices.is_empty() {
            return Self::new(Vector3::zero(), Vector3::zero());
        }

        let mut min = Vector3::new(vertices[0][0], vertices[0][1], vertices[0][2]);
        let mut max = min;

        for vertex in vertices.iter().skip(1) {
            let v = Vector3::new(vertex[0], vertex[1], vertex[2]);
            min.x = min.x.min(v.x);
            min.y = min.y.min(v.y);
            min.z = min.z.min(v.z);
            max.x = max.x.max(v.x);
            max.y = max.y.max(v.y);
            max.z = max.z.max(v.z);
        }

        Self::new(min, max)
    }
}

/// A finite rectangle lying in a plane
///
/// `tangent` and `tangent.cross(normal)` span the rectangle; `half_extent`
/// gives its half size along each of them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundedPlane {
    pub center: Vector3<f32>,
    pub normal: Vector3<f32>,
    pub tangent: Vector3<f32>,
    pub half_extent: [f32; 2],
}

impl BoundedPlane {
    pub fn new(
        center: Vector3<f32>,
        normal: Vector3<f32>,
        tangent: Vector3<f32>,
        half_extent: [f32; 2],
    ) -> Self {
        Self {
            center,
            normal: normal.normalize(),
            tangent: tangent.normalize(),
            half_extent,
        }
    }

    pub fn bitangent(&self) -> Vector3<f32> {
        self.tangent.cross(self.normal)
    }

    /// Distance along the ray to the rectangle, if the ray hits it in front
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let denom = self.normal.dot(ray.direction);
        if denom.abs() < 1e-6 {
            return None;
        }

        let t = (self.center - ray.origin).dot(self.normal) / denom;
        if t < 0.0 {
            return None;
        }

        let local = ray.point_at(t) - self.center;
        let u = local.dot(self.tangent);
        let v = local.dot(self.bitangent());
        if u.abs() <= self.half_extent[0] && v.abs() <= self.half_extent[1] {
            Some(t)
        } else {
            None
        }
    }

    /// Model matrix mapping a unit XZ quad onto this rectangle
    pub fn quad_transform(&self) -> Matrix4<f32> {
        let tangent = self.tangent * self.half_extent[0];
        let bitangent = self.bitangent() * self.half_extent[1];
        Matrix4::from_cols(
            tangent.extend(0.0),
            self.normal.extend(0.0),
            bitangent.extend(0.0),
            self.center.extend(1.0),
        )
    }
}

/// Convert screen coordinates to a world-space ray
pub fn screen_to_ray(screen_pos: (f32, f32), screen_size: (f32, f32), camera: &OrbitCamera) -> Ray {
    let (mouse_x, mouse_y) = screen_pos;
    let (screen_width, screen_height) = screen_size;

    // Convert screen coordinates to normalized device coordinates (-1 to 1)
    let ndc_x = (2.0 * mouse_x) / screen_width - 1.0;
    let ndc_y = 1.0 - (2.0 * mouse_y) / screen_height; // Flip Y axis

    let eye = cgmath::Point3::from_vec(camera.eye);
    let target = cgmath::Point3::from_vec(camera.target);
    let view_matrix = Matrix4::look_at_rh(eye, target, camera.up);
    let proj_matrix = cgmath::perspective(camera.fovy, camera.aspect, camera.znear, camera.zfar);

    let inv_view_proj = (proj_matrix * view_matrix)
        .invert()
        .unwrap_or(Matrix4::from_scale(1.0));

    // Transform near and far points from NDC to world space
    let world_near = inv_view_proj * Vector4::new(ndc_x, ndc_y, -1.0, 1.0);
    let world_far = inv_view_proj * Vector4::new(ndc_x, ndc_y, 1.0, 1.0);

    let near_3d = world_near.truncate() / world_near.w;
    let far_3d = world_far.truncate() / world_far.w;

    Ray::new(near_3d, far_3d - near_3d)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor() -> BoundedPlane {
        BoundedPlane::new(Vector3::new(0.0, 0.0, 0.0), Vector3::unit_y(), Vector3::unit_x(), [2.0, 2.0])
    }

    #[test]
    fn test_aabb_creation() {
        let vertices = vec![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [-1.0, -1.0, -1.0]];
        let aabb = AABB::from_vertices(&vertices);

        assert_eq!(aabb.min, Vector3::new(-1.0, -1.0, -1.0));
        assert_eq!(aabb.max, Vector3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_ray_hits_floor_from_above() {
        let ray = Ray::new(Vector3::new(0.5, 3.0, 0.5), Vector3::new(0.0, -1.0, 0.0));
        let t = floor().intersect_ray(&ray).unwrap();

        assert!((t - 3.0).abs() < 1e-5);
        assert!((ray.point_at(t) - Vector3::new(0.5, 0.0, 0.5)).magnitude() < 1e-5);
    }

    #[test]
    fn test_ray_misses_outside_extent_or_behind() {
        let outside = Ray::new(Vector3::new(5.0, 3.0, 0.0), Vector3::new(0.0, -1.0, 0.0));
        assert!(floor().intersect_ray(&outside).is_none());

        let pointing_away = Ray::new(Vector3::new(0.0, 3.0, 0.0), Vector3::new(0.0, 1.0, 0.0));
        assert!(floor().intersect_ray(&pointing_away).is_none());

        let parallel = Ray::new(Vector3::new(0.0, 1.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
        assert!(floor().intersect_ray(&parallel).is_none());
    }

    #[test]
    fn test_quad_transform_maps_corners() {
        let plane = floor();
        let corner = plane.quad_transform() * Vector4::new(1.0, 0.0, 1.0, 1.0);
        assert_eq!(corner.truncate(), Vector3::new(2.0, 0.0, 2.0));
    }
}
