use super::camera_utils::{convert_matrix4_to_array, Camera, CameraUniform};
use cgmath::*;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

/// Stand-in for the device camera: orbits a target above the floor
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub distance: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub eye: Vector3<f32>,
    pub target: Vector3<f32>,
    pub up: Vector3<f32>,
    pub bounds: OrbitCameraBounds,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
    pub uniform: CameraUniform,
}

impl Camera for OrbitCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let eye = Point3::from_vec(self.eye);
        let target = Point3::from_vec(self.target);
        let view = Matrix4::look_at_rh(eye, target, self.up);
        let proj =
            OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar);
        proj * view
    }
}

impl OrbitCamera {
    pub fn new(distance: f32, pitch: f32, yaw: f32, target: Vector3<f32>, aspect: f32) -> Self {
        let mut camera = Self {
            distance,
            pitch,
            yaw,
            eye: Vector3::zero(), // Will be auto-calculated in `update()` nevertheless.
            target,
            up: Vector3::unit_y(),
            bounds: OrbitCameraBounds::default(),
            aspect,
            fovy: cgmath::Rad(std::f32::consts::PI / 4.0),
            znear: 0.05,
            zfar: 100.0,
            uniform: CameraUniform::default(),
        };
        camera.update();
        camera
    }

    /// Standing-height view looking down at the floor in front of the wall
    pub fn standing(aspect: f32) -> Self {
        Self::new(4.0, 0.5, 0.0, Vector3::new(0.0, 0.5, -0.5), aspect)
    }

    pub fn reset_to_default(&mut self) {
        *self = Self::standing(self.aspect);
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance.clamp(
            self.bounds.min_distance.unwrap_or(f32::EPSILON),
            self.bounds.max_distance.unwrap_or(f32::MAX),
        );
        self.update();
    }

    pub fn add_distance(&mut self, delta: f32) {
        let corrected_zoom = f32::log10(self.distance.max(1.1)) * delta;
        self.set_distance(self.distance + corrected_zoom);
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(self.bounds.min_pitch, self.bounds.max_pitch);
        self.update();
    }

    pub fn add_pitch(&mut self, delta: f32) {
        self.set_pitch(self.pitch + delta);
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        let mut bounded_yaw = yaw;
        if let Some(min_yaw) = self.bounds.min_yaw {
            bounded_yaw = bounded_yaw.max(min_yaw);
        }
        if let Some(max_yaw) = self.bounds.max_yaw {
            bounded_yaw = bounded_yaw.min(max_yaw);
        }
        self.yaw = bounded_yaw;
        self.update();
    }

    pub fn add_yaw(&mut self, delta: f32) {
        self.set_yaw(self.yaw + delta);
    }

    /// Slides the orbit target across the floor, relative to where the camera faces
    ///
    /// delta.0 moves right, delta.1 moves forward.
    pub fn walk(&mut self, delta: (f32, f32)) {
        let forward = Vector3::new(-self.yaw.sin(), 0.0, -self.yaw.cos());
        let right = forward.cross(Vector3::unit_y());
        self.target += right * delta.0 + forward * delta.1;
        self.update();
    }

    /// Updates the camera after changing `distance`, `pitch`, `yaw` or `target`.
    fn update(&mut self) {
        self.eye =
            calculate_cartesian_eye_position(self.pitch, self.yaw, self.distance, self.target);
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    pub fn update_view_proj(&mut self) {
        self.uniform.view_position = [self.eye.x, self.eye.y, self.eye.z, 1.0];
        self.uniform.view_proj = convert_matrix4_to_array(self.build_view_projection_matrix());
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OrbitCameraBounds {
    pub min_distance: Option<f32>,
    pub max_distance: Option<f32>,
    pub min_pitch: f32,
    pub max_pitch: f32,
    pub min_yaw: Option<f32>,
    pub max_yaw: Option<f32>,
}

impl Default for OrbitCameraBounds {
    fn default() -> Self {
        Self {
            min_distance: Some(0.5),
            max_distance: Some(12.0),
            // Stay above the floor
            min_pitch: 0.05,
            max_pitch: std::f32::consts::PI / 2.0 - f32::EPSILON,
            min_yaw: None,
            max_yaw: None,
        }
    }
}

fn calculate_cartesian_eye_position(
    pitch: f32,
    yaw: f32,
    distance: f32,
    target: Vector3<f32>,
) -> Vector3<f32> {
    Vector3::new(
        distance * yaw.sin() * pitch.cos(),
        distance * pitch.sin(),
        distance * yaw.cos() * pitch.cos(),
    ) + target
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eye_orbits_target() {
        let camera = OrbitCamera::new(5.0, 0.0, 0.0, Vector3::zero(), 1.5);
        assert!((camera.eye - Vector3::new(0.0, 0.0, 5.0)).magnitude() < 1e-5);

        let above = OrbitCamera::new(5.0, 1.0, 0.3, Vector3::new(1.0, 0.0, 1.0), 1.5);
        assert!(((above.eye - above.target).magnitude() - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_distance_and_pitch_are_bounded() {
        let mut camera = OrbitCamera::standing(1.0);
        camera.set_distance(100.0);
        assert_eq!(camera.distance, 12.0);

        camera.set_pitch(-1.0);
        assert_eq!(camera.pitch, 0.05);
        assert!(camera.eye.y > camera.target.y);
    }

    #[test]
    fn test_walk_moves_target_forward() {
        let mut camera = OrbitCamera::new(4.0, 0.5, 0.0, Vector3::zero(), 1.0);
        camera.walk((0.0, 1.0));
        assert!((camera.target - Vector3::new(0.0, 0.0, -1.0)).magnitude() < 1e-5);

        camera.walk((1.0, 0.0));
        assert!((camera.target - Vector3::new(1.0, 0.0, -1.0)).magnitude() < 1e-5);
    }
}
