use log::debug;
use winit::{
    dpi::PhysicalPosition,
    event::{DeviceEvent, ElementState, KeyEvent, MouseScrollDelta},
    keyboard::{KeyCode, PhysicalKey},
};

use super::orbit_camera::OrbitCamera;

/// Mouse orbit/zoom plus WASD walking for the desktop view
pub struct CameraController {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub walk_step: f32,
    is_shift_held: bool,
    is_mouse_pressed: bool,
}

impl CameraController {
    pub fn new(rotate_speed: f32, zoom_speed: f32) -> Self {
        Self {
            rotate_speed,
            zoom_speed,
            walk_step: 0.1,
            is_shift_held: false,
            is_mouse_pressed: false,
        }
    }

    /// Drag state is cleared when the pointer is over the UI
    pub fn release_mouse(&mut self) {
        self.is_mouse_pressed = false;
    }

    pub fn process_events(&mut self, event: &DeviceEvent, camera: &mut OrbitCamera) -> bool {
        match event {
            DeviceEvent::Button {
                button: 0, // Left Mouse Button
                state,
            } => {
                self.is_mouse_pressed = *state == ElementState::Pressed;
                false
            }
            DeviceEvent::MouseWheel { delta } => {
                let scroll_amount = -match delta {
                    MouseScrollDelta::LineDelta(_, scroll) => *scroll,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y: scroll, .. }) => {
                        *scroll as f32
                    }
                };
                camera.add_distance(scroll_amount * self.zoom_speed);
                true
            }
            DeviceEvent::MouseMotion { delta } if self.is_mouse_pressed => {
                camera.add_yaw(-delta.0 as f32 * self.rotate_speed);
                camera.add_pitch(delta.1 as f32 * self.rotate_speed);
                true
            }
            _ => false,
        }
    }

    pub fn process_keyed_events(&mut self, event: &KeyEvent, camera: &mut OrbitCamera) -> bool {
        let PhysicalKey::Code(code) = event.physical_key else {
            return false;
        };
        let pressed = event.state == ElementState::Pressed;

        match code {
            KeyCode::ShiftLeft | KeyCode::ShiftRight => {
                self.is_shift_held = pressed;
                false
            }
            KeyCode::KeyC if pressed && self.is_shift_held => {
                debug!("Resetting camera to default position");
                camera.reset_to_default();
                true
            }
            KeyCode::KeyW | KeyCode::KeyA | KeyCode::KeyS | KeyCode::KeyD if pressed => {
                let step = self.walk_step;
                let delta = match code {
                    KeyCode::KeyW => (0.0, step),
                    KeyCode::KeyS => (0.0, -step),
                    KeyCode::KeyA => (-step, 0.0),
                    _ => (step, 0.0),
                };
                camera.walk(delta);
                true
            }
            _ => false,
        }
    }
}
