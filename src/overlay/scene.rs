use cgmath::Vector2;
use log::debug;

use super::events::EventChannel;
use super::joystick::{AnalogJoystick, JoystickData};

pub const JOYSTICK_DIAMETER: f32 = 100.0;

/// Edge loop around the scene frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn contains(&self, point: Vector2<f32>) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }

    pub fn clamp(&self, point: Vector2<f32>) -> Vector2<f32> {
        Vector2::new(
            point.x.clamp(0.0, self.width.max(0.0)),
            point.y.clamp(0.0, self.height.max(0.0)),
        )
    }
}

/// Transparent 2D layer drawn over the 3D view
///
/// Touch locations come in view coordinates (origin top left, y down). The
/// scene itself is y up with the origin bottom left, so joystick headings
/// read the way they look on screen.
pub struct OverlayScene {
    bounds: Bounds,
    joystick_diameter: f32,
    joystick: Option<AnalogJoystick>,
    channel: EventChannel<JoystickData>,
}

impl OverlayScene {
    pub fn new(size: (f32, f32), channel: EventChannel<JoystickData>) -> Self {
        Self {
            bounds: Bounds {
                width: size.0,
                height: size.1,
            },
            joystick_diameter: JOYSTICK_DIAMETER,
            joystick: None,
            channel,
        }
    }

    pub fn with_joystick_diameter(mut self, diameter: f32) -> Self {
        self.joystick_diameter = diameter;
        self
    }

    pub fn resize(&mut self, size: (f32, f32)) {
        self.bounds = Bounds {
            width: size.0,
            height: size.1,
        };
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn joystick(&self) -> Option<&AnalogJoystick> {
        self.joystick.as_ref()
    }

    pub fn channel_mut(&mut self) -> &mut EventChannel<JoystickData> {
        &mut self.channel
    }

    /// Replaces whatever is on screen with a fresh joystick at `location`
    pub fn touches_began(&mut self, location: (f32, f32)) {
        let position = self.to_scene(location);
        debug!("Joystick spawned at {:?}", position);
        self.joystick = Some(AnalogJoystick::new(self.joystick_diameter, position));
    }

    pub fn touches_moved(&mut self, location: (f32, f32)) {
        let position = self.to_scene(location);
        if let Some(joystick) = self.joystick.as_mut() {
            let data = joystick.track(position);
            self.channel.publish(data);
        }
    }

    /// Re-centers the stick; the joystick stays on screen
    pub fn touches_ended(&mut self) {
        if let Some(joystick) = self.joystick.as_mut() {
            let data = joystick.reset();
            self.channel.publish(data);
        }
    }

    /// View coordinates to scene coordinates, clamped to the bounds
    pub fn to_scene(&self, location: (f32, f32)) -> Vector2<f32> {
        let clamped = self.bounds.clamp(Vector2::new(location.0, location.1));
        Vector2::new(clamped.x, self.bounds.height - clamped.y)
    }

    pub fn to_view(&self, point: Vector2<f32>) -> (f32, f32) {
        (point.x, self.bounds.height - point.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::JOYSTICK_TOPIC;

    fn scene() -> (OverlayScene, std::sync::mpsc::Receiver<JoystickData>) {
        let mut channel = EventChannel::new(JOYSTICK_TOPIC);
        let receiver = channel.subscribe();
        (OverlayScene::new((800.0, 600.0), channel), receiver)
    }

    #[test]
    fn test_touch_spawns_single_joystick() {
        let (mut scene, _events) = scene();
        scene.touches_began((100.0, 100.0));
        scene.touches_began((300.0, 200.0));

        let joystick = scene.joystick().unwrap();
        assert_eq!(joystick.position, Vector2::new(300.0, 400.0));
        assert_eq!(joystick.diameter, JOYSTICK_DIAMETER);
    }

    #[test]
    fn test_drag_publishes_tracking_data() {
        let (mut scene, events) = scene();
        scene.touches_began((400.0, 300.0));
        // Drag upward on screen
        scene.touches_moved((400.0, 280.0));

        let data = events.try_recv().unwrap();
        assert_eq!(data.velocity, Vector2::new(0.0, 20.0));
        assert_eq!(data.angular, 0.0);
    }

    #[test]
    fn test_release_publishes_zero_and_keeps_joystick() {
        let (mut scene, events) = scene();
        scene.touches_began((400.0, 300.0));
        scene.touches_moved((500.0, 300.0));
        scene.touches_ended();

        let last = events.try_iter().last().unwrap();
        assert_eq!(last, JoystickData::zero());
        assert!(scene.joystick().is_some());
    }

    #[test]
    fn test_moves_without_joystick_publish_nothing() {
        let (mut scene, events) = scene();
        scene.touches_moved((10.0, 10.0));
        scene.touches_ended();
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_locations_clamped_to_bounds() {
        let (scene, _events) = scene();
        assert_eq!(scene.to_scene((-50.0, 900.0)), Vector2::new(0.0, 0.0));
        assert_eq!(scene.to_view(scene.to_scene((20.0, 30.0))), (20.0, 30.0));
    }
}
