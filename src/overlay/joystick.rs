use cgmath::{InnerSpace, Vector2, Zero};

/// Tracking data reported while the stick moves
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JoystickData {
    /// Stick offset from the base, at most one radius long
    pub velocity: Vector2<f32>,
    /// Stick heading in radians, zero when pushed straight up
    pub angular: f32,
}

impl JoystickData {
    pub fn zero() -> Self {
        Self {
            velocity: Vector2::zero(),
            angular: 0.0,
        }
    }
}

/// On-screen analog stick: a round base with a knob that follows the touch
#[derive(Debug, Clone, PartialEq)]
pub struct AnalogJoystick {
    pub diameter: f32,
    /// Center of the base in overlay coordinates (y up)
    pub position: Vector2<f32>,
    stick: Vector2<f32>,
}

impl AnalogJoystick {
    pub fn new(diameter: f32, position: Vector2<f32>) -> Self {
        Self {
            diameter,
            position,
            stick: Vector2::zero(),
        }
    }

    pub fn radius(&self) -> f32 {
        self.diameter * 0.5
    }

    /// Stick offset from the base
    pub fn stick(&self) -> Vector2<f32> {
        self.stick
    }

    pub fn stick_position(&self) -> Vector2<f32> {
        self.position + self.stick
    }

    pub fn data(&self) -> JoystickData {
        JoystickData {
            velocity: self.stick,
            angular: -self.stick.x.atan2(self.stick.y),
        }
    }

    /// Moves the knob toward `location`, clamped to the base
    pub fn track(&mut self, location: Vector2<f32>) -> JoystickData {
        let offset = location - self.position;
        let radius = self.radius();
        self.stick = if offset.magnitude() > radius {
            offset.normalize_to(radius)
        } else {
            offset
        };
        self.data()
    }

    pub fn reset(&mut self) -> JoystickData {
        self.stick = Vector2::zero();
        JoystickData::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_velocity_clamped_to_radius() {
        let mut joystick = AnalogJoystick::new(100.0, Vector2::new(10.0, 10.0));
        let data = joystick.track(Vector2::new(210.0, 10.0));

        assert!((data.velocity.magnitude() - 50.0).abs() < 1e-4);
        assert_eq!(joystick.stick_position(), Vector2::new(60.0, 10.0));
    }

    #[test]
    fn test_small_offsets_pass_through() {
        let mut joystick = AnalogJoystick::new(100.0, Vector2::zero());
        let data = joystick.track(Vector2::new(0.0, 20.0));

        assert_eq!(data.velocity, Vector2::new(0.0, 20.0));
        assert_eq!(data.angular, 0.0);
    }

    #[test]
    fn test_angular_turns_counterclockwise_to_the_left() {
        let mut joystick = AnalogJoystick::new(100.0, Vector2::zero());
        let right = joystick.track(Vector2::new(30.0, 0.0));
        assert!((right.angular + FRAC_PI_2).abs() < 1e-5);

        let left = joystick.track(Vector2::new(-30.0, 0.0));
        assert!((left.angular - FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn test_reset_centers_stick() {
        let mut joystick = AnalogJoystick::new(100.0, Vector2::zero());
        joystick.track(Vector2::new(5.0, 5.0));
        assert_eq!(joystick.reset(), JoystickData::zero());
        assert_eq!(joystick.stick(), Vector2::zero());
    }
}
