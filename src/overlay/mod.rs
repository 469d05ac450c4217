//! 2D overlay with an on-screen analog joystick
//!
//! Touching the overlay drops a joystick at the touch point; dragging moves
//! its stick and publishes [`JoystickData`] on the [`JOYSTICK_TOPIC`] channel.
//! Nothing in the app consumes the stream yet.

pub mod events;
pub mod joystick;
pub mod scene;

pub use events::{EventChannel, JOYSTICK_TOPIC};
pub use joystick::{AnalogJoystick, JoystickData};
pub use scene::{Bounds, OverlayScene, JOYSTICK_DIAMETER};
