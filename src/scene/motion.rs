//! Per-frame motion of the engine part: a slow spin nudged by the cursor and
//! a gentle breathing scale.

use cgmath::{Quaternion, Rad, Rotation3, Vector3};
use instant::Duration;

use crate::{camera::CursorOffset, config::MotionConfig, data_structures::instance::Instance};

#[derive(Clone, Debug, PartialEq)]
pub struct MotionState {
    rotation_x: f32,
    rotation_y: f32,
    spin_x: f32,
    spin_y: f32,
    pulse_amplitude: f32,
    pulse_frequency: f32,
}

impl MotionState {
    pub fn new(config: &MotionConfig) -> Self {
        Self {
            rotation_x: 0.0,
            rotation_y: 0.0,
            spin_x: config.spin_x,
            spin_y: config.spin_y,
            pulse_amplitude: config.pulse_amplitude,
            pulse_frequency: config.pulse_frequency,
        }
    }

    /// One frame of spin. The cursor offset adds to the base spin, so the
    /// part turns faster the farther the pointer is from the centre.
    pub fn advance(&mut self, cursor: CursorOffset) {
        self.rotation_y += self.spin_y + cursor.x;
        self.rotation_x += self.spin_x + cursor.y;
    }

    /// Accumulated `(x, y)` Euler angles in radians.
    pub fn rotation(&self) -> (f32, f32) {
        (self.rotation_x, self.rotation_y)
    }

    pub fn pulse_scale(&self, elapsed: Duration) -> f32 {
        1.0 + (elapsed.as_secs_f32() * self.pulse_frequency).sin() * self.pulse_amplitude
    }

    /// The group transform for the current frame. Euler order is XYZ.
    pub fn to_instance(&self, elapsed: Duration) -> Instance {
        let rotation = Quaternion::from_angle_x(Rad(self.rotation_x))
            * Quaternion::from_angle_y(Rad(self.rotation_y));
        let scale = self.pulse_scale(elapsed);
        Instance {
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation,
            scale: Vector3::new(scale, scale, scale),
        }
    }
}
