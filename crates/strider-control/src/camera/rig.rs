//! Euler-angle camera anchor

use glam::{EulerRot, Quat, Vec2, Vec3};

/// Orientation anchor the per-tick look delta is applied to
///
/// Angles are Euler degrees: x = pitch, y = yaw, z = roll.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CameraRig {
    /// Current orientation in degrees (pitch, yaw, roll)
    pub angles: Vec3,
}

impl CameraRig {
    /// Create a rig at identity orientation
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a rig at the given Euler angles (degrees)
    pub fn from_angles(angles: Vec3) -> Self {
        Self { angles }
    }

    /// Apply a look delta in device units
    ///
    /// Device y feeds pitch and device x feeds yaw; no pitch clamp is
    /// applied.
    /// TODO: clamp pitch so the view cannot flip past the poles.
    pub fn apply_look(&mut self, delta: Vec2) {
        self.angles += Vec3::new(delta.y, delta.x, 0.0);
    }

    /// Pitch in degrees
    pub fn pitch(&self) -> f32 {
        self.angles.x
    }

    /// Yaw in degrees
    pub fn yaw(&self) -> f32 {
        self.angles.y
    }

    /// Orientation as a quaternion (yaw, then pitch, then roll)
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.angles.y.to_radians(),
            self.angles.x.to_radians(),
            self.angles.z.to_radians(),
        )
    }
}
