//! Locomotion parameters and validation

use serde::{Deserialize, Serialize};

/// Tunable locomotion parameters, immutable for an actor's lifetime
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocomotionConfig {
    /// Target horizontal speed at full move input (m/s)
    pub top_speed: f32,
    /// Horizontal acceleration toward the target speed (m/s^2); multiplied
    /// by the fixed timestep each tick, so it usually exceeds top_speed
    pub acceleration: f32,
    /// Vertical velocity assigned on jump launch (m/s)
    pub jump_force: f32,
    /// Grace window after leaving the ground during which a jump is still
    /// accepted (s)
    pub coyote_time: f32,
    /// Grace window during which an early jump press is remembered and
    /// honored on landing (s)
    pub jump_buffer: f32,
    /// Vertical velocity multiplier when jump is released while ascending,
    /// expected in (0, 1)
    pub jump_cut_multiplier: f32,
    /// Gravity multiplier while descending (> 1 falls faster than base)
    pub fall_multiplier: f32,
    /// Gravity multiplier while ascending with jump held (> 1 shortens the
    /// full jump)
    pub low_jump_multiplier: f32,
    /// Downward speed floor; vertical velocity never drops below this
    /// (negative)
    pub max_fall_speed: f32,
    /// Base gravity on the Y axis (negative); must match what the physics
    /// world integrates
    pub gravity_y: f32,
    /// Ground probe sphere radius (m)
    pub ground_distance: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            top_speed: 6.0,
            acceleration: 40.0,
            jump_force: 8.0,
            coyote_time: 0.12,
            jump_buffer: 0.15,
            jump_cut_multiplier: 0.5,
            fall_multiplier: 2.5,
            low_jump_multiplier: 2.0,
            max_fall_speed: -20.0,
            gravity_y: -9.81,
            ground_distance: 0.3,
        }
    }
}

/// Degenerate parameter values
///
/// These never abort construction; the actor degrades into inert or reduced
/// motion instead. Callers surface them as warnings.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigWarning {
    #[error("top_speed {0} is not positive; the actor has no horizontal target")]
    NonPositiveTopSpeed(f32),

    #[error("acceleration {0} is not positive; horizontal velocity will never change")]
    NonPositiveAcceleration(f32),

    #[error("jump_force {0} is not positive; launches will not leave the ground")]
    NonPositiveJumpForce(f32),

    #[error("coyote_time {0} is not positive; no jump can ever launch")]
    NonPositiveCoyoteTime(f32),

    #[error("jump_buffer {0} is not positive; no press will ever be honored")]
    NonPositiveJumpBuffer(f32),

    #[error("jump_cut_multiplier {0} is outside (0, 1]; releasing jump will not shorten the ascent")]
    JumpCutOutOfRange(f32),

    #[error("max_fall_speed {0} is positive; the fall clamp expects a downward floor")]
    PositiveMaxFallSpeed(f32),

    #[error("gravity_y {0} is not negative; gravity shaping will push the actor upward")]
    NonNegativeGravity(f32),

    #[error("ground_distance {0} is not positive; the ground probe can never report contact")]
    NonPositiveGroundDistance(f32),
}

impl LocomotionConfig {
    /// Check for degenerate values
    ///
    /// An empty result means the config behaves as documented; any entry
    /// means some part of locomotion is inert or inverted.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.top_speed <= 0.0 {
            warnings.push(ConfigWarning::NonPositiveTopSpeed(self.top_speed));
        }
        if self.acceleration <= 0.0 {
            warnings.push(ConfigWarning::NonPositiveAcceleration(self.acceleration));
        }
        if self.jump_force <= 0.0 {
            warnings.push(ConfigWarning::NonPositiveJumpForce(self.jump_force));
        }
        if self.coyote_time <= 0.0 {
            warnings.push(ConfigWarning::NonPositiveCoyoteTime(self.coyote_time));
        }
        if self.jump_buffer <= 0.0 {
            warnings.push(ConfigWarning::NonPositiveJumpBuffer(self.jump_buffer));
        }
        if self.jump_cut_multiplier <= 0.0 || self.jump_cut_multiplier > 1.0 {
            warnings.push(ConfigWarning::JumpCutOutOfRange(self.jump_cut_multiplier));
        }
        if self.max_fall_speed > 0.0 {
            warnings.push(ConfigWarning::PositiveMaxFallSpeed(self.max_fall_speed));
        }
        if self.gravity_y >= 0.0 {
            warnings.push(ConfigWarning::NonNegativeGravity(self.gravity_y));
        }
        if self.ground_distance <= 0.0 {
            warnings.push(ConfigWarning::NonPositiveGroundDistance(self.ground_distance));
        }

        warnings
    }
}
