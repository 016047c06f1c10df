//! Jump/movement state machine
//!
//! One [`tick`](LocomotionController::tick) per fixed simulation step, in a
//! fixed order: timer update, launch evaluation, jump cut, gravity shaping,
//! fall clamp, per-axis horizontal interpolation. The controller owns only
//! its timers and flags; velocity is read and returned, never retained.

use glam::{Vec2, Vec3};

use crate::input::InputSnapshot;

use super::LocomotionConfig;

/// Result of one fixed tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutput {
    /// Velocity to write back to the rigid body
    pub velocity: Vec3,
    /// Look delta to apply to the camera anchor (device units)
    pub look_delta: Vec2,
}

/// The locomotion state machine
#[derive(Debug, Clone)]
pub struct LocomotionController {
    /// Tunable parameters
    pub config: LocomotionConfig,
    /// Seconds remaining in which a jump is still permitted after leaving
    /// the ground
    coyote_timer: f32,
    /// Seconds remaining in which a buffered press is still honored
    jump_buffer_timer: f32,
    /// True from launch until the next grounded tick
    is_jumping: bool,
    /// Jump input level as of the last tick
    jump_held: bool,
    /// One-shot press edge, consumed by the next timer update
    pending_jump_press: bool,
    /// One-shot release edge, consumed on the next ascending tick
    pending_jump_release: bool,
}

impl LocomotionController {
    /// Create a controller with the given parameters
    pub fn new(config: LocomotionConfig) -> Self {
        Self {
            config,
            coyote_timer: 0.0,
            jump_buffer_timer: 0.0,
            is_jumping: false,
            jump_held: false,
            pending_jump_press: false,
            pending_jump_release: false,
        }
    }

    /// Whether a launch has occurred without a grounded tick since
    pub fn is_jumping(&self) -> bool {
        self.is_jumping
    }

    /// Clear all timers and flags (actor respawn)
    pub fn reset(&mut self) {
        self.coyote_timer = 0.0;
        self.jump_buffer_timer = 0.0;
        self.is_jumping = false;
        self.jump_held = false;
        self.pending_jump_press = false;
        self.pending_jump_release = false;
    }

    /// Run one fixed simulation step
    ///
    /// `velocity` is the rigid body's current linear velocity; the returned
    /// velocity replaces it in full. `dt` decays the grace timers while
    /// `fixed_dt` scales the per-tick forces; hosts that tick on a fixed
    /// cadence pass the same value for both.
    pub fn tick(
        &mut self,
        snapshot: &InputSnapshot,
        grounded: bool,
        velocity: Vec3,
        dt: f32,
        fixed_dt: f32,
    ) -> TickOutput {
        self.pending_jump_press |= snapshot.jump_pressed;
        self.pending_jump_release |= snapshot.jump_released;
        self.jump_held = snapshot.jump_held;

        // Timer update
        if self.pending_jump_press {
            self.jump_buffer_timer = self.config.jump_buffer;
            self.pending_jump_press = false;
        } else {
            self.jump_buffer_timer -= dt;
        }

        if grounded {
            self.coyote_timer = self.config.coyote_time;
            // landing always clears the jumping state
            self.is_jumping = false;
        } else {
            self.coyote_timer -= dt;
        }

        // Launch: absolute assignment, and both windows are consumed so the
        // same press or the same coyote window cannot launch twice
        let mut vertical = velocity.y;
        if self.jump_buffer_timer > 0.0 && self.coyote_timer > 0.0 && !self.is_jumping {
            vertical = self.config.jump_force;
            self.is_jumping = true;
            self.coyote_timer = 0.0;
            self.jump_buffer_timer = 0.0;
        }

        // Jump cut: only an ascending jump is shortened; a release during
        // descent stays pending until the next ascending tick
        if self.pending_jump_release && vertical > 0.0 {
            vertical *= self.config.jump_cut_multiplier;
            self.pending_jump_release = false;
        }

        // Gravity shaping on top of the base gravity the body integrates
        if vertical < 0.0 {
            vertical += self.config.gravity_y * (self.config.fall_multiplier - 1.0) * fixed_dt;
        } else if vertical > 0.0 && self.jump_held {
            vertical += self.config.gravity_y * (self.config.low_jump_multiplier - 1.0) * fixed_dt;
        }

        if vertical < self.config.max_fall_speed {
            vertical = self.config.max_fall_speed;
        }

        // Horizontal: bounded linear approach per axis, never overshooting
        let rate = (self.config.acceleration * fixed_dt).max(0.0);
        let target = snapshot.move_vector * self.config.top_speed;

        let velocity = Vec3::new(
            move_towards(velocity.x, target.x, rate),
            vertical,
            move_towards(velocity.z, target.y, rate),
        );

        TickOutput {
            velocity,
            look_delta: snapshot.look_delta,
        }
    }
}

/// Advance `current` toward `target` by at most `max_delta`, snapping when
/// within one step
fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    let diff = target - current;
    if diff.abs() <= max_delta {
        target
    } else {
        current + max_delta.copysign(diff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 0.05;

    fn config() -> LocomotionConfig {
        LocomotionConfig {
            top_speed: 10.0,
            acceleration: 50.0,
            jump_force: 8.0,
            coyote_time: 0.1,
            jump_buffer: 0.15,
            jump_cut_multiplier: 0.5,
            fall_multiplier: 2.5,
            low_jump_multiplier: 2.0,
            max_fall_speed: -20.0,
            gravity_y: -10.0,
            ground_distance: 0.3,
        }
    }

    fn controller() -> LocomotionController {
        LocomotionController::new(config())
    }

    fn idle() -> InputSnapshot {
        InputSnapshot::default()
    }

    fn pressed() -> InputSnapshot {
        InputSnapshot {
            jump_pressed: true,
            jump_held: true,
            ..Default::default()
        }
    }

    // press edge with the button already back up: isolates the launch
    // assignment from low-jump shaping, which keys off the held level
    fn press_edge() -> InputSnapshot {
        InputSnapshot {
            jump_pressed: true,
            ..Default::default()
        }
    }

    fn released() -> InputSnapshot {
        InputSnapshot {
            jump_released: true,
            ..Default::default()
        }
    }

    fn held() -> InputSnapshot {
        InputSnapshot {
            jump_held: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_grounded_press_launches_with_exact_force() {
        let mut c = controller();
        let out = c.tick(&press_edge(), true, Vec3::ZERO, DT, DT);
        assert_eq!(out.velocity.y, 8.0);
        assert!(c.is_jumping());
    }

    #[test]
    fn test_launch_with_button_held_shapes_on_the_same_tick() {
        let mut c = controller();
        let out = c.tick(&pressed(), true, Vec3::ZERO, DT, DT);
        // 8 + (-10) * (2.0 - 1) * 0.05
        assert!((out.velocity.y - 7.5).abs() < 1e-6);
        assert!(c.is_jumping());
    }

    #[test]
    fn test_press_after_coyote_expiry_is_blocked() {
        let mut c = controller();
        // one grounded tick, then airborne past the 0.1 s window
        c.tick(&idle(), true, Vec3::ZERO, DT, DT);
        for _ in 0..4 {
            c.tick(&idle(), false, Vec3::ZERO, DT, DT);
        }
        let out = c.tick(&pressed(), false, Vec3::ZERO, DT, DT);
        assert_eq!(out.velocity.y, 0.0);
        assert!(!c.is_jumping());
    }

    #[test]
    fn test_press_within_coyote_window_launches() {
        let mut c = controller();
        c.tick(&idle(), true, Vec3::ZERO, DT, DT);
        // one airborne tick leaves 0.05 s of the 0.1 s window
        let out = c.tick(&press_edge(), false, Vec3::ZERO, DT, DT);
        assert_eq!(out.velocity.y, 8.0);
        assert!(c.is_jumping());
    }

    #[test]
    fn test_landing_clears_jumping_regardless_of_velocity_sign() {
        let mut c = controller();
        c.tick(&pressed(), true, Vec3::ZERO, DT, DT);
        assert!(c.is_jumping());

        // still ascending when the probe reports contact
        c.tick(&idle(), true, Vec3::new(0.0, 3.0, 0.0), DT, DT);
        assert!(!c.is_jumping());
    }

    #[test]
    fn test_buffered_press_is_honored_on_the_landing_tick() {
        let mut c = controller();
        // airborne press, landing two ticks (0.1 s) later
        c.tick(&press_edge(), false, Vec3::ZERO, DT, DT);
        c.tick(&idle(), false, Vec3::ZERO, DT, DT);
        let out = c.tick(&idle(), true, Vec3::ZERO, DT, DT);
        assert_eq!(out.velocity.y, 8.0);
        assert!(c.is_jumping());
    }

    #[test]
    fn test_expired_buffer_is_not_honored_on_landing() {
        let mut c = controller();
        c.tick(&pressed(), false, Vec3::ZERO, DT, DT);
        for _ in 0..3 {
            c.tick(&held(), false, Vec3::ZERO, DT, DT);
        }
        // 0.2 s since the press, past the 0.15 s buffer
        let out = c.tick(&held(), true, Vec3::ZERO, DT, DT);
        assert_eq!(out.velocity.y, 0.0);
        assert!(!c.is_jumping());
    }

    #[test]
    fn test_same_press_cannot_launch_twice() {
        let mut c = controller();
        c.tick(&pressed(), true, Vec3::ZERO, DT, DT);
        // probe still grounded during liftoff, no new press
        let out = c.tick(&held(), true, Vec3::new(0.0, 8.0, 0.0), DT, DT);
        // low-jump shaping applies, but no reassignment to jump_force
        assert!(out.velocity.y < 8.0);
    }

    #[test]
    fn test_jump_cut_halves_ascent_once() {
        let mut c = controller();
        c.tick(&pressed(), true, Vec3::ZERO, DT, DT);

        let out = c.tick(&released(), false, Vec3::new(0.0, 8.0, 0.0), DT, DT);
        assert_eq!(out.velocity.y, 4.0);

        // no new release edge: still rising, held is false, no shaping
        let out = c.tick(&idle(), false, Vec3::new(0.0, 4.0, 0.0), DT, DT);
        assert_eq!(out.velocity.y, 4.0);
    }

    #[test]
    fn test_release_while_descending_latches_until_ascent() {
        let mut c = controller();
        // release arrives mid-descent: no cut on this tick
        let out = c.tick(&released(), false, Vec3::new(0.0, -2.0, 0.0), DT, DT);
        assert!(out.velocity.y < -2.0, "descent shaping only");

        // the stale edge cuts the next launch on its very first tick
        let out = c.tick(&press_edge(), true, Vec3::ZERO, DT, DT);
        assert_eq!(out.velocity.y, 4.0);
    }

    #[test]
    fn test_fall_multiplier_amplifies_descent() {
        let mut c = controller();
        let out = c.tick(&idle(), false, Vec3::new(0.0, -1.0, 0.0), 0.1, 0.1);
        // -1 + (-10) * (2.5 - 1) * 0.1
        assert!((out.velocity.y - -2.5).abs() < 1e-6);
    }

    #[test]
    fn test_low_jump_multiplier_only_while_held() {
        let mut c = controller();
        let out = c.tick(&held(), false, Vec3::new(0.0, 5.0, 0.0), 0.1, 0.1);
        // 5 + (-10) * (2.0 - 1) * 0.1
        assert!((out.velocity.y - 4.0).abs() < 1e-6);

        let mut c = controller();
        let out = c.tick(&idle(), false, Vec3::new(0.0, 5.0, 0.0), 0.1, 0.1);
        assert_eq!(out.velocity.y, 5.0);
    }

    #[test]
    fn test_vertical_velocity_never_drops_below_floor() {
        let mut c = controller();
        c.config.fall_multiplier = 100.0;
        let out = c.tick(&idle(), false, Vec3::new(0.0, -19.9, 0.0), 0.1, 0.1);
        assert_eq!(out.velocity.y, -20.0);

        let out = c.tick(&idle(), false, Vec3::new(0.0, -500.0, 0.0), 0.1, 0.1);
        assert_eq!(out.velocity.y, -20.0);
    }

    #[test]
    fn test_horizontal_approach_never_overshoots() {
        let mut c = controller();
        let snapshot = InputSnapshot {
            move_vector: Vec2::new(1.0, -1.0),
            ..Default::default()
        };

        // rate = 50 * 0.02 = 1.0 per tick, targets +10 / -10
        let mut velocity = Vec3::ZERO;
        for tick in 1..=10 {
            velocity = c.tick(&snapshot, true, velocity, 0.02, 0.02).velocity;
            assert!((velocity.x - tick as f32).abs() < 1e-5);
            assert!((velocity.z + tick as f32).abs() < 1e-5);
        }

        // at target: stays exactly there
        velocity = c.tick(&snapshot, true, velocity, 0.02, 0.02).velocity;
        assert_eq!(velocity.x, 10.0);
        assert_eq!(velocity.z, -10.0);
    }

    #[test]
    fn test_horizontal_snaps_within_one_step() {
        assert_eq!(move_towards(9.5, 10.0, 1.0), 10.0);
        assert_eq!(move_towards(-9.5, -10.0, 1.0), -10.0);
        assert_eq!(move_towards(0.0, 10.0, 1.0), 1.0);
        assert_eq!(move_towards(0.0, -10.0, 1.0), -1.0);
    }

    #[test]
    fn test_zero_dt_tick_is_idempotent() {
        let mut c = controller();
        c.tick(&pressed(), false, Vec3::ZERO, DT, DT);
        let before = c.clone();

        let velocity = Vec3::new(1.5, 2.5, -0.5);
        let out = c.tick(&held(), false, velocity, 0.0, 0.0);

        assert_eq!(out.velocity, velocity);
        assert_eq!(c.coyote_timer, before.coyote_timer);
        assert_eq!(c.jump_buffer_timer, before.jump_buffer_timer);
        assert_eq!(c.is_jumping, before.is_jumping);
    }

    #[test]
    fn test_look_delta_passes_through() {
        let mut c = controller();
        let snapshot = InputSnapshot {
            look_delta: Vec2::new(2.0, -3.0),
            ..Default::default()
        };
        let out = c.tick(&snapshot, true, Vec3::ZERO, DT, DT);
        assert_eq!(out.look_delta, Vec2::new(2.0, -3.0));
    }

    #[test]
    fn test_negative_acceleration_freezes_horizontal() {
        let mut c = controller();
        c.config.acceleration = -50.0;
        let snapshot = InputSnapshot {
            move_vector: Vec2::new(1.0, 0.0),
            ..Default::default()
        };
        let out = c.tick(&snapshot, true, Vec3::new(2.0, 0.0, 0.0), DT, DT);
        assert_eq!(out.velocity.x, 2.0);
    }
}
