//! Input buffering with one-shot edge latching
//!
//! Input events arrive on their own cadence, possibly several per simulation
//! step. The buffer latches them into flags and hands the controller one
//! consistent [`InputSnapshot`] per tick; press/release edges are drained by
//! the snapshot so each is applied exactly once.

use std::collections::{HashMap, HashSet};

use glam::Vec2;
use parking_lot::Mutex;
use winit::event::ElementState;
use winit::keyboard::{KeyCode, PhysicalKey};

/// Per-tick view of player intent
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    /// Continuous move intent, x = strafe, y = forward/backward
    pub move_vector: Vec2,
    /// Look delta in device units accumulated since the previous snapshot
    pub look_delta: Vec2,
    /// Jump was pressed since the previous snapshot (one-shot)
    pub jump_pressed: bool,
    /// Jump was released since the previous snapshot (one-shot)
    pub jump_released: bool,
    /// Jump is currently held
    pub jump_held: bool,
    /// A move input is active (animation signal only, not physics)
    pub move_active: bool,
}

#[derive(Debug, Default)]
struct Latch {
    move_vector: Vec2,
    look_delta: Vec2,
    jump_pressed: bool,
    jump_released: bool,
    jump_held: bool,
    move_active: bool,
}

/// Accumulates asynchronous input events into per-tick snapshots
///
/// Event sinks take `&self` and may be called from an input-polling thread;
/// the latch is mutex-guarded so the tick never observes a torn update.
#[derive(Debug, Default)]
pub struct InputBuffer {
    latch: Mutex<Latch>,
}

impl InputBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// A move input became active or changed value
    pub fn move_performed(&self, vector: Vec2) {
        let mut latch = self.latch.lock();
        latch.move_vector = vector;
        latch.move_active = true;
    }

    /// The move input returned to rest
    pub fn move_canceled(&self) {
        let mut latch = self.latch.lock();
        latch.move_vector = Vec2::ZERO;
        latch.move_active = false;
    }

    /// Jump was pressed; idempotent if fired again before the next snapshot
    pub fn jump_performed(&self) {
        let mut latch = self.latch.lock();
        latch.jump_pressed = true;
        latch.jump_held = true;
    }

    /// Jump was released
    pub fn jump_canceled(&self) {
        let mut latch = self.latch.lock();
        latch.jump_released = true;
        latch.jump_held = false;
    }

    /// Accumulate a look delta in device units
    pub fn look_moved(&self, delta: Vec2) {
        let mut latch = self.latch.lock();
        latch.look_delta += delta;
    }

    /// Produce the snapshot for one tick
    ///
    /// Drains the press/release edges and the accumulated look delta; the
    /// move vector and held level are sampled as-is.
    pub fn snapshot(&self) -> InputSnapshot {
        let mut latch = self.latch.lock();
        let snapshot = InputSnapshot {
            move_vector: latch.move_vector,
            look_delta: latch.look_delta,
            jump_pressed: latch.jump_pressed,
            jump_released: latch.jump_released,
            jump_held: latch.jump_held,
            move_active: latch.move_active,
        };
        latch.jump_pressed = false;
        latch.jump_released = false;
        latch.look_delta = Vec2::ZERO;
        snapshot
    }
}

/// Logical actions the locomotion core consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Move forward (W by default)
    MoveForward,
    /// Move backward (S by default)
    MoveBackward,
    /// Move left (A by default)
    MoveLeft,
    /// Move right (D by default)
    MoveRight,
    /// Jump (Space by default)
    Jump,
}

/// Maps physical keys to locomotion actions
#[derive(Debug, Clone)]
pub struct InputBindings {
    bindings: HashMap<KeyCode, InputAction>,
}

impl Default for InputBindings {
    fn default() -> Self {
        let mut bindings = Self {
            bindings: HashMap::new(),
        };

        // Default WASD bindings
        bindings.bind(KeyCode::KeyW, InputAction::MoveForward);
        bindings.bind(KeyCode::KeyS, InputAction::MoveBackward);
        bindings.bind(KeyCode::KeyA, InputAction::MoveLeft);
        bindings.bind(KeyCode::KeyD, InputAction::MoveRight);

        // Arrow keys as alternative
        bindings.bind(KeyCode::ArrowUp, InputAction::MoveForward);
        bindings.bind(KeyCode::ArrowDown, InputAction::MoveBackward);
        bindings.bind(KeyCode::ArrowLeft, InputAction::MoveLeft);
        bindings.bind(KeyCode::ArrowRight, InputAction::MoveRight);

        bindings.bind(KeyCode::Space, InputAction::Jump);

        bindings
    }
}

impl InputBindings {
    /// Create bindings with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a key to an action
    pub fn bind(&mut self, key: KeyCode, action: InputAction) {
        self.bindings.insert(key, action);
    }

    /// Unbind a key
    pub fn unbind(&mut self, key: KeyCode) {
        self.bindings.remove(&key);
    }

    /// Get the action for a key, if any
    pub fn get_key_action(&self, key: KeyCode) -> Option<InputAction> {
        self.bindings.get(&key).copied()
    }
}

/// Routes winit events into an [`InputBuffer`]
///
/// Owns no global state; dropping the router detaches the bindings with it.
#[derive(Debug)]
pub struct InputRouter {
    /// Key bindings
    pub bindings: InputBindings,
    /// Mouse sensitivity multiplier applied to look deltas
    pub mouse_sensitivity: f32,
    /// Invert Y axis
    pub invert_y: bool,
    /// Actions currently held (suppresses key auto-repeat edges)
    held: HashSet<InputAction>,
}

impl Default for InputRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl InputRouter {
    /// Create a router with default bindings
    pub fn new() -> Self {
        Self {
            bindings: InputBindings::default(),
            mouse_sensitivity: 1.0,
            invert_y: false,
            held: HashSet::new(),
        }
    }

    /// Handle a keyboard event, forwarding edges to the buffer
    pub fn handle_keyboard(
        &mut self,
        buffer: &InputBuffer,
        physical_key: PhysicalKey,
        element_state: ElementState,
    ) {
        let PhysicalKey::Code(key_code) = physical_key else {
            return;
        };
        let Some(action) = self.bindings.get_key_action(key_code) else {
            return;
        };

        match element_state {
            ElementState::Pressed => {
                // key auto-repeat must not re-fire edges
                if !self.held.insert(action) {
                    return;
                }
                match action {
                    InputAction::Jump => buffer.jump_performed(),
                    _ => buffer.move_performed(self.move_vector()),
                }
            }
            ElementState::Released => {
                if !self.held.remove(&action) {
                    return;
                }
                match action {
                    InputAction::Jump => buffer.jump_canceled(),
                    _ => {
                        let vector = self.move_vector();
                        if vector == Vec2::ZERO {
                            buffer.move_canceled();
                        } else {
                            buffer.move_performed(vector);
                        }
                    }
                }
            }
        }
    }

    /// Handle raw mouse motion, forwarding a scaled look delta
    pub fn handle_mouse_motion(&self, buffer: &InputBuffer, delta: (f64, f64)) {
        let y_mult = if self.invert_y { -1.0 } else { 1.0 };
        buffer.look_moved(Vec2::new(
            delta.0 as f32 * self.mouse_sensitivity,
            delta.1 as f32 * self.mouse_sensitivity * y_mult,
        ));
    }

    /// Compose the move vector from currently held movement actions
    fn move_vector(&self) -> Vec2 {
        let mut vector = Vec2::ZERO;
        if self.held.contains(&InputAction::MoveForward) {
            vector.y += 1.0;
        }
        if self.held.contains(&InputAction::MoveBackward) {
            vector.y -= 1.0;
        }
        if self.held.contains(&InputAction::MoveRight) {
            vector.x += 1.0;
        }
        if self.held.contains(&InputAction::MoveLeft) {
            vector.x -= 1.0;
        }
        if vector.length_squared() > 1.0 {
            vector = vector.normalize();
        }
        vector
    }
}
