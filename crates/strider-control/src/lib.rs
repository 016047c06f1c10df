//! Strider Control - locomotion logic for a physically simulated actor
//!
//! Converts buffered player intent (move vector, jump press/hold/release,
//! look delta) into a rigid-body velocity update and a camera orientation
//! update every fixed simulation step.

pub mod camera;
pub mod input;
pub mod player;

pub use camera::CameraRig;
pub use input::{InputAction, InputBindings, InputBuffer, InputRouter, InputSnapshot};
pub use player::{
    Actor, ActorError, ConfigWarning, LocomotionConfig, LocomotionController, TickOutput,
};
