//! Locomotion module
//!
//! The jump/movement state machine and the actor binding that runs it
//! against a physics world.

mod actor;
mod controller;
mod movement;

pub use actor::{Actor, ActorError};
pub use controller::{LocomotionController, TickOutput};
pub use movement::{ConfigWarning, LocomotionConfig};
