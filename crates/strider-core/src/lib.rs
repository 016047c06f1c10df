//! Strider Core - foundational types for the strider locomotion crates
//!
//! This crate provides:
//! - Mathematical primitives (re-exported from glam)
//! - The fixed-timestep clock driving simulation ticks

pub mod time;

pub use glam::{Vec2, Vec3};
pub use time::{FixedClock, TimeConfig};
