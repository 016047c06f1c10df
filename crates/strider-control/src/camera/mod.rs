//! Camera anchor module

mod rig;

pub use rig::CameraRig;
