//! Player-related modules
//! Contains the camera and input gating.

pub mod camera;
pub mod input;

// Re-export commonly used types
pub use camera::Camera;
pub use input::{InputControl, InputState, InputSuppression};
