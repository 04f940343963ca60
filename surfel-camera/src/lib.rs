//! Orbit camera and its interaction state machine.
//!
//! Input arrives as backend-neutral [`InputEvent`]s so any windowing layer can feed it.

mod camera;
mod controls;

pub use camera::{Camera, CameraPose, Projection, Viewport, ZoomRange};
pub use controls::{CameraControl, DragState, InputEvent, Key, OrbitController, ZoomSteps};
