use glam::Vec2;
use tracing::trace;

use crate::camera::{Camera, Projection, Viewport};

/// Keys the viewer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    Other,
}

/// Window-system-neutral input. Coordinates are in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    ButtonDown { x: f32, y: f32 },
    ButtonUp,
    PointerMoved { x: f32, y: f32 },
    /// Vertical scroll; positive scrolls away from the user.
    Wheel { delta_y: f32 },
    Key(Key),
    Resize { width: f32, height: f32 },
}

/// Fixed zoom increments per input source, in degrees of field of view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomSteps {
    pub wheel: f32,
    pub key: f32,
}

impl Default for ZoomSteps {
    fn default() -> Self {
        Self {
            wheel: 2.0,
            key: 5.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { prev: Vec2 },
}

/// Trait for camera controllers.
pub trait CameraControl: Send {
    /// Apply `event` to the camera and projection. Returns true if any of them
    /// changed and a redraw is needed.
    fn handle_event(
        &mut self,
        event: &InputEvent,
        camera: &mut Camera,
        projection: &mut Projection,
    ) -> bool;

    fn drag_state(&self) -> DragState {
        DragState::Idle
    }

    /// Drop any in-progress interaction.
    fn on_reset(&mut self) {}
}

/// Drag-to-orbit plus wheel/arrow-key zoom.
#[derive(Debug, Clone, Default)]
pub struct OrbitController {
    drag: DragState,
    steps: ZoomSteps,
}

impl OrbitController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zoom_steps(&mut self, steps: ZoomSteps) -> &mut Self {
        self.steps = steps;
        self
    }

    fn drag_to(&mut self, pos: Vec2, camera: &mut Camera, viewport: Viewport) -> bool {
        let DragState::Dragging { prev } = self.drag else {
            return false;
        };
        if !pos.is_finite() {
            return false;
        }
        let delta = pos - prev;
        self.drag = DragState::Dragging { prev: pos };
        if delta == Vec2::ZERO {
            return false;
        }
        let d_yaw = 360.0 * delta.x / viewport.width;
        let d_pitch = 360.0 * delta.y / viewport.height;
        trace!("Orbit by yaw {:.3}, pitch {:.3}", d_yaw, d_pitch);
        camera.orbit(d_yaw, d_pitch);
        true
    }
}

impl CameraControl for OrbitController {
    fn handle_event(
        &mut self,
        event: &InputEvent,
        camera: &mut Camera,
        projection: &mut Projection,
    ) -> bool {
        match *event {
            InputEvent::ButtonDown { x, y } => {
                self.drag = DragState::Dragging {
                    prev: Vec2::new(x, y),
                };
                true
            }
            InputEvent::ButtonUp => {
                self.drag = DragState::Idle;
                true
            }
            InputEvent::PointerMoved { x, y } => {
                self.drag_to(Vec2::new(x, y), camera, projection.viewport())
            }
            InputEvent::Wheel { delta_y } => {
                if delta_y > 0.0 {
                    camera.zoom_by(self.steps.wheel)
                } else if delta_y < 0.0 {
                    camera.zoom_by(-self.steps.wheel)
                } else {
                    false
                }
            }
            InputEvent::Key(Key::ArrowUp) => camera.zoom_by(-self.steps.key),
            InputEvent::Key(Key::ArrowDown) => camera.zoom_by(self.steps.key),
            InputEvent::Key(Key::Other) => false,
            InputEvent::Resize { width, height } => {
                projection.resize(Viewport::new(width, height))
            }
        }
    }

    fn drag_state(&self) -> DragState {
        self.drag
    }

    fn on_reset(&mut self) {
        self.drag = DragState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraPose;

    const EPS: f32 = 1e-4;

    fn setup() -> (OrbitController, Camera, Projection) {
        (
            OrbitController::new(),
            Camera::default(),
            Projection::new(Viewport::new(800.0, 600.0), 1.0, 500.0),
        )
    }

    #[test]
    fn test_drag_accumulates_angles() {
        let (mut controller, mut camera, mut projection) = setup();
        assert!(controller.handle_event(
            &InputEvent::ButtonDown { x: 100.0, y: 100.0 },
            &mut camera,
            &mut projection
        ));
        assert!(controller.handle_event(
            &InputEvent::PointerMoved { x: 140.0, y: 115.0 },
            &mut camera,
            &mut projection
        ));
        let pose = camera.pose();
        assert!((pose.yaw - 18.0).abs() < EPS);
        assert!((pose.pitch - 9.0).abs() < EPS);
        assert_eq!(
            controller.drag_state(),
            DragState::Dragging {
                prev: Vec2::new(140.0, 115.0)
            }
        );
    }

    #[test]
    fn test_drag_is_additive_across_moves() {
        let (mut controller, mut camera, mut projection) = setup();
        controller.handle_event(
            &InputEvent::ButtonDown { x: 0.0, y: 0.0 },
            &mut camera,
            &mut projection,
        );
        for x in [80.0, 160.0, 240.0] {
            controller.handle_event(
                &InputEvent::PointerMoved { x, y: 0.0 },
                &mut camera,
                &mut projection,
            );
        }
        assert!((camera.pose().yaw - 108.0).abs() < EPS);
        assert_eq!(camera.pose().pitch, 0.0);
    }

    #[test]
    fn test_move_while_idle_is_noop() {
        let (mut controller, mut camera, mut projection) = setup();
        assert!(!controller.handle_event(
            &InputEvent::PointerMoved { x: 50.0, y: 50.0 },
            &mut camera,
            &mut projection
        ));
        controller.handle_event(
            &InputEvent::ButtonDown { x: 0.0, y: 0.0 },
            &mut camera,
            &mut projection,
        );
        assert!(controller.handle_event(&InputEvent::ButtonUp, &mut camera, &mut projection));
        assert!(!controller.handle_event(
            &InputEvent::PointerMoved { x: 50.0, y: 50.0 },
            &mut camera,
            &mut projection
        ));
        assert_eq!(camera.pose().yaw, 0.0);
        assert_eq!(controller.drag_state(), DragState::Idle);
    }

    #[test]
    fn test_wheel_direction_and_zero() {
        let (mut controller, mut camera, mut projection) = setup();
        controller.handle_event(
            &InputEvent::Wheel { delta_y: 3.0 },
            &mut camera,
            &mut projection,
        );
        assert_eq!(camera.zoom(), 47.0);
        controller.handle_event(
            &InputEvent::Wheel { delta_y: -120.0 },
            &mut camera,
            &mut projection,
        );
        assert_eq!(camera.zoom(), 45.0);
        assert!(!controller.handle_event(
            &InputEvent::Wheel { delta_y: 0.0 },
            &mut camera,
            &mut projection
        ));
        assert_eq!(camera.zoom(), 45.0);
    }

    #[test]
    fn test_arrow_keys_zoom_and_clamp() {
        let (mut controller, mut camera, mut projection) = setup();
        controller.handle_event(
            &InputEvent::Key(Key::ArrowUp),
            &mut camera,
            &mut projection,
        );
        assert_eq!(camera.zoom(), 40.0);
        for _ in 0..10 {
            controller.handle_event(
                &InputEvent::Key(Key::ArrowUp),
                &mut camera,
                &mut projection,
            );
        }
        assert_eq!(camera.zoom(), 10.0);
        assert!(!controller.handle_event(
            &InputEvent::Key(Key::ArrowUp),
            &mut camera,
            &mut projection
        ));
        controller.handle_event(
            &InputEvent::Key(Key::ArrowDown),
            &mut camera,
            &mut projection,
        );
        assert_eq!(camera.zoom(), 15.0);
        assert!(!controller.handle_event(
            &InputEvent::Key(Key::Other),
            &mut camera,
            &mut projection
        ));
    }

    #[test]
    fn test_resize_changes_drag_scale() {
        let (mut controller, mut camera, mut projection) = setup();
        assert!(!controller.handle_event(
            &InputEvent::Resize {
                width: 0.0,
                height: 0.0
            },
            &mut camera,
            &mut projection
        ));
        assert!(controller.handle_event(
            &InputEvent::Resize {
                width: 360.0,
                height: 360.0
            },
            &mut camera,
            &mut projection
        ));
        controller.handle_event(
            &InputEvent::ButtonDown { x: 0.0, y: 0.0 },
            &mut camera,
            &mut projection,
        );
        controller.handle_event(
            &InputEvent::PointerMoved { x: 1.0, y: 2.0 },
            &mut camera,
            &mut projection,
        );
        assert!((camera.pose().yaw - 1.0).abs() < EPS);
        assert!((camera.pose().pitch - 2.0).abs() < EPS);
    }

    #[test]
    fn test_non_finite_pointer_ignored() {
        let (mut controller, mut camera, mut projection) = setup();
        controller.handle_event(
            &InputEvent::ButtonDown { x: 0.0, y: 0.0 },
            &mut camera,
            &mut projection,
        );
        assert!(!controller.handle_event(
            &InputEvent::PointerMoved {
                x: f32::NAN,
                y: 0.0
            },
            &mut camera,
            &mut projection
        ));
        assert_eq!(camera.pose(), CameraPose::default());
        assert!(controller.handle_event(
            &InputEvent::PointerMoved { x: 80.0, y: 0.0 },
            &mut camera,
            &mut projection
        ));
        assert!((camera.pose().yaw - 36.0).abs() < EPS);
    }

    #[test]
    fn test_reset_drops_drag() {
        let (mut controller, mut camera, mut projection) = setup();
        controller.handle_event(
            &InputEvent::ButtonDown { x: 0.0, y: 0.0 },
            &mut camera,
            &mut projection,
        );
        controller.on_reset();
        assert_eq!(controller.drag_state(), DragState::Idle);
    }
}
