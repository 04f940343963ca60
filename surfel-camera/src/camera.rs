use glam::{Mat4, Vec4};
use surfel_data::math::{direction, look_at, perspective, point, rotate_x, rotate_y};

/// Accumulated orbit angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CameraPose {
    /// Rotation around the Y axis.
    pub yaw: f32,
    /// Rotation around the X axis.
    pub pitch: f32,
}

/// Inclusive bounds for the zoom (field of view, degrees).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomRange {
    pub min: f32,
    pub max: f32,
}

impl ZoomRange {
    /// Both bounds finite and ordered.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }

    /// Saturate `zoom` into the range. Never panics; a reversed range saturates
    /// to `max`.
    pub fn clamp(&self, zoom: f32) -> f32 {
        zoom.max(self.min).min(self.max)
    }
}

impl Default for ZoomRange {
    fn default() -> Self {
        Self {
            min: 10.0,
            max: 170.0,
        }
    }
}

/// Drawable area in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// True unless both sides are positive and finite.
    pub fn is_empty(&self) -> bool {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        !(positive(self.width) && positive(self.height))
    }
}

/// Orbit camera: fixed eye looking at a target, with the scene rotated by the
/// accumulated pose. Only the scalar angles accumulate; the view matrix is rebuilt
/// from them every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pose: CameraPose,
    zoom: f32,
    zoom_range: ZoomRange,
    eye: Vec4,
    target: Vec4,
    up: Vec4,
}

impl Camera {
    /// Camera two units back from the origin, looking at it with +Y up.
    pub fn new(zoom: f32, zoom_range: ZoomRange) -> Self {
        Self {
            pose: CameraPose::default(),
            zoom: zoom_range.clamp(zoom),
            zoom_range,
            eye: point(0.0, 0.0, 2.0),
            target: point(0.0, 0.0, 0.0),
            up: direction(0.0, 1.0, 0.0),
        }
    }

    pub fn with_look_at(mut self, eye: Vec4, target: Vec4, up: Vec4) -> Self {
        self.eye = eye;
        self.target = target;
        self.up = up;
        self
    }

    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    pub fn apply_pose(&mut self, pose: &CameraPose) {
        self.pose = *pose;
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn zoom_range(&self) -> ZoomRange {
        self.zoom_range
    }

    pub fn eye(&self) -> Vec4 {
        self.eye
    }

    /// Add to the orbit angles.
    pub fn orbit(&mut self, d_yaw: f32, d_pitch: f32) {
        self.pose.yaw += d_yaw;
        self.pose.pitch += d_pitch;
    }

    /// Change zoom by `amount`, saturating at the range bounds. Returns whether the
    /// zoom actually moved. Non-finite amounts are ignored.
    pub fn zoom_by(&mut self, amount: f32) -> bool {
        if !amount.is_finite() {
            return false;
        }
        let next = self.zoom_range.clamp(self.zoom + amount);
        let changed = next != self.zoom;
        self.zoom = next;
        changed
    }

    /// `look_at(eye, target, up) * rotate_y(yaw) * rotate_x(pitch)`.
    pub fn view_matrix(&self) -> Mat4 {
        look_at(self.eye, self.target, self.up)
            * rotate_y(self.pose.yaw)
            * rotate_x(self.pose.pitch)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(45.0, ZoomRange::default())
    }
}

/// Perspective projection configuration. The field of view comes from the camera zoom.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    viewport: Viewport,
    near: f32,
    far: f32,
}

impl Projection {
    pub fn new(viewport: Viewport, near: f32, far: f32) -> Self {
        Self {
            viewport,
            near,
            far,
        }
    }

    pub fn matrix(&self, camera: &Camera) -> Mat4 {
        perspective(camera.zoom(), self.viewport.aspect(), self.near, self.far)
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Update the viewport size. Empty viewports are ignored; returns whether the
    /// size changed.
    pub fn resize(&mut self, viewport: Viewport) -> bool {
        if viewport.is_empty() || viewport == self.viewport {
            return false;
        }
        self.viewport = viewport;
        true
    }

    pub fn far(&self) -> f32 {
        self.far
    }
}
