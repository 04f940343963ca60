//! Viewer configuration with builder-style overrides.

use crate::errors::ViewerError;
use glam::Vec4;
use std::path::PathBuf;
use surfel_camera::{Camera, Projection, Viewport, ZoomRange, ZoomSteps};
use surfel_data::ColorEncoding;
use surfel_data::math::{direction, point};
use surfel_gpu::{QuadScale, RenderMode};

/// Which parser a dataset goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    /// Indexed triangle mesh; normals are synthesized.
    Mesh,
    /// Colored point cloud with per-point normals.
    PointCloud,
}

/// A named dataset the viewer can load.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetPreset {
    pub name: String,
    /// Path relative to the fetcher root.
    pub path: PathBuf,
    pub format: DatasetFormat,
    pub color_encoding: ColorEncoding,
    /// Uniform scale applied to positions after parsing.
    pub position_scale: f32,
}

impl DatasetPreset {
    /// Point cloud stored at `Point Clouds/<name>.ply`, byte colors, scaled by 10.
    pub fn point_cloud(name: impl Into<String>) -> Self {
        let name = name.into();
        let path = PathBuf::from("Point Clouds").join(format!("{name}.ply"));
        Self {
            name,
            path,
            format: DatasetFormat::PointCloud,
            color_encoding: ColorEncoding::Byte,
            position_scale: 10.0,
        }
    }

    pub fn mesh(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            format: DatasetFormat::Mesh,
            color_encoding: ColorEncoding::Unit,
            position_scale: 1.0,
        }
    }

    pub fn with_position_scale(mut self, scale: f32) -> Self {
        self.position_scale = scale;
        self
    }

    pub fn with_color_encoding(mut self, encoding: ColorEncoding) -> Self {
        self.color_encoding = encoding;
        self
    }
}

/// Camera setup.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraConfig {
    pub zoom: f32,
    pub zoom_range: ZoomRange,
    pub zoom_steps: ZoomSteps,
    pub eye: Vec4,
    pub target: Vec4,
    pub up: Vec4,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            zoom: 45.0,
            zoom_range: ZoomRange::default(),
            zoom_steps: ZoomSteps::default(),
            eye: point(0.0, 0.0, 2.0),
            target: point(0.0, 0.0, 0.0),
            up: direction(0.0, 1.0, 0.0),
            near: 1.0,
            far: 500.0,
        }
    }
}

impl CameraConfig {
    pub fn camera(&self) -> Camera {
        Camera::new(self.zoom, self.zoom_range).with_look_at(self.eye, self.target, self.up)
    }

    pub fn projection(&self, viewport: Viewport) -> Projection {
        Projection::new(viewport, self.near, self.far)
    }
}

/// Quad size slider. A slider value `s` maps to half extents `0.01 * s / 2` along
/// the width and `0.003 * s / 2` along the height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderConfig {
    pub initial: f32,
    pub min: f32,
    pub max: f32,
}

impl SliderConfig {
    const WIDTH_UNIT: f32 = 0.01;
    const HEIGHT_UNIT: f32 = 0.003;

    /// Both bounds finite and ordered.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }

    /// Saturate `value` into range. A NaN value lands on `min`.
    pub fn clamp(&self, value: f32) -> f32 {
        value.max(self.min).min(self.max)
    }

    /// Quad extents for slider `value`, clamped into range first.
    pub fn quad_scale(&self, value: f32) -> QuadScale {
        let s = self.clamp(value);
        QuadScale::new(Self::WIDTH_UNIT * s / 2.0, Self::HEIGHT_UNIT * s / 2.0)
    }
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            initial: 5.0,
            min: 1.0,
            max: 20.0,
        }
    }
}

/// Top-level viewer configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub camera: CameraConfig,
    pub viewport: Viewport,
    pub initial_mode: RenderMode,
    pub slider: SliderConfig,
    /// Flat color given to mesh vertices.
    pub mesh_color: Vec4,
    pub datasets: Vec<DatasetPreset>,
    pub default_dataset: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            viewport: Viewport::new(1280.0, 720.0),
            initial_mode: RenderMode::Surfels,
            slider: SliderConfig::default(),
            mesh_color: Vec4::new(0.8, 0.8, 0.8, 1.0),
            datasets: vec![
                DatasetPreset::point_cloud("Cone"),
                DatasetPreset::point_cloud("Fries"),
            ],
            default_dataset: "Cone".to_string(),
        }
    }
}

impl ViewerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_camera(mut self, camera: CameraConfig) -> Self {
        self.camera = camera;
        self
    }

    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport = Viewport::new(width, height);
        self
    }

    pub fn with_initial_mode(mut self, mode: RenderMode) -> Self {
        self.initial_mode = mode;
        self
    }

    pub fn with_slider(mut self, slider: SliderConfig) -> Self {
        self.slider = slider;
        self
    }

    pub fn with_mesh_color(mut self, color: Vec4) -> Self {
        self.mesh_color = color;
        self
    }

    /// Add a preset, replacing any existing preset with the same name.
    pub fn with_dataset(mut self, preset: DatasetPreset) -> Self {
        self.datasets.retain(|d| d.name != preset.name);
        self.datasets.push(preset);
        self
    }

    pub fn with_default_dataset(mut self, name: impl Into<String>) -> Self {
        self.default_dataset = name.into();
        self
    }

    pub fn dataset(&self, name: &str) -> Option<&DatasetPreset> {
        self.datasets.iter().find(|d| d.name == name)
    }

    /// Reject ranges and sizes the viewer cannot work with.
    pub fn validate(&self) -> Result<(), ViewerError> {
        let invalid = |msg: String| -> Result<(), ViewerError> { Err(ViewerError::InvalidConfig(msg)) };
        let zoom = self.camera.zoom_range;
        if !zoom.is_valid() {
            return invalid(format!("zoom range {}..={}", zoom.min, zoom.max));
        }
        if !self.slider.is_valid() {
            return invalid(format!(
                "slider range {}..={}",
                self.slider.min, self.slider.max
            ));
        }
        if self.viewport.is_empty() {
            return invalid(format!(
                "viewport {}x{}",
                self.viewport.width, self.viewport.height
            ));
        }
        let (near, far) = (self.camera.near, self.camera.far);
        if !(near > 0.0 && near < far && far.is_finite()) {
            return invalid(format!("clip planes near {near}, far {far}"));
        }
        Ok(())
    }
}
