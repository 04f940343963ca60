//! Render settings and the parse, synthesize, pack rebuild.

use crate::config::{DatasetFormat, DatasetPreset, SliderConfig};
use crate::errors::ViewerError;
use glam::Vec4;
use surfel_data::{VertexRecord, parse_mesh, parse_point_cloud};
use surfel_gpu::{PackedBuffer, QuadScale, RenderMode, VertexLayout, pack};
use tracing::{debug, info, warn};

/// Layout every buffer is packed with, so one attribute binding serves both modes.
pub const PACK_LAYOUT: VertexLayout = VertexLayout::SURFEL;

/// Parse `raw` according to `preset` into vertex records.
pub fn load_records(
    raw: &str,
    preset: &DatasetPreset,
    mesh_color: Vec4,
) -> Result<Vec<VertexRecord>, ViewerError> {
    let records = match preset.format {
        DatasetFormat::PointCloud => parse_point_cloud(raw)?
            .iter()
            .map(|p| p.to_record(preset.color_encoding, preset.position_scale))
            .collect(),
        DatasetFormat::Mesh => {
            let mut records = parse_mesh(raw)?.to_records(mesh_color);
            if preset.position_scale != 1.0 {
                for r in &mut records {
                    r.position = (r.position.truncate() * preset.position_scale).extend(1.0);
                }
            }
            records
        }
    };
    Ok(records)
}

/// Current render mode and quad slider.
#[derive(Debug, Clone)]
pub struct RenderController {
    mode: RenderMode,
    slider: f32,
    slider_config: SliderConfig,
    mesh_color: Vec4,
}

impl RenderController {
    pub fn new(mode: RenderMode, slider_config: SliderConfig, mesh_color: Vec4) -> Self {
        Self {
            mode,
            slider: slider_config.clamp(slider_config.initial),
            slider_config,
            mesh_color,
        }
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn slider(&self) -> f32 {
        self.slider
    }

    pub fn quad_scale(&self) -> QuadScale {
        self.slider_config.quad_scale(self.slider)
    }

    /// Copy with `mode` applied, or `None` if nothing would change.
    pub fn with_mode(&self, mode: RenderMode) -> Option<Self> {
        (mode != self.mode).then(|| Self {
            mode,
            ..self.clone()
        })
    }

    /// Copy with the slider set to `value` (clamped), or `None` if nothing would change.
    /// Non-finite values are ignored.
    pub fn with_slider(&self, value: f32) -> Option<Self> {
        if !value.is_finite() {
            warn!("Ignoring non-finite slider value {}", value);
            return None;
        }
        let slider = self.slider_config.clamp(value);
        (slider != self.slider).then(|| Self {
            slider,
            ..self.clone()
        })
    }

    /// Run the full rebuild for `preset` from its raw text.
    #[tracing::instrument(skip_all, fields(dataset = %preset.name, mode = %self.mode))]
    pub fn build(&self, preset: &DatasetPreset, raw: &str) -> Result<PackedBuffer, ViewerError> {
        let records = load_records(raw, preset, self.mesh_color)?;
        debug!("Loaded {} records", records.len());
        let buffer = pack(&records, self.mode, PACK_LAYOUT, self.quad_scale())?;
        info!(
            "Built {} buffer: {} vertices, {} bytes",
            self.mode,
            buffer.vertex_count(),
            buffer.as_bytes().len()
        );
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use surfel_data::DATA_START_TOKEN;

    fn point_cloud_text(points: &[[f32; 10]]) -> String {
        let mut tokens: Vec<String> = (0..9).map(|i| format!("h{i}")).collect();
        tokens.push(points.len().to_string());
        tokens.extend((0..39).map(|i| format!("p{i}")));
        assert_eq!(tokens.len(), DATA_START_TOKEN);
        for p in points {
            tokens.extend(p.iter().map(|v| v.to_string()));
        }
        tokens.join(" ")
    }

    fn controller(mode: RenderMode) -> RenderController {
        RenderController::new(mode, SliderConfig::default(), Vec4::new(0.8, 0.8, 0.8, 1.0))
    }

    #[test]
    fn test_point_cloud_scaled_and_normalized() {
        let raw = point_cloud_text(&[[0.1, 0.2, 0.3, 0.0, 0.0, 1.0, 255.0, 0.0, 0.0, 255.0]]);
        let preset = DatasetPreset::point_cloud("Cone");
        let records = load_records(&raw, &preset, Vec4::ONE).unwrap();
        assert_eq!(records.len(), 1);
        assert!((records[0].position - Vec4::new(1.0, 2.0, 3.0, 1.0)).length() < 1e-5);
        assert_eq!(records[0].color, Vec4::new(1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_mesh_gets_flat_color() {
        let raw = "3 1 0 0 0 1 0 0 0 1 0 0 1 2";
        let preset = DatasetPreset::mesh("Tri", "tri.txt");
        let color = Vec4::new(0.8, 0.8, 0.8, 1.0);
        let records = load_records(raw, &preset, color).unwrap();
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.color == color));
        assert!(records.iter().all(|r| (r.normal.length() - 1.0).abs() < 1e-5));
    }

    #[test]
    fn test_build_counts_per_mode() {
        let raw = point_cloud_text(&[
            [0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 10.0, 20.0, 30.0, 255.0],
            [1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 10.0, 20.0, 30.0, 255.0],
        ]);
        let preset = DatasetPreset::point_cloud("Cone");
        let points = controller(RenderMode::Points).build(&preset, &raw).unwrap();
        assert_eq!(points.vertex_count(), 2);
        let surfels = controller(RenderMode::Surfels).build(&preset, &raw).unwrap();
        assert_eq!(surfels.vertex_count(), 8);
        assert_eq!(points.layout(), surfels.layout());
    }

    #[test]
    fn test_build_propagates_format_error() {
        let preset = DatasetPreset::mesh("Bad", "bad.txt");
        let err = controller(RenderMode::Points).build(&preset, "3 1 0 0").unwrap_err();
        assert!(matches!(err, ViewerError::Format(_)));
    }

    #[test]
    fn test_settings_report_changes() {
        let base = controller(RenderMode::Surfels);
        assert!(base.with_mode(RenderMode::Surfels).is_none());
        assert_eq!(
            base.with_mode(RenderMode::Points).unwrap().mode(),
            RenderMode::Points
        );
        assert!(base.with_slider(5.0).is_none());
        let big = base.with_slider(50.0).unwrap();
        assert_eq!(big.slider(), 20.0);
        assert!(big.with_slider(25.0).is_none());
        assert!((big.quad_scale().half_height - 0.03).abs() < 1e-6);
    }

    #[test]
    fn test_non_finite_slider_ignored() {
        let base = controller(RenderMode::Surfels);
        assert!(base.with_slider(f32::NAN).is_none());
        assert!(base.with_slider(f32::INFINITY).is_none());
        assert!(base.with_slider(f32::NEG_INFINITY).is_none());
        assert_eq!(base.slider(), 5.0);
    }
}
