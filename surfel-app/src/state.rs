//! Viewer state and its message reducer.
//!
//! All mutation goes through [`ViewerState::dispatch`]. Dataset loading is not
//! performed here: the reducer emits an [`Effect::Fetch`] and the host answers with
//! [`Message::DatasetLoaded`] carrying the same ticket. Only the most recent ticket
//! is honored, so a slow load can never overwrite a newer selection.

use crate::config::{DatasetPreset, ViewerConfig};
use crate::controller::RenderController;
use crate::errors::{FetchError, ViewerError};
use crate::redraw::RedrawScheduler;
use glam::Mat4;
use std::path::PathBuf;
use surfel_camera::{Camera, CameraControl, DragState, InputEvent, OrbitController, Projection};
use surfel_gpu::{PackedBuffer, QuadScale, RenderMode};
use tracing::{debug, info, warn};

/// Identifies one dataset load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

#[derive(Debug)]
pub enum Message {
    Input(InputEvent),
    SetMode(RenderMode),
    ToggleMode,
    SetDataset(String),
    SetQuadScale(f32),
    DatasetLoaded {
        ticket: LoadTicket,
        result: Result<String, FetchError>,
    },
}

/// Work the host must perform on the state's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch the text at `path` and reply with `Message::DatasetLoaded`.
    Fetch { ticket: LoadTicket, path: PathBuf },
}

#[derive(Debug)]
struct PendingLoad {
    ticket: LoadTicket,
    preset: DatasetPreset,
}

#[derive(Debug)]
struct ActiveDataset {
    preset: DatasetPreset,
    raw: String,
}

/// Everything the viewer knows between frames.
pub struct ViewerState {
    config: ViewerConfig,
    camera: Camera,
    projection: Projection,
    controls: Box<dyn CameraControl>,
    render: RenderController,
    active: Option<ActiveDataset>,
    buffer: Option<PackedBuffer>,
    buffer_generation: u64,
    next_ticket: u64,
    pending: Option<PendingLoad>,
    last_error: Option<ViewerError>,
    redraw: RedrawScheduler,
}

impl ViewerState {
    pub fn new(config: ViewerConfig) -> Self {
        let mut controls = OrbitController::new();
        controls.zoom_steps(config.camera.zoom_steps);
        Self::with_controls(config, Box::new(controls))
    }

    /// Like [`ViewerState::new`], but rejects an unusable configuration first.
    pub fn try_new(config: ViewerConfig) -> Result<Self, ViewerError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// State driven by a custom camera controller.
    pub fn with_controls(config: ViewerConfig, controls: Box<dyn CameraControl>) -> Self {
        let camera = config.camera.camera();
        let projection = config.camera.projection(config.viewport);
        let render = RenderController::new(config.initial_mode, config.slider, config.mesh_color);
        Self {
            config,
            camera,
            projection,
            controls,
            render,
            active: None,
            buffer: None,
            buffer_generation: 0,
            next_ticket: 0,
            pending: None,
            last_error: None,
            redraw: RedrawScheduler::new(),
        }
    }

    /// Kick off loading of the configured default dataset.
    pub fn start(&mut self) -> Vec<Effect> {
        let name = self.config.default_dataset.clone();
        self.dispatch(Message::SetDataset(name))
    }

    pub fn dispatch(&mut self, message: Message) -> Vec<Effect> {
        match message {
            Message::Input(event) => {
                if self
                    .controls
                    .handle_event(&event, &mut self.camera, &mut self.projection)
                {
                    self.redraw.request();
                }
                Vec::new()
            }
            Message::SetMode(mode) => {
                if let Some(next) = self.render.with_mode(mode) {
                    self.apply_render(next);
                }
                Vec::new()
            }
            Message::ToggleMode => {
                let mode = self.render.mode().toggled();
                self.dispatch(Message::SetMode(mode))
            }
            Message::SetQuadScale(value) => {
                if let Some(next) = self.render.with_slider(value) {
                    self.apply_render(next);
                }
                Vec::new()
            }
            Message::SetDataset(name) => self.request_dataset(&name),
            Message::DatasetLoaded { ticket, result } => {
                self.finish_load(ticket, result);
                Vec::new()
            }
        }
    }

    fn request_dataset(&mut self, name: &str) -> Vec<Effect> {
        let Some(preset) = self.config.dataset(name).cloned() else {
            self.record_error(ViewerError::UnknownDataset(name.to_string()));
            return Vec::new();
        };
        self.next_ticket += 1;
        let ticket = LoadTicket(self.next_ticket);
        info!("Loading dataset {} from {}", preset.name, preset.path.display());
        let path = preset.path.clone();
        if let Some(previous) = self.pending.replace(PendingLoad { ticket, preset }) {
            debug!("Superseding load of {}", previous.preset.name);
        }
        vec![Effect::Fetch { ticket, path }]
    }

    fn finish_load(&mut self, ticket: LoadTicket, result: Result<String, FetchError>) {
        let Some(pending) = self.pending.take_if(|p| p.ticket == ticket) else {
            debug!("Dropping stale load {}", ticket.generation());
            return;
        };
        let raw = match result {
            Ok(raw) => raw,
            Err(err) => {
                self.record_error(err.into());
                return;
            }
        };
        match self.render.build(&pending.preset, &raw) {
            Ok(buffer) => {
                info!("Dataset {} ready", pending.preset.name);
                self.active = Some(ActiveDataset {
                    preset: pending.preset,
                    raw,
                });
                self.last_error = None;
                self.swap_buffer(buffer);
            }
            Err(err) => self.record_error(err),
        }
    }

    /// Rebuild the active dataset with new render settings. Settings are committed
    /// only together with the buffer they produced.
    fn apply_render(&mut self, next: RenderController) {
        let Some(active) = &self.active else {
            info!("Render mode {}, slider {}", next.mode(), next.slider());
            self.render = next;
            self.redraw.request();
            return;
        };
        match next.build(&active.preset, &active.raw) {
            Ok(buffer) => {
                info!("Render mode {}, slider {}", next.mode(), next.slider());
                self.render = next;
                self.last_error = None;
                self.swap_buffer(buffer);
            }
            Err(err) => self.record_error(err),
        }
    }

    fn swap_buffer(&mut self, buffer: PackedBuffer) {
        self.buffer = Some(buffer);
        self.buffer_generation += 1;
        self.redraw.request();
    }

    fn record_error(&mut self, err: ViewerError) {
        warn!("{}", err);
        self.last_error = Some(err);
    }

    /// Consume the pending redraw request, if any.
    pub fn take_frame(&mut self) -> bool {
        self.redraw.take_frame()
    }

    pub fn needs_redraw(&self) -> bool {
        self.redraw.is_pending()
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.camera.view_matrix()
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection.matrix(&self.camera)
    }

    pub fn drag_state(&self) -> DragState {
        self.controls.drag_state()
    }

    pub fn mode(&self) -> RenderMode {
        self.render.mode()
    }

    pub fn slider(&self) -> f32 {
        self.render.slider()
    }

    pub fn quad_scale(&self) -> QuadScale {
        self.render.quad_scale()
    }

    pub fn buffer(&self) -> Option<&PackedBuffer> {
        self.buffer.as_ref()
    }

    /// Bumped every time the buffer is replaced.
    pub fn buffer_generation(&self) -> u64 {
        self.buffer_generation
    }

    pub fn active_dataset(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.preset.name.as_str())
    }

    pub fn pending_ticket(&self) -> Option<LoadTicket> {
        self.pending.as_ref().map(|p| p.ticket)
    }

    pub fn last_error(&self) -> Option<&ViewerError> {
        self.last_error.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SliderConfig;
    use surfel_camera::ZoomRange;

    const MESH: &str = "4 2 0 0 0 1 0 0 0 1 0 0 0 1 0 1 2 0 2 3";
    const TRIANGLE: &str = "3 1 0 0 0 1 0 0 0 1 0 0 1 2";

    fn config() -> ViewerConfig {
        ViewerConfig::default()
            .with_dataset(DatasetPreset::mesh("Quad", "quad.txt"))
            .with_dataset(DatasetPreset::mesh("Tri", "tri.txt"))
            .with_default_dataset("Quad")
    }

    fn ticket_of(effects: &[Effect]) -> LoadTicket {
        match effects {
            [Effect::Fetch { ticket, .. }] => *ticket,
            other => panic!("expected one fetch, got {other:?}"),
        }
    }

    fn loaded(state: &mut ViewerState, ticket: LoadTicket, text: &str) {
        state.dispatch(Message::DatasetLoaded {
            ticket,
            result: Ok(text.to_string()),
        });
    }

    fn ready_state() -> ViewerState {
        let mut state = ViewerState::new(config());
        let ticket = ticket_of(&state.start());
        loaded(&mut state, ticket, MESH);
        state
    }

    #[test]
    fn test_start_requests_default_dataset() {
        let mut state = ViewerState::new(config());
        let effects = state.start();
        assert_eq!(
            effects,
            vec![Effect::Fetch {
                ticket: LoadTicket(1),
                path: PathBuf::from("quad.txt")
            }]
        );
        assert_eq!(state.pending_ticket(), Some(LoadTicket(1)));
        assert!(state.buffer().is_none());
    }

    #[test]
    fn test_load_builds_buffer_and_requests_frame() {
        let mut state = ready_state();
        assert_eq!(state.active_dataset(), Some("Quad"));
        assert_eq!(state.buffer().unwrap().vertex_count(), 16);
        assert_eq!(state.buffer_generation(), 1);
        assert!(state.pending_ticket().is_none());
        assert!(state.take_frame());
        assert!(!state.take_frame());
    }

    #[test]
    fn test_stale_load_is_dropped() {
        let mut state = ViewerState::new(config());
        let first = ticket_of(&state.start());
        let second = ticket_of(&state.dispatch(Message::SetDataset("Tri".into())));
        assert_ne!(first, second);

        loaded(&mut state, second, TRIANGLE);
        loaded(&mut state, first, MESH);
        assert_eq!(state.active_dataset(), Some("Tri"));
        assert_eq!(state.buffer().unwrap().record_count(), 3);
        assert_eq!(state.buffer_generation(), 1);
    }

    #[test]
    fn test_failed_load_keeps_previous_buffer() {
        let mut state = ready_state();
        state.take_frame();
        let ticket = ticket_of(&state.dispatch(Message::SetDataset("Tri".into())));
        loaded(&mut state, ticket, "3 1 0 0 0 1 0 0 0 1 0 0 1 7");

        assert!(matches!(state.last_error(), Some(ViewerError::Format(_))));
        assert_eq!(state.active_dataset(), Some("Quad"));
        assert_eq!(state.buffer().unwrap().record_count(), 4);
        assert_eq!(state.buffer_generation(), 1);
        assert!(!state.take_frame());
    }

    #[test]
    fn test_fetch_error_recorded() {
        let mut state = ViewerState::new(config());
        let ticket = ticket_of(&state.start());
        state.dispatch(Message::DatasetLoaded {
            ticket,
            result: Err(FetchError::NotFound(PathBuf::from("quad.txt"))),
        });
        assert!(matches!(state.last_error(), Some(ViewerError::Fetch(_))));
        assert!(state.buffer().is_none());
        assert!(state.pending_ticket().is_none());
    }

    #[test]
    fn test_unknown_dataset_emits_nothing() {
        let mut state = ready_state();
        let effects = state.dispatch(Message::SetDataset("Teapot".into()));
        assert!(effects.is_empty());
        assert!(matches!(
            state.last_error(),
            Some(ViewerError::UnknownDataset(name)) if name == "Teapot"
        ));
    }

    #[test]
    fn test_successful_load_clears_error() {
        let mut state = ready_state();
        state.dispatch(Message::SetDataset("Teapot".into()));
        assert!(state.last_error().is_some());
        let ticket = ticket_of(&state.dispatch(Message::SetDataset("Tri".into())));
        loaded(&mut state, ticket, TRIANGLE);
        assert!(state.last_error().is_none());
    }

    #[test]
    fn test_mode_change_rebuilds() {
        let mut state = ready_state();
        state.take_frame();
        state.dispatch(Message::SetMode(RenderMode::Points));
        assert_eq!(state.mode(), RenderMode::Points);
        assert_eq!(state.buffer().unwrap().vertex_count(), 4);
        assert_eq!(state.buffer_generation(), 2);
        assert!(state.take_frame());

        state.dispatch(Message::SetMode(RenderMode::Points));
        assert_eq!(state.buffer_generation(), 2);
        assert!(!state.take_frame());

        state.dispatch(Message::ToggleMode);
        assert_eq!(state.mode(), RenderMode::Surfels);
        assert_eq!(state.buffer().unwrap().vertex_count(), 16);
    }

    #[test]
    fn test_slider_rebuilds_with_new_quad() {
        let mut state = ready_state();
        state.dispatch(Message::SetQuadScale(10.0));
        assert!((state.quad_scale().half_width - 0.05).abs() < 1e-6);
        assert_eq!(state.buffer_generation(), 2);
        let corner = state.buffer().unwrap().vertex(0).unwrap();
        assert!((corner.quad_offset.z - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_input_while_loading_stays_responsive() {
        let mut state = ViewerState::new(config());
        state.start();
        state.dispatch(Message::Input(InputEvent::ButtonDown { x: 0.0, y: 0.0 }));
        state.dispatch(Message::Input(InputEvent::PointerMoved { x: 64.0, y: 0.0 }));
        assert!(state.camera().pose().yaw > 0.0);
        assert!(state.pending_ticket().is_some());
        assert!(matches!(state.drag_state(), DragState::Dragging { .. }));
        assert!(state.take_frame());
    }

    #[test]
    fn test_many_inputs_one_frame() {
        let mut state = ready_state();
        state.take_frame();
        for _ in 0..5 {
            state.dispatch(Message::Input(InputEvent::Wheel { delta_y: 1.0 }));
        }
        assert_eq!(state.camera().zoom(), 55.0);
        assert!(state.take_frame());
        assert!(!state.take_frame());
    }

    #[test]
    fn test_settings_before_load_apply_to_first_build() {
        let mut state = ViewerState::new(config());
        let ticket = ticket_of(&state.start());
        state.dispatch(Message::SetMode(RenderMode::Points));
        loaded(&mut state, ticket, MESH);
        assert_eq!(state.buffer().unwrap().mode(), RenderMode::Points);
    }

    #[test]
    fn test_button_transitions_request_frames() {
        let mut state = ready_state();
        state.take_frame();
        state.dispatch(Message::Input(InputEvent::ButtonDown { x: 10.0, y: 10.0 }));
        assert!(matches!(state.drag_state(), DragState::Dragging { .. }));
        assert!(state.take_frame());
        state.dispatch(Message::Input(InputEvent::ButtonUp));
        assert_eq!(state.drag_state(), DragState::Idle);
        assert!(state.take_frame());
        assert!(!state.take_frame());
    }

    #[test]
    fn test_non_finite_slider_keeps_buffer() {
        let mut state = ready_state();
        state.take_frame();
        for value in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            state.dispatch(Message::SetQuadScale(value));
        }
        assert_eq!(state.slider(), 5.0);
        assert_eq!(state.buffer_generation(), 1);
        assert!(state.buffer().unwrap().data().iter().all(|v| v.is_finite()));
        assert!(!state.take_frame());
    }

    #[test]
    fn test_non_finite_input_ignored() {
        let mut state = ready_state();
        state.take_frame();
        let before = state.camera().clone();
        state.dispatch(Message::Input(InputEvent::Wheel { delta_y: f32::NAN }));
        state.dispatch(Message::Input(InputEvent::Resize {
            width: f32::NAN,
            height: 600.0,
        }));
        assert_eq!(state.camera(), &before);
        assert_eq!(state.projection().viewport(), state.config().viewport);
        assert!(state.projection_matrix().is_finite());
        assert!(!state.take_frame());
    }

    #[test]
    fn test_try_new_rejects_reversed_ranges() {
        let reversed = config().with_slider(SliderConfig {
            initial: 5.0,
            min: 20.0,
            max: 1.0,
        });
        assert!(matches!(
            ViewerState::try_new(reversed),
            Err(ViewerError::InvalidConfig(_))
        ));
        let mut camera = config().camera;
        camera.zoom_range = ZoomRange {
            min: 170.0,
            max: 10.0,
        };
        assert!(ViewerState::try_new(config().with_camera(camera)).is_err());
        assert!(ViewerState::try_new(config()).is_ok());
    }

    #[test]
    fn test_successful_rebuild_clears_error() {
        let mut state = ready_state();
        state.dispatch(Message::SetDataset("Teapot".into()));
        assert!(state.last_error().is_some());
        state.dispatch(Message::SetMode(RenderMode::Points));
        assert_eq!(state.buffer_generation(), 2);
        assert!(state.last_error().is_none());
    }
}
