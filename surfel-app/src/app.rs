//! Headless run loop.

use std::collections::VecDeque;
use std::error::Error;
use std::path::PathBuf;
use surfel_app::{
    Effect, FetchError, FrameRenderer, FsFetcher, Message, TextFetcher, ViewerConfig, ViewerState,
};
use surfel_gpu::HeadlessBackend;
use tracing::info;

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();
}

/// Perform effects until the state stops asking for work.
fn drain(state: &mut ViewerState, fetcher: &dyn TextFetcher, effects: Vec<Effect>) {
    let mut queue = VecDeque::from(effects);
    while let Some(effect) = queue.pop_front() {
        match effect {
            Effect::Fetch { ticket, path } => {
                let result: Result<String, FetchError> = fetcher.fetch(&path);
                queue.extend(state.dispatch(Message::DatasetLoaded { ticket, result }));
            }
        }
    }
}

/// Render one frame if one is pending and log what was submitted.
fn present(
    renderer: &mut FrameRenderer,
    backend: &mut HeadlessBackend,
    state: &mut ViewerState,
) -> Result<(), Box<dyn Error>> {
    if !state.take_frame() {
        return Ok(());
    }
    let stats = renderer.render(backend, state)?;
    let pose = state.camera().pose();
    info!(
        "Frame: {} mode, {} draws, {} vertices, yaw {:.1}, pitch {:.1}, zoom {:.0}",
        state.mode(),
        stats.draw_calls,
        stats.vertices,
        pose.yaw,
        pose.pitch,
        state.camera().zoom()
    );
    backend.take_calls();
    Ok(())
}

pub fn run(data_dir: PathBuf) -> Result<(), Box<dyn Error>> {
    let config = ViewerConfig::default();
    info!(
        "Starting surfel viewer: data dir {}, dataset {}",
        data_dir.display(),
        config.default_dataset
    );

    let fetcher = FsFetcher::new(&data_dir);
    let mut state = ViewerState::try_new(config)?;
    let mut backend = HeadlessBackend::new();
    let mut renderer = FrameRenderer::new();

    let effects = state.start();
    drain(&mut state, &fetcher, effects);
    if let Some(err) = state.last_error() {
        return Err(format!("initial load failed: {err}").into());
    }

    present(&mut renderer, &mut backend, &mut state)
}
