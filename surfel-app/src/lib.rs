//! Surfel viewer application layer.
//!
//! Ties dataset loading, the render-mode controller, the orbit camera and frame
//! submission together behind a single message-driven [`ViewerState`].

pub mod config;
pub mod controller;
pub mod errors;
pub mod fetch;
pub mod redraw;
pub mod renderer;
pub mod state;

pub use config::{CameraConfig, DatasetFormat, DatasetPreset, SliderConfig, ViewerConfig};
pub use controller::{PACK_LAYOUT, RenderController, load_records};
pub use errors::{FetchError, ViewerError};
pub use fetch::{FsFetcher, MemoryFetcher, TextFetcher};
pub use redraw::RedrawScheduler;
pub use renderer::{FrameRenderer, FrameStats};
pub use state::{Effect, LoadTicket, Message, ViewerState};
