//! Surfel Viewer
//!
//! Headless driver for the viewer: loads the default dataset, renders one frame
//! and reports what it would have submitted.
//!
//! Datasets are resolved against `SURFEL_DATA_DIR` (default: current directory).

mod app;

use std::path::PathBuf;

const DATA_DIR_VAR: &str = "SURFEL_DATA_DIR";

fn main() {
    app::init_tracing();

    let data_dir = std::env::var_os(DATA_DIR_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    if let Err(e) = app::run(data_dir) {
        eprintln!("Application error: {}", e);
        std::process::exit(1);
    }
}
