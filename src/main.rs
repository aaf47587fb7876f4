//! gamegui - a minimal button menu demo
//!
//! Opens an 800x600 window with three buttons ("Start Game", "Options", "Quit") and a score
//! label. Hovering highlights a button, clicking "Start Game" adds 10 points and clicking "Quit"
//! or closing the window exits.
//!
//! # Architecture
//! - `app/`: Window lifecycle, event routing and the frame loop
//! - `game/`: Buttons, input events and the menu state
//! - `renderer/`: Frame composition, rectangle and text drawing on wgpu
//! - `config`: Built-in defaults with optional TOML overrides
//!
//! # Usage
//! Run with `cargo run` from a directory containing `arial.ttf`, or point `font.path` in
//! `gamegui.toml` at another font. Exits with code 1 if initialization fails.

#![warn(missing_docs)]
pub mod app;
pub mod config;
pub mod error;
pub mod game;
pub mod logger;
pub mod renderer;

use crate::config::AppConfig;
use crate::error::InitError;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use winit::event_loop::EventLoop;

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

/// Main entry point.
///
/// Returns exit code 0 after a normal quit and 1 if any initialization step fails.
fn main() -> ExitCode {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            ExitCode::from(1)
        }
    }
}

/// Loads the configuration, creates the event loop and runs the menu until it stops.
fn run() -> Result<(), InitError> {
    let config = AppConfig::load()?;
    let event_loop = EventLoop::new()?;

    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = interrupted.clone();
    ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))?;

    let mut app = app::App::new(config, interrupted);
    event_loop.run_app(&mut app)?;

    match app.take_init_error() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
