//! Application module.
//!
//! This module contains the application lifecycle for the menu demo: window creation, event
//! routing and the frame loop.
//!
//! # Module Structure
//!
//! - [`app_state`]: Contains the [`AppState`] struct which holds the window, renderer and menu state
//! - [`event_handler`]: Contains the [`App`] struct and event handling logic
//! - [`frame_pacer`]: Decides when the next frame is due
//!
//! # Event Flow
//!
//! 1. **Input Events**: winit window events are translated and queued
//! 2. **State Updates**: the queue is drained into [`crate::game::GameState`]
//! 3. **Rendering**: the current state is drawn and presented
//! 4. **Waiting**: the loop sleeps until the frame deadline
//!
//! # Threading Model
//!
//! Everything runs on the main thread. The interrupt handler only sets an atomic flag that the
//! loop turns into a quit event.

pub mod app_state;
pub mod event_handler;
pub mod frame_pacer;

pub use app_state::AppState;
pub use event_handler::App;
