//! Event handler module.
//!
//! Contains the [`App`] struct and its winit event handling. Window events are translated into
//! [`InputEvent`]s and queued; once winit has delivered every pending event it calls
//! `about_to_wait`, where the queue is drained into the menu state, a frame is drawn and the loop
//! sleeps until the next frame deadline.

use crate::app::app_state::AppState;
use crate::app::frame_pacer::FramePacer;
use crate::config::AppConfig;
use crate::error::InitError;
use crate::game::input::{CursorTracker, InputEvent};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    dpi::{PhysicalPosition, PhysicalSize},
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow},
    window::{Window, WindowId},
};

/// Main application struct that manages the menu lifecycle and event handling.
///
/// # Lifecycle
/// 1. Created with [`App::new`], which creates the WGPU instance.
/// 2. `resumed` creates the window and the [`AppState`]. A failure is stored and the event
///    loop exits before any frame is drawn.
/// 3. Events are handled until the menu stops.
/// 4. `exiting` waits for the GPU and drops the state.
pub struct App {
    /// Loaded configuration.
    pub config: AppConfig,
    /// The WGPU instance for graphics operations.
    pub instance: wgpu::Instance,
    /// The current application state, None until initialized.
    pub state: Option<AppState>,
    /// Set from the interrupt handler thread.
    pub interrupted: Arc<AtomicBool>,
    cursor: CursorTracker,
    pending: Vec<InputEvent>,
    pacer: FramePacer,
    init_error: Option<InitError>,
}

impl App {
    /// Creates a new [`App`] with default WGPU configuration.
    pub fn new(config: AppConfig, interrupted: Arc<AtomicBool>) -> Self {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let pacer = FramePacer::new(config.frame.delay(), config.frame.pacing, Instant::now());
        Self {
            config,
            instance,
            state: None,
            interrupted,
            cursor: CursorTracker::default(),
            pending: Vec::new(),
            pacer,
            init_error: None,
        }
    }

    /// Takes the error that stopped initialization, if any.
    pub fn take_init_error(&mut self) -> Option<InitError> {
        self.init_error.take()
    }

    /// Creates the window and all rendering state.
    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> Result<AppState, InitError> {
        let size = PhysicalSize::new(self.config.window.width, self.config.window.height);
        let mut attributes = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(size)
            .with_resizable(false);

        if let Some(monitor) = event_loop.primary_monitor() {
            let (x, y) = centered_position(monitor.position(), monitor.size(), size);
            attributes = attributes.with_position(PhysicalPosition::new(x, y));
        }

        let window = Arc::new(event_loop.create_window(attributes)?);
        pollster::block_on(AppState::new(&self.instance, window, &self.config))
    }

    /// Translates a window event into menu input, if it is one.
    fn queue_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("The close button was pressed; stopping");
                self.pending.push(InputEvent::Quit);
            }
            WindowEvent::CursorMoved { position, .. } => {
                let moved = self.cursor.moved(position.x, position.y);
                self.pending.push(moved);
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button,
                ..
            } => {
                let pressed = self.cursor.pressed(*button);
                self.pending.push(pressed);
            }
            _ => {}
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() || self.init_error.is_some() {
            return;
        }

        match self.initialize(event_loop) {
            Ok(state) => {
                self.state = Some(state);
            }
            Err(err) => {
                self.init_error = Some(err);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        self.queue_window_event(&event);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.interrupted.swap(false, Ordering::SeqCst) {
            log::info!("Interrupt received; stopping");
            self.pending.push(InputEvent::Quit);
        }

        let Some(state) = self.state.as_mut() else {
            return;
        };

        let now = Instant::now();
        if self.pacer.is_due(now) {
            state.game_state.handle_events(self.pending.drain(..));
            if !state.game_state.is_running() {
                event_loop.exit();
                return;
            }

            state.render();
            self.pacer.frame_done(now, Instant::now());
        }

        event_loop.set_control_flow(ControlFlow::WaitUntil(self.pacer.deadline()));
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = self.state.take() {
            state.wgpu_renderer.cleanup();
            log::info!("Final score: {}", state.game_state.score);
        }
    }
}

/// Top-left position that centers a window of `window` size on a monitor.
pub fn centered_position(
    monitor_position: PhysicalPosition<i32>,
    monitor_size: PhysicalSize<u32>,
    window: PhysicalSize<u32>,
) -> (i32, i32) {
    let offset = |monitor: u32, window: u32| (monitor as i32 - window as i32) / 2;
    (
        monitor_position.x + offset(monitor_size.width, window.width),
        monitor_position.y + offset(monitor_size.height, window.height),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_is_centered_on_monitor() {
        let position = centered_position(
            PhysicalPosition::new(0, 0),
            PhysicalSize::new(1920, 1080),
            PhysicalSize::new(800, 600),
        );
        assert_eq!(position, (560, 240));
    }

    #[test]
    fn test_centering_respects_monitor_offset() {
        let position = centered_position(
            PhysicalPosition::new(1920, 0),
            PhysicalSize::new(1280, 1024),
            PhysicalSize::new(800, 600),
        );
        assert_eq!(position, (2160, 212));
    }
}
