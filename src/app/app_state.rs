//! AppState module.
//!
//! This module defines the [`AppState`] struct, which holds everything that exists only while
//! the window is open: the renderer, the menu state and the window itself. Fields drop in
//! declaration order, so GPU resources are released before the window.

use crate::config::AppConfig;
use crate::error::InitError;
use crate::game::GameState;
use crate::renderer::wgpu_lib::WgpuRenderer;
use std::sync::Arc;
use winit::window::Window;

/// Holds all state required for a running menu session.
pub struct AppState {
    /// The WGPU renderer for the menu.
    pub wgpu_renderer: WgpuRenderer,
    /// Buttons, score and running flag.
    pub game_state: GameState,
    /// The application window.
    pub window: Arc<Window>,
}

impl AppState {
    /// Creates the surface and renderer for `window` and the initial menu state.
    pub async fn new(
        instance: &wgpu::Instance,
        window: Arc<Window>,
        config: &AppConfig,
    ) -> Result<Self, InitError> {
        let surface = instance.create_surface(window.clone())?;
        let wgpu_renderer = WgpuRenderer::new(instance, surface, config).await?;
        let game_state = GameState::new(config.build_buttons());
        log::info!("Menu ready with {} buttons", game_state.buttons.len());

        Ok(Self {
            wgpu_renderer,
            game_state,
            window,
        })
    }

    /// Draws one frame.
    ///
    /// A lost or outdated surface is reconfigured and the frame skipped. Running out of memory
    /// stops the menu.
    pub fn render(&mut self) {
        match self.wgpu_renderer.render(&self.game_state) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                self.wgpu_renderer.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory, stopping");
                self.game_state.stop();
            }
            Err(e) => log::warn!("Skipping frame: {}", e),
        }
    }
}
