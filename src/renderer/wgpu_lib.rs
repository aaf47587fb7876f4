//! WGPU-based renderer for the menu.
//!
//! This module provides [`WgpuRenderer`], which owns the GPU device, the window surface and the
//! two drawing layers (rectangle fills and text). Each frame is fully redrawn: clear, button
//! fills, labels, present.
//!
//! Fields are declared in reverse acquisition order so that dropping the renderer releases the
//! text renderer (and its font) first and the surface last.

use crate::config::{AppConfig, ThemeConfig};
use crate::error::InitError;
use crate::game::GameState;
use crate::renderer::frame::{Frame, compose_frame};
use crate::renderer::rectangle::{Rectangle, RectangleRenderer};
use crate::renderer::text::TextRenderer;
use crate::renderer::to_linear_rgba;
use wgpu::{SurfaceTexture, TextureView};

/// Owns every GPU resource used to draw the menu.
pub struct WgpuRenderer {
    /// Label shaping and drawing.
    pub text_renderer: TextRenderer,
    /// Button fills.
    pub rectangle_renderer: RectangleRenderer,
    /// The surface configuration (format, size, etc.).
    pub surface_config: wgpu::SurfaceConfiguration,
    /// The WGPU queue for submitting commands.
    pub queue: wgpu::Queue,
    /// The WGPU device for resource creation.
    pub device: wgpu::Device,
    /// The WGPU surface for presenting rendered frames.
    pub surface: wgpu::Surface<'static>,
    /// Colors and fixed positions.
    pub theme: ThemeConfig,
}

impl WgpuRenderer {
    /// Opens a device for `surface` and builds the pipelines.
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'static>,
        config: &AppConfig,
    ) -> Result<Self, InitError> {
        let adapter = Self::create_adapter(instance, &surface).await?;
        let info = adapter.get_info();
        log::info!("Using adapter '{}' ({:?})", info.name, info.backend);

        let (device, queue) = Self::create_device(&adapter).await?;
        let surface_config = Self::create_surface_config(
            &surface,
            &adapter,
            config.window.width,
            config.window.height,
        )?;
        surface.configure(&device, &surface_config);

        let rectangle_renderer = RectangleRenderer::new(
            &device,
            surface_config.format,
            surface_config.width as f32,
            surface_config.height as f32,
        );
        let text_renderer =
            TextRenderer::new(&device, &queue, surface_config.format, &config.font)?;

        Ok(Self {
            text_renderer,
            rectangle_renderer,
            surface_config,
            queue,
            device,
            surface,
            theme: config.theme.clone(),
        })
    }

    /// Draws `game_state` and presents it.
    ///
    /// Label failures only drop the affected text; surface errors are returned so the caller
    /// can reconfigure or stop.
    pub fn render(&mut self, game_state: &GameState) -> Result<(), wgpu::SurfaceError> {
        let (surface_texture, surface_view) = self.get_surface_texture_and_view()?;

        let text_renderer = &mut self.text_renderer;
        let frame = compose_frame(game_state, &self.theme, |text, color| {
            text_renderer.rasterize(text, color)
        });

        self.queue_rectangles(&frame);
        let text_ready = match self.text_renderer.prepare(
            &self.device,
            &self.queue,
            glyphon::Resolution {
                width: self.surface_config.width,
                height: self.surface_config.height,
            },
            &frame.texts,
        ) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Skipping text this frame: {}", e);
                false
            }
        };

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Menu Encoder"),
            });
        self.encode_pass(&mut encoder, &surface_view, &frame, text_ready);

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        self.text_renderer.end_frame();
        Ok(())
    }

    /// Re-applies the surface configuration after the surface was lost or outdated.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.surface_config);
    }

    /// Waits for submitted GPU work to finish.
    pub fn cleanup(&self) {
        let status = self.device.poll(wgpu::Maintain::Wait);
        log::debug!("Device poll before teardown: queue_empty={}", status.is_queue_empty());
    }

    // Private helper methods

    async fn create_adapter(
        instance: &wgpu::Instance,
        surface: &wgpu::Surface<'static>,
    ) -> Result<wgpu::Adapter, InitError> {
        instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                force_fallback_adapter: false,
                compatible_surface: Some(surface),
            })
            .await
            .ok_or(InitError::NoAdapter)
    }

    async fn create_device(
        adapter: &wgpu::Adapter,
    ) -> Result<(wgpu::Device, wgpu::Queue), InitError> {
        let device_and_queue = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Menu Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: Default::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;
        Ok(device_and_queue)
    }

    fn create_surface_config(
        surface: &wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
    ) -> Result<wgpu::SurfaceConfiguration, InitError> {
        let capabilities = surface.get_capabilities(adapter);
        let format = capabilities
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| capabilities.formats.first())
            .copied()
            .ok_or(InitError::NoSurfaceFormat)?;
        let alpha_mode = capabilities
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        Ok(wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            desired_maximum_frame_latency: 2,
            alpha_mode,
            view_formats: vec![],
        })
    }

    fn get_surface_texture_and_view(
        &self,
    ) -> Result<(SurfaceTexture, TextureView), wgpu::SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;
        let surface_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        Ok((surface_texture, surface_view))
    }

    /// Surface color for an sRGB byte triple.
    fn surface_color(&self, rgb: [u8; 3]) -> [f32; 4] {
        if self.surface_config.format.is_srgb() {
            to_linear_rgba(rgb)
        } else {
            [
                rgb[0] as f32 / 255.0,
                rgb[1] as f32 / 255.0,
                rgb[2] as f32 / 255.0,
                1.0,
            ]
        }
    }

    fn queue_rectangles(&mut self, frame: &Frame) {
        let rectangles: Vec<Rectangle> = frame
            .rects
            .iter()
            .map(|fill| {
                Rectangle::from_bounds(&fill.bounds, self.surface_color(fill.color))
                    .with_corner_radius(fill.corner_radius)
            })
            .collect();

        self.rectangle_renderer.clear_rectangles();
        for rectangle in rectangles {
            self.rectangle_renderer.add_rectangle(rectangle);
        }
    }

    fn encode_pass(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        surface_view: &TextureView,
        frame: &Frame,
        draw_text: bool,
    ) {
        let [r, g, b, a] = self.surface_color(frame.clear);
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Menu Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: surface_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: r as f64,
                        g: g as f64,
                        b: b as f64,
                        a: a as f64,
                    }),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        self.rectangle_renderer.render(&self.device, &mut render_pass);

        if draw_text {
            if let Err(e) = self.text_renderer.render(&mut render_pass) {
                log::warn!("Text render failed: {}", e);
            }
        }
    }
}
