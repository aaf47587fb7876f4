//! Text rendering.
//!
//! [`TextRenderer`] wraps glyphon: it loads the single UI font, shapes labels into cached
//! buffers, reports their pixel size for layout, and draws the labels of a frame.

use crate::config::FontConfig;
use crate::error::{InitError, TextError};
use crate::renderer::frame::TextDraw;
use crate::renderer::label_cache::{LabelCache, LabelKey};
use glyphon::{
    Attrs, Buffer, Cache, Color, Family, FontSystem, Metrics, Resolution, Shaping, SwashCache,
    TextArea, TextAtlas, TextBounds, TextRenderer as GlyphonTextRenderer, Viewport,
};
use std::fs;
use std::path::Path;
use wgpu::{Device, MultisampleState, Queue, RenderPass};

/// Line height relative to the font size.
const LINE_HEIGHT_FACTOR: f32 = 1.2;

/// A shaped label and its size in whole pixels.
#[derive(Debug)]
pub struct ShapedLabel {
    /// Shaped glyph buffer.
    pub buffer: Buffer,
    /// Width of the widest line, rounded up.
    pub width: i32,
    /// Height of all lines, rounded up.
    pub height: i32,
}

/// Loads the UI font, shapes labels and draws them.
pub struct TextRenderer {
    /// Font database and shaping state.
    pub font_system: FontSystem,
    /// Rasterized glyph cache.
    pub swash_cache: SwashCache,
    /// Screen resolution uniform.
    pub viewport: Viewport,
    /// Glyph texture atlas.
    pub atlas: TextAtlas,
    /// Glyphon renderer.
    pub text_renderer: GlyphonTextRenderer,
    /// Shaped labels by (text, color, size).
    pub labels: LabelCache<LabelKey, ShapedLabel>,
    /// Family name read from the loaded font file.
    pub family: String,
    /// Font size in pixels.
    pub font_size: f32,
}

impl TextRenderer {
    /// Creates the glyph atlas and loads the configured font file.
    ///
    /// Fails if the file cannot be read or holds no font face.
    pub fn new(
        device: &Device,
        queue: &Queue,
        surface_format: wgpu::TextureFormat,
        font: &FontConfig,
    ) -> Result<Self, InitError> {
        let mut font_system = FontSystem::new();
        let family = load_font(&mut font_system, &font.path)?;
        log::info!(
            "Loaded font '{}' from {} at {} pt",
            family,
            font.path.display(),
            font.size
        );

        let swash_cache = SwashCache::new();
        let cache = Cache::new(device);
        let viewport = Viewport::new(device, &cache);
        let mut atlas = TextAtlas::new(device, queue, &cache, surface_format);
        let text_renderer =
            GlyphonTextRenderer::new(&mut atlas, device, MultisampleState::default(), None);

        Ok(Self {
            font_system,
            swash_cache,
            viewport,
            atlas,
            text_renderer,
            labels: LabelCache::new(),
            family,
            font_size: font.size,
        })
    }

    /// Shapes `text` (or reuses the cached shape) and returns its pixel size.
    pub fn rasterize(&mut self, text: &str, color: [u8; 3]) -> Result<(i32, i32), TextError> {
        let key = LabelKey::new(text, color, self.font_size);
        let metrics = Metrics::new(self.font_size, self.font_size * LINE_HEIGHT_FACTOR);
        let font_system = &mut self.font_system;
        let family = &self.family;

        let label = self
            .labels
            .get_or_try_insert_with(key, || shape_label(font_system, family, metrics, text))?;
        Ok((label.width, label.height))
    }

    /// Uploads the glyphs of `texts` for drawing at `resolution`.
    ///
    /// Every entry must have been rasterized this frame; entries missing from the cache are
    /// skipped.
    pub fn prepare(
        &mut self,
        device: &Device,
        queue: &Queue,
        resolution: Resolution,
        texts: &[TextDraw],
    ) -> Result<(), TextError> {
        let bounds = TextBounds {
            left: 0,
            top: 0,
            right: resolution.width as i32,
            bottom: resolution.height as i32,
        };
        self.viewport.update(queue, resolution);

        let font_size = self.font_size;
        let text_areas: Vec<TextArea> = texts
            .iter()
            .filter_map(|draw| {
                let key = LabelKey::new(&draw.text, draw.color, font_size);
                let label = self.labels.get(&key)?;
                Some(TextArea {
                    buffer: &label.buffer,
                    left: draw.left as f32,
                    top: draw.top as f32,
                    scale: 1.0,
                    bounds,
                    default_color: Color::rgb(draw.color[0], draw.color[1], draw.color[2]),
                    custom_glyphs: &[],
                })
            })
            .collect();

        self.text_renderer.prepare(
            device,
            queue,
            &mut self.font_system,
            &mut self.atlas,
            &self.viewport,
            text_areas,
            &mut self.swash_cache,
        )?;
        Ok(())
    }

    /// Records the prepared text into `render_pass`.
    pub fn render(&self, render_pass: &mut RenderPass) -> Result<(), TextError> {
        self.text_renderer
            .render(&self.atlas, &self.viewport, render_pass)?;
        Ok(())
    }

    /// Evicts labels not drawn this frame and frees unused atlas space.
    pub fn end_frame(&mut self) {
        let evicted = self.labels.end_frame();
        if evicted > 0 {
            log::trace!("Evicted {} cached labels", evicted);
        }
        self.atlas.trim();
    }
}

/// Reads a font file into the font database and returns its family name.
fn load_font(font_system: &mut FontSystem, path: &Path) -> Result<String, InitError> {
    let font_data = fs::read(path).map_err(|source| InitError::Font {
        path: path.to_path_buf(),
        source,
    })?;

    let db = font_system.db_mut();
    let known_faces = db.len();
    db.load_font_data(font_data);

    db.faces()
        .skip(known_faces)
        .find_map(|face| face.families.first().map(|(name, _)| name.clone()))
        .ok_or_else(|| InitError::FontFace(path.to_path_buf()))
}

/// Shapes `text` into a buffer with no wrapping and measures it.
fn shape_label(
    font_system: &mut FontSystem,
    family: &str,
    metrics: Metrics,
    text: &str,
) -> Result<ShapedLabel, TextError> {
    let mut buffer = Buffer::new(font_system, metrics);
    buffer.set_size(font_system, None, None);

    let attrs = Attrs::new().family(Family::Name(family));
    buffer.set_text(font_system, text, attrs, Shaping::Advanced);
    buffer.shape_until_scroll(font_system, false);

    let (width, lines) = buffer
        .layout_runs()
        .fold((0.0f32, 0usize), |(width, lines), run| {
            (width.max(run.line_w), lines + 1)
        });

    if lines == 0 && !text.is_empty() {
        return Err(TextError::EmptyLayout(text.to_string()));
    }

    Ok(ShapedLabel {
        buffer,
        width: width.ceil() as i32,
        height: (lines as f32 * metrics.line_height).ceil() as i32,
    })
}
