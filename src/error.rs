//! Error types for startup, configuration and text rendering.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        /// File that was read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The file is not valid TOML or does not match the schema.
    #[error("failed to parse config file {path:?}: {source}")]
    Parse {
        /// File that was parsed.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },

    /// The values parse but cannot be used.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Errors that abort startup. Each one maps to exit code 1.
#[derive(Error, Debug)]
pub enum InitError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The windowing event loop could not be created.
    #[error("event loop creation failed: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    /// The interrupt handler could not be installed.
    #[error("signal handler installation failed: {0}")]
    Signal(#[from] ctrlc::Error),

    /// The window could not be created.
    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),

    /// The drawing surface could not be created for the window.
    #[error("surface creation failed: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    /// No GPU adapter can present to the surface.
    #[error("no compatible graphics adapter found")]
    NoAdapter,

    /// The adapter refused to open a device.
    #[error("device creation failed: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    /// The surface reports no usable texture format.
    #[error("surface has no supported texture format")]
    NoSurfaceFormat,

    /// The font file could not be read.
    #[error("font loading failed for {path:?}: {source}")]
    Font {
        /// Font file path.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The font file was read but contains no usable face.
    #[error("font loading failed for {0:?}: no font face found")]
    FontFace(PathBuf),
}

/// Errors raised while turning text into drawable glyphs.
#[derive(Error, Debug)]
pub enum TextError {
    /// Shaping produced no glyph runs for a non-empty string.
    #[error("text '{0}' produced no layout")]
    EmptyLayout(String),

    /// Glyph upload to the atlas failed.
    #[error("text prepare failed: {0:?}")]
    Prepare(glyphon::PrepareError),

    /// Recording the text draw failed.
    #[error("text render failed: {0:?}")]
    Render(glyphon::RenderError),
}

impl From<glyphon::PrepareError> for TextError {
    fn from(err: glyphon::PrepareError) -> Self {
        TextError::Prepare(err)
    }
}

impl From<glyphon::RenderError> for TextError {
    fn from(err: glyphon::RenderError) -> Self {
        TextError::Render(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_the_cause() {
        let err = InitError::Font {
            path: PathBuf::from("arial.ttf"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        let message = err.to_string();
        assert!(message.contains("arial.ttf"));
        assert!(message.contains("not found"));

        let err: InitError = ConfigError::Invalid("font size must be positive".into()).into();
        assert_eq!(
            err.to_string(),
            "invalid configuration: font size must be positive"
        );
    }
}
