//! Configuration for the menu demo.
//!
//! Every value has a compiled-in default, so the program runs without a config file. Settings can
//! be overridden from a TOML file: the path in `GAMEGUI_CONFIG`, or `gamegui.toml` in the working
//! directory. A missing `gamegui.toml` falls back to defaults; an explicit `GAMEGUI_CONFIG` path
//! that cannot be read is an error.
//!
//! ```toml
//! [font]
//! path = "fonts/DejaVuSans.ttf"
//! size = 28.0
//!
//! [frame]
//! pacing = "adaptive"
//!
//! [[buttons]]
//! label = "Start Game"
//! x = 50
//! y = 50
//! width = 200
//! height = 50
//! command = { kind = "add_score", amount = 10 }
//! ```

use crate::error::ConfigError;
use crate::game::button::{Bounds, Button, Command};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "GAMEGUI_CONFIG";
/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "gamegui.toml";

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Window settings.
    pub window: WindowConfig,
    /// Font file and size.
    pub font: FontConfig,
    /// Colors and fixed label positions.
    pub theme: ThemeConfig,
    /// Frame pacing.
    pub frame: FrameConfig,
    /// Buttons in drawing order.
    pub buttons: Vec<ButtonConfig>,
}

/// Window configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Title bar text.
    pub title: String,
    /// Inner width in physical pixels.
    pub width: u32,
    /// Inner height in physical pixels.
    pub height: u32,
}

/// Font configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Path to a .ttf/.otf file, relative to the working directory.
    pub path: PathBuf,
    /// Size in points. Rendered 1:1 as pixels.
    pub size: f32,
}

/// Colors are sRGB bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Window clear color.
    pub background: [u8; 3],
    /// Button fill when not hovered.
    pub button: [u8; 3],
    /// Button fill when hovered.
    pub button_hover: [u8; 3],
    /// Label and score text color.
    pub text: [u8; 3],
    /// Corner radius for button fills, 0 for square corners.
    pub corner_radius: f32,
    /// Top-left corner of the score label.
    pub score_position: (i32, i32),
}

/// How the delay between frames is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FramePacing {
    /// Waits the full delay after each frame's work.
    Fixed,
    /// Waits for the delay measured from the start of the frame.
    Adaptive,
}

/// Frame pacing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Delay between frames in milliseconds.
    pub delay_ms: u64,
    /// Pacing strategy.
    pub pacing: FramePacing,
}

/// One entry of the button list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonConfig {
    /// Label text.
    pub label: String,
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width.
    pub width: i32,
    /// Height.
    pub height: i32,
    /// Action on click.
    pub command: Command,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            font: FontConfig::default(),
            theme: ThemeConfig::default(),
            frame: FrameConfig::default(),
            buttons: vec![
                ButtonConfig::new("Start Game", 50, 50, Command::AddScore { amount: 10 }),
                ButtonConfig::new("Options", 50, 120, Command::None),
                ButtonConfig::new("Quit", 50, 190, Command::Quit),
            ],
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Game GUI".to_string(),
            width: 800,
            height: 600,
        }
    }
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("arial.ttf"),
            size: 24.0,
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            background: [45, 45, 45],
            button: [70, 70, 70],
            button_hover: [100, 100, 100],
            text: [255, 255, 255],
            corner_radius: 0.0,
            score_position: (600, 50),
        }
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            delay_ms: 16,
            pacing: FramePacing::Fixed,
        }
    }
}

impl FrameConfig {
    /// Delay as a [`Duration`].
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl ButtonConfig {
    /// A 200x50 button at (x, y).
    fn new(label: &str, x: i32, y: i32, command: Command) -> Self {
        Self {
            label: label.to_string(),
            x,
            y,
            width: 200,
            height: 50,
            command,
        }
    }
}

impl AppConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content, path)
    }

    /// Loads from `GAMEGUI_CONFIG`, then `gamegui.toml`, then defaults.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            log::info!("Loading config from {} ({})", path, CONFIG_ENV);
            return Self::load_from_file(path);
        }

        let default_path = Path::new(DEFAULT_CONFIG_FILE);
        if default_path.exists() {
            log::info!("Loading config from {}", default_path.display());
            Self::load_from_file(default_path)
        } else {
            log::debug!("No {} found, using built-in defaults", DEFAULT_CONFIG_FILE);
            Ok(Self::default())
        }
    }

    /// Rejects values the renderer cannot use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        if self.font.size.is_nan() || self.font.size <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "font size must be positive, got {}",
                self.font.size
            )));
        }
        if let Some(button) = self
            .buttons
            .iter()
            .find(|b| b.width < 0 || b.height < 0)
        {
            return Err(ConfigError::Invalid(format!(
                "button '{}' has a negative size",
                button.label
            )));
        }
        let out_of_range = |b: &&ButtonConfig| {
            Bounds::new(b.x, b.y, b.width, b.height)
                .checked_far_edges()
                .is_none()
        };
        if let Some(button) = self.buttons.iter().find(out_of_range) {
            return Err(ConfigError::Invalid(format!(
                "button '{}' extends past the pixel coordinate range",
                button.label
            )));
        }
        Ok(())
    }

    /// Creates the menu buttons in configuration order.
    pub fn build_buttons(&self) -> Vec<Button> {
        self.buttons
            .iter()
            .map(|b| Button::new(b.x, b.y, b.width, b.height, &b.label, b.command))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_layout() {
        let config = AppConfig::default();
        let buttons = config.build_buttons();

        let labels: Vec<&str> = buttons.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Start Game", "Options", "Quit"]);
        assert_eq!(buttons[2].bounds, Bounds::new(50, 190, 200, 50));
        assert_eq!(buttons[0].command, Command::AddScore { amount: 10 });
        assert_eq!(config.window.width, 800);
        assert_eq!(config.font.size, 24.0);
        assert_eq!(config.frame.delay(), Duration::from_millis(16));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [font]
            size = 30.0

            [frame]
            pacing = "adaptive"
            "#,
            Path::new("test.toml"),
        )
        .unwrap();

        assert_eq!(config.font.size, 30.0);
        assert_eq!(config.font.path, PathBuf::from("arial.ttf"));
        assert_eq!(config.frame.pacing, FramePacing::Adaptive);
        assert_eq!(config.frame.delay_ms, 16);
        assert_eq!(config.buttons.len(), 3);
    }

    #[test]
    fn test_button_list_from_file() {
        let config = AppConfig::from_toml(
            r#"
            [[buttons]]
            label = "Bonus"
            x = 10
            y = 20
            width = 100
            height = 40
            command = { kind = "add_score", amount = 25 }

            [[buttons]]
            label = "Exit"
            x = 10
            y = 80
            width = 100
            height = 40
            command = { kind = "quit" }
            "#,
            Path::new("test.toml"),
        )
        .unwrap();

        let buttons = config.build_buttons();
        assert_eq!(buttons.len(), 2);
        assert_eq!(buttons[0].command, Command::AddScore { amount: 25 });
        assert_eq!(buttons[1].command, Command::Quit);
        assert_eq!(buttons[1].bounds, Bounds::new(10, 80, 100, 40));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = AppConfig::from_toml("[font]\nsize = 0.0\n", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = AppConfig::from_toml("[window]\nwidth = 0\n", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_button_past_coordinate_range_is_rejected() {
        let content = r#"
            [[buttons]]
            label = "Far"
            x = 2147483600
            y = 0
            width = 200
            height = 50
            command = { kind = "none" }
            "#;
        let err = AppConfig::from_toml(content, Path::new("far.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("Far"));

        let tall = content.replace("x = 2147483600", "x = 0").replace("y = 0", "y = 2147483600");
        let err = AppConfig::from_toml(&tall, Path::new("far.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_parse_error_names_the_file() {
        let err = AppConfig::from_toml("[font\n", Path::new("broken.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = AppConfig::load_from_file("does/not/exist.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
