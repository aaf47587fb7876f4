//! Logging setup.
//!
//! Logs go to stderr as `[HH:MM:SS LEVEL] target - message`. `RUST_LOG` overrides the default
//! filter, which is Info for this crate and Warn for the graphics stack.

use log::LevelFilter;
use std::io::Write;

/// Installs the global logger. Safe to call more than once; later calls are ignored.
pub fn init() {
    let mut builder = env_logger::Builder::new();

    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    } else {
        builder.filter_level(LevelFilter::Info);
        builder.filter_module("wgpu_core", LevelFilter::Warn);
        builder.filter_module("wgpu_hal", LevelFilter::Warn);
        builder.filter_module("naga", LevelFilter::Warn);
        builder.filter_module("winit", LevelFilter::Warn);
        builder.filter_module("cosmic_text", LevelFilter::Warn);
    }

    builder.format(|buf, record| {
        let now = chrono::Local::now().format("%H:%M:%S");
        writeln!(
            buf,
            "[{} {}] {} - {}",
            now,
            record.level(),
            record.target(),
            record.args()
        )
    });

    if builder.try_init().is_ok() {
        log::debug!("Logger initialized");
    }
}
