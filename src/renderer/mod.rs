//! Main renderer module.
//!
//! This module contains the frame composition, the label cache, the rectangle and text layers,
//! and the wgpu renderer that ties them to the window surface.

/// Pure frame composition from menu state.
pub mod frame;
/// Cache of rasterized labels.
pub mod label_cache;
/// Rectangle rendering utilities.
pub mod rectangle;
/// Text rendering system.
pub mod text;
/// Core WGPU library and utilities.
pub mod wgpu_lib;

/// Converts one sRGB byte to a linear channel value.
pub fn srgb_to_linear(channel: u8) -> f32 {
    let c = channel as f32 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Opaque linear RGBA for an sRGB byte triple.
pub fn to_linear_rgba(rgb: [u8; 3]) -> [f32; 4] {
    [
        srgb_to_linear(rgb[0]),
        srgb_to_linear(rgb[1]),
        srgb_to_linear(rgb[2]),
        1.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_srgb_endpoints() {
        assert_eq!(srgb_to_linear(0), 0.0);
        assert!((srgb_to_linear(255) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_mid_gray_is_darker_in_linear() {
        let linear = srgb_to_linear(70);
        assert!(linear < 70.0 / 255.0);
        assert!((linear - 0.0612).abs() < 1e-3);
        assert_eq!(to_linear_rgba([70, 70, 70])[3], 1.0);
    }
}
