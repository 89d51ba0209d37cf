//! Clear color for the scene canvas.

/// Scene background, `#f2f2f5`.
pub const SCENE_BACKGROUND: [u8; 3] = [0xf2, 0xf2, 0xf5];
/// Loader cover fill.
pub const LOADER_COVER: [u8; 3] = [0x00, 0x00, 0x00];

/// Decode an 8-bit sRGB channel to linear.
fn srgb_to_linear(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Linear clear color for an 8-bit sRGB triple.
#[must_use]
pub fn linear_color(rgb: [u8; 3]) -> wgpu::Color {
    wgpu::Color {
        r: srgb_to_linear(rgb[0]),
        g: srgb_to_linear(rgb[1]),
        b: srgb_to_linear(rgb[2]),
        a: 1.0,
    }
}

/// Background with the loader cover blended over it by `coverage` (0..=1).
#[must_use]
pub fn clear_color(coverage: f32) -> wgpu::Color {
    let t = f64::from(coverage.clamp(0.0, 1.0));
    let bg = linear_color(SCENE_BACKGROUND);
    let cover = linear_color(LOADER_COVER);
    wgpu::Color {
        r: bg.r + (cover.r - bg.r) * t,
        g: bg.g + (cover.g - bg.g) * t,
        b: bg.b + (cover.b - bg.b) * t,
        a: 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncovered_is_scene_background() {
        let c = clear_color(0.0);
        assert!((c.r - 0.887_923).abs() < 1e-4);
        assert!((c.b - 0.913_099).abs() < 1e-4);
    }

    #[test]
    fn fully_covered_is_loader_fill() {
        let c = clear_color(1.0);
        assert_eq!((c.r, c.g, c.b), (0.0, 0.0, 0.0));
        assert_eq!(clear_color(7.0), c);
    }
}
