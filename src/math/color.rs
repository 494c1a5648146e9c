/// Split a 24-bit `0xRRGGBB` value into sRGB components in `[0, 1]`
pub fn hex_to_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

/// sRGB transfer function, inverse
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Hex color to linear RGB, the space the shaders light in
pub fn hex_to_linear(hex: u32) -> [f32; 3] {
    hex_to_rgb(hex).map(srgb_to_linear)
}

/// Clear color for an sRGB surface; wgpu expects linear values there
pub fn hex_to_clear_color(hex: u32) -> wgpu::Color {
    let [r, g, b] = hex_to_linear(hex);
    wgpu::Color {
        r: r as f64,
        g: g as f64,
        b: b as f64,
        a: 1.0,
    }
}

pub fn hex_to_color32(hex: u32) -> egui::Color32 {
    egui::Color32::from_rgb(
        ((hex >> 16) & 0xff) as u8,
        ((hex >> 8) & 0xff) as u8,
        (hex & 0xff) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_rgb_primaries() {
        assert_eq!(hex_to_rgb(0xff0000), [1.0, 0.0, 0.0]);
        assert_eq!(hex_to_rgb(0x00ff00), [0.0, 1.0, 0.0]);
        assert_eq!(hex_to_rgb(0x0000ff), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_hex_to_rgb_ignores_high_byte() {
        assert_eq!(hex_to_rgb(0xff_2c2c2c), hex_to_rgb(0x2c2c2c));
    }

    #[test]
    fn test_srgb_to_linear_endpoints() {
        assert_eq!(srgb_to_linear(0.0), 0.0);
        assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-6);
        // mid grey is darker in linear space
        assert!(srgb_to_linear(0.5) < 0.25);
    }

    #[test]
    fn test_hex_to_color32() {
        let c = hex_to_color32(0xebebeb);
        assert_eq!((c.r(), c.g(), c.b()), (0xeb, 0xeb, 0xeb));
    }

    #[test]
    fn test_clear_color_is_opaque() {
        let c = hex_to_clear_color(0x2c2c2c);
        assert_eq!(c.a, 1.0);
        assert!(c.r > 0.0 && c.r < 0.1);
    }
}
