/// Display-referred RGBA color.
///
/// The pipeline renders in gamma space into a non-sRGB swapchain, so channel
/// values are written to the screen unchanged: `0xffad17` shows as `#ffad17`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color from a `0xRRGGBB` literal.
    pub fn from_hex(rgb: u32) -> Self {
        let r = ((rgb >> 16) & 0xff) as u8;
        let g = ((rgb >> 8) & 0xff) as u8;
        let b = (rgb & 0xff) as u8;
        Self::from_u8(r, g, b, 255)
    }

    pub fn from_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Returns `[r, g, b]` as a uniform-ready array.
    #[inline]
    pub fn rgb(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Quantises to 8-bit channels, clamping out-of-range values.
    pub fn to_rgba8(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a].map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
    }

    #[inline]
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_extremes_map_to_black_and_white() {
        assert_eq!(Color::from_hex(0x000000), Color::BLACK);
        assert_eq!(Color::from_hex(0xffffff), Color::WHITE);
    }

    #[test]
    fn hex_channel_order_is_rgb() {
        let c = Color::from_hex(0xffad17);
        assert_eq!(c.r, 1.0);
        assert!((c.g - 173.0 / 255.0).abs() < 1e-6);
        assert!((c.b - 23.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn rgba8_round_trips_hex_and_clamps() {
        assert_eq!(Color::from_hex(0xba7f10).to_rgba8(), [0xba, 0x7f, 0x10, 0xff]);
        assert_eq!(Color::new(2.0, -1.0, 0.5, 1.0).to_rgba8(), [255, 0, 128, 255]);
    }
}
