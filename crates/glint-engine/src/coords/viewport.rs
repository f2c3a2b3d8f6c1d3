use super::OrthoFrame;

/// Viewport size in physical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Width over height; 1 for an invalid viewport.
    #[inline]
    pub fn aspect(self) -> f32 {
        if self.is_valid() { self.width / self.height } else { 1.0 }
    }

    #[inline]
    pub fn ortho(self) -> OrthoFrame {
        OrthoFrame::new(self.width, self.height)
    }

    /// Whole-pixel size for allocating buffers; at least 1x1.
    pub fn pixel_size(self) -> (u32, u32) {
        if !self.is_valid() {
            return (1, 1);
        }
        (
            (self.width.round() as u32).max(1),
            (self.height.round() as u32).max(1),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_falls_back_for_empty_viewport() {
        assert_eq!(Viewport::new(1600.0, 900.0).aspect(), 1600.0 / 900.0);
        assert_eq!(Viewport::new(0.0, 900.0).aspect(), 1.0);
        assert_eq!(Viewport::default().aspect(), 1.0);
    }

    #[test]
    fn pixel_size_rounds_and_clamps() {
        assert_eq!(Viewport::new(1280.0, 720.0).pixel_size(), (1280, 720));
        assert_eq!(Viewport::new(99.6, 0.4).pixel_size(), (100, 1));
        assert_eq!(Viewport::new(99.6, 10.4).pixel_size(), (100, 10));
        assert_eq!(Viewport::new(f32::NAN, 10.0).pixel_size(), (1, 1));
    }
}
