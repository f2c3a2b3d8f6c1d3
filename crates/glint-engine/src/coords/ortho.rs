/// Width factor applied to the orthographic camera's horizontal extent.
///
/// With a 16:9 window the centred square plane exactly fills the view.
pub const ORTHO_ASPECT: f32 = 9.0 / 16.0;

/// Orthographic camera bounds in pixels, centred on the origin.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OrthoBounds {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

/// Sizing of the flat-plane playgrounds: a square plane viewed through an
/// orthographic camera sized from the window.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OrthoFrame {
    pub width: f32,
    pub height: f32,
}

impl OrthoFrame {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn bounds(self) -> OrthoBounds {
        OrthoBounds {
            left: ORTHO_ASPECT * self.width / -2.0,
            right: ORTHO_ASPECT * self.width / 2.0,
            top: self.height / 2.0,
            bottom: self.height / -2.0,
        }
    }

    /// Side of the square plane: the larger window dimension in portrait,
    /// the smaller one in landscape.
    pub fn geometry_size(self) -> f32 {
        if self.height >= self.width {
            self.width.max(self.height)
        } else {
            self.width.min(self.height)
        }
    }

    /// Half extents of the plane in NDC under `bounds()`.
    ///
    /// Values above 1 mean the plane overflows the view on that axis.
    pub fn quad_extent(self) -> [f32; 2] {
        let b = self.bounds();
        let half = self.geometry_size() / 2.0;
        let half_w = ((b.right - b.left) / 2.0).max(f32::EPSILON);
        let half_h = ((b.top - b.bottom) / 2.0).max(f32::EPSILON);
        [half / half_w, half / half_h]
    }
}

/// UV scale that letterboxes a texture onto a plane of a different aspect.
///
/// Shaders remap with `uv' = 0.5 + (uv - 0.5) / factor`, so a factor above 1
/// crops that axis.
pub fn texture_factor(texture_aspect: f32, plane_aspect: f32) -> [f32; 2] {
    if !(texture_aspect > 0.0 && plane_aspect > 0.0) {
        return [1.0, 1.0];
    }
    if texture_aspect > plane_aspect {
        [texture_aspect / plane_aspect, 1.0]
    } else {
        [1.0, plane_aspect / texture_aspect]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_scale_width_by_nine_sixteenths() {
        let b = OrthoFrame::new(1600.0, 900.0).bounds();
        assert_eq!(b.left, -450.0);
        assert_eq!(b.right, 450.0);
        assert_eq!(b.top, 450.0);
        assert_eq!(b.bottom, -450.0);
    }

    #[test]
    fn geometry_size_landscape_takes_min() {
        assert_eq!(OrthoFrame::new(1600.0, 900.0).geometry_size(), 900.0);
    }

    #[test]
    fn geometry_size_portrait_takes_max() {
        assert_eq!(OrthoFrame::new(600.0, 1000.0).geometry_size(), 1000.0);
        assert_eq!(OrthoFrame::new(700.0, 700.0).geometry_size(), 700.0);
    }

    #[test]
    fn sixteen_by_nine_plane_fills_the_view() {
        let [x, y] = OrthoFrame::new(1920.0, 1080.0).quad_extent();
        assert!((x - 1.0).abs() < 1e-6);
        assert!((y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn portrait_plane_overflows_vertically() {
        let [_, y] = OrthoFrame::new(600.0, 1000.0).quad_extent();
        assert!((y - 1.0).abs() < 1e-6);
        let [x, _] = OrthoFrame::new(600.0, 1000.0).quad_extent();
        assert!(x > 1.0);
    }

    #[test]
    fn wide_texture_crops_horizontally() {
        // 16:9 video onto a 4:3 plane.
        let f = texture_factor(16.0 / 9.0, 1200.0 / 900.0);
        assert!((f[0] - (16.0 / 9.0) / (4.0 / 3.0)).abs() < 1e-6);
        assert_eq!(f[1], 1.0);
    }

    #[test]
    fn tall_texture_crops_vertically() {
        let f = texture_factor(1.0, 4.0 / 3.0);
        assert_eq!(f[0], 1.0);
        assert!((f[1] - 4.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn degenerate_aspect_is_identity() {
        assert_eq!(texture_factor(0.0, 1.0), [1.0, 1.0]);
    }
}
