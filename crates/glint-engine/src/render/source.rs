//! Frame sources: CPU-side pixel producers uploaded into a GPU texture.
//!
//! A source hands out a new RGBA8 frame only when its content changed; the
//! owning [`SourceTexture`] re-uploads just those frames.

use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::paint::Color;

use super::target::{TargetParams, TextureBinding};

/// Errors raised while building a frame source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to load image {path}: {source}")]
    Image {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("source dimensions must be non-zero, got {width}x{height}")]
    ZeroSize { width: u32, height: u32 },

    #[error("source is {width}x{height}, the device allows at most {max} per side")]
    TooLarge { width: u32, height: u32, max: u32 },

    #[error("pixel buffer is {actual} bytes, expected {expected} for {width}x{height} RGBA8")]
    SizeMismatch {
        actual: usize,
        expected: usize,
        width: u32,
        height: u32,
    },
}

fn check_size(width: u32, height: u32) -> Result<(), SourceError> {
    if width == 0 || height == 0 {
        return Err(SourceError::ZeroSize { width, height });
    }
    Ok(())
}

/// Rejects sources that do not fit in a 2D texture of at most `max` texels per side.
pub fn check_texture_size(width: u32, height: u32, max: u32) -> Result<(), SourceError> {
    check_size(width, height)?;
    if width > max || height > max {
        return Err(SourceError::TooLarge { width, height, max });
    }
    Ok(())
}

/// Produces RGBA8 frames (4 bytes per pixel, rows top to bottom).
pub trait FrameSource {
    fn size(&self) -> (u32, u32);

    /// Returns the pixels of a new frame, or `None` when nothing changed since
    /// the last poll.
    fn poll_frame(&mut self) -> Option<&[u8]>;
}

/// Still image decoded once; yields its pixels on the first poll.
pub struct ImageSource {
    pixels: Vec<u8>,
    size: (u32, u32),
    pending: bool,
}

impl ImageSource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|source| SourceError::Image {
            path: path.display().to_string(),
            source,
        })?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        log::info!("loaded image source {} ({width}x{height})", path.display());
        Self::from_rgba(width, height, rgba.into_raw())
    }

    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, SourceError> {
        check_size(width, height)?;
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(SourceError::SizeMismatch {
                actual: pixels.len(),
                expected,
                width,
                height,
            });
        }
        Ok(Self {
            pixels,
            size: (width, height),
            pending: true,
        })
    }
}

impl FrameSource for ImageSource {
    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn poll_frame(&mut self) -> Option<&[u8]> {
        if !std::mem::take(&mut self.pending) {
            return None;
        }
        Some(&self.pixels)
    }
}

/// Procedural canvas: every poll paints one translucent square at a random
/// position over the previous content. Starts fully transparent.
pub struct CanvasSource {
    pixels: Vec<u8>,
    size: (u32, u32),
    rng: StdRng,
}

impl CanvasSource {
    pub const DEFAULT_SIZE: (u32, u32) = (1000, 400);
    pub const RECT_SIZE: u32 = 50;

    pub fn new(width: u32, height: u32) -> Result<Self, SourceError> {
        Self::with_rng(width, height, StdRng::from_os_rng())
    }

    /// Deterministic canvas for a given seed.
    pub fn seeded(width: u32, height: u32, seed: u64) -> Result<Self, SourceError> {
        Self::with_rng(width, height, StdRng::seed_from_u64(seed))
    }

    fn with_rng(width: u32, height: u32, rng: StdRng) -> Result<Self, SourceError> {
        check_size(width, height)?;
        Ok(Self {
            pixels: vec![0u8; width as usize * height as usize * 4],
            size: (width, height),
            rng,
        })
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Source-over blends `color` into the rectangle at `(x, y)`, clipped to the canvas.
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Color) {
        let (cw, ch) = self.size;
        let x1 = x.saturating_add(w).min(cw);
        let y1 = y.saturating_add(h).min(ch);
        let a = color.a.clamp(0.0, 1.0);
        let src = [color.r, color.g, color.b].map(|c| c.clamp(0.0, 1.0) * 255.0);

        for row in y.min(ch)..y1 {
            for col in x.min(cw)..x1 {
                let i = (row as usize * cw as usize + col as usize) * 4;
                let dst_a = self.pixels[i + 3] as f32 / 255.0;
                let out_a = a + dst_a * (1.0 - a);
                if out_a <= 0.0 {
                    continue;
                }
                // Straight (non-premultiplied) alpha, like a 2D canvas.
                for c in 0..3 {
                    let dst = self.pixels[i + c] as f32;
                    let blended = (src[c] * a + dst * dst_a * (1.0 - a)) / out_a;
                    self.pixels[i + c] = blended.round() as u8;
                }
                self.pixels[i + 3] = (out_a * 255.0).round() as u8;
            }
        }
    }

    fn paint_random_rect(&mut self) {
        let (cw, ch) = self.size;
        let x = self.rng.random_range(0..cw);
        let y = self.rng.random_range(0..ch);
        let color = Color::from_u8(
            self.rng.random_range(0..255),
            self.rng.random_range(0..255),
            self.rng.random_range(0..255),
            self.rng.random_range(0..=255),
        );
        self.fill_rect(x, y, Self::RECT_SIZE, Self::RECT_SIZE, color);
    }
}

impl FrameSource for CanvasSource {
    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn poll_frame(&mut self) -> Option<&[u8]> {
        self.paint_random_rect();
        Some(&self.pixels)
    }
}

/// Single flat colour; yields once.
pub struct SolidSource {
    pixels: Vec<u8>,
    size: (u32, u32),
    pending: bool,
}

impl SolidSource {
    pub fn new(width: u32, height: u32, color: Color) -> Result<Self, SourceError> {
        check_size(width, height)?;
        let px = color.to_rgba8();
        let pixels = px.repeat(width as usize * height as usize);
        Ok(Self {
            pixels,
            size: (width, height),
            pending: true,
        })
    }
}

impl FrameSource for SolidSource {
    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn poll_frame(&mut self) -> Option<&[u8]> {
        if !std::mem::take(&mut self.pending) {
            return None;
        }
        Some(&self.pixels)
    }
}

/// GPU texture fed by a [`FrameSource`].
pub struct SourceTexture<S: FrameSource> {
    source: S,
    texture: wgpu::Texture,
    binding: TextureBinding,
}

impl<S: FrameSource> SourceTexture<S> {
    /// Fails with [`SourceError::TooLarge`] when the source exceeds the device's
    /// 2D texture limit.
    pub fn new(device: &wgpu::Device, source: S) -> Result<Self, SourceError> {
        let (width, height) = source.size();
        check_texture_size(width, height, device.limits().max_texture_dimension_2d)?;
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("glint source texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let params = TargetParams::linear_clamp(wgpu::TextureFormat::Rgba8Unorm);
        let sampler = device.create_sampler(&params.sampler_descriptor());

        Ok(Self {
            source,
            texture,
            binding: TextureBinding {
                view,
                sampler,
                size: (width, height),
            },
        })
    }

    /// Uploads the source's next frame, if it has one. Returns whether an upload happened.
    pub fn update(&mut self, queue: &wgpu::Queue) -> bool {
        let (width, height) = self.binding.size;
        let Some(pixels) = self.source.poll_frame() else {
            return false;
        };

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width * 4),
                rows_per_image: None,
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
        true
    }

    pub fn binding(&self) -> TextureBinding {
        self.binding.clone()
    }

    pub fn aspect(&self) -> f32 {
        self.binding.aspect()
    }

}

/// Any source, chosen at runtime.
pub type BoxedSource = Box<dyn FrameSource>;

impl FrameSource for BoxedSource {
    fn size(&self) -> (u32, u32) {
        (**self).size()
    }

    fn poll_frame(&mut self) -> Option<&[u8]> {
        (**self).poll_frame()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(canvas: &CanvasSource, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * canvas.size().0 + x) * 4) as usize;
        let p = canvas.pixels();
        [p[i], p[i + 1], p[i + 2], p[i + 3]]
    }

    #[test]
    fn image_source_yields_once() {
        let mut src = ImageSource::from_rgba(2, 1, vec![255; 8]).unwrap();
        assert_eq!(src.poll_frame().map(<[u8]>::len), Some(8));
        assert!(src.poll_frame().is_none());
    }

    #[test]
    fn image_source_rejects_wrong_buffer_len() {
        let err = ImageSource::from_rgba(2, 2, vec![0; 15]).err().unwrap();
        assert!(matches!(
            err,
            SourceError::SizeMismatch { actual: 15, expected: 16, .. }
        ));
    }

    #[test]
    fn zero_sized_sources_are_rejected() {
        assert!(matches!(
            CanvasSource::seeded(0, 10, 1),
            Err(SourceError::ZeroSize { width: 0, height: 10 })
        ));
        assert!(SolidSource::new(4, 0, Color::WHITE).is_err());
    }

    #[test]
    fn missing_image_reports_path() {
        let err = ImageSource::open("/definitely/not/here.png").err().unwrap();
        assert!(err.to_string().contains("/definitely/not/here.png"));
    }

    #[test]
    fn oversized_sources_do_not_fit_a_texture() {
        let src = ImageSource::from_rgba(9000, 1, vec![0; 9000 * 4]).unwrap();
        let (width, height) = src.size();
        assert!(matches!(
            check_texture_size(width, height, 8192),
            Err(SourceError::TooLarge { width: 9000, height: 1, max: 8192 })
        ));
        assert!(check_texture_size(1, 9000, 8192).is_err());
        assert!(check_texture_size(8192, 8192, 8192).is_ok());
        assert!(matches!(
            check_texture_size(0, 4, 8192),
            Err(SourceError::ZeroSize { .. })
        ));
    }

    #[test]
    fn canvas_starts_transparent() {
        let canvas = CanvasSource::seeded(8, 4, 7).unwrap();
        assert_eq!(pixel(&canvas, 3, 2), [0, 0, 0, 0]);
    }

    #[test]
    fn fill_rect_blends_and_clips() {
        let mut canvas = CanvasSource::seeded(4, 4, 7).unwrap();
        canvas.fill_rect(2, 2, 50, 50, Color::new(1.0, 0.0, 0.0, 0.5));

        assert_eq!(pixel(&canvas, 3, 3), [255, 0, 0, 128]);
        assert_eq!(pixel(&canvas, 1, 1), [0, 0, 0, 0]);

        canvas.fill_rect(3, 3, 1, 1, Color::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(pixel(&canvas, 3, 3), [0, 0, 255, 255]);
    }

    #[test]
    fn canvas_changes_every_poll() {
        let mut canvas = CanvasSource::seeded(100, 100, 42).unwrap();
        let before = canvas.pixels().to_vec();
        let mut changed = false;
        for _ in 0..8 {
            let frame = canvas.poll_frame().unwrap().to_vec();
            changed |= frame != before;
        }
        assert!(changed);
    }

    #[test]
    fn seeded_canvases_are_deterministic() {
        let mut a = CanvasSource::seeded(64, 32, 9).unwrap();
        let mut b = CanvasSource::seeded(64, 32, 9).unwrap();
        for _ in 0..5 {
            assert_eq!(a.poll_frame(), b.poll_frame());
        }
    }

    #[test]
    fn solid_source_fills_every_pixel() {
        let mut src = SolidSource::new(3, 2, Color::from_u8(10, 20, 30, 255)).unwrap();
        let frame = src.poll_frame().unwrap();
        assert_eq!(frame.len(), 24);
        assert!(frame.chunks_exact(4).all(|p| p == [10, 20, 30, 255]));
        assert!(src.poll_frame().is_none());
    }
}
