//! Off-screen render targets.
//!
//! Every intermediate pass writes into an [`OffscreenTarget`] that a later
//! pass samples through a [`TextureBinding`].

/// Texture format + sampling policy of a render target.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TargetParams {
    pub format: wgpu::TextureFormat,
    pub filter: wgpu::FilterMode,
    pub wrap: wgpu::AddressMode,
}

impl TargetParams {
    pub const fn linear_clamp(format: wgpu::TextureFormat) -> Self {
        Self {
            format,
            filter: wgpu::FilterMode::Linear,
            wrap: wgpu::AddressMode::ClampToEdge,
        }
    }

    pub const fn nearest_clamp(format: wgpu::TextureFormat) -> Self {
        Self {
            format,
            filter: wgpu::FilterMode::Nearest,
            wrap: wgpu::AddressMode::ClampToEdge,
        }
    }

    pub const fn nearest_repeat(format: wgpu::TextureFormat) -> Self {
        Self {
            format,
            filter: wgpu::FilterMode::Nearest,
            wrap: wgpu::AddressMode::Repeat,
        }
    }

    pub fn sampler_descriptor(&self) -> wgpu::SamplerDescriptor<'static> {
        wgpu::SamplerDescriptor {
            label: Some("glint target sampler"),
            address_mode_u: self.wrap,
            address_mode_v: self.wrap,
            address_mode_w: self.wrap,
            mag_filter: self.filter,
            min_filter: self.filter,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        }
    }
}

/// Default format of colour pass buffers.
pub const PASS_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// What a pass reads: a texture view, its sampler and pixel size.
///
/// wgpu handles are reference counted, so bindings are cheap to clone.
#[derive(Debug, Clone)]
pub struct TextureBinding {
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub size: (u32, u32),
}

impl TextureBinding {
    pub fn aspect(&self) -> f32 {
        self.size.0 as f32 / self.size.1.max(1) as f32
    }
}

/// Colour texture usable both as a render attachment and a sampled input.
pub struct OffscreenTarget {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    sampler: wgpu::Sampler,
    params: TargetParams,
    size: (u32, u32),
}

impl OffscreenTarget {
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        width: u32,
        height: u32,
        params: TargetParams,
    ) -> Self {
        let size = (width.max(1), height.max(1));
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: size.0,
                height: size.1,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: params.format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                | wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&params.sampler_descriptor());

        Self {
            texture,
            view,
            sampler,
            params,
            size,
        }
    }

    #[inline]
    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    #[inline]
    pub fn texture(&self) -> &wgpu::Texture {
        &self.texture
    }

    #[inline]
    pub fn format(&self) -> wgpu::TextureFormat {
        self.params.format
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn binding(&self) -> TextureBinding {
        TextureBinding {
            view: self.view.clone(),
            sampler: self.sampler.clone(),
            size: self.size,
        }
    }
}

/// Depth buffer that follows the size of the colour attachment it is paired with.
#[derive(Default)]
pub struct DepthTarget {
    view: Option<wgpu::TextureView>,
    size: (u32, u32),
}

impl DepthTarget {
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a depth view of `size`, re-creating the texture when the size changed.
    pub fn view(&mut self, device: &wgpu::Device, size: (u32, u32)) -> &wgpu::TextureView {
        let size = (size.0.max(1), size.1.max(1));
        if self.size != size {
            self.view = None;
            self.size = size;
        }
        self.view.get_or_insert_with(|| {
            log::debug!("depth target resized to {}x{}", size.0, size.1);
            let texture = device.create_texture(&wgpu::TextureDescriptor {
                label: Some("glint depth"),
                size: wgpu::Extent3d {
                    width: size.0,
                    height: size.1,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: Self::FORMAT,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            });
            texture.create_view(&wgpu::TextureViewDescriptor::default())
        })
    }

    pub fn depth_stencil_state() -> wgpu::DepthStencilState {
        wgpu::DepthStencilState {
            format: Self::FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_pick_filter_and_wrap() {
        let f = wgpu::TextureFormat::Rgba32Float;
        let p = TargetParams::nearest_repeat(f);
        assert_eq!(p.filter, wgpu::FilterMode::Nearest);
        assert_eq!(p.wrap, wgpu::AddressMode::Repeat);

        let p = TargetParams::linear_clamp(f);
        assert_eq!(p.filter, wgpu::FilterMode::Linear);
        assert_eq!(p.wrap, wgpu::AddressMode::ClampToEdge);
        assert_eq!(p.format, f);
    }

    #[test]
    fn sampler_descriptor_mirrors_params() {
        let d = TargetParams::nearest_clamp(PASS_FORMAT).sampler_descriptor();
        assert_eq!(d.mag_filter, wgpu::FilterMode::Nearest);
        assert_eq!(d.address_mode_u, wgpu::AddressMode::ClampToEdge);
        assert_eq!(d.address_mode_v, wgpu::AddressMode::ClampToEdge);
    }
}
