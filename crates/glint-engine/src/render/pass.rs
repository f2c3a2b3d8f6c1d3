//! Quad passes: one effect drawn as a textured quad.
//!
//! [`ShaderPass`] renders into its own off-screen buffer; [`ScreenPass`]
//! renders straight into the frame's swapchain view.

use bytemuck::{Pod, Zeroable};

use crate::coords::OrthoFrame;
use crate::paint::Color;
use crate::time::UniformClock;

use super::effect::{self, Effect, PARAM_SLOTS};
use super::target::{OffscreenTarget, TargetParams, TextureBinding, PASS_FORMAT};
use super::{RenderCtx, RenderTarget};

/// Where the quad lands in the output and how the input is fitted onto it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct QuadPlacement {
    /// NDC half extents; `[1, 1]` covers the whole output.
    pub extent: [f32; 2],
    /// See [`crate::coords::texture_factor`].
    pub texture_factor: [f32; 2],
}

impl QuadPlacement {
    pub const fn fullscreen() -> Self {
        Self {
            extent: [1.0, 1.0],
            texture_factor: [1.0, 1.0],
        }
    }

    /// The square plane of the orthographic playgrounds.
    pub fn ortho(frame: OrthoFrame) -> Self {
        Self {
            extent: frame.quad_extent(),
            texture_factor: [1.0, 1.0],
        }
    }

    pub fn with_texture_factor(mut self, factor: [f32; 2]) -> Self {
        self.texture_factor = factor;
        self
    }

    fn to_uniform(self) -> [f32; 4] {
        [
            self.extent[0],
            self.extent[1],
            self.texture_factor[0].max(f32::EPSILON),
            self.texture_factor[1].max(f32::EPSILON),
        ]
    }
}

impl Default for QuadPlacement {
    fn default() -> Self {
        Self::fullscreen()
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct PassUniforms {
    resolution: [f32; 2],
    time: f32,
    _pad: f32, // 16-byte alignment
    quad: [f32; 4],
    params: [[f32; 4]; PARAM_SLOTS],
}

fn pass_ubo_min_binding_size() -> Option<std::num::NonZeroU64> {
    std::num::NonZeroU64::new(std::mem::size_of::<PassUniforms>() as u64)
}

/// Pipeline + bindings shared by both pass kinds.
struct QuadProgram {
    effect: Box<dyn Effect>,
    clock: UniformClock,
    placement: QuadPlacement,

    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    ubo: wgpu::Buffer,
}

impl QuadProgram {
    fn new(
        device: &wgpu::Device,
        effect: Box<dyn Effect>,
        input: &TextureBinding,
        format: wgpu::TextureFormat,
        placement: QuadPlacement,
    ) -> Self {
        let label = effect.label().to_owned();
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&format!("glint {label} shader")),
            source: wgpu::ShaderSource::Wgsl(effect::shader_source(effect.as_ref()).into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(&format!("glint {label} bgl")),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: pass_ubo_min_binding_size(),
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(&format!("glint {label} pipeline layout")),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&format!("glint {label} pipeline")),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("glint {label} ubo")),
            size: std::mem::size_of::<PassUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = Self::create_bind_group(device, &label, &bind_group_layout, &ubo, input);
        let clock = UniformClock::new(effect.time_step());

        Self {
            effect,
            clock,
            placement,
            pipeline,
            bind_group,
            ubo,
        }
    }

    fn create_bind_group(
        device: &wgpu::Device,
        label: &str,
        layout: &wgpu::BindGroupLayout,
        ubo: &wgpu::Buffer,
        input: &TextureBinding,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("glint {label} bind group")),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&input.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&input.sampler),
                },
            ],
        })
    }

    /// Steps time + effect state and uploads the uniform block.
    fn prepare(&mut self, queue: &wgpu::Queue, resolution: (u32, u32)) {
        let time = self.clock.advance();
        self.effect.advance();

        let u = PassUniforms {
            resolution: [resolution.0 as f32, resolution.1 as f32],
            time,
            _pad: 0.0,
            quad: self.placement.to_uniform(),
            params: self.effect.params().slots,
        };
        queue.write_buffer(&self.ubo, 0, bytemuck::bytes_of(&u));
    }

    fn draw(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        load: wgpu::LoadOp<wgpu::Color>,
    ) {
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("glint quad pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.draw(0..6, 0..1);
    }
}

/// One effect rendered into an off-screen buffer.
pub struct ShaderPass {
    program: QuadProgram,
    output: OffscreenTarget,
}

impl ShaderPass {
    pub fn new(
        ctx: &RenderCtx<'_>,
        effect: impl Effect + 'static,
        input: &TextureBinding,
        size: (u32, u32),
        placement: QuadPlacement,
    ) -> Self {
        Self::from_boxed(ctx, Box::new(effect), input, size, placement)
    }

    pub fn from_boxed(
        ctx: &RenderCtx<'_>,
        effect: Box<dyn Effect>,
        input: &TextureBinding,
        size: (u32, u32),
        placement: QuadPlacement,
    ) -> Self {
        let output = OffscreenTarget::new(
            ctx.device,
            &format!("glint {} buffer", effect.label()),
            size.0,
            size.1,
            TargetParams::linear_clamp(PASS_FORMAT),
        );
        log::debug!(
            "shader pass '{}' created ({}x{})",
            effect.label(),
            output.size().0,
            output.size().1
        );
        let program = QuadProgram::new(ctx.device, effect, input, PASS_FORMAT, placement);

        Self { program, output }
    }

    /// Advances the pass time, lets the effect update, then draws into the buffer.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, encoder: &mut wgpu::CommandEncoder) {
        self.program.prepare(ctx.queue, self.output.size());
        self.program
            .draw(encoder, self.output.view(), wgpu::LoadOp::Clear(Color::BLACK.to_wgpu()));
    }

    pub fn output(&self) -> TextureBinding {
        self.output.binding()
    }

    pub fn label(&self) -> &str {
        self.program.effect.label()
    }
}

/// One effect rendered into the swapchain view of the current frame.
pub struct ScreenPass {
    program: QuadProgram,
}

impl ScreenPass {
    pub fn new(
        ctx: &RenderCtx<'_>,
        effect: impl Effect + 'static,
        input: &TextureBinding,
        placement: QuadPlacement,
    ) -> Self {
        let program = QuadProgram::new(
            ctx.device,
            Box::new(effect),
            input,
            ctx.surface_format,
            placement,
        );
        Self { program }
    }

    /// Draws over the already-cleared frame.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        self.program.prepare(ctx.queue, target.size);
        self.program
            .draw(target.encoder, target.color_view, wgpu::LoadOp::Load);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pass_uniforms_match_wgsl_layout() {
        // vec2 + f32 + pad, vec4, array<vec4, 4>
        assert_eq!(std::mem::size_of::<PassUniforms>(), 16 + 16 + 64);
        assert!(pass_ubo_min_binding_size().is_some());
    }

    #[test]
    fn fullscreen_covers_ndc() {
        let q = QuadPlacement::fullscreen().to_uniform();
        assert_eq!(q, [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn ortho_placement_fills_a_16_by_9_window() {
        let q = QuadPlacement::ortho(OrthoFrame::new(1280.0, 720.0));
        assert!((q.extent[0] - 1.0).abs() < 1e-5);
        assert!((q.extent[1] - 1.0).abs() < 1e-5);
    }

    #[test]
    fn degenerate_texture_factor_is_clamped() {
        let q = QuadPlacement::fullscreen()
            .with_texture_factor([0.0, 2.0])
            .to_uniform();
        assert!(q[2] > 0.0);
        assert_eq!(q[3], 2.0);
    }
}
