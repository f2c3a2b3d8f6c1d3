use bytemuck::{Pod, Zeroable};

use crate::paint::Color;
use crate::render::target::{DepthTarget, OffscreenTarget, TargetParams, TextureBinding, PASS_FORMAT};
use crate::render::RenderCtx;
use crate::time::UniformClock;

use super::camera::PerspectiveCamera;
use super::light::PointLight;
use super::mesh::{GpuMesh, Mesh, MeshVertex, Transform};

/// Surface description for [`LitScenePass`].
#[derive(Debug, Clone)]
pub struct LitMaterial {
    pub color: Color,
    /// Amplitude of the per-vertex wobble.
    pub influence: f32,
    /// Optional colour texture added to `color` before lighting.
    pub texture: Option<TextureBinding>,
    pub texture_factor: [f32; 2],
}

impl Default for LitMaterial {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            influence: 15.0,
            texture: None,
            texture_factor: [1.0, 1.0],
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct LitUniforms {
    view_proj: [[f32; 4]; 4],
    view: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    /// View-space light position (xyz).
    light_position: [f32; 4],
    light_color: [f32; 4],
    /// rgb: base colour, w: 1 when textured.
    color: [f32; 4],
    /// time, influence, texture factor.
    params: [f32; 4],
}

/// Renders one mesh lit by a point light into an off-screen buffer with depth.
///
/// Normals are flat, derived from screen-space derivatives of the view-space
/// position, so the wobbled geometry shades correctly without normal data.
pub struct LitScenePass {
    pub transform: Transform,
    material: LitMaterial,
    clock: UniformClock,
    clear: Color,

    mesh: GpuMesh,
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    ubo: wgpu::Buffer,

    output: OffscreenTarget,
    depth: DepthTarget,
}

impl LitScenePass {
    pub fn new(
        ctx: &RenderCtx<'_>,
        mesh: &Mesh,
        material: LitMaterial,
        size: (u32, u32),
        clear: Color,
    ) -> Self {
        let device = ctx.device;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("glint lit shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/lit.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("glint lit bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: std::num::NonZeroU64::new(
                            std::mem::size_of::<LitUniforms>() as u64,
                        ),
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
            label: Some("glint lit pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("glint lit pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[MeshVertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: PASS_FORMAT,
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
            depth_stencil: Some(DepthTarget::depth_stencil_state()),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("glint lit ubo"),
            size: std::mem::size_of::<LitUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        // Bound when the material has no texture.
        let fallback = OffscreenTarget::new(
            device,
            "glint lit fallback texture",
            1,
            1,
            TargetParams::linear_clamp(PASS_FORMAT),
        );
        let texture = material.texture.clone().unwrap_or_else(|| fallback.binding());
        let bind_group = create_bind_group(device, &bind_group_layout, &ubo, &texture);

        let output = OffscreenTarget::new(
            device,
            "glint lit buffer",
            size.0,
            size.1,
            TargetParams::linear_clamp(PASS_FORMAT),
        );

        Self {
            transform: Transform::IDENTITY,
            material,
            clock: UniformClock::default(),
            clear,
            mesh: GpuMesh::upload(device, mesh),
            pipeline,
            bind_group,
            ubo,
            output,
            depth: DepthTarget::new(),
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Advances the time uniform and draws the mesh into the buffer.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        encoder: &mut wgpu::CommandEncoder,
        camera: &PerspectiveCamera,
        light: &PointLight,
    ) {
        let time = self.clock.advance();
        let view = camera.view();
        let light_view = view.transform_point3(light.position);
        let [lr, lg, lb] = light.radiance();
        let [r, g, b] = self.material.color.rgb();
        let textured = if self.material.texture.is_some() { 1.0 } else { 0.0 };
        let factor = self.material.texture_factor;

        let u = LitUniforms {
            view_proj: camera.view_proj().to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            model: self.transform.matrix().to_cols_array_2d(),
            light_position: [light_view.x, light_view.y, light_view.z, 1.0],
            light_color: [lr, lg, lb, 1.0],
            color: [r, g, b, textured],
            params: [
                time,
                self.material.influence,
                factor[0].max(f32::EPSILON),
                factor[1].max(f32::EPSILON),
            ],
        };
        ctx.queue.write_buffer(&self.ubo, 0, bytemuck::bytes_of(&u));

        let depth_view = self.depth.view(ctx.device, self.output.size());
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("glint lit pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: self.output.view(),
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear.to_wgpu()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Discard,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        self.mesh.draw(&mut rpass);
    }

    pub fn output(&self) -> TextureBinding {
        self.output.binding()
    }
}

fn create_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    ubo: &wgpu::Buffer,
    texture: &TextureBinding,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("glint lit bind group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(&texture.view),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(&texture.sampler),
            },
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniforms_match_wgsl_layout() {
        assert_eq!(std::mem::size_of::<LitUniforms>(), 3 * 64 + 4 * 16);
    }

    #[test]
    fn default_material_wobbles_untextured_white() {
        let m = LitMaterial::default();
        assert_eq!(m.color, Color::WHITE);
        assert_eq!(m.influence, 15.0);
        assert!(m.texture.is_none());
    }
}
