use bytemuck::{Pod, Zeroable};

use crate::render::scene::{GpuMesh, Mesh, MeshVertex, PerspectiveCamera};
use crate::render::target::{DepthTarget, TextureBinding};
use crate::render::{RenderCtx, RenderTarget};

use super::config::OceanConfig;
use super::simulator::OceanSimulator;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct SurfaceUniforms {
    view_proj: [[f32; 4]; 4],
    camera_position: [f32; 4],
    sun_direction: [f32; 4],
    ocean_color: [f32; 4],
    sky_color: [f32; 4],
    /// exposure, displacement scale.
    params: [f32; 4],
}

fn rgb(v: [f32; 3]) -> [f32; 4] {
    [v[0], v[1], v[2], 0.0]
}

/// Displaced, Fresnel-shaded ocean mesh drawn onto the window surface.
pub struct OceanSurface {
    mesh: GpuMesh,
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    ubo: wgpu::Buffer,
    depth: DepthTarget,
}

impl OceanSurface {
    pub fn new(ctx: &RenderCtx<'_>, simulator: &OceanSimulator) -> Self {
        let device = ctx.device;
        let config = simulator.config();

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("ocean surface shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/surface.wgsl").into()),
        });

        let map_entry = |binding, visibility| wgpu::BindGroupLayoutEntry {
            binding,
            visibility,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        };

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("ocean surface bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: std::num::NonZeroU64::new(
                            std::mem::size_of::<SurfaceUniforms>() as u64,
                        ),
                    },
                    count: None,
                },
                map_entry(1, wgpu::ShaderStages::VERTEX),
                map_entry(2, wgpu::ShaderStages::FRAGMENT),
                wgpu::BindGroupLayoutEntry {
                    binding: 3,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("ocean surface pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("ocean surface pipeline"),
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
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(DepthTarget::depth_stencil_state()),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("ocean surface ubo"),
            size: std::mem::size_of::<SurfaceUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let displacement: TextureBinding = simulator.displacement();
        let normal = simulator.normal();
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("ocean surface bind group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&displacement.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(&normal.view),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(&displacement.sampler),
                },
            ],
        });

        let mesh = Mesh::plane_xz(config.geometry_size, config.geometry_resolution);

        Self {
            mesh: GpuMesh::upload(device, &mesh),
            pipeline,
            bind_group,
            ubo,
            depth: DepthTarget::new(),
        }
    }

    /// Draws the ocean over whatever `target` already holds, with a fresh depth buffer.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        camera: &PerspectiveCamera,
        config: &OceanConfig,
    ) {
        let eye = camera.position;
        let u = SurfaceUniforms {
            view_proj: camera.view_proj().to_cols_array_2d(),
            camera_position: [eye.x, eye.y, eye.z, 1.0],
            sun_direction: rgb(config.sun_direction),
            ocean_color: rgb(config.ocean_color),
            sky_color: rgb(config.sky_color),
            params: [config.exposure, config.displacement_scale(), 0.0, 0.0],
        };
        ctx.queue.write_buffer(&self.ubo, 0, bytemuck::bytes_of(&u));

        let depth_view = self.depth.view(ctx.device, target.size);
        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("ocean surface pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniforms_match_wgsl_layout() {
        assert_eq!(std::mem::size_of::<SurfaceUniforms>(), 64 + 5 * 16);
    }
}
