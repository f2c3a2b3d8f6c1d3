use bytemuck::{Pod, Zeroable};

use crate::paint::Color;
use crate::render::target::{DepthTarget, OffscreenTarget, TargetParams, TextureBinding, PASS_FORMAT};
use crate::render::{RenderCtx, RenderTarget};
use crate::time::UniformClock;

use super::camera::PerspectiveCamera;
use super::light::SpotLight;
use super::mesh::{GpuMesh, Mesh, MeshVertex, Transform};

const SHADOW_SIZE: u32 = 1024;
const SHADOW_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// How an object of a [`SpotScenePass`] is shaded.
#[derive(Debug, Clone)]
pub enum SpotMaterial {
    /// Flat colour, Blinn-Phong lit by the spotlight.
    Phong { color: Color },
    /// Texture shown as is; ignores light and shadow.
    Unlit {
        texture: TextureBinding,
        texture_factor: [f32; 2],
    },
    /// Wobbling textured surface (see [`super::LitScenePass`]) lit by the spotlight.
    Wobble {
        color: Color,
        texture: TextureBinding,
        texture_factor: [f32; 2],
        influence: f32,
    },
}

impl SpotMaterial {
    fn kind(&self) -> f32 {
        match self {
            Self::Phong { .. } => 0.0,
            Self::Unlit { .. } => 1.0,
            Self::Wobble { .. } => 2.0,
        }
    }

    fn texture(&self) -> Option<&TextureBinding> {
        match self {
            Self::Phong { .. } => None,
            Self::Unlit { texture, .. } | Self::Wobble { texture, .. } => Some(texture),
        }
    }

    fn uniforms(&self, model: [[f32; 4]; 4], receives_shadow: bool) -> ObjectUniforms {
        let (color, influence, factor) = match self {
            Self::Phong { color } => (*color, 0.0, [1.0, 1.0]),
            Self::Unlit { texture_factor, .. } => (Color::WHITE, 0.0, *texture_factor),
            Self::Wobble {
                color,
                texture_factor,
                influence,
                ..
            } => (*color, *influence, *texture_factor),
        };
        let [r, g, b] = color.rgb();
        ObjectUniforms {
            model,
            color: [r, g, b, 1.0],
            params: [
                self.kind(),
                influence,
                factor[0].max(f32::EPSILON),
                factor[1].max(f32::EPSILON),
            ],
            flags: [if receives_shadow { 1.0 } else { 0.0 }, 0.0, 0.0, 0.0],
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct FrameUniforms {
    view_proj: [[f32; 4]; 4],
    light_view_proj: [[f32; 4]; 4],
    camera_position: [f32; 4],
    light_position: [f32; 4],
    light_direction: [f32; 4],
    light_color: [f32; 4],
    /// Outer/inner cone cos, time, shadow texel size.
    params: [f32; 4],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct ObjectUniforms {
    model: [[f32; 4]; 4],
    color: [f32; 4],
    /// Material kind, influence, texture factor.
    params: [f32; 4],
    flags: [f32; 4],
}

/// Handle to an object added to a [`SpotScenePass`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ObjectId(usize);

struct SceneObject {
    transform: Transform,
    material: SpotMaterial,
    casts_shadow: bool,
    mesh: GpuMesh,
    ubo: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Several meshes lit by one shadow-casting [`SpotLight`], drawn over the
/// current frame with depth.
///
/// Each frame renders the casters into a shadow map from the light, then
/// draws every object into the swapchain view.
pub struct SpotScenePass {
    objects: Vec<SceneObject>,
    clock: UniformClock,

    pipeline: wgpu::RenderPipeline,
    shadow_pipeline: wgpu::RenderPipeline,
    object_layout: wgpu::BindGroupLayout,
    frame_ubo: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    shadow_frame_bind_group: wgpu::BindGroup,
    shadow_view: wgpu::TextureView,
    // Bound for untextured materials.
    fallback: OffscreenTarget,
    depth: DepthTarget,
}

impl SpotScenePass {
    pub fn new(ctx: &RenderCtx<'_>) -> Self {
        let device = ctx.device;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("glint spot shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/spot.wgsl").into()),
        });

        let frame_entry = wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: std::num::NonZeroU64::new(
                    std::mem::size_of::<FrameUniforms>() as u64
                ),
            },
            count: None,
        };

        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("glint spot frame bgl"),
            entries: &[
                frame_entry,
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Depth,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Comparison),
                    count: None,
                },
            ],
        });

        // The shadow pass renders into the shadow map, so it cannot bind it.
        let shadow_frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("glint spot shadow frame bgl"),
            entries: &[frame_entry],
        });

        let object_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("glint spot object bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: std::num::NonZeroU64::new(
                            std::mem::size_of::<ObjectUniforms>() as u64,
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

        let primitive = wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        };

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("glint spot pipeline layout"),
            bind_group_layouts: &[&frame_layout, &object_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("glint spot pipeline"),
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
            primitive,
            depth_stencil: Some(DepthTarget::depth_stencil_state()),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let shadow_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("glint spot shadow pipeline layout"),
            bind_group_layouts: &[&shadow_frame_layout, &object_layout],
            immediate_size: 0,
        });

        let shadow_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("glint spot shadow pipeline"),
            layout: Some(&shadow_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_shadow"),
                compilation_options: Default::default(),
                buffers: &[MeshVertex::layout()],
            },
            fragment: None,
            primitive,
            depth_stencil: Some(wgpu::DepthStencilState {
                format: SHADOW_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState {
                    constant: 2,
                    slope_scale: 2.0,
                    clamp: 0.0,
                },
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let shadow_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("glint spot shadow map"),
            size: wgpu::Extent3d {
                width: SHADOW_SIZE,
                height: SHADOW_SIZE,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: SHADOW_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let shadow_view = shadow_texture.create_view(&wgpu::TextureViewDescriptor::default());
        let shadow_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("glint spot shadow sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            compare: Some(wgpu::CompareFunction::LessEqual),
            ..Default::default()
        });

        let frame_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("glint spot frame ubo"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("glint spot frame bind group"),
            layout: &frame_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: frame_ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&shadow_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&shadow_sampler),
                },
            ],
        });
        let shadow_frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("glint spot shadow frame bind group"),
            layout: &shadow_frame_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_ubo.as_entire_binding(),
            }],
        });

        let fallback = OffscreenTarget::new(
            device,
            "glint spot fallback texture",
            1,
            1,
            TargetParams::linear_clamp(PASS_FORMAT),
        );

        Self {
            objects: Vec::new(),
            clock: UniformClock::default(),
            pipeline,
            shadow_pipeline,
            object_layout,
            frame_ubo,
            frame_bind_group,
            shadow_frame_bind_group,
            shadow_view,
            fallback,
            depth: DepthTarget::new(),
        }
    }

    /// Adds a mesh; it casts shadows unless told otherwise with [`Self::set_casts_shadow`].
    pub fn add(
        &mut self,
        ctx: &RenderCtx<'_>,
        mesh: &Mesh,
        material: SpotMaterial,
        transform: Transform,
    ) -> ObjectId {
        let device = ctx.device;
        let index = self.objects.len();

        let ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("glint spot object ubo"),
            size: std::mem::size_of::<ObjectUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let texture = material
            .texture()
            .cloned()
            .unwrap_or_else(|| self.fallback.binding());
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("glint spot object bind group"),
            layout: &self.object_layout,
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
        });

        self.objects.push(SceneObject {
            transform,
            material,
            casts_shadow: true,
            mesh: GpuMesh::upload(device, mesh),
            ubo,
            bind_group,
        });
        log::debug!("spot scene object {index} added");
        ObjectId(index)
    }

    pub fn transform_mut(&mut self, id: ObjectId) -> Option<&mut Transform> {
        self.objects.get_mut(id.0).map(|o| &mut o.transform)
    }

    pub fn set_casts_shadow(&mut self, id: ObjectId, casts: bool) {
        if let Some(object) = self.objects.get_mut(id.0) {
            object.casts_shadow = casts;
        }
    }

    /// Advances the time uniform, renders the shadow map, then draws every
    /// object over the already-cleared frame.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        camera: &PerspectiveCamera,
        light: &SpotLight,
    ) {
        let time = self.clock.advance();
        ctx.queue.write_buffer(
            &self.frame_ubo,
            0,
            bytemuck::bytes_of(&frame_uniforms(camera, light, time)),
        );
        for object in &self.objects {
            // Unlit materials ignore shadows; the rest receive them.
            let receives = !matches!(object.material, SpotMaterial::Unlit { .. });
            let u = object
                .material
                .uniforms(object.transform.matrix().to_cols_array_2d(), receives);
            ctx.queue.write_buffer(&object.ubo, 0, bytemuck::bytes_of(&u));
        }

        {
            let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("glint spot shadow pass"),
                color_attachments: &[],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.shadow_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
            rpass.set_pipeline(&self.shadow_pipeline);
            rpass.set_bind_group(0, &self.shadow_frame_bind_group, &[]);
            for object in self.objects.iter().filter(|o| o.casts_shadow) {
                rpass.set_bind_group(1, &object.bind_group, &[]);
                object.mesh.draw(&mut rpass);
            }
        }

        let depth_view = self.depth.view(ctx.device, target.size);
        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("glint spot pass"),
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
        rpass.set_bind_group(0, &self.frame_bind_group, &[]);
        for object in &self.objects {
            rpass.set_bind_group(1, &object.bind_group, &[]);
            object.mesh.draw(&mut rpass);
        }
    }
}

fn frame_uniforms(camera: &PerspectiveCamera, light: &SpotLight, time: f32) -> FrameUniforms {
    let eye = camera.position;
    let [lr, lg, lb] = light.radiance();
    let (outer, inner) = light.cone_cos();
    let direction = light.direction();

    FrameUniforms {
        view_proj: camera.view_proj().to_cols_array_2d(),
        light_view_proj: light.shadow_view_proj().to_cols_array_2d(),
        camera_position: [eye.x, eye.y, eye.z, 1.0],
        light_position: light.position.extend(1.0).to_array(),
        light_direction: direction.extend(0.0).to_array(),
        light_color: [lr, lg, lb, 1.0],
        params: [outer, inner, time, 1.0 / SHADOW_SIZE as f32],
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn uniforms_match_wgsl_layout() {
        assert_eq!(std::mem::size_of::<FrameUniforms>(), 2 * 64 + 5 * 16);
        assert_eq!(std::mem::size_of::<ObjectUniforms>(), 64 + 3 * 16);
    }

    #[test]
    fn phong_material_packs_color_and_unit_factor() {
        let u = SpotMaterial::Phong {
            color: Color::from_hex(0xbe8010),
        }
        .uniforms(glam::Mat4::IDENTITY.to_cols_array_2d(), true);
        assert_eq!(u.params, [0.0, 0.0, 1.0, 1.0]);
        assert_eq!(u.flags[0], 1.0);
        assert!((u.color[0] - 0xbe as f32 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn frame_uniforms_carry_cone_and_time() {
        let camera = PerspectiveCamera::new(75.0, 1.0, 1.0, 10000.0)
            .with_position(Vec3::new(0.0, 0.0, 500.0));
        let light = SpotLight::new(Color::WHITE)
            .with_position(Vec3::new(0.0, 0.0, 250.0))
            .with_intensity(1.25)
            .with_cone(0.5, 1.0);
        let u = frame_uniforms(&camera, &light, 0.3);

        assert_eq!(u.light_color, [1.25, 1.25, 1.25, 1.0]);
        assert_eq!(u.light_direction, [0.0, 0.0, -1.0, 0.0]);
        assert!((u.params[0] - 0.5f32.cos()).abs() < 1e-6);
        assert_eq!(u.params[1], 1.0);
        assert_eq!(u.params[2], 0.3);
        assert_eq!(u.camera_position, [0.0, 0.0, 500.0, 1.0]);
    }
}
