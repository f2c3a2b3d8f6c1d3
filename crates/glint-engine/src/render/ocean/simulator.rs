use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::render::target::{OffscreenTarget, TargetParams, TextureBinding};
use crate::render::RenderCtx;

use super::config::{OceanConfig, OceanError};
use super::fft::{FftDirection, FftPlan, FftSlot};
use super::phase::{PhaseBuffers, PhaseSlot};
use super::program::{uniform_buffer, SimProgram, SimUniforms};
use super::spectrum;
use super::state::SpectrumState;

const SIM_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba32Float;
const MAP_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;

struct FftPass {
    direction: FftDirection,
    output: FftSlot,
    bind_group: wgpu::BindGroup,
    // Keeps the step's uniforms alive alongside its bind group.
    _ubo: wgpu::Buffer,
}

/// FFT ocean simulation producing a displacement map and a normal map each frame.
///
/// Per frame: initial spectrum (only after a parameter change), phase advance,
/// time-evolved spectrum, `2 * log2(resolution)` FFT butterflies, normals.
pub struct OceanSimulator {
    state: SpectrumState,
    phases: PhaseBuffers,
    plan: FftPlan,

    initial_spectrum: OffscreenTarget,
    spectrum: OffscreenTarget,
    seed_phase: OffscreenTarget,
    ping_phase: OffscreenTarget,
    pong_phase: OffscreenTarget,
    ping_transform: OffscreenTarget,
    pong_transform: OffscreenTarget,
    displacement: OffscreenTarget,
    normal: OffscreenTarget,

    initial_program: SimProgram,
    initial_ubo: wgpu::Buffer,
    initial_bind_group: wgpu::BindGroup,

    phase_program: SimProgram,
    phase_ubo: wgpu::Buffer,
    // Indexed by the slot read: seed, ping, pong.
    phase_bind_groups: [wgpu::BindGroup; 3],

    spectrum_program: SimProgram,
    spectrum_ubo: wgpu::Buffer,
    // Indexed by the current phase slot: ping, pong.
    spectrum_bind_groups: [wgpu::BindGroup; 2],

    horizontal_program: SimProgram,
    vertical_program: SimProgram,
    fft_passes: Vec<FftPass>,

    normal_program: SimProgram,
    normal_ubo: wgpu::Buffer,
    normal_bind_group: wgpu::BindGroup,
}

impl OceanSimulator {
    pub fn new(ctx: &RenderCtx<'_>, config: OceanConfig) -> Result<Self, OceanError> {
        let state = SpectrumState::new(config)?;
        let plan = FftPlan::new(config.resolution)?;
        let device = ctx.device;
        let n = config.resolution;

        let target = |label: &str, params: TargetParams| OffscreenTarget::new(device, label, n, n, params);
        let initial_spectrum = target("ocean initial spectrum", TargetParams::nearest_repeat(SIM_FORMAT));
        let spectrum = target("ocean spectrum", TargetParams::nearest_clamp(SIM_FORMAT));
        let seed_phase = target("ocean seed phase", TargetParams::nearest_clamp(SIM_FORMAT));
        let ping_phase = target("ocean ping phase", TargetParams::nearest_clamp(SIM_FORMAT));
        let pong_phase = target("ocean pong phase", TargetParams::nearest_clamp(SIM_FORMAT));
        let ping_transform = target("ocean ping transform", TargetParams::nearest_clamp(SIM_FORMAT));
        let pong_transform = target("ocean pong transform", TargetParams::nearest_clamp(SIM_FORMAT));
        let displacement = target("ocean displacement", TargetParams::linear_clamp(MAP_FORMAT));
        let normal = target("ocean normal", TargetParams::linear_clamp(MAP_FORMAT));

        let seed = spectrum::seed_phases(n, &mut StdRng::from_os_rng());
        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: seed_phase.texture(),
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            bytemuck::cast_slice(&seed),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(n * 16),
                rows_per_image: Some(n),
            },
            wgpu::Extent3d {
                width: n,
                height: n,
                depth_or_array_layers: 1,
            },
        );

        let initial_program = SimProgram::new(
            device,
            "ocean initial spectrum",
            include_str!("shaders/initial_spectrum.wgsl"),
            "fs_main",
            0,
            SIM_FORMAT,
        );
        let initial_ubo = uniform_buffer(device, "ocean initial spectrum ubo");
        let initial_bind_group = initial_program.bind_group(device, &initial_ubo, &[]);

        let phase_program = SimProgram::new(
            device,
            "ocean phase",
            include_str!("shaders/phase.wgsl"),
            "fs_main",
            1,
            SIM_FORMAT,
        );
        let phase_ubo = uniform_buffer(device, "ocean phase ubo");
        let phase_bind_groups = [&seed_phase, &ping_phase, &pong_phase]
            .map(|t| phase_program.bind_group(device, &phase_ubo, &[t.view()]));

        let spectrum_program = SimProgram::new(
            device,
            "ocean spectrum",
            include_str!("shaders/spectrum.wgsl"),
            "fs_main",
            2,
            SIM_FORMAT,
        );
        let spectrum_ubo = uniform_buffer(device, "ocean spectrum ubo");
        let spectrum_bind_groups = [&ping_phase, &pong_phase].map(|t| {
            spectrum_program.bind_group(device, &spectrum_ubo, &[initial_spectrum.view(), t.view()])
        });

        let subtransform = include_str!("shaders/subtransform.wgsl");
        let horizontal_program = SimProgram::new(
            device,
            "ocean horizontal subtransform",
            subtransform,
            "fs_horizontal",
            1,
            SIM_FORMAT,
        );
        let vertical_program = SimProgram::new(
            device,
            "ocean vertical subtransform",
            subtransform,
            "fs_vertical",
            1,
            SIM_FORMAT,
        );

        let fft_input = |slot: FftSlot| match slot {
            FftSlot::Spectrum => spectrum.view(),
            FftSlot::Ping => ping_transform.view(),
            FftSlot::Pong => pong_transform.view(),
            FftSlot::Displacement => displacement.view(),
        };
        let fft_passes = plan
            .steps()
            .iter()
            .map(|step| {
                let ubo = uniform_buffer(device, "ocean subtransform ubo");
                ctx.queue.write_buffer(
                    &ubo,
                    0,
                    bytemuck::bytes_of(&SimUniforms {
                        resolution: n as f32,
                        size: config.size,
                        subtransform_size: step.subtransform_size as f32,
                        ..Default::default()
                    }),
                );
                let program = match step.direction {
                    FftDirection::Horizontal => &horizontal_program,
                    FftDirection::Vertical => &vertical_program,
                };
                FftPass {
                    direction: step.direction,
                    output: step.output,
                    bind_group: program.bind_group(device, &ubo, &[fft_input(step.input)]),
                    _ubo: ubo,
                }
            })
            .collect();

        let normal_program = SimProgram::new(
            device,
            "ocean normals",
            include_str!("shaders/normals.wgsl"),
            "fs_main",
            1,
            MAP_FORMAT,
        );
        let normal_ubo = uniform_buffer(device, "ocean normals ubo");
        let normal_bind_group =
            normal_program.bind_group(device, &normal_ubo, &[displacement.view()]);

        log::info!(
            "ocean simulator ready: {n}x{n}, {} fft steps",
            plan.steps().len()
        );

        Ok(Self {
            state,
            phases: PhaseBuffers::new(),
            plan,
            initial_spectrum,
            spectrum,
            seed_phase,
            ping_phase,
            pong_phase,
            ping_transform,
            pong_transform,
            displacement,
            normal,
            initial_program,
            initial_ubo,
            initial_bind_group,
            phase_program,
            phase_ubo,
            phase_bind_groups,
            spectrum_program,
            spectrum_ubo,
            spectrum_bind_groups,
            horizontal_program,
            vertical_program,
            fft_passes,
            normal_program,
            normal_ubo,
            normal_bind_group,
        })
    }

    pub fn config(&self) -> &OceanConfig {
        self.state.config()
    }

    /// Changes the wind; the initial spectrum is rebuilt on the next frame.
    pub fn set_wind(&mut self, wind: [f32; 2]) -> Result<(), OceanError> {
        self.state.set_wind(wind)
    }

    /// Changes the simulated patch size; the initial spectrum is rebuilt on the next frame.
    pub fn set_size(&mut self, size: f32) -> Result<(), OceanError> {
        self.state.set_size(size)
    }

    pub fn set_choppiness(&mut self, choppiness: f32) {
        self.state.set_choppiness(choppiness);
    }

    /// Restarts the phases from the seed.
    pub fn reset(&mut self) {
        self.phases.reset();
    }

    fn uniforms(&self, delta_time: f32) -> SimUniforms {
        let config = self.state.config();
        SimUniforms {
            resolution: config.resolution as f32,
            size: config.size,
            delta_time,
            choppiness: config.choppiness,
            wind: config.wind,
            subtransform_size: 0.0,
            _pad: 0.0,
        }
    }

    fn phase_target(&self, slot: PhaseSlot) -> &OffscreenTarget {
        match slot {
            PhaseSlot::Seed => &self.seed_phase,
            PhaseSlot::Ping => &self.ping_phase,
            PhaseSlot::Pong => &self.pong_phase,
        }
    }

    fn fft_target(&self, slot: FftSlot) -> &OffscreenTarget {
        match slot {
            FftSlot::Spectrum => &self.spectrum,
            FftSlot::Ping => &self.ping_transform,
            FftSlot::Pong => &self.pong_transform,
            FftSlot::Displacement => &self.displacement,
        }
    }

    /// Records one simulation step of `delta_time` seconds.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, encoder: &mut wgpu::CommandEncoder, delta_time: f32) {
        let queue = ctx.queue;

        if self.state.take_changed() {
            log::debug!(
                "rebuilding initial spectrum: wind {:?}, size {}",
                self.state.config().wind,
                self.state.config().size
            );
            queue.write_buffer(&self.initial_ubo, 0, bytemuck::bytes_of(&self.uniforms(0.0)));
            self.initial_program
                .draw(encoder, self.initial_spectrum.view(), &self.initial_bind_group);
        }

        queue.write_buffer(&self.phase_ubo, 0, bytemuck::bytes_of(&self.uniforms(delta_time)));
        let (read, write) = self.phases.step();
        let read_index = match read {
            PhaseSlot::Seed => 0,
            PhaseSlot::Ping => 1,
            PhaseSlot::Pong => 2,
        };
        self.phase_program.draw(
            encoder,
            self.phase_target(write).view(),
            &self.phase_bind_groups[read_index],
        );

        queue.write_buffer(&self.spectrum_ubo, 0, bytemuck::bytes_of(&self.uniforms(delta_time)));
        let current = match self.phases.current() {
            PhaseSlot::Pong => 1,
            _ => 0,
        };
        self.spectrum_program
            .draw(encoder, self.spectrum.view(), &self.spectrum_bind_groups[current]);

        for pass in &self.fft_passes {
            let program = match pass.direction {
                FftDirection::Horizontal => &self.horizontal_program,
                FftDirection::Vertical => &self.vertical_program,
            };
            program.draw(encoder, self.fft_target(pass.output).view(), &pass.bind_group);
        }

        queue.write_buffer(&self.normal_ubo, 0, bytemuck::bytes_of(&self.uniforms(delta_time)));
        self.normal_program
            .draw(encoder, self.normal.view(), &self.normal_bind_group);
    }

    /// Displacement map: rgb = (choppy x, height, choppy z).
    pub fn displacement(&self) -> TextureBinding {
        self.displacement.binding()
    }

    pub fn normal(&self) -> TextureBinding {
        self.normal.binding()
    }

    pub fn plan(&self) -> &FftPlan {
        &self.plan
    }
}
