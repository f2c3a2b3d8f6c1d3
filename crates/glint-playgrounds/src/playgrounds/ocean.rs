//! 08: FFT ocean under an orbiting camera.
//!
//! Keys: up/down scale the wind speed, left/right turn the wind, shift with
//! up/down changes choppiness, shift with left/right the patch size, space
//! restarts the phases.

use anyhow::{Context, Result};
use glam::{Vec2, Vec3};

use glint_engine::core::{AppControl, FrameCtx};
use glint_engine::input::{InputFrame, Key};
use glint_engine::paint::Color;
use glint_engine::render::ocean::{OceanConfig, OceanSimulator, OceanSurface};
use glint_engine::render::scene::{OrbitControls, PerspectiveCamera};
use glint_engine::render::RenderCtx;

use super::Playground;

const CLEAR: u32 = 0x222222;
const WIND_FACTOR: f32 = 1.25;
const WIND_TURN_DEGREES: f32 = 15.0;
const SIZE_FACTOR: f32 = 1.25;
const CHOPPINESS_STEP: f32 = 0.25;

/// One keyboard adjustment of the simulation.
#[derive(Debug, Copy, Clone, PartialEq)]
enum Tweak {
    Wind([f32; 2]),
    Size(f32),
    Choppiness(f32),
    Reset,
}

fn tweak(frame: &InputFrame, shift: bool, config: &OceanConfig) -> Option<Tweak> {
    let wind = Vec2::from_array(config.wind);
    let turn = |degrees: f32| Vec2::from_angle(degrees.to_radians()).rotate(wind).to_array();

    if frame.key_pressed(Key::Space) {
        return Some(Tweak::Reset);
    }
    let tweak = match (shift, arrow(frame)?) {
        (false, Key::ArrowUp) => Tweak::Wind((wind * WIND_FACTOR).to_array()),
        (false, Key::ArrowDown) => Tweak::Wind((wind / WIND_FACTOR).to_array()),
        (false, Key::ArrowLeft) => Tweak::Wind(turn(WIND_TURN_DEGREES)),
        (false, Key::ArrowRight) => Tweak::Wind(turn(-WIND_TURN_DEGREES)),
        (true, Key::ArrowUp) => Tweak::Choppiness(config.choppiness + CHOPPINESS_STEP),
        (true, Key::ArrowDown) => Tweak::Choppiness((config.choppiness - CHOPPINESS_STEP).max(0.0)),
        (true, Key::ArrowLeft) => Tweak::Size(config.size / SIZE_FACTOR),
        (true, _) => Tweak::Size(config.size * SIZE_FACTOR),
        (false, _) => return None,
    };
    Some(tweak)
}

fn arrow(frame: &InputFrame) -> Option<Key> {
    [Key::ArrowUp, Key::ArrowDown, Key::ArrowLeft, Key::ArrowRight]
        .into_iter()
        .find(|&key| frame.key_pressed(key))
}

pub struct Ocean {
    simulator: OceanSimulator,
    surface: OceanSurface,
    camera: PerspectiveCamera,
    controls: OrbitControls,
}

impl Ocean {
    pub fn new(ctx: &RenderCtx<'_>) -> Result<Self> {
        let simulator = OceanSimulator::new(ctx, OceanConfig::default())
            .context("failed to create ocean simulator")?;
        let surface = OceanSurface::new(ctx, &simulator);

        let camera = PerspectiveCamera::new(75.0, ctx.viewport.aspect(), 1.0, 10000.0)
            .with_position(Vec3::new(100.0, 33.0, -12.0));
        let controls = OrbitControls::new(&camera);

        Ok(Self {
            simulator,
            surface,
            camera,
            controls,
        })
    }

    fn apply(&mut self, tweak: Tweak) {
        let result = match tweak {
            Tweak::Wind(wind) => self.simulator.set_wind(wind),
            Tweak::Size(size) => self.simulator.set_size(size),
            Tweak::Choppiness(choppiness) => {
                self.simulator.set_choppiness(choppiness);
                Ok(())
            }
            Tweak::Reset => {
                self.simulator.reset();
                Ok(())
            }
        };
        match result {
            Ok(()) => log::info!("ocean: {tweak:?}"),
            Err(err) => log::warn!("ocean: ignoring {tweak:?}: {err}"),
        }
    }
}

impl Playground for Ocean {
    fn frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let shift = ctx.input.key_down(Key::Shift);
        if let Some(t) = tweak(ctx.input_frame, shift, self.simulator.config()) {
            self.apply(t);
        }

        let (width, height) = ctx.viewport().pixel_size();
        self.camera.set_viewport(width, height);
        self.controls.update(ctx.input, ctx.input_frame, &mut self.camera);

        let dt = ctx.time.dt;
        let Self {
            simulator,
            surface,
            camera,
            ..
        } = self;
        let config = *simulator.config();

        ctx.render(Color::from_hex(CLEAR), |rctx, target| {
            simulator.render(rctx, target.encoder, dt);
            surface.render(rctx, target, camera, &config);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pressed(keys: &[Key]) -> InputFrame {
        let mut frame = InputFrame::default();
        frame.keys_pressed.extend(keys.iter().copied());
        frame
    }

    #[test]
    fn no_keys_no_tweak() {
        assert_eq!(tweak(&InputFrame::default(), false, &OceanConfig::default()), None);
        assert_eq!(tweak(&pressed(&[Key::Enter]), true, &OceanConfig::default()), None);
    }

    #[test]
    fn arrows_scale_and_turn_the_wind() {
        let config = OceanConfig {
            wind: [10.0, 0.0],
            ..OceanConfig::default()
        };

        assert_eq!(
            tweak(&pressed(&[Key::ArrowUp]), false, &config),
            Some(Tweak::Wind([12.5, 0.0]))
        );
        assert_eq!(
            tweak(&pressed(&[Key::ArrowDown]), false, &config),
            Some(Tweak::Wind([8.0, 0.0]))
        );

        let Some(Tweak::Wind([x, y])) = tweak(&pressed(&[Key::ArrowLeft]), false, &config) else {
            panic!("expected a wind change");
        };
        assert!((x.hypot(y) - 10.0).abs() < 1e-4);
        assert!((y.atan2(x).to_degrees() - 15.0).abs() < 1e-3);
    }

    #[test]
    fn shift_arrows_change_choppiness_and_size() {
        let config = OceanConfig::default();
        assert_eq!(
            tweak(&pressed(&[Key::ArrowUp]), true, &config),
            Some(Tweak::Choppiness(config.choppiness + CHOPPINESS_STEP))
        );
        assert_eq!(
            tweak(&pressed(&[Key::ArrowRight]), true, &config),
            Some(Tweak::Size(config.size * SIZE_FACTOR))
        );
        assert_eq!(
            tweak(&pressed(&[Key::ArrowLeft]), true, &config),
            Some(Tweak::Size(config.size / SIZE_FACTOR))
        );
    }

    #[test]
    fn choppiness_does_not_go_negative() {
        let config = OceanConfig {
            choppiness: 0.1,
            ..OceanConfig::default()
        };
        assert_eq!(
            tweak(&pressed(&[Key::ArrowDown]), true, &config),
            Some(Tweak::Choppiness(0.0))
        );
    }

    #[test]
    fn space_wins_over_arrows() {
        assert_eq!(
            tweak(&pressed(&[Key::Space, Key::ArrowUp]), false, &OceanConfig::default()),
            Some(Tweak::Reset)
        );
    }
}
