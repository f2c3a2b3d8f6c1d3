use crate::time::UniformClock;

use super::{Effect, EffectParams};

/// Analogue TV look: wobbling horizontal offsets, scanlines and grain.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TvEffect {
    /// Coarse horizontal wobble.
    pub distortion: f32,
    /// Fine horizontal jitter.
    pub distortion_fine: f32,
    pub speed: f32,
    pub scanline_count: f32,
    pub scanline_intensity: f32,
    pub grain: f32,
    time_step: f32,
}

impl TvEffect {
    /// Changes how fast the `time` uniform advances per frame.
    pub fn with_time_step(mut self, step: f32) -> Self {
        self.time_step = step;
        self
    }
}

impl Default for TvEffect {
    fn default() -> Self {
        Self {
            distortion: 3.0,
            distortion_fine: 5.0,
            speed: 0.2,
            scanline_count: 400.0,
            scanline_intensity: 0.25,
            grain: 0.08,
            time_step: UniformClock::DEFAULT_STEP,
        }
    }
}

impl Effect for TvEffect {
    fn label(&self) -> &str {
        "tv"
    }

    fn fragment_source(&self) -> &'static str {
        include_str!("shaders/tv.wgsl")
    }

    fn params(&self) -> EffectParams {
        EffectParams::default()
            .with_slot(0, [self.distortion, self.distortion_fine, self.speed, 0.0])
            .with_slot(
                1,
                [self.scanline_count, self.scanline_intensity, self.grain, 0.0],
            )
    }

    fn time_step(&self) -> f32 {
        self.time_step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_step_override() {
        assert_eq!(TvEffect::default().time_step(), UniformClock::DEFAULT_STEP);
        assert_eq!(TvEffect::default().with_time_step(0.01).time_step(), 0.01);
    }
}
