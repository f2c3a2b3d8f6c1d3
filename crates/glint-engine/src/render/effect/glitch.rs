use std::f32::consts::PI;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{Effect, EffectParams};

/// Digital glitch: RGB split along a random angle, displaced bands and snow.
///
/// Every frame `advance` re-rolls the parameters, scaled by `sin(counter)`,
/// so the glitch pulses in and out.
#[derive(Debug, Clone)]
pub struct GlitchEffect {
    pub amount: f32,
    pub angle: f32,
    /// Fixed at construction; scales the perturbation lookup and snow.
    pub seed: f32,
    pub seed_x: f32,
    pub seed_y: f32,
    pub distortion_x: f32,
    pub distortion_y: f32,
    pub col_s: f32,
    counter: f32,
    rng: StdRng,
}

impl GlitchEffect {
    const COUNTER_STEP: f32 = 0.1;

    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Deterministic glitch for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(mut rng: StdRng) -> Self {
        let seed = rng.random::<f32>();
        Self {
            amount: 0.8,
            angle: 0.02,
            seed,
            seed_x: 0.02,
            seed_y: 0.02,
            distortion_x: 0.5,
            distortion_y: 0.6,
            col_s: 0.05,
            counter: 0.0,
            rng,
        }
    }

    pub fn counter(&self) -> f32 {
        self.counter
    }
}

impl Default for GlitchEffect {
    fn default() -> Self {
        Self::new()
    }
}

impl Effect for GlitchEffect {
    fn label(&self) -> &str {
        "glitch"
    }

    fn fragment_source(&self) -> &'static str {
        include_str!("shaders/glitch.wgsl")
    }

    fn params(&self) -> EffectParams {
        EffectParams::default()
            .with_slot(0, [self.amount, self.angle, self.seed, self.col_s])
            .with_slot(
                1,
                [
                    self.seed_x,
                    self.seed_y,
                    self.distortion_x,
                    self.distortion_y,
                ],
            )
    }

    fn advance(&mut self) {
        let pulse = self.counter.sin();
        let rng = &mut self.rng;

        self.amount = pulse * rng.random::<f32>() / 90.0;
        self.angle = rng.random_range(-PI..PI);
        self.distortion_x = pulse * rng.random_range(0.0..1.0);
        self.distortion_y = pulse * rng.random_range(0.0..1.0);
        self.seed_x = pulse * rng.random_range(-0.3..0.3);
        self.seed_y = pulse * rng.random_range(-0.3..0.3);

        self.counter += Self::COUNTER_STEP;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_advance_is_silent() {
        // sin(0) == 0 zeroes every pulsed parameter.
        let mut g = GlitchEffect::seeded(3);
        g.advance();
        assert_eq!(g.amount, 0.0);
        assert_eq!(g.distortion_x, 0.0);
        assert_eq!(g.seed_y, 0.0);
        assert!((g.counter() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn advanced_params_stay_in_range() {
        let mut g = GlitchEffect::seeded(11);
        for _ in 0..200 {
            g.advance();
            let pulse = (g.counter() - 0.1).sin().abs() + 1e-4;
            assert!(g.amount.abs() <= pulse / 90.0);
            assert!((-PI..PI).contains(&g.angle));
            assert!(g.distortion_x.abs() <= pulse);
            assert!(g.seed_x.abs() <= 0.3 * pulse);
        }
    }

    #[test]
    fn seed_is_stable_across_frames() {
        let mut g = GlitchEffect::seeded(5);
        let seed = g.seed;
        assert!((0.0..1.0).contains(&seed));
        g.advance();
        g.advance();
        assert_eq!(g.seed, seed);
        assert_eq!(g.params().slots[0][2], seed);
    }
}
