/// Per-pass `time` uniform.
///
/// Passes do not read wall-clock time: each rendered frame bumps the value by a
/// fixed `step`, so effects animate per frame rather than per second.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct UniformClock {
    pub value: f32,
    pub step: f32,
}

impl UniformClock {
    pub const DEFAULT_STEP: f32 = 0.1;

    pub const fn new(step: f32) -> Self {
        Self { value: 0.0, step }
    }

    /// Adds one step and returns the new value.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        self.value += self.step;
        self.value
    }
}

impl Default for UniformClock {
    fn default() -> Self {
        Self::new(Self::DEFAULT_STEP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_step_is_a_tenth_per_frame() {
        let mut clock = UniformClock::default();
        clock.advance();
        clock.advance();
        assert!((clock.value - 0.2).abs() < 1e-6);
    }

    #[test]
    fn custom_step() {
        let mut clock = UniformClock::new(0.01);
        for _ in 0..10 {
            clock.advance();
        }
        assert!((clock.value - 0.1).abs() < 1e-5);
    }
}
