use super::{Effect, EffectParams};

/// Halftone-style dot pattern blended over the input.
///
/// The pattern grid rotates slowly with the `time` uniform. `intensity`
/// blends between the untouched input (0) and the full pattern (1).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DotsEffect {
    pub scale: f32,
    pub intensity: f32,
    /// Pattern uv transform: `uv * zw + xy`.
    pub offset_repeat: [f32; 4],
}

impl Default for DotsEffect {
    fn default() -> Self {
        Self {
            scale: 1000.0,
            intensity: 1.0,
            offset_repeat: [0.5, 0.5, 1.0, 1.0],
        }
    }
}

impl Effect for DotsEffect {
    fn label(&self) -> &str {
        "dots"
    }

    fn fragment_source(&self) -> &'static str {
        include_str!("shaders/dots.wgsl")
    }

    fn params(&self) -> EffectParams {
        EffectParams::default()
            .with_slot(0, [self.scale, self.intensity, 0.0, 0.0])
            .with_slot(1, self.offset_repeat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_pack_scale_intensity_and_offset_repeat() {
        let p = DotsEffect::default().params();
        assert_eq!(p.slots[0], [1000.0, 1.0, 0.0, 0.0]);
        assert_eq!(p.slots[1], [0.5, 0.5, 1.0, 1.0]);
    }
}
