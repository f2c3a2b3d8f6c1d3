//! Fragment effects run by quad passes.
//!
//! An effect contributes a WGSL `fs_main` plus up to four `vec4` parameter
//! slots. The quad vertex stage, the uniform block and the input texture
//! bindings live in a shared prelude (`shaders/prelude.wgsl`) that is
//! prepended to every effect's source.
//!
//! Effect WGSL reads its parameters as `u.params[i]` and samples the input
//! with `sample_input(uv)`, where `uv` has its origin at the bottom-left.

mod dots;
mod glitch;
mod gradient;
mod greyscale;
mod mirror;
mod texture;
mod tv;

pub use dots::DotsEffect;
pub use glitch::GlitchEffect;
pub use gradient::GradientEffect;
pub use greyscale::GreyscaleEffect;
pub use mirror::MirrorEffect;
pub use texture::TextureEffect;
pub use tv::TvEffect;

use crate::time::UniformClock;

pub(crate) const PRELUDE_WGSL: &str = include_str!("shaders/prelude.wgsl");

/// Number of `vec4` parameter slots an effect can fill.
pub const PARAM_SLOTS: usize = 4;

/// Per-effect shader parameters, uploaded with every pass.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct EffectParams {
    pub slots: [[f32; 4]; PARAM_SLOTS],
}

impl EffectParams {
    pub fn with_slot(mut self, index: usize, value: [f32; 4]) -> Self {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = value;
        } else {
            log::warn!("effect parameter slot {index} out of range; ignored");
        }
        self
    }
}

/// A fragment effect.
pub trait Effect {
    /// Debug label used for GPU objects.
    fn label(&self) -> &str;

    /// WGSL source defining `fs_main`, compiled after the prelude.
    fn fragment_source(&self) -> &'static str;

    fn params(&self) -> EffectParams {
        EffectParams::default()
    }

    /// Per-frame hook called before the parameters are uploaded.
    fn advance(&mut self) {}

    /// Amount added to the `time` uniform every frame.
    fn time_step(&self) -> f32 {
        UniformClock::DEFAULT_STEP
    }
}

/// Full WGSL module for `effect`.
pub(crate) fn shader_source(effect: &dyn Effect) -> String {
    let fragment = effect.fragment_source();
    let mut src = String::with_capacity(PRELUDE_WGSL.len() + fragment.len() + 1);
    src.push_str(PRELUDE_WGSL);
    src.push('\n');
    src.push_str(fragment);
    src
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_slot_sets_only_that_slot() {
        let p = EffectParams::default().with_slot(2, [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(p.slots[2], [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(p.slots[0], [0.0; 4]);
        assert_eq!(p.slots[3], [0.0; 4]);
    }

    #[test]
    fn out_of_range_slot_is_ignored() {
        let p = EffectParams::default().with_slot(PARAM_SLOTS, [1.0; 4]);
        assert_eq!(p, EffectParams::default());
    }

    #[test]
    fn every_builtin_defines_fs_main_after_the_prelude() {
        let effects: Vec<Box<dyn Effect>> = vec![
            Box::new(TextureEffect),
            Box::new(GreyscaleEffect),
            Box::new(MirrorEffect),
            Box::new(DotsEffect::default()),
            Box::new(GlitchEffect::seeded(1)),
            Box::new(TvEffect::default()),
            Box::new(GradientEffect),
        ];
        for effect in &effects {
            let src = shader_source(effect.as_ref());
            assert!(src.starts_with(PRELUDE_WGSL), "{}", effect.label());
            assert!(src.contains("fn fs_main"), "{}", effect.label());
            assert!(src.contains("fn vs_main"), "{}", effect.label());
        }
    }

    #[test]
    fn gradient_reads_resolution_not_input() {
        let src = GradientEffect.fragment_source();
        assert!(src.contains("u.resolution"));
        assert!(!src.contains("sample_input"));
    }
}
