use super::Effect;

/// Orange to blue backdrop keyed on the output resolution; ignores the input.
#[derive(Debug, Default, Copy, Clone)]
pub struct GradientEffect;

impl Effect for GradientEffect {
    fn label(&self) -> &str {
        "gradient"
    }

    fn fragment_source(&self) -> &'static str {
        include_str!("shaders/gradient.wgsl")
    }
}
