use super::Effect;

/// Luminance greyscale (0.3, 0.59, 0.11 weights), opaque output.
#[derive(Debug, Default, Copy, Clone)]
pub struct GreyscaleEffect;

impl Effect for GreyscaleEffect {
    fn label(&self) -> &str {
        "greyscale"
    }

    fn fragment_source(&self) -> &'static str {
        include_str!("shaders/greyscale.wgsl")
    }
}
