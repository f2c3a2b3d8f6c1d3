use super::Effect;

/// Draws the input unchanged.
#[derive(Debug, Default, Copy, Clone)]
pub struct TextureEffect;

impl Effect for TextureEffect {
    fn label(&self) -> &str {
        "texture"
    }

    fn fragment_source(&self) -> &'static str {
        include_str!("shaders/texture.wgsl")
    }
}
