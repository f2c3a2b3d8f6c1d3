use super::Effect;

/// Reflects the left half of the input onto the right half.
#[derive(Debug, Default, Copy, Clone)]
pub struct MirrorEffect;

impl Effect for MirrorEffect {
    fn label(&self) -> &str {
        "mirror"
    }

    fn fragment_source(&self) -> &'static str {
        include_str!("shaders/mirror.wgsl")
    }
}
