//! Ordered chain of shader passes.
//!
//! Each added pass reads the previous pass's buffer (the base texture for the
//! first one); the last pass's buffer is the chain output.

use super::effect::Effect;
use super::pass::{QuadPlacement, ShaderPass};
use super::target::TextureBinding;
use super::RenderCtx;

/// A texture slot in the chain.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Slot {
    Base,
    Pass(usize),
}

/// Wiring of a chain, independent of GPU resources.
#[derive(Debug, Clone, Default)]
pub struct ChainLinks {
    inputs: Vec<Slot>,
}

impl ChainLinks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot the next added pass will read.
    pub fn next_input(&self) -> Slot {
        self.output()
    }

    /// Registers a pass and returns `(index, input slot)`.
    pub fn push(&mut self) -> (usize, Slot) {
        let input = self.next_input();
        self.inputs.push(input);
        (self.inputs.len() - 1, input)
    }

    pub fn input_of(&self, index: usize) -> Option<Slot> {
        self.inputs.get(index).copied()
    }

    /// Slot holding the chain output; `Base` while the chain is empty.
    pub fn output(&self) -> Slot {
        match self.inputs.len() {
            0 => Slot::Base,
            n => Slot::Pass(n - 1),
        }
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}

/// Ordered list of [`ShaderPass`]es fed from a base texture.
pub struct ShaderChain {
    base: TextureBinding,
    size: (u32, u32),
    placement: QuadPlacement,
    links: ChainLinks,
    passes: Vec<ShaderPass>,
}

impl ShaderChain {
    /// `size` is the pixel size of every pass buffer; `placement` is used for every pass.
    pub fn new(base: TextureBinding, size: (u32, u32), placement: QuadPlacement) -> Self {
        Self {
            base,
            size,
            placement,
            links: ChainLinks::new(),
            passes: Vec::new(),
        }
    }

    fn slot_binding(&self, slot: Slot) -> TextureBinding {
        match slot {
            Slot::Base => self.base.clone(),
            Slot::Pass(i) => match self.passes.get(i) {
                Some(pass) => pass.output(),
                None => self.base.clone(),
            },
        }
    }

    /// Appends a pass reading the current chain output.
    pub fn add(&mut self, ctx: &RenderCtx<'_>, effect: impl Effect + 'static) -> &mut ShaderPass {
        let (index, input) = self.links.push();
        let input = self.slot_binding(input);
        let pass = ShaderPass::new(ctx, effect, &input, self.size, self.placement);
        log::debug!("chain pass {index} '{}' added", pass.label());
        self.passes.push(pass);
        let last = self.passes.len() - 1;
        &mut self.passes[last]
    }

    /// Renders every pass in insertion order.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, encoder: &mut wgpu::CommandEncoder) {
        for pass in &mut self.passes {
            pass.render(ctx, encoder);
        }
    }

    /// The chain output: the last pass's buffer, or the base texture when empty.
    pub fn texture(&self) -> TextureBinding {
        self.slot_binding(self.links.output())
    }

    pub fn links(&self) -> &ChainLinks {
        &self.links
    }

    pub fn passes(&self) -> &[ShaderPass] {
        &self.passes
    }

    pub fn len(&self) -> usize {
        self.passes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_chain_outputs_base() {
        let links = ChainLinks::new();
        assert!(links.is_empty());
        assert_eq!(links.output(), Slot::Base);
        assert_eq!(links.next_input(), Slot::Base);
    }

    #[test]
    fn each_pass_reads_its_predecessor() {
        let mut links = ChainLinks::new();
        assert_eq!(links.push(), (0, Slot::Base));
        assert_eq!(links.push(), (1, Slot::Pass(0)));
        assert_eq!(links.push(), (2, Slot::Pass(1)));

        assert_eq!(links.input_of(0), Some(Slot::Base));
        assert_eq!(links.input_of(2), Some(Slot::Pass(1)));
        assert_eq!(links.input_of(3), None);
        assert_eq!(links.output(), Slot::Pass(2));
        assert_eq!(links.len(), 3);
    }
}
