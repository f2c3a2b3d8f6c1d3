//! 06: mirror, dots and tv chained over the frame source, shown on the ortho plane.

use anyhow::Result;

use glint_engine::core::{AppControl, FrameCtx};
use glint_engine::paint::Color;
use glint_engine::render::effect::{DotsEffect, MirrorEffect, TextureEffect, TvEffect};
use glint_engine::render::{
    BoxedSource, QuadPlacement, RenderCtx, ScreenPass, ShaderChain, SourceTexture,
};

use super::Playground;

pub struct Chain {
    source: SourceTexture<BoxedSource>,
    chain: ShaderChain,
    screen: ScreenPass,
}

impl Chain {
    pub fn new(ctx: &RenderCtx<'_>, source: BoxedSource) -> Result<Self> {
        let size = ctx.viewport.pixel_size();
        let placement = QuadPlacement::ortho(ctx.viewport.ortho());

        let source = super::upload_source(ctx, source)?;
        let mut chain = ShaderChain::new(source.binding(), size, placement);
        chain.add(ctx, MirrorEffect);
        chain.add(ctx, DotsEffect::default());
        chain.add(ctx, TvEffect::default());

        let screen = ScreenPass::new(ctx, TextureEffect, &chain.texture(), placement);

        Ok(Self {
            source,
            chain,
            screen,
        })
    }
}

impl Playground for Chain {
    fn frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Self {
            source,
            chain,
            screen,
        } = self;

        ctx.render(Color::BLACK, |rctx, target| {
            source.update(rctx.queue);
            chain.render(rctx, target.encoder);
            screen.render(rctx, target);
        })
    }
}
