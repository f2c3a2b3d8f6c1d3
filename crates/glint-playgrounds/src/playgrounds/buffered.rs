//! 05: the frame source runs through a glitch pass into a buffer, and the
//! buffer is drawn with the dots shader on the ortho plane.

use anyhow::Result;

use glint_engine::core::{AppControl, FrameCtx};
use glint_engine::paint::Color;
use glint_engine::render::effect::{DotsEffect, GlitchEffect};
use glint_engine::render::{
    BoxedSource, QuadPlacement, RenderCtx, ScreenPass, ShaderPass, SourceTexture,
};

use super::Playground;

pub struct Buffered {
    source: SourceTexture<BoxedSource>,
    glitch: ShaderPass,
    screen: ScreenPass,
}

impl Buffered {
    pub fn new(ctx: &RenderCtx<'_>, source: BoxedSource) -> Result<Self> {
        let size = ctx.viewport.pixel_size();
        let placement = QuadPlacement::ortho(ctx.viewport.ortho());

        let source = super::upload_source(ctx, source)?;
        let glitch = ShaderPass::new(ctx, GlitchEffect::new(), &source.binding(), size, placement);
        let screen = ScreenPass::new(ctx, DotsEffect::default(), &glitch.output(), placement);

        Ok(Self {
            source,
            glitch,
            screen,
        })
    }
}

impl Playground for Buffered {
    fn frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Self {
            source,
            glitch,
            screen,
        } = self;

        ctx.render(Color::BLACK, |rctx, target| {
            source.update(rctx.queue);
            glitch.render(rctx, target.encoder);
            screen.render(rctx, target);
        })
    }
}
