//! 04: the frame source through the dots shader on the ortho plane.

use anyhow::Result;

use glint_engine::core::{AppControl, FrameCtx};
use glint_engine::paint::Color;
use glint_engine::render::effect::DotsEffect;
use glint_engine::render::{BoxedSource, QuadPlacement, RenderCtx, ScreenPass, SourceTexture};

use super::Playground;

pub struct Dots {
    source: SourceTexture<BoxedSource>,
    screen: ScreenPass,
}

impl Dots {
    pub fn new(ctx: &RenderCtx<'_>, source: BoxedSource) -> Result<Self> {
        let placement = QuadPlacement::ortho(ctx.viewport.ortho());
        let source = super::upload_source(ctx, source)?;
        let screen = ScreenPass::new(ctx, DotsEffect::default(), &source.binding(), placement);

        Ok(Self { source, screen })
    }
}

impl Playground for Dots {
    fn frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Self { source, screen } = self;

        ctx.render(Color::BLACK, |rctx, target| {
            source.update(rctx.queue);
            screen.render(rctx, target);
        })
    }
}
