use glint_engine::core::{App, AppControl, FrameCtx};
use glint_engine::input::Key;
use glint_engine::render::BoxedSource;

use crate::playgrounds::{self, Playground, PlaygroundKind};

/// Runtime app hosting one playground.
///
/// The playground needs the GPU device, so it is built on the first frame.
pub struct PlaygroundApp {
    kind: PlaygroundKind,
    source: Option<BoxedSource>,
    active: Option<Box<dyn Playground>>,
}

impl PlaygroundApp {
    pub fn new(kind: PlaygroundKind, source: BoxedSource) -> Self {
        if !kind.uses_source() {
            log::debug!("playground {kind} does not sample the frame source");
        }
        Self {
            kind,
            source: Some(source),
            active: None,
        }
    }
}

impl App for PlaygroundApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input_frame.key_pressed(Key::Escape) {
            log::info!("escape pressed, closing");
            return AppControl::Exit;
        }

        if self.active.is_none() {
            let built = playgrounds::build(self.kind, &ctx.render_ctx(), self.source.take());
            match built {
                Ok(playground) => self.active = Some(playground),
                Err(err) => {
                    log::error!("failed to start playground {}: {err:#}", self.kind);
                    return AppControl::Exit;
                }
            }
        }

        match self.active.as_mut() {
            Some(playground) => playground.frame(ctx),
            None => AppControl::Exit,
        }
    }
}
