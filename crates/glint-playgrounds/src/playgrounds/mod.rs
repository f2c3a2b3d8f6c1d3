//! Playground implementations.
//!
//! Each playground owns its GPU resources and animates once per frame.

mod buffered;
mod chain;
mod dots;
mod glitch;
mod lighting;
mod ocean;
mod polygons;
mod spot_lighting;
mod spotlight;
mod wireframe;

use std::fmt;

use anyhow::{Context, Result, anyhow};
use clap::ValueEnum;

use glint_engine::core::{AppControl, FrameCtx};
use glint_engine::render::{BoxedSource, RenderCtx, SourceTexture};

/// One interactive scene.
pub trait Playground {
    /// Updates the animation state and renders one frame.
    fn frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
pub enum PlaygroundKind {
    /// Wireframe cube.
    #[value(name = "01")]
    Wireframe,
    /// Cube and floor under a shadow-casting spotlight.
    #[value(name = "02")]
    Spotlight,
    /// Glitched frame source on a wall behind a spotlit cube.
    #[value(name = "03")]
    Glitch,
    /// Dots shader over the frame source.
    #[value(name = "04")]
    Dots,
    /// Glitch buffer shown through the dots shader.
    #[value(name = "05")]
    Buffered,
    /// Mirror, dots and tv chained over the frame source.
    #[value(name = "06")]
    Chain,
    /// Wobbling textured wall under a spotlight.
    #[value(name = "07")]
    SpotLighting,
    /// FFT ocean.
    #[value(name = "08")]
    Ocean,
    /// Lit icosahedron with post effects.
    #[value(name = "10")]
    Polygons,
    /// Textured box lit by an orbiting light.
    #[value(name = "11")]
    Lighting,
}

impl PlaygroundKind {
    pub fn number(self) -> &'static str {
        match self {
            Self::Wireframe => "01",
            Self::Spotlight => "02",
            Self::Glitch => "03",
            Self::Dots => "04",
            Self::Buffered => "05",
            Self::Chain => "06",
            Self::SpotLighting => "07",
            Self::Ocean => "08",
            Self::Polygons => "10",
            Self::Lighting => "11",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Wireframe => "wireframe",
            Self::Spotlight => "spotlight",
            Self::Glitch => "glitch",
            Self::Dots => "dots",
            Self::Buffered => "buffered",
            Self::Chain => "chain",
            Self::SpotLighting => "spot lighting",
            Self::Ocean => "ocean",
            Self::Polygons => "polygons",
            Self::Lighting => "lighting",
        }
    }

    /// Whether the playground samples the frame source.
    pub fn uses_source(self) -> bool {
        matches!(
            self,
            Self::Glitch
                | Self::Dots
                | Self::Buffered
                | Self::Chain
                | Self::SpotLighting
                | Self::Lighting
        )
    }
}

impl fmt::Display for PlaygroundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.number())
    }
}

pub fn build(
    kind: PlaygroundKind,
    ctx: &RenderCtx<'_>,
    source: Option<BoxedSource>,
) -> Result<Box<dyn Playground>> {
    let (width, height) = ctx.viewport.pixel_size();
    log::info!("building playground {kind} at {width}x{height}");

    let playground: Box<dyn Playground> = match (kind, source) {
        (PlaygroundKind::Wireframe, _) => Box::new(wireframe::Wireframe::new(ctx)),
        (PlaygroundKind::Spotlight, _) => Box::new(spotlight::Spotlight::new(ctx)),
        (PlaygroundKind::Glitch, Some(source)) => Box::new(glitch::Glitch::new(ctx, source)?),
        (PlaygroundKind::Dots, Some(source)) => Box::new(dots::Dots::new(ctx, source)?),
        (PlaygroundKind::Buffered, Some(source)) => Box::new(buffered::Buffered::new(ctx, source)?),
        (PlaygroundKind::Chain, Some(source)) => Box::new(chain::Chain::new(ctx, source)?),
        (PlaygroundKind::SpotLighting, Some(source)) => {
            Box::new(spot_lighting::SpotLighting::new(ctx, source)?)
        }
        (PlaygroundKind::Lighting, Some(source)) => Box::new(lighting::Lighting::new(ctx, source)?),
        (PlaygroundKind::Ocean, _) => Box::new(ocean::Ocean::new(ctx)?),
        (PlaygroundKind::Polygons, _) => Box::new(polygons::Polygons::new(ctx)),
        (kind, None) => return Err(anyhow!("playground {kind} needs a frame source")),
    };
    Ok(playground)
}

/// Uploads the frame source, failing when it exceeds the device's texture limit.
fn upload_source(ctx: &RenderCtx<'_>, source: BoxedSource) -> Result<SourceTexture<BoxedSource>> {
    SourceTexture::new(ctx.device, source).context("frame source does not fit on the GPU")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_playground_number() {
        assert_eq!(PlaygroundKind::Wireframe.to_string(), "01");
        assert_eq!(PlaygroundKind::Ocean.to_string(), "08");
        assert_eq!(PlaygroundKind::Lighting.to_string(), "11");
    }

    #[test]
    fn value_names_match_numbers() {
        for kind in PlaygroundKind::value_variants() {
            let value = kind.to_possible_value().unwrap();
            assert_eq!(value.get_name(), kind.number());
        }
    }

    #[test]
    fn playgrounds_are_listed_in_number_order() {
        let numbers: Vec<_> = PlaygroundKind::value_variants()
            .iter()
            .map(|k| k.number())
            .collect();
        assert_eq!(
            numbers,
            ["01", "02", "03", "04", "05", "06", "07", "08", "10", "11"]
        );
    }

    #[test]
    fn only_source_playgrounds_sample_it() {
        for kind in [
            PlaygroundKind::Glitch,
            PlaygroundKind::Dots,
            PlaygroundKind::Chain,
            PlaygroundKind::SpotLighting,
        ] {
            assert!(kind.uses_source(), "{kind}");
        }
        for kind in [
            PlaygroundKind::Wireframe,
            PlaygroundKind::Spotlight,
            PlaygroundKind::Ocean,
            PlaygroundKind::Polygons,
        ] {
            assert!(!kind.uses_source(), "{kind}");
        }
    }
}
