use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use winit::dpi::LogicalSize;

use glint_engine::logging::LoggingConfig;
use glint_engine::render::source::{CanvasSource, ImageSource};
use glint_engine::render::BoxedSource;
use glint_engine::window::RuntimeConfig;

use crate::playgrounds::PlaygroundKind;

/// Real-time shader playgrounds.
#[derive(Debug, Parser)]
#[command(name = "glint", version, about)]
pub struct Cli {
    /// Playground to open.
    #[arg(short, long, value_enum, default_value_t = PlaygroundKind::Chain)]
    pub playground: PlaygroundKind,

    /// Image file used as the frame source.
    #[arg(long, value_name = "PATH", conflicts_with = "canvas")]
    pub image: Option<PathBuf>,

    /// Use the procedural canvas as the frame source (default without --image).
    #[arg(long)]
    pub canvas: bool,

    /// Initial window width.
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Initial window height.
    #[arg(long, default_value_t = 720)]
    pub height: u32,

    /// Log filter in env_logger syntax; overrides RUST_LOG.
    #[arg(long, value_name = "FILTER")]
    pub log: Option<String>,
}

impl Cli {
    pub fn logging(&self) -> LoggingConfig {
        match &self.log {
            Some(filter) => LoggingConfig::with_filter(filter.clone()),
            None => LoggingConfig::default(),
        }
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            title: format!("glint {}: {}", self.playground, self.playground.title()),
            initial_size: LogicalSize::new(self.width.max(1) as f64, self.height.max(1) as f64),
        }
    }

    pub fn open_source(&self) -> Result<BoxedSource> {
        match (&self.image, self.canvas) {
            (Some(path), false) => {
                let image = ImageSource::open(path)
                    .with_context(|| format!("failed to open frame source {}", path.display()))?;
                Ok(Box::new(image))
            }
            _ => {
                let (w, h) = CanvasSource::DEFAULT_SIZE;
                Ok(Box::new(CanvasSource::new(w, h)?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_engine::render::FrameSource;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("glint").chain(args.iter().copied()))
    }

    #[test]
    fn defaults() {
        let cli = parse(&[]).unwrap();
        assert_eq!(cli.playground, PlaygroundKind::Chain);
        assert!(cli.image.is_none());
        assert!(!cli.canvas);
        assert_eq!((cli.width, cli.height), (1280, 720));
        assert!(cli.logging().env_filter.is_none());
    }

    #[test]
    fn playground_numbers_parse() {
        for (arg, kind) in [
            ("01", PlaygroundKind::Wireframe),
            ("02", PlaygroundKind::Spotlight),
            ("03", PlaygroundKind::Glitch),
            ("04", PlaygroundKind::Dots),
            ("05", PlaygroundKind::Buffered),
            ("06", PlaygroundKind::Chain),
            ("07", PlaygroundKind::SpotLighting),
            ("08", PlaygroundKind::Ocean),
            ("10", PlaygroundKind::Polygons),
            ("11", PlaygroundKind::Lighting),
        ] {
            assert_eq!(parse(&["--playground", arg]).unwrap().playground, kind);
        }
        assert!(parse(&["--playground", "09"]).is_err());
    }

    #[test]
    fn image_and_canvas_conflict() {
        assert!(parse(&["--image", "a.png", "--canvas"]).is_err());
        let cli = parse(&["-p", "11", "--image", "a.png"]).unwrap();
        assert_eq!(cli.image.as_deref(), Some(std::path::Path::new("a.png")));
    }

    #[test]
    fn log_filter_and_window_size() {
        let cli = parse(&["--log", "glint_engine=debug", "--width", "800", "--height", "600"]).unwrap();
        assert_eq!(cli.logging().env_filter.as_deref(), Some("glint_engine=debug"));
        let config = cli.runtime_config();
        assert_eq!(config.initial_size, LogicalSize::new(800.0, 600.0));
        assert!(config.title.contains("06"));
    }

    #[test]
    fn canvas_is_the_default_source() {
        let cli = parse(&[]).unwrap();
        let source = cli.open_source().unwrap();
        assert_eq!(source.size(), CanvasSource::DEFAULT_SIZE);
    }

    #[test]
    fn missing_image_is_an_error() {
        let cli = parse(&["--image", "/nonexistent/glint.png"]).unwrap();
        let err = cli.open_source().err().unwrap();
        assert!(format!("{err:#}").contains("/nonexistent/glint.png"));
    }
}
