//! `glint`: opens one of the shader playgrounds in a window.

mod app;
mod cli;
mod playgrounds;

use anyhow::Result;
use clap::Parser;

use glint_engine::device::GpuInit;
use glint_engine::logging::init_logging;
use glint_engine::window::Runtime;

use crate::app::PlaygroundApp;
use crate::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.logging());

    let source = cli.open_source()?;
    log::info!("starting playground {} ({})", cli.playground, cli.playground.title());

    Runtime::run(
        cli.runtime_config(),
        GpuInit::default(),
        PlaygroundApp::new(cli.playground, source),
    )
}
