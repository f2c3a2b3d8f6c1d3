//! FFT ocean: wave spectrum simulation on the GPU plus the shaded surface mesh.
//!
//! All simulation state lives in float textures; each frame runs as a
//! sequence of fullscreen fragment passes recorded into one encoder.

mod config;
mod fft;
mod phase;
mod program;
mod simulator;
pub mod spectrum;
mod state;
mod surface;

pub use config::{OceanConfig, OceanError};
pub use fft::{FftDirection, FftPlan, FftSlot, FftStep};
pub use phase::{PhaseBuffers, PhaseSlot};
pub use simulator::OceanSimulator;
pub use state::SpectrumState;
pub use surface::OceanSurface;
