//! Time subsystem.
//!
//! - `FrameClock`: one per window, `tick()` once per presented frame.
//! - `UniformClock`: the frame-stepped `time` uniform fed to shader passes.

mod frame_clock;
mod uniform_clock;

pub use frame_clock::{FrameClock, FrameTime};
pub use uniform_clock::UniformClock;
