//! Glint engine crate.
//!
//! This crate owns the platform + GPU runtime pieces and the multi-pass
//! shader pipeline used by the playgrounds.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
