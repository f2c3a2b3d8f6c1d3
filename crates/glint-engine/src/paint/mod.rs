//! Color representation shared by playgrounds and renderers.

pub mod color;

pub use color::Color;
