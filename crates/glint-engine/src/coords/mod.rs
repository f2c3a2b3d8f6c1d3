//! Screen-space sizing shared by the pipeline and playgrounds.
//!
//! Sizes are physical pixels; passes convert to NDC with the extents
//! computed here.

mod ortho;
mod viewport;

pub use ortho::{texture_factor, OrthoBounds, OrthoFrame, ORTHO_ASPECT};
pub use viewport::Viewport;
