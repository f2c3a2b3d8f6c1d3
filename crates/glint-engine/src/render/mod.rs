//! GPU rendering subsystem.
//!
//! Everything here draws with wgpu into either an [`OffscreenTarget`] (pass
//! buffers, simulation textures) or the swapchain view of a [`RenderTarget`].
//! Each renderer owns its GPU resources (pipelines, buffers, bind groups).
//!
//! Conventions:
//! - Sizes are physical pixels.
//! - Texture uv origin is bottom-left; shaders flip y when sampling.
//! - Colours stay in gamma space end to end (non-sRGB surface).

mod ctx;
pub mod chain;
pub mod effect;
pub mod ocean;
pub mod pass;
pub mod scene;
pub mod source;
pub mod target;

pub use chain::ShaderChain;
pub use ctx::{RenderCtx, RenderTarget};
pub use pass::{QuadPlacement, ScreenPass, ShaderPass};
pub use source::{BoxedSource, FrameSource, SourceTexture};
pub use target::{OffscreenTarget, TargetParams, TextureBinding};
