//! GPU rendering subsystem.
//!
//! Renderers own their GPU resources (pipelines, buffers) and create them
//! lazily from the [`RenderCtx`] of the first frame they draw.

mod ctx;
pub mod quad;

pub use ctx::{RenderCtx, RenderTarget};
