//! The rotating quad.
//!
//! - [`geometry`]: the two immutable vertex buffers
//! - [`transforms`]: projection and model-view construction
//! - [`RotationState`]: the angle threaded through each frame
//! - [`QuadRenderer`]: pipeline + per-frame draw

pub mod geometry;
pub mod transforms;

mod config;
mod renderer;
mod scene;
mod state;

pub use config::QuadConfig;
pub use renderer::QuadRenderer;
pub use scene::QuadScene;
pub use state::RotationState;
