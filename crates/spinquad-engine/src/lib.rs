//! Spinquad engine crate.
//!
//! Owns the platform + GPU runtime pieces and the rotating-quad renderer:
//! - `window` / `core` / `device`: event loop, per-frame context, wgpu setup
//! - `time` / `anim`: frame clock and the animation driver
//! - `shader`: GLSL compilation and linking with typed errors
//! - `render`: the quad renderer and its scene state

pub mod anim;
pub mod coords;
pub mod core;
pub mod device;
pub mod logging;
pub mod paint;
pub mod render;
pub mod shader;
pub mod time;
pub mod window;
