//! Color representation shared by the runtime (clear color) and vertex data.

mod color;

pub use color::Color;
