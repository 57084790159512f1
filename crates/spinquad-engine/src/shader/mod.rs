//! Shader compilation and linking.
//!
//! Stages are written in GLSL 450, parsed and validated with naga (through
//! `wgpu::naga`), then checked against each other before any GPU object exists.
//! That keeps every failure mode testable without a device:
//! - [`CompileError`]: a stage failed to parse or validate
//! - [`LinkError`]: the stages do not fit together, or the program lacks an
//!   attribute/uniform the renderer needs

mod error;
mod program;
mod reflect;
mod source;
mod stage;

pub(crate) use program::MAT4_BYTES;

pub use error::{CompileError, LinkError, ShaderError};
pub use program::{
    AttribLocations, ProgramInfo, ProgramInterface, ShaderProgram, UniformLocations, UniformSlot,
};
pub use source::{QUAD_FRAGMENT_GLSL, QUAD_VERTEX_GLSL};
pub use stage::{CompiledStage, ShaderKind, compile_stage};
