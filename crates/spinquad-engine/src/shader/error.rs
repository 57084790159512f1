use thiserror::Error;

use super::stage::ShaderKind;

/// A single shader stage failed to compile.
#[derive(Debug, Clone, Error)]
#[error("failed to compile {stage} shader: {log}")]
pub struct CompileError {
    pub stage: ShaderKind,
    pub log: String,
}

/// Two compiled stages could not be linked into a program.
#[derive(Debug, Clone, Error)]
#[error("failed to link shader program: {log}")]
pub struct LinkError {
    pub log: String,
}

impl LinkError {
    pub(crate) fn new(log: impl Into<String>) -> Self {
        Self { log: log.into() }
    }
}

/// Any failure while building a [`ShaderProgram`](super::ShaderProgram) from sources.
#[derive(Debug, Clone, Error)]
pub enum ShaderError {
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error(transparent)]
    Link(#[from] LinkError),
}
