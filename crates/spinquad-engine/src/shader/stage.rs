use std::fmt;

use wgpu::naga;

use super::error::CompileError;

/// Pipeline stage a shader source is compiled for.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderKind {
    Vertex,
    Fragment,
}

impl ShaderKind {
    pub(crate) fn naga_stage(self) -> naga::ShaderStage {
        match self {
            ShaderKind::Vertex => naga::ShaderStage::Vertex,
            ShaderKind::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

impl fmt::Display for ShaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderKind::Vertex => f.write_str("vertex"),
            ShaderKind::Fragment => f.write_str("fragment"),
        }
    }
}

/// A parsed and validated shader stage.
///
/// Holds naga IR only; the GPU shader module is created later from it, once a
/// device is available.
#[derive(Debug, Clone)]
pub struct CompiledStage {
    kind: ShaderKind,
    module: naga::Module,
}

impl CompiledStage {
    /// GLSL entry points are always called `main`.
    pub const ENTRY_POINT: &'static str = "main";

    pub fn kind(&self) -> ShaderKind {
        self.kind
    }

    pub fn module(&self) -> &naga::Module {
        &self.module
    }

    pub(crate) fn entry_point(&self) -> Option<&naga::EntryPoint> {
        let stage = self.kind.naga_stage();
        self.module
            .entry_points
            .iter()
            .find(|ep| ep.stage == stage && ep.name == Self::ENTRY_POINT)
    }
}

/// Compiles one GLSL 450 stage.
///
/// Parse errors and IR validation errors both surface as [`CompileError`] with
/// a human-readable log.
pub fn compile_stage(kind: ShaderKind, source: &str) -> Result<CompiledStage, CompileError> {
    let mut frontend = naga::front::glsl::Frontend::default();
    let options = naga::front::glsl::Options::from(kind.naga_stage());

    let module = frontend.parse(&options, source).map_err(|errors| CompileError {
        stage: kind,
        log: format_parse_errors(&errors, source),
    })?;

    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    validator.validate(&module).map_err(|err| CompileError {
        stage: kind,
        log: error_chain(&err),
    })?;

    log::debug!(
        "compiled {kind} shader ({} globals, {} entry points)",
        module.global_variables.len(),
        module.entry_points.len()
    );

    Ok(CompiledStage { kind, module })
}

fn format_parse_errors(errors: &naga::front::glsl::ParseErrors, source: &str) -> String {
    errors
        .errors
        .iter()
        .map(|e| {
            let loc = e.meta.location(source);
            format!("{}:{}: {}", loc.line_number, loc.line_position, e.kind)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut cur = err.source();
    while let Some(inner) = cur {
        out.push_str(": ");
        out.push_str(&inner.to_string());
        cur = inner.source();
    }
    out
}
