mod app;

use anyhow::Result;
use spinquad_engine::device::GpuInit;
use spinquad_engine::logging::{LoggingConfig, init_logging};
use spinquad_engine::render::quad::QuadConfig;
use spinquad_engine::shader::{QUAD_FRAGMENT_GLSL, QUAD_VERTEX_GLSL, ShaderProgram};
use spinquad_engine::window::{Runtime, RuntimeConfig};

use crate::app::SpinningQuad;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let program = ShaderProgram::from_sources(QUAD_VERTEX_GLSL, QUAD_FRAGMENT_GLSL)
        .inspect_err(|e| log::error!("{e}"))?;

    let app = SpinningQuad::new(program, QuadConfig::default());

    Runtime::run(RuntimeConfig::default(), GpuInit::default(), app)
}
