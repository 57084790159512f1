use spinquad_engine::core::{App, AppControl, FrameCtx};
use spinquad_engine::render::quad::{QuadConfig, QuadScene};
use spinquad_engine::shader::ShaderProgram;

/// One quad, spinning at a radian per second.
pub struct SpinningQuad {
    scene: QuadScene,
}

impl SpinningQuad {
    pub fn new(program: ShaderProgram, config: QuadConfig) -> Self {
        log::info!("starting spinning quad ({config:?})");
        Self {
            scene: QuadScene::new(program, config),
        }
    }
}

impl App for SpinningQuad {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let control = self.scene.frame(ctx);
        if ctx.time.frame_index % 600 == 0 {
            log::debug!(
                "frame {}: rotation {:.3} rad",
                ctx.time.frame_index,
                self.scene.rotation().radians
            );
        }
        control
    }
}
