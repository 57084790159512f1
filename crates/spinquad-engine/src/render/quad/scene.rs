use crate::core::{AppControl, FrameCtx};
use crate::shader::ShaderProgram;

use super::config::QuadConfig;
use super::renderer::QuadRenderer;
use super::state::RotationState;

/// The renderer plus the rotation it animates.
///
/// One [`QuadScene::frame`] call is one animation tick: clear, draw at the
/// current angle, then advance the angle by the frame's elapsed time.
pub struct QuadScene {
    renderer: QuadRenderer,
    rotation: RotationState,
}

impl QuadScene {
    pub fn new(program: ShaderProgram, config: QuadConfig) -> Self {
        Self {
            renderer: QuadRenderer::new(program, config),
            rotation: RotationState::default(),
        }
    }

    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    pub fn frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let clear = self.renderer.config().clear_color;
        let dt = ctx.time.dt;

        self.tick(dt, |renderer, rotation| {
            ctx.render(clear, |rctx, target| renderer.draw(rctx, target, rotation))
        })
    }

    /// Runs `draw` at the current angle, then advances the angle by `dt`.
    ///
    /// The advance happens whatever `draw` returns; time keeps flowing even
    /// when the surface skipped a frame.
    pub fn tick<R>(&mut self, dt: f32, draw: impl FnOnce(&mut QuadRenderer, RotationState) -> R) -> R {
        let out = draw(&mut self.renderer, self.rotation);
        self.rotation.advance(dt);
        out
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::anim::AnimationDriver;
    use crate::time::{FrameClock, ManualTime};

    fn scene() -> QuadScene {
        let program = ShaderProgram::from_sources(
            crate::shader::QUAD_VERTEX_GLSL,
            crate::shader::QUAD_FRAGMENT_GLSL,
        )
        .expect("embedded program links");
        QuadScene::new(program, QuadConfig::default())
    }

    #[test]
    fn draw_sees_angle_before_advance() {
        let mut scene = scene();
        scene.rotation = RotationState::new(0.5);

        let seen = scene.tick(0.25, |_, rotation| rotation);

        assert_eq!(seen, RotationState::new(0.5));
        assert_eq!(scene.rotation(), RotationState::new(0.75));
    }

    #[test]
    fn driven_ticks_follow_frame_timestamps() {
        let time = ManualTime::new();
        let mut driver = AnimationDriver::with_clock(FrameClock::with_source(time.clone()));
        let mut scene = scene();

        let mut drawn = Vec::new();
        let mut after = Vec::new();
        for ts in [16.0, 32.0, 48.0] {
            time.set_ms(ts);
            driver.step(|ft| {
                scene.tick(ft.dt, |_, rotation| drawn.push(rotation.radians));
                after.push(scene.rotation().radians);
                AppControl::Continue
            });
        }

        assert_eq!(drawn.len(), 3);
        assert_relative_eq!(drawn[0], 0.0);
        assert_relative_eq!(drawn[1], 0.016, epsilon = 1e-6);
        assert_relative_eq!(drawn[2], 0.032, epsilon = 1e-6);

        assert_eq!(after.len(), 3);
        assert_relative_eq!(after[0], 0.016, epsilon = 1e-6);
        assert_relative_eq!(after[1], 0.032, epsilon = 1e-6);
        assert_relative_eq!(after[2], 0.048, epsilon = 1e-6);
    }

    #[test]
    fn stopped_driver_leaves_rotation_untouched() {
        let time = ManualTime::new();
        let mut driver = AnimationDriver::with_clock(FrameClock::with_source(time.clone()));
        let mut scene = scene();

        driver.stop_signal().stop();
        time.set_ms(100.0);
        driver.step(|ft| {
            scene.tick(ft.dt, |_, _| ());
            AppControl::Continue
        });

        assert_eq!(scene.rotation(), RotationState::default());
    }
}
