/// Current rotation of the quad about the Z axis, in radians.
///
/// Grows without bound; the trigonometry consuming it wraps implicitly.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct RotationState {
    pub radians: f32,
}

impl RotationState {
    pub const fn new(radians: f32) -> Self {
        Self { radians }
    }

    /// Adds `dt` seconds of rotation at one radian per second.
    ///
    /// Negative or NaN steps count as zero, so the angle never decreases.
    pub fn advance(&mut self, dt: f32) {
        if dt > 0.0 {
            self.radians += dt;
        }
    }

    /// Returns the state after `advance(dt)` without mutating `self`.
    #[must_use]
    pub fn advanced(mut self, dt: f32) -> Self {
        self.advance(dt);
        self
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn advance_adds_elapsed_time() {
        for (start, dt) in [(0.0, 0.0), (0.0, 0.5), (3.25, 0.016), (1_000.0, 2.0)] {
            let after = RotationState::new(start).advanced(dt);
            assert_eq!(after.radians, start + dt);
        }
    }

    #[test]
    fn zero_steps_are_no_ops() {
        let mut state = RotationState::new(1.5);
        for _ in 0..100 {
            state.advance(0.0);
        }
        assert_eq!(state, RotationState::new(1.5));
    }

    #[test]
    fn sixty_hz_sequence() {
        let mut state = RotationState::default();
        let mut seen = Vec::new();
        for dt in [0.016, 0.016, 0.016] {
            state.advance(dt);
            seen.push(state.radians);
        }

        assert_relative_eq!(seen[0], 0.016, epsilon = 1e-6);
        assert_relative_eq!(seen[1], 0.032, epsilon = 1e-6);
        assert_relative_eq!(seen[2], 0.048, epsilon = 1e-6);
    }

    #[test]
    fn negative_and_nan_steps_are_ignored() {
        let mut state = RotationState::new(2.0);
        state.advance(-0.5);
        state.advance(f32::NAN);
        assert_eq!(state.radians, 2.0);
    }

    #[test]
    fn never_wraps() {
        let state = RotationState::new(std::f32::consts::TAU).advanced(1.0);
        assert!(state.radians > std::f32::consts::TAU);
    }
}
