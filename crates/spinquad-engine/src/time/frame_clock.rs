use super::source::{MonotonicTime, TimeSource};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds.
    pub dt: f32,

    /// Timestamp taken at the tick, in milliseconds of the clock's time source.
    pub now_ms: f64,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// The previous timestamp starts at zero, so the first tick reports the time
/// elapsed since the source's origin. Each tick converts the millisecond delta
/// to seconds and stores the current timestamp unconditionally.
///
/// A source that steps backwards yields `dt = 0` rather than a negative delta.
/// Clamping is opt-in through [`FrameClock::with_clamps`].
#[derive(Debug, Clone)]
pub struct FrameClock<S = MonotonicTime> {
    source: S,
    previous_ms: f64,
    frame_index: u64,
    clamps: Option<(f32, f32)>,
}

impl FrameClock<MonotonicTime> {
    /// Creates an unclamped clock over wall-clock time.
    pub fn new() -> Self {
        Self::with_source(MonotonicTime::new())
    }
}

impl Default for FrameClock<MonotonicTime> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: TimeSource> FrameClock<S> {
    /// Creates an unclamped clock over an arbitrary time source.
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            previous_ms: 0.0,
            frame_index: 0,
            clamps: None,
        }
    }

    /// Clamps every reported `dt` into `[dt_min, dt_max]` seconds.
    ///
    /// Useful when a debugger pause or a minimized window would otherwise
    /// produce one huge step.
    pub fn with_clamps(mut self, dt_min: f32, dt_max: f32) -> Self {
        debug_assert!(dt_min <= dt_max);
        self.clamps = Some((dt_min, dt_max));
        self
    }

    /// Returns the timestamp recorded by the last tick (0 before the first).
    pub fn previous_ms(&self) -> f64 {
        self.previous_ms
    }

    /// Rebases the clock on the source's current timestamp.
    ///
    /// Useful after surface reconfigure events or when resuming from suspension.
    pub fn reset(&mut self) {
        self.previous_ms = self.source.now_ms();
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        let now_ms = self.source.now_ms();
        let mut dt = ((now_ms - self.previous_ms) * 0.001).max(0.0) as f32;

        if let Some((lo, hi)) = self.clamps {
            dt = dt.clamp(lo, hi);
        }

        self.previous_ms = now_ms;

        let ft = FrameTime {
            dt,
            now_ms,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::time::ManualTime;

    #[test]
    fn first_tick_measures_from_zero() {
        let time = ManualTime::new();
        time.set_ms(250.0);
        let mut clock = FrameClock::with_source(time.clone());

        let ft = clock.tick();
        assert_relative_eq!(ft.dt, 0.25);
        assert_eq!(ft.frame_index, 0);
        assert_eq!(clock.previous_ms(), 250.0);
    }

    #[test]
    fn converts_milliseconds_to_seconds() {
        let time = ManualTime::new();
        let mut clock = FrameClock::with_source(time.clone());
        clock.tick();

        time.advance_ms(16.0);
        let ft = clock.tick();
        assert_relative_eq!(ft.dt, 0.016, epsilon = 1e-6);
        assert_eq!(ft.now_ms, 16.0);
        assert_eq!(ft.frame_index, 1);
    }

    #[test]
    fn repeated_timestamp_yields_zero_delta() {
        let time = ManualTime::new();
        time.set_ms(100.0);
        let mut clock = FrameClock::with_source(time.clone());
        clock.tick();

        assert_eq!(clock.tick().dt, 0.0);
        assert_eq!(clock.tick().dt, 0.0);
    }

    #[test]
    fn backwards_step_saturates_at_zero() {
        let time = ManualTime::new();
        time.set_ms(500.0);
        let mut clock = FrameClock::with_source(time.clone());
        clock.tick();

        time.set_ms(400.0);
        assert_eq!(clock.tick().dt, 0.0);

        // The earlier timestamp still becomes the new baseline.
        time.set_ms(410.0);
        assert_relative_eq!(clock.tick().dt, 0.01, epsilon = 1e-6);
    }

    #[test]
    fn clamps_apply_when_configured() {
        let time = ManualTime::new();
        let mut clock = FrameClock::with_source(time.clone()).with_clamps(0.001, 0.25);
        clock.tick();

        time.advance_ms(5_000.0);
        assert_relative_eq!(clock.tick().dt, 0.25);

        time.advance_ms(0.0);
        assert_relative_eq!(clock.tick().dt, 0.001);
    }

    #[test]
    fn reset_rebases_on_current_time() {
        let time = ManualTime::new();
        let mut clock = FrameClock::with_source(time.clone());
        time.set_ms(10_000.0);
        clock.reset();

        time.advance_ms(20.0);
        assert_relative_eq!(clock.tick().dt, 0.02, epsilon = 1e-6);
    }
}
