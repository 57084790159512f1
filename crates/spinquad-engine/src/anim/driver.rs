use crate::core::AppControl;
use crate::time::{FrameClock, FrameTime, MonotonicTime, TimeSource};

use super::stop::StopSignal;

/// Result of a single [`AnimationDriver::step`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum StepOutcome {
    /// The callback ran; schedule another frame.
    Continue(FrameTime),
    /// The callback ran and asked to stop.
    Exit(FrameTime),
    /// The stop signal was already raised; nothing ran.
    Stopped,
}

impl StepOutcome {
    pub fn should_continue(&self) -> bool {
        matches!(self, StepOutcome::Continue(_))
    }
}

/// Invokes a frame callback once per refresh with the elapsed time since the
/// previous invocation.
///
/// Callbacks never overlap: each `step` finishes before the next one starts.
/// Once the callback returns [`AppControl::Exit`] the driver raises its own
/// stop signal, so later steps are no-ops.
#[derive(Debug)]
pub struct AnimationDriver<S = MonotonicTime> {
    clock: FrameClock<S>,
    stop: StopSignal,
}

impl AnimationDriver<MonotonicTime> {
    pub fn new() -> Self {
        Self::with_clock(FrameClock::new())
    }
}

impl Default for AnimationDriver<MonotonicTime> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: TimeSource> AnimationDriver<S> {
    pub fn with_clock(clock: FrameClock<S>) -> Self {
        Self {
            clock,
            stop: StopSignal::new(),
        }
    }

    /// Replaces the driver's stop signal with one owned by the caller.
    pub fn with_stop_signal(mut self, stop: StopSignal) -> Self {
        self.stop = stop;
        self
    }

    /// Returns a handle that stops this driver when raised.
    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    pub fn is_stopped(&self) -> bool {
        self.stop.is_stopped()
    }

    /// Runs one frame.
    pub fn step<F>(&mut self, mut frame: F) -> StepOutcome
    where
        F: FnMut(FrameTime) -> AppControl,
    {
        if self.stop.is_stopped() {
            return StepOutcome::Stopped;
        }

        let ft = self.clock.tick();
        match frame(ft) {
            AppControl::Continue => StepOutcome::Continue(ft),
            AppControl::Exit => {
                self.stop.stop();
                StepOutcome::Exit(ft)
            }
        }
    }

    /// Steps until the callback exits or the stop signal is raised.
    ///
    /// Returns the number of frames that ran. Pacing is the callback's concern;
    /// a headless loop typically advances a `ManualTime` inside it.
    pub fn run<F>(&mut self, mut frame: F) -> u64
    where
        F: FnMut(FrameTime) -> AppControl,
    {
        let mut frames = 0;
        loop {
            match self.step(&mut frame) {
                StepOutcome::Continue(_) => frames += 1,
                StepOutcome::Exit(_) => return frames + 1,
                StepOutcome::Stopped => return frames,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::time::ManualTime;

    fn manual_driver() -> (ManualTime, AnimationDriver<ManualTime>) {
        let time = ManualTime::new();
        let driver = AnimationDriver::with_clock(FrameClock::with_source(time.clone()));
        (time, driver)
    }

    #[test]
    fn step_passes_elapsed_seconds() {
        let (time, mut driver) = manual_driver();
        time.set_ms(16.0);

        let mut seen = Vec::new();
        driver.step(|ft| {
            seen.push(ft.dt);
            AppControl::Continue
        });
        time.advance_ms(32.0);
        driver.step(|ft| {
            seen.push(ft.dt);
            AppControl::Continue
        });

        assert_eq!(seen.len(), 2);
        assert_relative_eq!(seen[0], 0.016, epsilon = 1e-6);
        assert_relative_eq!(seen[1], 0.032, epsilon = 1e-6);
    }

    #[test]
    fn exit_raises_stop_signal() {
        let (_, mut driver) = manual_driver();
        let outcome = driver.step(|_| AppControl::Exit);

        assert!(matches!(outcome, StepOutcome::Exit(_)));
        assert!(driver.is_stopped());
        assert_eq!(driver.step(|_| AppControl::Continue), StepOutcome::Stopped);
    }

    #[test]
    fn external_stop_prevents_further_frames() {
        let (_, mut driver) = manual_driver();
        let stop = driver.stop_signal();
        stop.stop();

        let mut called = false;
        let outcome = driver.step(|_| {
            called = true;
            AppControl::Continue
        });

        assert_eq!(outcome, StepOutcome::Stopped);
        assert!(!called);
    }

    #[test]
    fn run_stops_when_signal_raised_mid_loop() {
        let (time, driver) = manual_driver();
        let stop = StopSignal::new();
        let mut driver = driver.with_stop_signal(stop.clone());

        let frames = driver.run(|ft| {
            time.advance_ms(16.0);
            if ft.frame_index == 9 {
                stop.stop();
            }
            AppControl::Continue
        });

        assert_eq!(frames, 10);
    }

    #[test]
    fn run_counts_exit_frame() {
        let (_, mut driver) = manual_driver();
        let frames = driver.run(|ft| {
            if ft.frame_index == 2 {
                AppControl::Exit
            } else {
                AppControl::Continue
            }
        });
        assert_eq!(frames, 3);
    }
}
