use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Supplier of frame timestamps in milliseconds.
///
/// Timestamps only need to be monotonic relative to each other; the origin is
/// whatever the source considers "zero".
pub trait TimeSource {
    fn now_ms(&self) -> f64;
}

/// Wall-clock source measuring from its own creation.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicTime {
    origin: Instant,
}

impl MonotonicTime {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for MonotonicTime {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicTime {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Hand-driven source for headless loops and tests.
///
/// Clones share the same timestamp, so a test can keep one handle and give
/// another to the clock under test.
#[derive(Debug, Clone, Default)]
pub struct ManualTime {
    now_ms: Rc<Cell<f64>>,
}

impl ManualTime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_ms(&self, now_ms: f64) {
        self.now_ms.set(now_ms);
    }

    pub fn advance_ms(&self, delta_ms: f64) {
        self.now_ms.set(self.now_ms.get() + delta_ms);
    }
}

impl TimeSource for ManualTime {
    fn now_ms(&self) -> f64 {
        self.now_ms.get()
    }
}

impl<S: TimeSource + ?Sized> TimeSource for &S {
    fn now_ms(&self) -> f64 {
        (**self).now_ms()
    }
}
