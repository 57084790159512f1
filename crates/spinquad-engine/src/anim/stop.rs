use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cloneable cancellation flag shared between a driver and whoever wants it stopped.
///
/// Once raised the signal stays raised.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    raised: Arc<AtomicBool>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.raised.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.raised.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_observe_the_same_flag() {
        let a = StopSignal::new();
        let b = a.clone();
        assert!(!b.is_stopped());

        a.stop();
        assert!(b.is_stopped());
    }

    #[test]
    fn raised_from_another_thread() {
        let signal = StopSignal::new();
        let remote = signal.clone();
        std::thread::spawn(move || remote.stop())
            .join()
            .expect("stopper thread panicked");
        assert!(signal.is_stopped());
    }
}
