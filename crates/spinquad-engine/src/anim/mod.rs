//! Animation driving.
//!
//! The runtime calls [`AnimationDriver::step`] once per display refresh. Headless
//! callers (tests, offline rendering) use [`AnimationDriver::run`] with a
//! [`ManualTime`](crate::time::ManualTime) source instead.

mod driver;
mod stop;

pub use driver::{AnimationDriver, StepOutcome};
pub use stop::StopSignal;
