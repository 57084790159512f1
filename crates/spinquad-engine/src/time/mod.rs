//! Time subsystem.
//!
//! Provides stable, testable frame timing utilities without coupling to the runtime.
//! Intended usage:
//! - one `FrameClock` per render loop
//! - call `tick()` once per presented frame to obtain `FrameTime`
//! - swap the `TimeSource` for a `ManualTime` in tests

mod frame_clock;
mod source;

pub use frame_clock::{FrameClock, FrameTime};
pub use source::{ManualTime, MonotonicTime, TimeSource};
