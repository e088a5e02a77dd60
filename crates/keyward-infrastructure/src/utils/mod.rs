//! Infrastructure utilities
//!
//! Timing instrumentation and the clocks consumed by token expiry checks.

mod clock;
mod timing;

pub use clock::{ManualClock, SystemClock};
pub use timing::TimedOperation;
