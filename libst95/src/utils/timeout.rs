// libst95-rs/libst95/src/utils/timeout.rs

//! Timeout helpers for the poll primitives.
//!
//! Every wait in this crate is bounded by an explicit timeout; these helpers
//! centralize the default values and give transports a simple deadline type
//! to implement `wait_ready_edge` against.

use std::time::{Duration, Instant};

/// Default frame-wait timeout in milliseconds for data transactions when the
/// caller has no protocol-derived value at hand.
pub const DEFAULT_FRAME_WAIT_TIMEOUT_MS: u32 = 1000;

/// Convert milliseconds to a `Duration`.
pub fn ms(ms: u32) -> Duration {
    Duration::from_millis(u64::from(ms))
}

/// A monotonic deadline, `elapsed` once the given timeout has passed.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    started: Instant,
    timeout: Duration,
}

impl Deadline {
    /// Start a deadline `timeout_ms` milliseconds from now.
    pub fn after_ms(timeout_ms: u32) -> Self {
        Self {
            started: Instant::now(),
            timeout: ms(timeout_ms),
        }
    }

    /// True once the timeout has fully elapsed.
    pub fn elapsed(&self) -> bool {
        self.started.elapsed() >= self.timeout
    }
}
