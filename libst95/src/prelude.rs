// libst95-rs/libst95/src/prelude.rs

//! Convenience re-exports for the common case.

pub use crate::observer::{LogObserver, NopObserver, TraceObserver};
pub use crate::protocol::{CommandCode, ReceiveContext};
pub use crate::reader::Reader;
pub use crate::transport::{MockTransport, Transport};
pub use crate::{BitRate, Error, LinkState, Protocol, Result, TransceiveFlags};

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_hex, bytes_to_hex_spaced, ms};
