// libst95-rs/libst95/src/observer.rs

//! Passive trace observer for command/response byte dumps.
//!
//! The observer is injected into the [`crate::reader::Reader`] and is a pure
//! side channel: it never affects control flow, and the default
//! [`NopObserver`] keeps the production code path identical to the
//! instrumented one.

use crate::utils::bytes_to_hex_spaced;

/// Receives copies of the bytes crossing the link.
pub trait TraceObserver {
    /// A command frame `[code, len, payload...]` was sent to the chip.
    fn command_sent(&mut self, frame: &[u8]) {
        let _ = frame;
    }

    /// A response was read: chip status byte plus the raw body that followed
    /// the length field.
    fn response_read(&mut self, status: u8, body: &[u8]) {
        let _ = (status, body);
    }
}

/// Default observer: discards everything.
#[derive(Debug, Default)]
pub struct NopObserver;

impl TraceObserver for NopObserver {}

/// Observer that forwards hex dumps to the `log` facade at debug level.
#[derive(Debug, Default)]
pub struct LogObserver;

impl TraceObserver for LogObserver {
    fn command_sent(&mut self, frame: &[u8]) {
        log::debug!(">>>> {}", bytes_to_hex_spaced(frame));
    }

    fn response_read(&mut self, status: u8, body: &[u8]) {
        log::debug!("<<<< {:02x} {}", status, bytes_to_hex_spaced(body));
        #[cfg(feature = "diagnostics")]
        log::trace!("response body length {}", body.len());
    }
}
