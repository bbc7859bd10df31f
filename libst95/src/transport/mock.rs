// libst95-rs/libst95/src/transport/mock.rs

use std::collections::VecDeque;

use crate::transport::traits::Transport;
use crate::Result;

/// Mock transport for unit tests. It records written command bytes and
/// serves reads from a pre-seeded byte stream; like a real SPI line, reads
/// past the end of the stream return zeros instead of failing.
#[derive(Debug, Default)]
pub struct MockTransport {
    /// Every `write_bytes` payload, in order.
    pub written: Vec<Vec<u8>>,
    /// Byte stream served to `read_bytes`.
    pub read_stream: VecDeque<u8>,
    /// Scripted results for `wait_ready_edge`; once drained,
    /// `ready_default` is returned.
    pub ready_script: VecDeque<bool>,
    /// Result of `wait_ready_edge` when the script is empty.
    pub ready_default: bool,
    /// Result of `can_send`.
    pub can_send_result: bool,
    /// Number of `flush_chip_buffer` calls.
    pub flush_count: usize,
    /// Number of `pulse_irq_in` calls.
    pub wake_pulses: usize,
    /// Select/deselect call counters (must stay balanced).
    pub selects: usize,
    /// See `selects`.
    pub deselects: usize,
}

impl MockTransport {
    /// Create a mock that is ready to read and to send.
    pub fn new() -> Self {
        Self {
            ready_default: true,
            can_send_result: true,
            ..Self::default()
        }
    }

    /// Append bytes to the read stream.
    pub fn queue_read(&mut self, bytes: &[u8]) {
        self.read_stream.extend(bytes.iter().copied());
    }

    /// Script the next results of `wait_ready_edge` (for timeout tests).
    pub fn script_ready(&mut self, results: &[bool]) {
        self.ready_script.extend(results.iter().copied());
    }

    /// First written payload, if any. Convenience for asserting on the
    /// command frame a test expects to have been sent.
    pub fn first_written(&self) -> Option<&[u8]> {
        self.written.first().map(|v| v.as_slice())
    }
}

impl Transport for MockTransport {
    fn select(&mut self) {
        self.selects += 1;
    }

    fn deselect(&mut self) {
        self.deselects += 1;
    }

    fn exchange(&mut self, tx: &[u8], rx: &mut [u8]) -> Result<()> {
        self.written.push(tx.to_vec());
        for b in rx.iter_mut() {
            *b = self.read_stream.pop_front().unwrap_or(0x00);
        }
        Ok(())
    }

    fn write_bytes(&mut self, tx: &[u8]) -> Result<()> {
        self.written.push(tx.to_vec());
        Ok(())
    }

    fn read_bytes(&mut self, rx: &mut [u8]) -> Result<()> {
        for b in rx.iter_mut() {
            *b = self.read_stream.pop_front().unwrap_or(0x00);
        }
        Ok(())
    }

    fn wait_ready_edge(&mut self, _timeout_ms: u32) -> bool {
        self.ready_script.pop_front().unwrap_or(self.ready_default)
    }

    fn can_send(&mut self) -> bool {
        self.can_send_result
    }

    fn flush_chip_buffer(&mut self) {
        self.flush_count += 1;
        self.read_stream.clear();
    }

    fn pulse_irq_in(&mut self) {
        self.wake_pulses += 1;
    }
}
