// libst95-rs/libst95/src/transport/traits.rs

use crate::Result;

/// Transport trait abstracts the physical link away from the transaction
/// layer: chip select, half-duplex byte exchange, the chip's readiness
/// signals, and the FIFO flush recovery action.
///
/// All methods are blocking; the readiness waits are the only operations
/// that may take noticeable time and both are bounded.
pub trait Transport {
    /// Assert chip select.
    fn select(&mut self);

    /// Release chip select.
    fn deselect(&mut self);

    /// Exchange bytes on the half-duplex link. `tx` and `rx` have the same
    /// length; on a write the received bytes are discarded by the caller,
    /// on a read the transmitted bytes are idle filler.
    fn exchange(&mut self, tx: &[u8], rx: &mut [u8]) -> Result<()>;

    /// Write `tx` to the chip, discarding whatever comes back.
    fn write_bytes(&mut self, tx: &[u8]) -> Result<()> {
        let mut scratch = vec![0u8; tx.len()];
        self.exchange(tx, &mut scratch)
    }

    /// Read `rx.len()` bytes from the chip, clocking out idle filler.
    fn read_bytes(&mut self, rx: &mut [u8]) -> Result<()> {
        let tx = vec![0u8; rx.len()];
        self.exchange(&tx, rx)
    }

    /// Block until the chip's readiness line signals data can be read
    /// (falling IRQ_OUT edge). Returns false if the timeout elapsed first.
    fn wait_ready_edge(&mut self, timeout_ms: u32) -> bool;

    /// Short-poll whether the chip currently accepts a command.
    fn can_send(&mut self) -> bool;

    /// Discard any unread bytes left in the chip's internal FIFO. Invoked by
    /// the transaction layer after every detected framing/timeout/overflow
    /// failure so the next transaction starts clean.
    fn flush_chip_buffer(&mut self);

    /// Pulse the IRQ_IN line to wake the chip from idle. Transports without
    /// a dedicated wake line can leave the default no-op.
    fn pulse_irq_in(&mut self) {}
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn select(&mut self) {
        (**self).select()
    }

    fn deselect(&mut self) {
        (**self).deselect()
    }

    fn exchange(&mut self, tx: &[u8], rx: &mut [u8]) -> Result<()> {
        (**self).exchange(tx, rx)
    }

    fn write_bytes(&mut self, tx: &[u8]) -> Result<()> {
        (**self).write_bytes(tx)
    }

    fn read_bytes(&mut self, rx: &mut [u8]) -> Result<()> {
        (**self).read_bytes(rx)
    }

    fn wait_ready_edge(&mut self, timeout_ms: u32) -> bool {
        (**self).wait_ready_edge(timeout_ms)
    }

    fn can_send(&mut self) -> bool {
        (**self).can_send()
    }

    fn flush_chip_buffer(&mut self) {
        (**self).flush_chip_buffer()
    }

    fn pulse_irq_in(&mut self) {
        (**self).pulse_irq_in()
    }
}
