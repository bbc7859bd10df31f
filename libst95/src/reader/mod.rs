// libst95-rs/libst95/src/reader/mod.rs

//! Transaction orchestration: command framing, poll-based flow control and
//! response completion against one chip instance.
//!
//! One logical transaction at a time: send, poll for readiness, read, parse.
//! Callers on multi-threaded platforms must serialize access for the whole
//! sequence (one transceive in flight per reader instance).

use crate::constants::{
    COMM_BUFFER_LEN, CONTROL_POLL_TIMEOUT_MS, FRAME_CODE_OFFSET, FRAME_DATA_OFFSET,
    FRAME_LENGTH_OFFSET, IDLE_RESPONSE_BUF_LEN, SPI_CTRL_READ, SPI_CTRL_SEND,
};
use crate::observer::{NopObserver, TraceObserver};
use crate::protocol::command::{self, CommandCode};
use crate::protocol::rx::ReceiveContext;
use crate::protocol::status::{STATUS_COM_ERROR, STATUS_FRAME_OK_INFO};
use crate::transport::Transport;
use crate::types::{BitRate, LinkState, Protocol, TransceiveFlags};
use crate::{Error, Result};

/// Command/response transaction engine for one chip.
///
/// Owns the transport, the (passive) trace observer, the negotiated receive
/// bit rate and the card-emulation listen flags.
pub struct Reader<T: Transport> {
    transport: T,
    observer: Box<dyn TraceObserver>,
    rx_bit_rate: BitRate,
    in_listen: bool,
    link_state: LinkState,
}

impl<T: Transport> Reader<T> {
    /// Create a reader over `transport` with the no-op observer.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            observer: Box::new(NopObserver),
            rx_bit_rate: BitRate::default(),
            in_listen: false,
            link_state: LinkState::Idle,
        }
    }

    /// Replace the trace observer.
    pub fn with_observer(mut self, observer: Box<dyn TraceObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Borrow the underlying transport (tests inspect the mock this way).
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutably borrow the underlying transport.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Receive bit rate used to size the trailing status bytes.
    pub fn rx_bit_rate(&self) -> BitRate {
        self.rx_bit_rate
    }

    /// Record the bit rate negotiated by the protocol-select layer above.
    pub fn set_rx_bit_rate(&mut self, bit_rate: BitRate) {
        self.rx_bit_rate = bit_rate;
    }

    /// True while the chip is parked in listen mode waiting for a reader.
    pub fn is_in_listen(&self) -> bool {
        self.in_listen
    }

    /// Note that the chip entered listen mode. Called by the activation
    /// layer above after it issues the Listen command.
    pub fn mark_listening(&mut self) {
        self.in_listen = true;
    }

    /// Card-emulation link state as last observed.
    pub fn link_state(&self) -> LinkState {
        self.link_state
    }

    /// Transmission completes synchronously with the SPI write on this chip.
    pub fn is_transmit_completed(&self) -> bool {
        true
    }

    /// Block until the chip signals its response is ready to be read, or
    /// `timeout_ms` elapses.
    pub fn poll_for_read(&mut self, timeout_ms: u32) -> Result<()> {
        if self.transport.wait_ready_edge(timeout_ms) {
            Ok(())
        } else {
            log::debug!("ready poll timed out after {} ms", timeout_ms);
            Err(Error::Timeout)
        }
    }

    /// Check that the chip accepts a command right now.
    pub fn poll_for_send(&mut self) -> Result<()> {
        if self.transport.can_send() {
            Ok(())
        } else {
            Err(Error::Timeout)
        }
    }

    /// Frame and transmit a data exchange: SendRecv normally, the
    /// listen-side Send command for card emulation. The NFC-DEP flag is
    /// consumed when the response is parsed, not here.
    pub fn send_transceive(
        &mut self,
        payload: &[u8],
        protocol: Protocol,
        flags: TransceiveFlags,
    ) -> Result<()> {
        let code = if protocol.is_card_emulation() {
            CommandCode::Send
        } else {
            CommandCode::SendRecv
        };
        if flags.nfcip1 && protocol == Protocol::Iso14443a {
            log::trace!("nfc-dep start-of-data expected in the response");
        }
        self.send_frame(code, payload)
    }

    /// Run a short control transaction: transmit the pre-framed command
    /// `cmd` (`[code, len, params...]`), poll for readiness and read the
    /// full response frame into `resp` (`[result, len, data...]`).
    ///
    /// Returns the total frame length written to `resp`. Fails with
    /// `NoMemory` when `resp` cannot hold even the two framing bytes or the
    /// actual response body, and with `System` when the readiness poll times
    /// out; both failure paths flush the chip buffer, and the latter leaves
    /// a communication-error header in `resp`.
    pub fn send_command_with_response(&mut self, cmd: &[u8], resp: &mut [u8]) -> Result<usize> {
        if resp.len() < FRAME_DATA_OFFSET {
            return Err(Error::NoMemory);
        }
        if cmd.len() < FRAME_DATA_OFFSET
            || cmd.len() < FRAME_DATA_OFFSET + cmd[FRAME_LENGTH_OFFSET] as usize
        {
            return Err(Error::InvalidLength {
                expected: FRAME_DATA_OFFSET,
                actual: cmd.len(),
            });
        }

        resp[FRAME_CODE_OFFSET] = STATUS_COM_ERROR;
        resp[FRAME_LENGTH_OFFSET] = 0x00;

        let frame = &cmd[..FRAME_DATA_OFFSET + cmd[FRAME_LENGTH_OFFSET] as usize];
        self.observer.command_sent(frame);
        let mut wire = Vec::with_capacity(1 + frame.len());
        wire.push(SPI_CTRL_SEND);
        wire.extend_from_slice(frame);
        self.write_wire(&wire)?;

        if self.poll_for_read(CONTROL_POLL_TIMEOUT_MS).is_err() {
            self.transport.flush_chip_buffer();
            return Err(Error::System);
        }

        let (status, len) = self.read_raw_into(&mut resp[FRAME_DATA_OFFSET..])?;
        resp[FRAME_LENGTH_OFFSET] = (len & 0xFF) as u8;
        // Responses longer than 255 bytes carry length bits 9:8 in result
        // byte bits 6:5; put them back for the caller.
        resp[FRAME_CODE_OFFSET] = status | (((len >> 3) as u8) & 0x60);
        if resp.len() < len + FRAME_DATA_OFFSET {
            self.transport.flush_chip_buffer();
            return Err(Error::NoMemory);
        }
        self.observer
            .response_read(resp[FRAME_CODE_OFFSET], &resp[FRAME_DATA_OFFSET..][..len]);
        Ok(len + FRAME_DATA_OFFSET)
    }

    /// Exchange the echo byte with the chip. Used right after reset to
    /// verify the link; always leaves listen mode.
    pub fn command_echo(&mut self) -> Result<()> {
        let res = self.echo_inner();
        self.in_listen = false;
        res
    }

    fn echo_inner(&mut self) -> Result<()> {
        // The chip has just been reset, so make sure it accepts a command
        // before clocking one out.
        self.poll_for_send()?;

        let frame = command::encode(CommandCode::Echo, &[])?;
        self.observer.command_sent(&frame);
        let mut wire = Vec::with_capacity(1 + frame.len());
        wire.push(SPI_CTRL_SEND);
        wire.extend_from_slice(&frame);
        self.write_wire(&wire)?;

        self.poll_for_read(CONTROL_POLL_TIMEOUT_MS)?;

        let mut echo = [0u8; 1];
        self.transport.select();
        let res = (|| {
            self.transport.write_bytes(&[SPI_CTRL_READ])?;
            self.transport.read_bytes(&mut echo)
        })();
        self.transport.deselect();
        res?;

        if echo[0] != CommandCode::Echo.code() {
            log::debug!("unexpected echo response: {:02x}", echo[0]);
            self.transport.flush_chip_buffer();
            return Err(Error::System);
        }
        self.observer.response_read(echo[0], &[]);
        Ok(())
    }

    /// Put the chip into low-power idle with the given DAC thresholds and
    /// wake-up period.
    pub fn send_idle(&mut self, dac_data_l: u8, dac_data_h: u8, wu_period: u8) -> Result<()> {
        let params = command::idle_params(dac_data_l, dac_data_h, wu_period);
        self.send_frame(CommandCode::Idle, &params)
    }

    /// Wake the chip from idle: pulse IRQ_IN, wait for it to come up and
    /// drain the wake-up response.
    pub fn kill_idle(&mut self) -> Result<()> {
        self.transport.pulse_irq_in();
        self.poll_for_read(CONTROL_POLL_TIMEOUT_MS)?;

        let mut buf = [0u8; IDLE_RESPONSE_BUF_LEN];
        let (status, len) = self.read_raw_into(&mut buf)?;
        self.observer.response_read(status, &buf[..len.min(buf.len())]);
        Ok(())
    }

    /// Complete an in-flight receive: read the raw response and demultiplex
    /// it through `ctx`.
    ///
    /// On return `ctx.rx_status()` holds the same outcome; the
    /// protocol-refined errors (`RfCollision`, `Parity`, `IncompleteByte`)
    /// still deliver payload and trailing bytes through the context.
    pub fn complete_receive(&mut self, ctx: &mut ReceiveContext<'_>) -> Result<()> {
        let mut raw = [0u8; COMM_BUFFER_LEN];
        let (status, len) = self.read_raw_into(&mut raw)?;
        let len = len.min(raw.len());
        self.observer.response_read(status, &raw[..len]);

        let d = ctx.demultiplex(status, &raw[..len], self.rx_bit_rate);
        if d.flush {
            self.transport.flush_chip_buffer();
        }

        if ctx.protocol().is_card_emulation() {
            // Data just arrived from a reader, so the chip is no longer
            // waiting to be read: field on, anticollision done.
            self.in_listen = false;
            self.link_state = LinkState::Active;
        }

        d.outcome
    }

    /// Full transaction: send, poll for readiness (bounded by
    /// `timeout_ms`), read and parse. A poll timeout flushes the chip
    /// buffer and terminates the transaction; there is no partial result.
    pub fn transceive(
        &mut self,
        payload: &[u8],
        timeout_ms: u32,
        ctx: &mut ReceiveContext<'_>,
    ) -> Result<()> {
        self.send_transceive(payload, ctx.protocol(), ctx.flags())?;
        if let Err(e) = self.poll_for_read(timeout_ms) {
            self.transport.flush_chip_buffer();
            return Err(e);
        }
        self.complete_receive(ctx)
    }

    fn send_frame(&mut self, code: CommandCode, payload: &[u8]) -> Result<()> {
        let frame = command::encode(code, payload)?;
        self.observer.command_sent(&frame);
        let mut wire = Vec::with_capacity(1 + frame.len());
        wire.push(SPI_CTRL_SEND);
        wire.extend_from_slice(&frame);
        self.write_wire(&wire)
    }

    fn write_wire(&mut self, wire: &[u8]) -> Result<()> {
        self.transport.select();
        let res = self.transport.write_bytes(wire);
        self.transport.deselect();
        res
    }

    /// Read a raw response: status byte, length byte, then up to
    /// `buf.len()` body bytes. Returns the status (length-extension bits
    /// folded out) and the full body length the chip announced, which may
    /// exceed what fits in `buf`.
    fn read_raw_into(&mut self, buf: &mut [u8]) -> Result<(u8, usize)> {
        self.transport.select();
        let res = (|| {
            self.transport.write_bytes(&[SPI_CTRL_READ])?;
            let mut head = [0u8; 2];
            self.transport.read_bytes(&mut head)?;

            let mut status = head[0];
            let mut len = head[1] as usize;
            if (status & 0x9F) == STATUS_FRAME_OK_INFO {
                len |= ((status & 0x60) as usize) << 3;
                status = STATUS_FRAME_OK_INFO;
            }

            let take = len.min(buf.len());
            self.transport.read_bytes(&mut buf[..take])?;
            Ok((status, len))
        })();
        self.transport.deselect();
        res
    }
}
