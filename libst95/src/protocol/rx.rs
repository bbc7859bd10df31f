// libst95-rs/libst95/src/protocol/rx.rs

//! Receive context and the response demultiplexer.
//!
//! A chip response is one shared buffer holding, in order: payload, an
//! optional NFC-DEP start-of-data byte, optional CRC bytes and one to three
//! trailing status bytes. How those segments split depends on the active
//! protocol, the negotiated bit rate and the chip status byte; the
//! demultiplexer here peels them apart without ever writing past the
//! caller's buffer and without ever handing back a partial payload next to
//! a failure.

use crate::protocol::status::{self, STATUS_RESULTS_RESIDUAL};
use crate::types::{BitRate, Protocol, TransceiveFlags};
use crate::{Error, Result};

/// Result of one demultiplexer pass, consumed by the reader.
#[derive(Debug)]
pub(crate) struct Demuxed {
    /// Final decoded outcome.
    pub(crate) outcome: Result<()>,
    /// Payload bytes delivered to the destination buffer (including the
    /// ISO18092 length prefix and CRC placeholder bytes where applicable).
    pub(crate) received: u16,
    /// The chip FIFO must be flushed before the next transaction.
    pub(crate) flush: bool,
}

/// Describes one in-flight receive operation: the active protocol, the
/// caller-owned destination buffer, and the CRC/framing policy negotiated
/// for this exchange.
///
/// A context is built per transaction and passed by exclusive reference
/// into [`crate::reader::Reader::complete_receive`]; exactly one receive may
/// be in flight against it, which the borrow checker enforces for free.
pub struct ReceiveContext<'a> {
    protocol: Protocol,
    flags: TransceiveFlags,
    rx_buf: &'a mut [u8],
    rcvd_len: Option<&'a mut u16>,
    strip_crc: bool,
    nfcip1: bool,
    trailing: [u8; 3],
    trailing_len: usize,
    sod: Option<u8>,
    crc: Option<[u8; 2]>,
    last_status: Result<()>,
}

impl<'a> ReceiveContext<'a> {
    /// Arm a receive into `rx_buf` for the given protocol and flags.
    ///
    /// The NFC-DEP start-of-data byte is only expected for
    /// [`Protocol::Iso14443a`] with the `nfcip1` flag set.
    pub fn new(protocol: Protocol, rx_buf: &'a mut [u8], flags: TransceiveFlags) -> Self {
        Self {
            protocol,
            flags,
            rx_buf,
            rcvd_len: None,
            strip_crc: !flags.keep_rx_crc,
            nfcip1: protocol == Protocol::Iso14443a && flags.nfcip1,
            trailing: [0; 3],
            trailing_len: 0,
            sod: None,
            crc: None,
            last_status: Ok(()),
        }
    }

    /// Also write the final decoded payload length into `slot`.
    pub fn with_received_length(mut self, slot: &'a mut u16) -> Self {
        self.rcvd_len = Some(slot);
        self
    }

    /// Protocol this context was armed for.
    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// Flags this context was armed with.
    pub fn flags(&self) -> TransceiveFlags {
        self.flags
    }

    /// Trailing status bytes of the last parsed frame (1-3 bytes, empty if
    /// the frame carried none or parsing aborted before reaching them).
    pub fn trailing_status(&self) -> &[u8] {
        &self.trailing[..self.trailing_len]
    }

    /// NFC-DEP start-of-data byte consumed from the front of the payload.
    pub fn nfcip1_start_of_data(&self) -> Option<u8> {
        self.sod
    }

    /// The two CRC bytes relocated out of the payload when CRC stripping
    /// was in effect.
    pub fn stripped_crc(&self) -> Option<[u8; 2]> {
        self.crc
    }

    /// Outcome of the most recent parse against this context.
    pub fn rx_status(&self) -> Result<()> {
        self.last_status
    }

    /// Demultiplex one raw response body.
    ///
    /// `status` is the chip status byte (length-extension bits already
    /// folded out), `raw` the bytes that followed the length field, and
    /// `bit_rate` the negotiated receive rate. Flushing the chip FIFO is
    /// reported back as data so the transport side effect stays with the
    /// reader.
    pub(crate) fn demultiplex(&mut self, status: u8, raw: &[u8], bit_rate: BitRate) -> Demuxed {
        let mut len = raw.len();
        let mut rcvd: u16 = 0;
        let mut outcome = status::preliminary_outcome(status);
        let mut flush = false;
        let mut additional_count: usize = 1;
        let mut offset = 0usize;
        let mut copied = false;

        self.trailing_len = 0;
        self.sod = None;
        self.crc = None;

        // Never hand the caller payload bytes alongside a failed status.
        if outcome.is_err() && len != 0 {
            flush = true;
            len = 0;
        }

        // At 106 kbps the chip appends 2 extra collision-detail bytes to
        // ISO14443A responses.
        if self.protocol == Protocol::Iso14443a && bit_rate == BitRate::Br106 {
            additional_count += 2;
        }

        'parse: {
            let cap = self.rx_buf.len();

            if len == 0 {
                additional_count = 0;
                // ISO18092 still needs room for the length prefix and, with
                // CRC retention, the placeholder bytes appended below.
                if outcome.is_ok()
                    && self.protocol == Protocol::Iso18092
                    && (cap < 1 || (!self.strip_crc && cap < 3))
                {
                    flush = true;
                    outcome = Err(Error::NoMemory);
                    break 'parse;
                }
                copied = true;
                break 'parse;
            }

            if len < additional_count {
                flush = true;
                additional_count = 0;
                outcome = Err(Error::System);
                break 'parse;
            }
            len -= additional_count;

            // Residual-bit frames never carry a strippable CRC.
            if status == STATUS_RESULTS_RESIDUAL && self.protocol == Protocol::Iso14443a {
                self.strip_crc = false;
            }

            if self.strip_crc && self.protocol != Protocol::Iso18092 {
                if len < 2 {
                    flush = true;
                    additional_count = 0;
                    outcome = Err(Error::System);
                    break 'parse;
                }
                len -= 2;
            }

            if self.nfcip1 && len >= 1 {
                self.sod = Some(raw[offset]);
                offset += 1;
                len -= 1;
            }

            // ISO18092 needs one extra byte for the prepended length and,
            // when the CRC is kept, two more for the placeholder bytes.
            if len > cap
                || (self.protocol == Protocol::Iso18092 && len + 1 > cap)
                || (!self.strip_crc && self.protocol == Protocol::Iso18092 && len + 3 > cap)
            {
                flush = true;
                additional_count = 0;
                outcome = Err(Error::NoMemory);
                break 'parse;
            }

            rcvd = len as u16;
            if len != 0 {
                if self.protocol == Protocol::Iso18092 {
                    self.rx_buf[1..1 + len].copy_from_slice(&raw[offset..offset + len]);
                    offset += len;
                    rcvd += 1;
                    self.rx_buf[0] = (rcvd & 0xFF) as u8;
                } else {
                    self.rx_buf[..len].copy_from_slice(&raw[offset..offset + len]);
                    offset += len;
                }
            }

            if self.strip_crc && self.protocol != Protocol::Iso18092 {
                self.crc = Some([raw[offset], raw[offset + 1]]);
                offset += 2;
            }

            self.trailing[..additional_count]
                .copy_from_slice(&raw[offset..offset + additional_count]);
            self.trailing_len = additional_count;

            outcome = status::classify(
                self.protocol,
                status,
                &self.trailing[..additional_count],
                outcome,
            );
            copied = true;
        }

        // Re-append room for a caller-side CRC recomputation.
        if !self.strip_crc && self.protocol == Protocol::Iso18092 && copied && outcome.is_ok() {
            self.rx_buf[rcvd as usize] = 0x00;
            self.rx_buf[rcvd as usize + 1] = 0x00;
            rcvd += 2;
        }

        if let Some(slot) = self.rcvd_len.as_deref_mut() {
            *slot = rcvd;
        }
        self.last_status = outcome;

        Demuxed {
            outcome,
            received: rcvd,
            flush,
        }
    }
}
