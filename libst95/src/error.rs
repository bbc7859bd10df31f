// libst95-rs/libst95/src/error.rs

use thiserror::Error;

/// Unified transaction outcome taxonomy.
///
/// Chip status bytes map many-to-one onto these variants (see
/// [`crate::protocol::status`]); the protocol-specific refinements
/// (`RfCollision`, `Parity`, `IncompleteByte`) are layered on top of an
/// otherwise good frame by the trailing-byte classifiers, so the decoded
/// payload and received length remain valid when they are reported.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Chip reported an internal communication error.
    #[error("chip internal communication error")]
    Internal,

    /// Frame wait time expired without a valid reception.
    #[error("operation timed out")]
    Timeout,

    /// Chip receive FIFO overflowed while data was still arriving.
    #[error("hardware receive overrun")]
    HwOverrun,

    /// Invalid SOF, lost reception or EGT/TR1 timing violation.
    #[error("rf framing error")]
    Framing,

    /// CRC mismatch on the received frame.
    #[error("crc mismatch")]
    Crc,

    /// No RF field present (remote field switched off or never seen).
    #[error("rf link lost")]
    LinkLoss,

    /// Unrecognized chip status, malformed frame length or an internal
    /// consistency failure (e.g. fewer bytes than trailing metadata needs).
    #[error("system error")]
    System,

    /// Destination buffer too small for the decoded frame.
    #[error("destination buffer too small")]
    NoMemory,

    /// Bit collision detected during reception.
    #[error("rf collision")]
    RfCollision,

    /// Parity error on the received frame.
    #[error("parity error")]
    Parity,

    /// The frame ended on a non-byte boundary; `valid_bits` is the number of
    /// valid bits in the last byte (0..8).
    #[error("incomplete last byte: {valid_bits} valid bits")]
    IncompleteByte {
        /// Valid bit count of the last received byte.
        valid_bits: u8,
    },

    /// Caller passed a buffer or payload of unusable length.
    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Length the operation required.
        expected: usize,
        /// Length actually supplied.
        actual: usize,
    },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
