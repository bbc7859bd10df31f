// libst95-rs/libst95/src/protocol/status.rs

//! Chip status byte decoding: the fixed status-to-outcome table and the
//! per-protocol trailing-byte classifiers.

use crate::types::Protocol;
use crate::{Error, Result};

/// Frame received correctly.
pub const STATUS_FRAME_OK: u8 = 0x00;
/// Frame received correctly, additional CRC/parity information appended.
pub const STATUS_FRAME_OK_INFO: u8 = 0x80;
/// Invalid command length.
pub const STATUS_INVALID_CMD_LENGTH: u8 = 0x82;
/// Invalid protocol selected.
pub const STATUS_INVALID_PROTOCOL: u8 = 0x83;
/// Hardware communication error.
pub const STATUS_COM_ERROR: u8 = 0x86;
/// Frame wait timeout: no valid reception.
pub const STATUS_FRAME_WAIT_TIMEOUT: u8 = 0x87;
/// Invalid start of frame.
pub const STATUS_INVALID_SOF: u8 = 0x88;
/// Receive buffer overflow, data still arriving.
pub const STATUS_OVERFLOW: u8 = 0x89;
/// Framing error (bad start/stop bit).
pub const STATUS_FRAMING: u8 = 0x8A;
/// Extra guard time (EGT) timeout.
pub const STATUS_EGT: u8 = 0x8B;
/// Reception lost without EOF (or subcarrier lost).
pub const STATUS_RECEPTION_LOST: u8 = 0x8E;
/// No external RF field detected.
pub const STATUS_NO_FIELD: u8 = 0x8F;
/// Frame ended with residual bits in the last byte.
pub const STATUS_RESULTS_RESIDUAL: u8 = 0x90;
/// SOF error (ISO14443B high-rate decoder).
pub const STATUS_SOF_61: u8 = 0x61;
/// CRC error (ISO14443B high-rate decoder).
pub const STATUS_CRC_62: u8 = 0x62;
/// SOF high-part error (ISO14443B high-rate decoder).
pub const STATUS_SOF_HIGH_63: u8 = 0x63;
/// SOF low-part error (ISO14443B high-rate decoder).
pub const STATUS_SOF_LOW_65: u8 = 0x65;
/// EGT error (ISO14443B high-rate decoder).
pub const STATUS_EGT_66: u8 = 0x66;
/// TR1 too long (ISO14443B high-rate decoder).
pub const STATUS_TR1_TOO_LONG_67: u8 = 0x67;
/// TR1 too short (ISO14443B high-rate decoder).
pub const STATUS_TR1_TOO_SHORT_68: u8 = 0x68;

/// ISO15693 trailing byte: collision detected.
pub const ISO15693_COLLISION_BIT: u8 = 0x01;
/// ISO15693 trailing byte: CRC error.
pub const ISO15693_CRC_BIT: u8 = 0x02;
/// ISO14443A trailing byte: collision detected.
pub const ISO14443A_COLLISION_BIT: u8 = 0x80;
/// ISO14443A trailing byte: CRC error.
pub const ISO14443A_CRC_BIT: u8 = 0x20;
/// ISO14443A trailing byte: parity error.
pub const ISO14443A_PARITY_BIT: u8 = 0x10;
/// ISO14443B trailing byte: CRC error.
pub const ISO14443B_CRC_BIT: u8 = 0x02;
/// ISO18092 trailing byte: CRC error.
pub const ISO18092_CRC_BIT: u8 = 0x02;

/// Map a chip status byte to its preliminary outcome, before the trailing
/// bytes have been inspected.
///
/// "Frame OK", "frame OK with additional info" and "residual bits present"
/// count as success; several distinct framing-related chip codes collapse
/// into [`Error::Framing`]; anything unrecognized is [`Error::System`].
pub fn preliminary_outcome(status: u8) -> Result<()> {
    match status {
        STATUS_FRAME_OK | STATUS_FRAME_OK_INFO | STATUS_RESULTS_RESIDUAL => Ok(()),
        STATUS_COM_ERROR => Err(Error::Internal),
        STATUS_FRAME_WAIT_TIMEOUT => Err(Error::Timeout),
        STATUS_OVERFLOW => Err(Error::HwOverrun),
        STATUS_INVALID_SOF
        | STATUS_RECEPTION_LOST
        | STATUS_FRAMING
        | STATUS_EGT
        | STATUS_SOF_61
        | STATUS_SOF_HIGH_63
        | STATUS_SOF_LOW_65
        | STATUS_EGT_66
        | STATUS_TR1_TOO_LONG_67
        | STATUS_TR1_TOO_SHORT_68 => Err(Error::Framing),
        STATUS_CRC_62 => Err(Error::Crc),
        STATUS_NO_FIELD => Err(Error::LinkLoss),
        _ => Err(Error::System),
    }
}

/// Refine an otherwise good outcome from the protocol-specific trailing
/// status bytes.
///
/// The match is exhaustive over [`Protocol`]: adding a protocol variant
/// without deciding its classification is a compile error.
pub fn classify(
    protocol: Protocol,
    status: u8,
    trailing: &[u8],
    prior: Result<()>,
) -> Result<()> {
    let Some(&first) = trailing.first() else {
        return prior;
    };

    match protocol {
        Protocol::Iso15693 => {
            if first & ISO15693_COLLISION_BIT != 0 {
                Err(Error::RfCollision)
            } else if first & ISO15693_CRC_BIT != 0 {
                Err(Error::Crc)
            } else {
                prior
            }
        }
        Protocol::Iso14443a => {
            if status == STATUS_RESULTS_RESIDUAL {
                // Low nibble of the first trailing byte encodes the valid
                // bit count of the last, non-byte-aligned byte.
                Err(Error::IncompleteByte {
                    valid_bits: (first & 0x0F) % 8,
                })
            } else if first & ISO14443A_COLLISION_BIT != 0 {
                Err(Error::RfCollision)
            } else if first & ISO14443A_PARITY_BIT != 0 {
                Err(Error::Parity)
            } else if first & ISO14443A_CRC_BIT != 0 {
                Err(Error::Crc)
            } else {
                prior
            }
        }
        Protocol::Iso14443b => {
            if first & ISO14443B_CRC_BIT != 0 {
                Err(Error::Crc)
            } else {
                prior
            }
        }
        Protocol::Iso18092 => {
            if first & ISO18092_CRC_BIT != 0 {
                Err(Error::Crc)
            } else {
                prior
            }
        }
        Protocol::CeIso14443a => prior,
    }
}
