// libst95-rs/libst95/src/types.rs

use crate::Error;

/// Contactless protocol variants the chip can have selected.
///
/// The discriminants are the chip's own protocol code points as used by the
/// ProtocolSelect command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Protocol {
    /// ISO/IEC 15693 vicinity cards.
    Iso15693 = 0x01,
    /// ISO/IEC 14443 Type A, reader (poll) side.
    Iso14443a = 0x02,
    /// ISO/IEC 14443 Type B.
    Iso14443b = 0x03,
    /// ISO/IEC 18092 (FeliCa framing).
    Iso18092 = 0x04,
    /// ISO/IEC 14443 Type A card emulation.
    CeIso14443a = 0x05,
}

impl Protocol {
    /// Chip code point for this protocol.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// True for the card-emulation variant, which transmits with the
    /// listen-side Send command instead of SendRecv.
    pub fn is_card_emulation(self) -> bool {
        matches!(self, Protocol::CeIso14443a)
    }
}

impl TryFrom<u8> for Protocol {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0x01 => Ok(Protocol::Iso15693),
            0x02 => Ok(Protocol::Iso14443a),
            0x03 => Ok(Protocol::Iso14443b),
            0x04 => Ok(Protocol::Iso18092),
            0x05 => Ok(Protocol::CeIso14443a),
            _ => Err(Error::System),
        }
    }
}

/// Negotiated RF bit rate.
///
/// The receive demultiplexer only cares about [`BitRate::Br106`]: at that
/// rate ISO14443A responses carry two extra collision-detail bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BitRate {
    /// 106 kbit/s (default after protocol selection).
    #[default]
    Br106,
    /// 212 kbit/s.
    Br212,
    /// 424 kbit/s.
    Br424,
    /// 848 kbit/s.
    Br848,
}

/// Per-transceive flags supplied by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransceiveFlags {
    /// Keep the received CRC bytes in the payload instead of stripping them.
    pub keep_rx_crc: bool,
    /// NFC-DEP (peer-to-peer) framing: a single start-of-data byte precedes
    /// the payload. Only effective for [`Protocol::Iso14443a`]; consumed when
    /// the response is parsed, not at send time.
    pub nfcip1: bool,
}

/// Card-emulation link state as last observed by the transaction layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LinkState {
    /// No reader field seen.
    #[default]
    Idle,
    /// Field present, anticollision not completed.
    Ready,
    /// Anticollision done, data exchanged with the reader.
    Active,
}
