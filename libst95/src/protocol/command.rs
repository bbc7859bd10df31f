// libst95-rs/libst95/src/protocol/command.rs

//! Command framer: builds the `[code, len, payload]` frames the chip expects.

use crate::constants::{
    IDLE_DAC_DATA_H_OFFSET, IDLE_DAC_DATA_L_OFFSET, IDLE_PARAMS, IDLE_WU_PERIOD_OFFSET,
    MAX_COMMAND_PAYLOAD_LEN,
};
use crate::{Error, Result};

/// Chip command code points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CommandCode {
    /// Read chip identification string.
    Idn = 0x01,
    /// Select the active RF protocol and bit rates.
    ProtocolSelect = 0x02,
    /// Read the external RF field state.
    PollField = 0x03,
    /// Transmit and wait for a card response.
    SendRecv = 0x04,
    /// Enter listen (card emulation) mode.
    Listen = 0x05,
    /// Transmit without waiting for a response (card emulation only).
    Send = 0x06,
    /// Enter low-power idle with wake-up conditions.
    Idle = 0x07,
    /// Read a chip register.
    ReadReg = 0x08,
    /// Write a chip register.
    WriteReg = 0x09,
    /// Change the UART baud rate (unused on SPI, kept for completeness).
    BaudRate = 0x0A,
    /// Echo: the chip answers with the same single byte.
    Echo = 0x55,
}

impl CommandCode {
    /// Wire value of this command.
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Frame a command as `[code, len, payload...]`.
///
/// Echo is the one exception on the wire: it is the bare byte `0x55` with no
/// length field, and the chip echoes it back unframed.
pub fn encode(code: CommandCode, payload: &[u8]) -> Result<Vec<u8>> {
    if code == CommandCode::Echo {
        return Ok(vec![CommandCode::Echo.code()]);
    }
    if payload.len() > MAX_COMMAND_PAYLOAD_LEN {
        return Err(Error::InvalidLength {
            expected: MAX_COMMAND_PAYLOAD_LEN,
            actual: payload.len(),
        });
    }

    let mut out = Vec::with_capacity(2 + payload.len());
    out.push(code.code());
    out.push(payload.len() as u8);
    out.extend_from_slice(payload);
    Ok(out)
}

/// Build the Idle command payload with the given DAC thresholds and wake-up
/// period patched into the parameter template.
pub fn idle_params(dac_data_l: u8, dac_data_h: u8, wu_period: u8) -> [u8; IDLE_PARAMS.len()] {
    let mut params = IDLE_PARAMS;
    params[IDLE_WU_PERIOD_OFFSET] = wu_period;
    params[IDLE_DAC_DATA_L_OFFSET] = dac_data_l;
    params[IDLE_DAC_DATA_H_OFFSET] = dac_data_h;
    params
}
