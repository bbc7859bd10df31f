// libst95-rs/libst95/src/constants.rs
//! Chip wire constants shared across the crate.

/// SPI control byte: the next bytes are a command for the chip.
pub const SPI_CTRL_SEND: u8 = 0x00;

/// SPI control byte: reset the chip's SPI interface.
pub const SPI_CTRL_RESET: u8 = 0x01;

/// SPI control byte: read the chip's response.
pub const SPI_CTRL_READ: u8 = 0x02;

/// SPI control byte: poll the chip's flags register.
pub const SPI_CTRL_POLL: u8 = 0x03;

/// Poll flags bit 3: data can be read from the chip.
pub const POLL_FLAG_DATA_CAN_BE_READ: u8 = 0x08;

/// Poll flags bit 2: the chip accepts a new command.
pub const POLL_FLAG_DATA_CAN_BE_SEND: u8 = 0x04;

/// Offset of the command/result code byte in a wire frame.
pub const FRAME_CODE_OFFSET: usize = 0;

/// Offset of the length byte in a wire frame.
pub const FRAME_LENGTH_OFFSET: usize = 1;

/// Offset of the first data byte in a wire frame.
pub const FRAME_DATA_OFFSET: usize = 2;

/// Maximum payload length a single command frame can carry.
pub const MAX_COMMAND_PAYLOAD_LEN: usize = 255;

/// Scratch buffer size covering the largest single chip response
/// (payload + CRC + trailing status bytes, length-extension included).
pub const COMM_BUFFER_LEN: usize = 528;

/// Poll timeout for short control transactions (echo, idle, register access).
pub const CONTROL_POLL_TIMEOUT_MS: u32 = 100;

/// Idle command parameter template (WU source, enter/WU/leave control,
/// WU period, oscillator/DAC start, DAC data, swing count, max sleep).
pub const IDLE_PARAMS: [u8; 14] = [
    0x0A, 0x21, 0x00, 0x38, 0x01, 0x18, 0x00, 0x20, 0x60, 0x60, 0x74, 0x84, 0x3F, 0x00,
];

/// Offset of the wake-up period byte within [`IDLE_PARAMS`].
pub const IDLE_WU_PERIOD_OFFSET: usize = 7;

/// Offset of the DAC data low byte within [`IDLE_PARAMS`].
pub const IDLE_DAC_DATA_L_OFFSET: usize = 10;

/// Offset of the DAC data high byte within [`IDLE_PARAMS`].
pub const IDLE_DAC_DATA_H_OFFSET: usize = 11;

/// Response buffer size for draining a wake-up (idle exit) response.
pub const IDLE_RESPONSE_BUF_LEN: usize = 4;
