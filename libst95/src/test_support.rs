// libst95-rs/libst95/src/test_support.rs

//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize common MockTransport setup so tests across the
//! crate and tests/ directory can reuse the same logic.
#![allow(dead_code)]

use crate::constants::MAX_COMMAND_PAYLOAD_LEN;
use crate::protocol::status::STATUS_FRAME_OK_INFO;
use crate::reader::Reader;
use crate::transport::MockTransport;

/// Seed one chip response frame onto a mock's read stream: the wire status
/// byte, the length byte and the body.
///
/// Bodies longer than 255 bytes can only be announced through the
/// length-extension bits of the "frame OK with additional info" status, so
/// `status` must be that value when `body` exceeds one length byte.
#[doc(hidden)]
pub fn seed_frame(mock: &mut MockTransport, status: u8, body: &[u8]) {
    let len = body.len();
    let wire_status = if len > MAX_COMMAND_PAYLOAD_LEN {
        assert_eq!(
            status, STATUS_FRAME_OK_INFO,
            "only the 0x80 status can announce bodies longer than 255 bytes"
        );
        status | (((len >> 3) as u8) & 0x60)
    } else {
        status
    };
    mock.queue_read(&[wire_status, (len & 0xFF) as u8]);
    mock.queue_read(body);
}

/// Convenience: a reader over a fresh mock whose stream already holds one
/// response frame.
#[doc(hidden)]
pub fn reader_with_frame(status: u8, body: &[u8]) -> Reader<MockTransport> {
    let mut mock = MockTransport::new();
    seed_frame(&mut mock, status, body);
    Reader::new(mock)
}
