// fixtures.rs — provides commonly used response bodies/frames

#![allow(dead_code)]

use libst95::transport::MockTransport;

/// An ISO14443A ATQA as a card would answer a REQA.
pub fn sample_atqa() -> [u8; 2] {
    [0x44, 0x00]
}

/// An ISO15693 inventory response payload (flags, DSFID, 8-byte UID).
pub fn sample_inventory_payload() -> Vec<u8> {
    let mut payload = vec![0x00, 0x00];
    payload.extend_from_slice(&[0xE0, 0x04, 0x01, 0x50, 0x33, 0x82, 0x9A, 0xF1]);
    payload
}

/// Build an ISO14443A (106 kbps) response body: payload, CRC, three
/// trailing status bytes.
pub fn type_a_body(payload: &[u8], crc: [u8; 2], trailing: [u8; 3]) -> Vec<u8> {
    let mut body = payload.to_vec();
    body.extend_from_slice(&crc);
    body.extend_from_slice(&trailing);
    body
}

/// Build a single-trailing-byte response body (ISO15693, ISO14443B,
/// ISO18092, card emulation, and Type A above 106 kbps).
pub fn one_trailer_body(payload: &[u8], crc: Option<[u8; 2]>, trailing: u8) -> Vec<u8> {
    let mut body = payload.to_vec();
    if let Some(crc) = crc {
        body.extend_from_slice(&crc);
    }
    body.push(trailing);
    body
}

/// Seed a chip response frame onto the mock read stream.
pub fn seed_frame(mock: &mut MockTransport, status: u8, body: &[u8]) {
    libst95::test_support::seed_frame(mock, status, body);
}
