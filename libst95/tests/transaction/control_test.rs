use libst95::protocol::status::{STATUS_COM_ERROR, STATUS_FRAME_OK};
use libst95::{Error, MockTransport, Reader};

#[test]
fn idn_command_roundtrip() {
    // IDN answer: device name string, ROM CRC, all behind the usual
    // [result, len] header.
    let idn_body = b"NFC FS2JAST4\x00\x2A\xCE";
    let mut mock = MockTransport::new();
    libst95::test_support::seed_frame(&mut mock, STATUS_FRAME_OK, idn_body);
    let mut reader = Reader::new(mock);

    let mut resp = [0u8; 32];
    let total = reader
        .send_command_with_response(&[0x01, 0x00], &mut resp)
        .unwrap();
    assert_eq!(total, idn_body.len() + 2);
    assert_eq!(resp[0], STATUS_FRAME_OK);
    assert_eq!(resp[1] as usize, idn_body.len());
    assert_eq!(&resp[2..total], &idn_body[..]);
}

#[test]
fn protocol_select_acknowledge() {
    let mut mock = MockTransport::new();
    libst95::test_support::seed_frame(&mut mock, STATUS_FRAME_OK, &[]);
    let mut reader = Reader::new(mock);

    // Select ISO14443A at 106 kbps both ways.
    let mut resp = [0u8; 8];
    let total = reader
        .send_command_with_response(&[0x02, 0x02, 0x02, 0x00], &mut resp)
        .unwrap();
    assert_eq!(total, 2);
    assert_eq!(&resp[..2], &[0x00, 0x00]);
    assert_eq!(
        reader.transport().first_written(),
        Some(&[0x00, 0x02, 0x02, 0x02, 0x00][..])
    );
}

#[test]
fn oversized_command_frame_is_truncated_to_its_length_field() {
    let mut mock = MockTransport::new();
    libst95::test_support::seed_frame(&mut mock, STATUS_FRAME_OK, &[]);
    let mut reader = Reader::new(mock);

    // Callers may pass a fixed-size scratch frame; only `len` bytes of
    // parameters go on the wire.
    let cmd = [0x09, 0x02, 0xAB, 0xCD, 0xFF, 0xFF, 0xFF];
    let mut resp = [0u8; 8];
    reader.send_command_with_response(&cmd, &mut resp).unwrap();
    assert_eq!(
        reader.transport().first_written(),
        Some(&[0x00, 0x09, 0x02, 0xAB, 0xCD][..])
    );
}

#[test]
fn truncated_command_frame_is_rejected_before_sending() {
    let mut reader = Reader::new(MockTransport::new());
    let mut resp = [0u8; 8];
    // Length field says 4 parameter bytes, only 1 present.
    let err = reader
        .send_command_with_response(&[0x02, 0x04, 0x02], &mut resp)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidLength { .. }));
    assert!(reader.transport().written.is_empty());
}

#[test]
fn poll_timeout_leaves_poisoned_header() {
    let mut mock = MockTransport::new();
    mock.script_ready(&[false]);
    let mut reader = Reader::new(mock);

    let mut resp = [0u8; 8];
    let err = reader
        .send_command_with_response(&[0x03, 0x00], &mut resp)
        .unwrap_err();
    assert_eq!(err, Error::System);
    assert_eq!(&resp[..2], &[STATUS_COM_ERROR, 0x00]);
    assert_eq!(reader.transport().flush_count, 1);
}

#[test]
fn echo_verifies_the_link() {
    let mut mock = MockTransport::new();
    mock.queue_read(&[0x55]);
    let mut reader = Reader::new(mock);
    reader.command_echo().unwrap();
    assert_eq!(
        reader.transport().first_written(),
        Some(&[0x00, 0x55][..])
    );
}

#[test]
fn idle_and_wake_cycle() {
    let mut mock = MockTransport::new();
    // Wake-up event response read back by kill_idle.
    mock.queue_read(&[0x00, 0x01, 0x02]);
    let mut reader = Reader::new(mock);

    reader.send_idle(0x74, 0x84, 0x20).unwrap();
    reader.kill_idle().unwrap();

    let transport = reader.transport();
    assert_eq!(transport.wake_pulses, 1);
    // Idle frame: control byte, command code, 14 parameter bytes.
    let idle = transport.first_written().unwrap();
    assert_eq!(&idle[..3], &[0x00, 0x07, 0x0E]);
    assert_eq!(idle.len(), 17);
}
