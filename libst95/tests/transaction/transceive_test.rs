#[path = "../common/mod.rs"]
mod common;

use common::fixtures;
use libst95::protocol::status::{
    STATUS_FRAME_OK, STATUS_FRAME_OK_INFO, STATUS_FRAME_WAIT_TIMEOUT, STATUS_RESULTS_RESIDUAL,
};
use libst95::{
    BitRate, Error, MockTransport, Protocol, Reader, ReceiveContext, TransceiveFlags,
};

fn reader_with_body(status: u8, body: &[u8]) -> Reader<MockTransport> {
    let mut mock = MockTransport::new();
    fixtures::seed_frame(&mut mock, status, body);
    Reader::new(mock)
}

#[test]
fn iso14443a_reqa_roundtrip() {
    let body = fixtures::type_a_body(&fixtures::sample_atqa(), [0x28, 0x48], [0x00, 0x00, 0x00]);
    let mut reader = reader_with_body(STATUS_FRAME_OK_INFO, &body);

    let mut out_len = 0u16;
    let mut buf = [0u8; 32];
    {
        let mut ctx =
            ReceiveContext::new(Protocol::Iso14443a, &mut buf, TransceiveFlags::default())
                .with_received_length(&mut out_len);
        reader.transceive(&[0x26, 0x07], 1000, &mut ctx).unwrap();
        assert_eq!(ctx.stripped_crc(), Some([0x28, 0x48]));
        assert_eq!(ctx.trailing_status(), &[0x00, 0x00, 0x00]);
    }
    assert_eq!(out_len, 2);
    assert_eq!(&buf[..2], &fixtures::sample_atqa());

    // The SendRecv frame that went to the chip: control byte, code, length,
    // REQA payload.
    assert_eq!(
        reader.transport().first_written(),
        Some(&[0x00, 0x04, 0x02, 0x26, 0x07][..])
    );
}

#[test]
fn iso15693_inventory_roundtrip() {
    let payload = fixtures::sample_inventory_payload();
    let body = fixtures::one_trailer_body(&payload, Some([0xAA, 0xBB]), 0x00);
    let mut reader = reader_with_body(STATUS_FRAME_OK, &body);

    let mut out_len = 0u16;
    let mut buf = [0u8; 32];
    {
        let mut ctx = ReceiveContext::new(Protocol::Iso15693, &mut buf, TransceiveFlags::default())
            .with_received_length(&mut out_len);
        reader.transceive(&[0x26, 0x01, 0x00], 1000, &mut ctx).unwrap();
        assert_eq!(ctx.trailing_status(), &[0x00]);
    }
    assert_eq!(out_len as usize, payload.len());
    assert_eq!(&buf[..payload.len()], payload.as_slice());
}

#[test]
fn frame_wait_timeout_propagates_without_flush() {
    let mut reader = reader_with_body(STATUS_FRAME_WAIT_TIMEOUT, &[]);
    let mut buf = [0u8; 8];
    let mut ctx = ReceiveContext::new(Protocol::Iso14443b, &mut buf, TransceiveFlags::default());
    let err = reader.transceive(&[0x05, 0x00, 0x00], 1000, &mut ctx).unwrap_err();
    assert_eq!(err, Error::Timeout);
    // The chip reported an empty frame, so nothing was pending to flush.
    assert_eq!(reader.transport().flush_count, 0);
}

#[test]
fn anticollision_error_still_delivers_payload() {
    let body = fixtures::type_a_body(&[0x88, 0x04], [0x11, 0x22], [0x80, 0x02, 0x00]);
    let mut reader = reader_with_body(STATUS_FRAME_OK_INFO, &body);

    let mut out_len = 0u16;
    let mut buf = [0u8; 16];
    let mut ctx = ReceiveContext::new(Protocol::Iso14443a, &mut buf, TransceiveFlags::default())
        .with_received_length(&mut out_len);
    let err = reader.transceive(&[0x93, 0x20], 1000, &mut ctx).unwrap_err();
    assert_eq!(err, Error::RfCollision);
    let rx_status = ctx.rx_status();
    // Partial UID bytes survive so the caller can continue anticollision.
    assert_eq!(out_len, 2);
    assert_eq!(rx_status, Err(Error::RfCollision));
}

#[test]
fn residual_bits_report_incomplete_byte() {
    let mut reader = reader_with_body(STATUS_RESULTS_RESIDUAL, &[0xA0, 0x05, 0x00, 0x00]);
    let mut out_len = 0u16;
    let mut buf = [0u8; 8];
    {
        let mut ctx =
            ReceiveContext::new(Protocol::Iso14443a, &mut buf, TransceiveFlags::default())
                .with_received_length(&mut out_len);
        let err = reader.transceive(&[0x93, 0x20], 1000, &mut ctx).unwrap_err();
        assert_eq!(err, Error::IncompleteByte { valid_bits: 5 });
    }
    assert_eq!(out_len, 1);
    assert_eq!(buf[0], 0xA0);
}

#[test]
fn nfc_dep_start_of_data_is_surfaced() {
    let flags = TransceiveFlags {
        keep_rx_crc: false,
        nfcip1: true,
    };
    let body = [0xF0, 0x11, 0x22, 0x9A, 0xBC, 0x00, 0x00, 0x00];
    let mut reader = reader_with_body(STATUS_FRAME_OK_INFO, &body);

    let mut out_len = 0u16;
    let mut buf = [0u8; 16];
    {
        let mut ctx = ReceiveContext::new(Protocol::Iso14443a, &mut buf, flags)
            .with_received_length(&mut out_len);
        reader.transceive(&[0xD4, 0x00], 1000, &mut ctx).unwrap();
        assert_eq!(ctx.nfcip1_start_of_data(), Some(0xF0));
        assert_eq!(ctx.stripped_crc(), Some([0x9A, 0xBC]));
    }
    assert_eq!(out_len, 2);
    assert_eq!(&buf[..2], &[0x11, 0x22]);
}

#[test]
fn iso18092_payload_gets_length_prefix() {
    let body = fixtures::one_trailer_body(&[0x01, 0x02, 0x03], None, 0x00);
    let mut reader = reader_with_body(STATUS_FRAME_OK, &body);
    reader.set_rx_bit_rate(BitRate::Br212);

    let mut out_len = 0u16;
    let mut buf = [0u8; 16];
    {
        let mut ctx = ReceiveContext::new(Protocol::Iso18092, &mut buf, TransceiveFlags::default())
            .with_received_length(&mut out_len);
        reader.transceive(&[0xD4, 0x04], 1000, &mut ctx).unwrap();
    }
    assert_eq!(out_len, 4);
    assert_eq!(&buf[..4], &[0x04, 0x01, 0x02, 0x03]);
}

#[test]
fn undersized_destination_reports_no_memory_and_flushes() {
    let body = fixtures::one_trailer_body(&[0x01, 0x02, 0x03, 0x04, 0x05, 0x06], Some([0, 0]), 0x00);
    let mut reader = reader_with_body(STATUS_FRAME_OK, &body);

    let mut buf = [0u8; 4];
    let mut ctx = ReceiveContext::new(Protocol::Iso14443b, &mut buf, TransceiveFlags::default());
    let err = reader.transceive(&[0x05, 0x00, 0x00], 1000, &mut ctx).unwrap_err();
    assert_eq!(err, Error::NoMemory);
    assert_eq!(reader.transport().flush_count, 1);
}

#[test]
fn back_to_back_transactions_share_one_reader() {
    let mut mock = MockTransport::new();
    fixtures::seed_frame(
        &mut mock,
        STATUS_FRAME_OK_INFO,
        &fixtures::type_a_body(&[0x44, 0x00], [0x28, 0x48], [0x00, 0x00, 0x00]),
    );
    fixtures::seed_frame(
        &mut mock,
        STATUS_FRAME_OK_INFO,
        &fixtures::type_a_body(&[0x04, 0xDA], [0x12, 0x34], [0x00, 0x00, 0x00]),
    );
    let mut reader = Reader::new(mock);

    for expected in [[0x44u8, 0x00], [0x04, 0xDA]] {
        let mut buf = [0u8; 16];
        let mut ctx =
            ReceiveContext::new(Protocol::Iso14443a, &mut buf, TransceiveFlags::default());
        reader.transceive(&[0x26, 0x07], 1000, &mut ctx).unwrap();
        drop(ctx);
        assert_eq!(&buf[..2], &expected);
    }

    // Two command frames, each followed by one read control byte.
    assert_eq!(reader.transport().written.len(), 4);
    assert_eq!(reader.transport().selects, reader.transport().deselects);
}
