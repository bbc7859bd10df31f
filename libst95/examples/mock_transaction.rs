// Scripted transaction walkthrough against the mock transport.

// This example runs a REQA/ATQA exchange and an ISO15693 inventory without
// hardware: the MockTransport plays the chip side from pre-seeded response
// frames. Run with RUST_LOG=debug to see the trace observer output.

use libst95::prelude::*;
use libst95::test_support::seed_frame;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut mock = MockTransport::new();
    // ATQA 44 00, CRC, three trailing status bytes (Type A at 106 kbps).
    seed_frame(&mut mock, 0x80, &[0x44, 0x00, 0x28, 0x48, 0x00, 0x00, 0x00]);
    // Inventory answer: flags, DSFID, UID, CRC, one trailing byte.
    seed_frame(
        &mut mock,
        0x00,
        &[
            0x00, 0x00, 0xE0, 0x04, 0x01, 0x50, 0x33, 0x82, 0x9A, 0xF1, 0xAA, 0xBB, 0x00,
        ],
    );

    let mut reader = Reader::new(mock).with_observer(Box::new(LogObserver));

    println!("=== ISO14443A REQA ===");
    let mut len = 0u16;
    let mut buf = [0u8; 32];
    {
        let mut ctx = ReceiveContext::new(Protocol::Iso14443a, &mut buf, TransceiveFlags::default())
            .with_received_length(&mut len);
        reader.transceive(&[0x26, 0x07], 1000, &mut ctx)?;
        if let Some(crc) = ctx.stripped_crc() {
            println!("ATQA CRC: {}", bytes_to_hex(&crc));
        }
    }
    println!("ATQA: {}", bytes_to_hex_spaced(&buf[..len as usize]));

    println!("\n=== ISO15693 inventory ===");
    let mut len = 0u16;
    let mut buf = [0u8; 32];
    {
        let mut ctx = ReceiveContext::new(Protocol::Iso15693, &mut buf, TransceiveFlags::default())
            .with_received_length(&mut len);
        reader.transceive(&[0x26, 0x01, 0x00], 1000, &mut ctx)?;
    }
    // Byte 2 onward is the UID, transmitted LSB first.
    println!("inventory: {}", bytes_to_hex_spaced(&buf[..len as usize]));

    Ok(())
}
