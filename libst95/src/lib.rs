// libst95-rs/libst95/src/lib.rs

//! libst95
//!
//! Pure Rust command/response transaction layer for ST95-family NFC reader
//! chips driven over a half-duplex SPI link.
//!
//! The crate frames outgoing chip commands, performs poll-based flow control
//! against the chip's readiness line, and demultiplexes the shared receive
//! buffer into payload, optional CRC, optional NFC-DEP start-of-data byte and
//! the trailing per-protocol status bytes. Byte-level transport (chip select,
//! SPI exchange, IRQ line) is supplied by the embedder through the
//! [`transport::Transport`] trait.
#![warn(missing_docs)]

pub mod constants;
pub mod error;
pub mod observer;
pub mod prelude;
pub mod protocol;
pub mod reader;
pub mod test_support;
pub mod transport;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the enums in `types` are available for consumers and for
// convenient `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
