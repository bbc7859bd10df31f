// libst95-rs/libst95/src/transport/mod.rs

//! Platform seam: the raw half-duplex link to the chip.

pub mod mock;
pub mod traits;

pub use mock::MockTransport;
pub use traits::Transport;
