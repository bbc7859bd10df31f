// libst95-rs/libst95/src/protocol/mod.rs

//! Wire protocol: command framing, status decoding and the receive
//! demultiplexer.

pub mod command;
pub mod rx;
pub mod status;

pub use command::{encode, CommandCode};
pub use rx::ReceiveContext;
