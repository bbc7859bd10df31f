// libst95-rs/libst95/src/utils/mod.rs

//! Small reusable helpers: hex formatting for trace output and timeout
//! bookkeeping for the poll primitives.

pub mod hex;
pub mod timeout;

pub use hex::*;
pub use timeout::*;
