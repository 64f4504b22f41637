//! Payload model, codec and checksum.
//!
//! Everything here is pure: no I/O, no shared state.

pub mod amount;
pub mod crc;
pub mod field;
pub mod ports;
pub mod tlv;
