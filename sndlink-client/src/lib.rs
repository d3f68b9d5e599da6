//! # sndlink-client
//!
//! Host-side driver for the sndlink control channel. Speaks the ASCII
//! command grammar and drives block transfers over any `Read + Write`
//! transport - a serial port, a TCP connection to the simulator, or an
//! in-memory loopback in tests. The transport itself is not this crate's
//! business; delivering clean frame boundaries per write is.

pub mod client;
pub mod error;

pub use client::{padded_crc, LinkClient};
pub use error::ClientError;
