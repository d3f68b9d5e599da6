//! # sndlink-mem
//!
//! Memory layer for the sndlink block-transfer path.
//!
//! This crate provides:
//! - A bounded staging buffer that accumulates frame payloads
//! - The block-ingestion engine consuming one frame at a time
//! - The erase-then-write commit stage for non-volatile storage
//! - A RAM-backed NOR-flash emulation for tests and the simulator
//!
//! Everything here is synchronous and exclusively owned by the single
//! execution context running the dispatcher; there is no locking.

pub mod buffer;
pub mod error;
pub mod flash;
pub mod ingest;

pub use buffer::StagingBuffer;
pub use error::{CommitError, OverflowError};
pub use flash::{commit, page_align, NonVolatileMedium, RamFlash};
pub use ingest::{BlockIngestor, IngestStatus};

/// Capacity of the staging region in bytes.
pub const STAGING_CAPACITY: usize = 65536;

/// Erase granularity of the QSPI flash medium.
pub const FLASH_PAGE_SIZE: usize = 4096;

/// Size of the checksum trailer sealed after the payload.
pub const CRC_TRAILER_LEN: usize = 2;
