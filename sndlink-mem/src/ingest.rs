//! Block-ingestion engine.
//!
//! Consumes one frame per call. Data frames append their payload to the
//! staging buffer; the sentinel frame seals the transfer with the checksum
//! trailer and, for the durable path, commits the staged span to flash.

use crate::buffer::StagingBuffer;
use crate::error::CommitError;
use crate::flash::{commit, NonVolatileMedium};
use sndlink_protocol::Frame;
use tracing::{trace, warn};

/// Outcome of ingesting a single frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestStatus {
    /// Data frame accepted, transfer still in flight.
    Continue,
    /// Sentinel received; the transfer is sealed with this checksum.
    Complete(u16),
    /// The frame would have exceeded staging capacity. The cursor has been
    /// reset and the transfer is abandoned.
    Overflow,
}

/// Ingestion engine around one staging buffer.
///
/// Both destinations stream through the same staging region; the durable
/// path adds the commit stage when the sentinel arrives.
pub struct BlockIngestor {
    staging: StagingBuffer,
}

impl BlockIngestor {
    pub fn new(capacity: usize) -> Self {
        Self {
            staging: StagingBuffer::new(capacity),
        }
    }

    /// Ingests one frame into volatile staging.
    pub fn ingest(&mut self, frame: &Frame<'_>) -> IngestStatus {
        if frame.is_stop() {
            let crc = self.staging.seal();
            trace!(
                len = self.staging.payload_len(),
                crc,
                "transfer sealed in staging"
            );
            self.staging.reset();
            return IngestStatus::Complete(crc);
        }
        match self.staging.push(frame.payload()) {
            Ok(()) => IngestStatus::Continue,
            Err(err) => {
                warn!(%err, "abandoning transfer");
                self.staging.reset();
                IngestStatus::Overflow
            }
        }
    }

    /// Ingests one frame bound for durable storage. On the sentinel, the
    /// staged span is committed to `medium` at `base` before the status is
    /// surfaced. A commit failure still resets the cursor so the device can
    /// take a fresh transfer.
    pub fn ingest_durable<M: NonVolatileMedium>(
        &mut self,
        frame: &Frame<'_>,
        medium: &mut M,
        base: usize,
    ) -> Result<IngestStatus, CommitError> {
        if frame.is_stop() {
            let len = self.staging.payload_len();
            let crc = self.staging.seal();
            let result = commit(medium, self.staging.raw(), len, base);
            self.staging.reset();
            result?;
            return Ok(IngestStatus::Complete(crc));
        }
        match self.staging.push(frame.payload()) {
            Ok(()) => Ok(IngestStatus::Continue),
            Err(err) => {
                warn!(%err, "abandoning transfer");
                self.staging.reset();
                Ok(IngestStatus::Overflow)
            }
        }
    }

    /// Payload staged by the in-flight transfer.
    pub fn staged(&self) -> &[u8] {
        self.staging.staged()
    }
}
