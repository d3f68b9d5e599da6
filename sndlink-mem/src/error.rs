//! Memory-layer error types.

use thiserror::Error;

/// A frame would push the staging buffer past its capacity.
///
/// The cursor has already been reset when this is returned; the transfer is
/// abandoned as a whole, there is no partial-frame recovery.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("staging overflow: frame {frames} would exceed {capacity} bytes")]
pub struct OverflowError {
    /// Frame count the rejected frame would have brought the buffer to.
    pub frames: usize,
    /// Staging capacity in bytes.
    pub capacity: usize,
}

/// Errors from the non-volatile commit stage.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommitError {
    #[error("flash range {start:#x}..{end:#x} is outside the {capacity} byte medium")]
    OutOfBounds {
        start: usize,
        end: usize,
        capacity: usize,
    },

    #[error("erase range {start:#x}..{end:#x} is not aligned to the {page_size} byte page")]
    UnalignedErase {
        start: usize,
        end: usize,
        page_size: usize,
    },

    #[error("commit needs {needed} source bytes but the buffer holds {have}")]
    SourceExhausted { needed: usize, have: usize },
}
