//! # sndlink-device
//!
//! The device-side core of the sndlink control channel: a single-threaded,
//! callback-driven dispatcher that routes each incoming byte chunk to the
//! command parser or the block-ingestion engine according to session state.
//!
//! The physical transport, the audio engine, and the parameter sources are
//! external collaborators reached through the [`Board`] trait; this crate
//! owns only the protocol state machine and the buffers behind it.

pub mod board;
pub mod dispatcher;
pub mod session;

pub use board::Board;
pub use dispatcher::Device;
pub use session::{DeviceConfig, SessionState};

/// Decimal digits used when rendering getter values. Truncating, see
/// [`sndlink_protocol::format_fixed`].
pub const VALUE_DECIMALS: u32 = 3;
