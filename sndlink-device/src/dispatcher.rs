//! Protocol dispatcher.
//!
//! One [`Device`] owns the session state, the one-frame scratch buffer, the
//! ingestion engine, and the flash medium. Each byte-delivery callback is
//! handled to completion before the next is accepted; nothing here blocks
//! or suspends.

use crate::board::Board;
use crate::session::{DeviceConfig, SessionState};
use crate::VALUE_DECIMALS;
use sndlink_mem::{BlockIngestor, IngestStatus, NonVolatileMedium};
use sndlink_protocol::{
    format_fixed, Command, Destination, Frame, ProtocolError, Reply, FRAME_SIZE,
};
use tracing::{debug, error, info, warn};

/// The device-side protocol core.
pub struct Device<B: Board, M: NonVolatileMedium> {
    config: DeviceConfig,
    state: SessionState,
    /// Per-chunk scratch, sized to exactly one frame and cleared between
    /// chunks so stale bytes cannot leak into a short delivery.
    scratch: [u8; FRAME_SIZE],
    ingestor: BlockIngestor,
    flash: M,
    board: B,
}

impl<B: Board, M: NonVolatileMedium> Device<B, M> {
    pub fn new(board: B, flash: M, config: DeviceConfig) -> Self {
        Self {
            state: SessionState::Idle,
            scratch: [0u8; FRAME_SIZE],
            ingestor: BlockIngestor::new(config.staging_capacity),
            flash,
            board,
            config,
        }
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The flash medium, for inspection.
    pub fn flash(&self) -> &M {
        &self.flash
    }

    /// The board hooks, for inspection.
    pub fn board(&self) -> &B {
        &self.board
    }

    /// Handles one byte-delivery event from the transport.
    ///
    /// Returns the reply line to transmit, or `None` for the failure paths
    /// that are deliberately silent on the wire (overflow, commit failure):
    /// the peer detects those by the absence of the expected reply.
    pub fn on_receive(&mut self, bytes: &[u8]) -> Option<Reply> {
        if self.state == SessionState::Idle {
            self.board.audio_pause();
        }
        let reply = self.dispatch(bytes);
        if self.state == SessionState::Idle {
            self.board.audio_resume();
        }
        reply
    }

    fn dispatch(&mut self, bytes: &[u8]) -> Option<Reply> {
        self.scratch.fill(0);
        let n = bytes.len().min(FRAME_SIZE);
        self.scratch[..n].copy_from_slice(&bytes[..n]);

        match self.state {
            SessionState::Idle => Some(self.handle_command(n)),
            SessionState::StreamSdram => self.handle_frame(Destination::Sdram),
            SessionState::StreamQspi => self.handle_frame(Destination::Qspi),
        }
    }

    fn handle_command(&mut self, len: usize) -> Reply {
        let chunk = self.scratch;
        let line = match std::str::from_utf8(&chunk[..len]) {
            Ok(line) => line,
            Err(_) => {
                return Reply::err(format!("Parse error: {}", ProtocolError::InvalidText));
            }
        };

        match Command::parse(line) {
            Ok(Command::Get { key }) => match self.board.param(key) {
                Some(values) => {
                    let rendered: Vec<String> = values
                        .iter()
                        .map(|&v| format_fixed(v, VALUE_DECIMALS))
                        .collect();
                    Reply::ok_with(rendered.join(","))
                }
                None => Reply::err(format!("Unknown getter <{key}>")),
            },
            Ok(Command::Set) => Reply::err("Setter not yet implemented."),
            Ok(Command::Reset) => {
                self.board.reset();
                Reply::ok()
            }
            Ok(Command::Send { dest }) => {
                debug!(?dest, "arming block transfer");
                match dest {
                    Destination::Sdram => {
                        self.state = SessionState::StreamSdram;
                        Reply::rdy("Awaiting data transfer to SDRAM...")
                    }
                    Destination::Qspi => {
                        self.state = SessionState::StreamQspi;
                        Reply::rdy("Awaiting data transfer to QSPI...")
                    }
                }
            }
            Err(err) => Reply::err(format!("Parse error: {err}")),
        }
    }

    fn handle_frame(&mut self, dest: Destination) -> Option<Reply> {
        let chunk = self.scratch;
        let frame = Frame::new(&chunk);

        let status = match dest {
            Destination::Sdram => self.ingestor.ingest(&frame),
            Destination::Qspi => {
                match self
                    .ingestor
                    .ingest_durable(&frame, &mut self.flash, self.config.flash_base)
                {
                    Ok(status) => status,
                    Err(err) => {
                        error!(%err, "flash commit failed, dropping transfer");
                        self.state = SessionState::Idle;
                        return None;
                    }
                }
            }
        };

        match status {
            IngestStatus::Continue => Some(Reply::ok()),
            IngestStatus::Complete(crc) => {
                info!(crc, ?dest, "transfer complete");
                self.state = SessionState::Idle;
                Some(Reply::fnsh(format!("Transmission done. CRC: {crc}")))
            }
            IngestStatus::Overflow => {
                warn!(?dest, "transfer overflowed staging capacity");
                self.state = SessionState::Idle;
                None
            }
        }
    }
}
