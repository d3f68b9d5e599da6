//! sndlink-sim - device simulator.
//!
//! Hosts the sndlink device core behind a TCP listener, standing in for the
//! USB-CDC transport of real hardware: it delivers clean line/frame
//! boundaries to the dispatcher and relays its replies. One connection is
//! served at a time; the device core itself allows exactly one session.

use clap::Parser;
use sndlink_device::{Board, Device, DeviceConfig, SessionState};
use sndlink_mem::{RamFlash, FLASH_PAGE_SIZE, STAGING_CAPACITY};
use sndlink_protocol::FRAME_SIZE;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sndlink-sim")]
#[command(about = "TCP-hosted simulator for the sndlink device core")]
#[command(version)]
struct Args {
    /// Address to listen on
    #[arg(short, long, default_value = "127.0.0.1:7340")]
    listen: SocketAddr,

    /// Capacity of the simulated QSPI flash in bytes
    #[arg(long, default_value_t = STAGING_CAPACITY)]
    flash_capacity: usize,

    /// Capacity of the staging region in bytes
    #[arg(long, default_value_t = STAGING_CAPACITY)]
    staging_capacity: usize,
}

/// Board hooks with canned parameter values, enough to exercise every
/// command the device understands.
struct SimBoard {
    audio_running: bool,
}

impl SimBoard {
    fn new() -> Self {
        Self {
            audio_running: true,
        }
    }
}

impl Board for SimBoard {
    fn audio_pause(&mut self) {
        if self.audio_running {
            debug!("audio duty suspended for control exchange");
            self.audio_running = false;
        }
    }

    fn audio_resume(&mut self) {
        if !self.audio_running {
            debug!("audio duty resumed");
            self.audio_running = true;
        }
    }

    fn reset(&mut self) {
        info!("inference module reset");
    }

    fn param(&self, key: &str) -> Option<Vec<f32>> {
        match key {
            "envelope" => Some(vec![0.125, 0.934]),
            "knob" => Some(vec![0.5]),
            "feature" => Some(vec![0.301, 0.022, 0.877]),
            "inference" => Some(vec![0.66]),
            "timing" => Some(vec![2.666]),
            _ => None,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut device = Device::new(
        SimBoard::new(),
        RamFlash::new(args.flash_capacity, FLASH_PAGE_SIZE),
        DeviceConfig {
            staging_capacity: args.staging_capacity,
            flash_base: 0,
        },
    );

    let listener = TcpListener::bind(args.listen)?;
    info!("sndlink device simulator listening on {}", args.listen);
    info!("  Staging capacity: {} bytes", args.staging_capacity);
    info!("  Flash capacity: {} bytes", args.flash_capacity);

    for stream in listener.incoming() {
        match stream {
            Ok(stream) => {
                if let Err(e) = serve(&mut device, stream) {
                    warn!("connection error: {e}");
                }
                if device.state() != SessionState::Idle {
                    // A peer that vanished mid-transfer parks the device in
                    // a streaming state; the protocol has no timeout, so
                    // flag it for the operator.
                    warn!(state = ?device.state(), "peer left a transfer in flight");
                }
            }
            Err(e) => warn!("accept failed: {e}"),
        }
    }

    Ok(())
}

fn serve(device: &mut Device<SimBoard, RamFlash>, stream: TcpStream) -> io::Result<()> {
    let peer = stream.peer_addr()?;
    info!(%peer, "session opened");
    let mut writer = stream.try_clone()?;
    let mut reader = BufReader::new(stream);

    loop {
        // The transport frames deliveries the way the hardware callback
        // would: one command line while idle, one 64-byte frame while a
        // transfer is streaming.
        let chunk = if device.state() == SessionState::Idle {
            let mut line = Vec::new();
            if reader.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            line
        } else {
            let mut frame = [0u8; FRAME_SIZE];
            match reader.read_exact(&mut frame) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
                Err(e) => return Err(e),
            }
            frame.to_vec()
        };

        if let Some(reply) = device.on_receive(&chunk) {
            writer.write_all(reply.render().as_bytes())?;
            writer.flush()?;
        }
    }

    info!(%peer, "session closed");
    Ok(())
}
