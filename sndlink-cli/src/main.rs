//! sndlink-cli - Command-line interface for the sndlink control channel.
//!
//! One-shot command execution against a device reachable over TCP (the
//! simulator, or a serial-to-TCP bridge in front of real hardware).

use clap::{Parser, Subcommand};
use colored::Colorize;
use sndlink_client::{ClientError, LinkClient};
use sndlink_protocol::{Destination, Reply, Status};
use std::net::{SocketAddr, TcpStream};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sndlink-cli")]
#[command(about = "Command-line interface for the sndlink control channel")]
#[command(version)]
struct Cli {
    /// Device address
    #[arg(short, long, default_value = "127.0.0.1:7340", env = "SNDLINK_ADDR")]
    addr: SocketAddr,

    /// Reply timeout in seconds; a transfer that overflows on the device
    /// side fails silently and is only detectable by running into this
    #[arg(long, default_value_t = 5)]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read a named value from the device
    Get {
        /// Value name (envelope, knob, feature, inference, ...)
        key: String,
    },

    /// Trigger the device's reset hook
    Reset,

    /// Forward a raw `set` line (the device currently rejects all setters)
    Set {
        /// Tokens appended to the `set` verb
        args: Vec<String>,
    },

    /// Stream a file to the device
    Send {
        /// File to transfer
        file: PathBuf,

        /// Commit to QSPI flash instead of volatile SDRAM staging
        #[arg(long)]
        qspi: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let stream = TcpStream::connect(cli.addr)?;
    stream.set_read_timeout(Some(Duration::from_secs(cli.timeout)))?;
    let mut client = LinkClient::new(stream);

    match cli.command {
        Commands::Get { key } => {
            let reply = client.request(&format!("get {key}"))?;
            print_reply(&reply);
            exit_code(&reply)
        }
        Commands::Reset => {
            let reply = client.request("reset")?;
            print_reply(&reply);
            exit_code(&reply)
        }
        Commands::Set { args } => {
            let line = if args.is_empty() {
                "set".to_string()
            } else {
                format!("set {}", args.join(" "))
            };
            let reply = client.request(&line)?;
            print_reply(&reply);
            exit_code(&reply)
        }
        Commands::Send { file, qspi } => {
            let payload = std::fs::read(&file)?;
            let dest = if qspi {
                Destination::Qspi
            } else {
                Destination::Sdram
            };
            println!(
                "Sending {} ({} bytes) to {}...",
                file.display(),
                payload.len(),
                dest.flag().trim_start_matches('-').to_uppercase().cyan()
            );
            match client.send(&payload, dest) {
                Ok(crc) => {
                    println!("{} CRC: {}", "Transfer complete.".green(), crc);
                    Ok(())
                }
                Err(ClientError::Io(e))
                    if matches!(
                        e.kind(),
                        std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut
                    ) =>
                {
                    // A read timeout here is how a device-side overflow or
                    // commit failure shows up; say so instead of "timed out".
                    Err("device went silent (transfer overflow or commit failure?)".into())
                }
                Err(e) => Err(e.into()),
            }
        }
    }
}

fn print_reply(reply: &Reply) {
    let status = match reply.status {
        Status::Ok | Status::Rdy | Status::Fnsh => reply.status.to_string().green(),
        Status::Warn => reply.status.to_string().yellow(),
        Status::Err => reply.status.to_string().red(),
    };
    match &reply.detail {
        Some(detail) => println!("{status}: {detail}"),
        None => println!("{status}"),
    }
}

fn exit_code(reply: &Reply) -> Result<(), Box<dyn std::error::Error>> {
    if reply.status == Status::Err {
        return Err(reply
            .detail
            .clone()
            .unwrap_or_else(|| "device returned ERR".to_string())
            .into());
    }
    Ok(())
}
