use std::fs;
use std::io::{self, Write};
use std::net::{Ipv4Addr, SocketAddrV4};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use e131_core::{
    Capture, DISCOVERY_UNIVERSE, DataOptions, IdentityConfig, SacnEncoder, Universe,
    ValidationError, multicast_addr, parse_cid,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "e131")]
#[command(version)]
#[command(
    about = "Encode sACN (ANSI E1.31) packets: DMX data, synchronization and universe discovery.",
    long_about = None,
    after_help = "Examples:\n  e131 encode data --universe 1 --fill 255 --stdout\n  e131 encode sync --sync-address 7 --sequence 42 --format bin -o sync.bin\n  e131 encode discovery --universes 1,2,3 --format pcapng -o discovery.pcapng"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode packets and write them as hex, raw bytes or a pcapng capture.
    Encode {
        #[command(subcommand)]
        command: EncodeCommands,
    },
}

#[derive(Subcommand, Debug)]
enum EncodeCommands {
    /// Encode one universe of DMX data (638 bytes).
    Data {
        /// Universe number (1-63999)
        #[arg(short, long)]
        universe: u16,

        /// Sequence number
        #[arg(short, long, default_value_t = 0)]
        sequence: u8,

        /// Synchronization universe (0 = unsynchronized)
        #[arg(long, default_value_t = 0)]
        sync_address: u16,

        /// Mark data as preview-only
        #[arg(long)]
        preview: bool,

        /// Mark the stream as terminated
        #[arg(long)]
        terminate: bool,

        /// Set the force-synchronization option
        #[arg(long)]
        force_sync: bool,

        /// Value written to every slot before --channel overrides
        #[arg(long, default_value_t = 0, conflicts_with = "slots_file")]
        fill: u8,

        /// Raw 512-byte slot file
        #[arg(long)]
        slots_file: Option<PathBuf>,

        /// Channel override as CHANNEL=VALUE (1-based, repeatable)
        #[arg(long = "channel", value_parser = parse_channel)]
        channels: Vec<(u16, u8)>,

        #[command(flatten)]
        identity: IdentityArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Encode a synchronization packet (49 bytes).
    Sync {
        /// Synchronization universe
        #[arg(long)]
        sync_address: u16,

        /// Sequence number
        #[arg(short, long, default_value_t = 0)]
        sequence: u8,

        #[command(flatten)]
        identity: IdentityArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Encode universe discovery packets (one per 512 universes).
    Discovery {
        /// Advertised universes, comma separated
        #[arg(long, value_delimiter = ',', num_args = 1.., required = true)]
        universes: Vec<u16>,

        #[command(flatten)]
        identity: IdentityArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args, Debug)]
struct IdentityArgs {
    /// Identity config file (JSON: source_name, priority, cid)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Source name (1-63 bytes), overrides the config file
    #[arg(long)]
    name: Option<String>,

    /// Priority (0-200), overrides the config file
    #[arg(long, allow_negative_numbers = true)]
    priority: Option<i32>,

    /// Component identifier (UUID), overrides the config file
    #[arg(long)]
    cid: Option<String>,
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Output path
    #[arg(short = 'o', long, required_unless_present = "stdout")]
    output: Option<PathBuf>,

    /// Write to stdout
    #[arg(long, conflicts_with = "output")]
    stdout: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Hex)]
    format: OutputFormat,

    /// Source address recorded in pcapng captures
    #[arg(long, default_value = "10.0.0.1")]
    source_ip: Ipv4Addr,

    /// Suppress non-error output
    #[arg(long)]
    quiet: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// One lowercase hex line per packet
    Hex,
    /// Raw packet bytes (single packet only)
    Bin,
    /// pcapng capture of UDP multicast frames
    Pcapng,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Encode { command } => cmd_encode(command),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{:#}", err), None)
    }
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        let hint = match err {
            ValidationError::InvalidUniverse { .. } | ValidationError::InvalidSyncAddress { .. } => {
                Some("universes range from 1 to 63999".to_string())
            }
            ValidationError::SourceNameEmpty | ValidationError::SourceNameTooLong { .. } => {
                Some("source names hold 1 to 63 bytes of UTF-8".to_string())
            }
            ValidationError::PriorityOutOfRange { .. } => {
                Some("priority ranges from 0 to 200 (default 100)".to_string())
            }
            ValidationError::InvalidSlotCount { .. } => {
                Some("slot files must contain exactly 512 bytes".to_string())
            }
            _ => None,
        };
        CliError::new(err.to_string(), hint)
    }
}

/// One encoded packet and the multicast group it is sent to.
struct Outgoing {
    destination: SocketAddrV4,
    bytes: Vec<u8>,
}

fn cmd_encode(command: EncodeCommands) -> Result<(), CliError> {
    let (packets, output) = match command {
        EncodeCommands::Data {
            universe,
            sequence,
            sync_address,
            preview,
            terminate,
            force_sync,
            fill,
            slots_file,
            channels,
            identity,
            output,
        } => {
            let encoder = build_encoder(&identity)?;
            let universe = load_universe(universe, fill, slots_file.as_deref(), &channels)?;
            let options = DataOptions {
                preview_data: preview,
                stream_terminated: terminate,
                force_synchronization: force_sync,
            };
            let bytes = encoder.data_packet(sync_address, sequence, options, &universe)?;
            let packets = vec![Outgoing {
                destination: universe.multicast_addr(),
                bytes,
            }];
            (packets, output)
        }
        EncodeCommands::Sync {
            sync_address,
            sequence,
            identity,
            output,
        } => {
            let encoder = build_encoder(&identity)?;
            let bytes = encoder.sync_packet(sync_address, sequence)?;
            let packets = vec![Outgoing {
                destination: multicast_addr(sync_address),
                bytes,
            }];
            (packets, output)
        }
        EncodeCommands::Discovery {
            universes,
            identity,
            output,
        } => {
            let encoder = build_encoder(&identity)?;
            let packets = encoder
                .discovery_packets(&universes)?
                .into_iter()
                .map(|bytes| Outgoing {
                    destination: multicast_addr(DISCOVERY_UNIVERSE),
                    bytes,
                })
                .collect();
            (packets, output)
        }
    };

    write_output(&packets, &output)
}

fn build_encoder(args: &IdentityArgs) -> Result<SacnEncoder, CliError> {
    let mut config = match args.config.as_deref() {
        Some(path) => IdentityConfig::load(path).map_err(|err| {
            CliError::new(
                err.to_string(),
                Some("expected JSON with source_name, priority and cid".to_string()),
            )
        })?,
        None => IdentityConfig::default(),
    };
    if let Some(name) = args.name.as_ref() {
        config.source_name = Some(name.clone());
    }
    if let Some(priority) = args.priority {
        config.priority = Some(priority);
    }
    if let Some(cid) = args.cid.as_deref() {
        config.cid = Some(parse_cid(cid).map_err(|err| {
            CliError::new(
                err.to_string(),
                Some("use the 8-4-4-4-12 hex UUID form".to_string()),
            )
        })?);
    }
    let identity = config.into_identity()?;
    tracing::debug!(
        cid = %identity.cid(),
        source_name = identity.source_name().as_str(),
        priority = identity.priority().value(),
        "source identity"
    );
    Ok(SacnEncoder::new(identity))
}

fn load_universe(
    number: u16,
    fill: u8,
    slots_file: Option<&Path>,
    channels: &[(u16, u8)],
) -> Result<Universe, CliError> {
    let mut universe = match slots_file {
        Some(path) => {
            let slots = fs::read(path)
                .with_context(|| format!("Failed to read slot file: {}", path.display()))?;
            Universe::from_slots(number, &slots)?
        }
        None => {
            let mut universe = Universe::new(number)?;
            universe.slots_mut().fill(fill);
            universe
        }
    };
    for (channel, value) in channels {
        universe.set_channel(*channel, *value)?;
    }
    Ok(universe)
}

fn parse_channel(raw: &str) -> Result<(u16, u8), String> {
    let (channel, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected CHANNEL=VALUE, got '{}'", raw))?;
    let channel = channel
        .trim()
        .parse::<u16>()
        .map_err(|err| format!("invalid channel '{}': {}", channel, err))?;
    let value = value
        .trim()
        .parse::<u8>()
        .map_err(|err| format!("invalid value '{}': {}", value, err))?;
    Ok((channel, value))
}

fn write_output(packets: &[Outgoing], output: &OutputArgs) -> Result<(), CliError> {
    let bytes = match output.format {
        OutputFormat::Hex => packets
            .iter()
            .map(|packet| format!("{}\n", to_hex(&packet.bytes)))
            .collect::<String>()
            .into_bytes(),
        OutputFormat::Bin => {
            if packets.len() > 1 {
                return Err(CliError::new(
                    format!("{} packets cannot be written as one binary", packets.len()),
                    Some("use --format hex or --format pcapng".to_string()),
                ));
            }
            packets
                .iter()
                .flat_map(|packet| packet.bytes.iter().copied())
                .collect()
        }
        OutputFormat::Pcapng => {
            if output.stdout {
                return Err(CliError::new(
                    "pcapng output cannot be written to stdout",
                    Some("use -o/--output with a .pcapng path".to_string()),
                ));
            }
            build_capture(packets, output.source_ip)?.to_pcapng()
        }
    };

    if output.stdout {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(&bytes)
            .and_then(|()| stdout.flush())
            .context("Failed to write to stdout")?;
        return Ok(());
    }

    let path = output.output.as_ref().ok_or_else(|| {
        CliError::new(
            "missing output path",
            Some("use -o/--output or --stdout".to_string()),
        )
    })?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    fs::write(path, bytes).with_context(|| format!("Failed to write output: {}", path.display()))?;

    if !output.quiet {
        eprintln!(
            "OK: {} packet(s) written -> {}",
            packets.len(),
            path.display()
        );
    }
    Ok(())
}

fn build_capture(packets: &[Outgoing], source_ip: Ipv4Addr) -> Result<Capture, CliError> {
    let start_us = u64::try_from(time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000)
        .unwrap_or(0);
    let source = SocketAddrV4::new(source_ip, e131_core::ACN_SDT_MULTICAST_PORT);
    let mut capture = Capture::new(source);
    for (idx, packet) in packets.iter().enumerate() {
        capture
            .push(start_us + idx as u64, packet.destination, &packet.bytes)
            .map_err(|err| CliError::new(err.to_string(), None))?;
    }
    Ok(capture)
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
