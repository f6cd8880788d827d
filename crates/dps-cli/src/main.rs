/// DPS command-line tool — inspect, decode, and monitor vendor telemetry
/// snapshots captured from the device's data-point map.
///
/// # Command overview
///
/// ```text
/// dps <COMMAND> [OPTIONS]
///
/// Commands:
///   inspect    Print the keys and values of a snapshot file
///   decode     Run the decoder registry over a snapshot file
///   coverage   Report expected-key coverage for a snapshot file
///   poll       Run the poll loop against a snapshot file or demo data
///   help       Print help information
///
/// Global options:
///   -v, --verbose    Enable debug-level event output
///   -h, --help       Print help
///   -V, --version    Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                 |
/// |------|-----------------------------------------|
/// | 0    | Success                                 |
/// | 1    | Error (I/O failure, invalid file, etc.) |
///
/// All error details are written to stderr so stdout can be piped cleanly.
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use dps_types::RawSnapshot;

mod cmd_coverage;
mod cmd_decode;
mod cmd_inspect;
mod cmd_poll;
mod render;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// The DPS (data-point snapshot) command-line tool.
///
/// Inspect, decode, and monitor vendor telemetry key→value snapshots.
#[derive(Parser)]
#[command(name = "dps", version, about = "Vendor telemetry decoding CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug-level event output (per-decoder outcomes, fetch
    /// lifecycle).
    #[arg(short, long, global = true)]
    verbose: bool,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Print the keys and values of a snapshot file.
    Inspect(InspectArgs),
    /// Run the decoder registry over a snapshot file.
    Decode(DecodeArgs),
    /// Report expected-key coverage for a snapshot file.
    Coverage(CoverageArgs),
    /// Run the poll loop against a snapshot file or demo data.
    Poll(PollArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `dps inspect`.
///
/// Loads a snapshot JSON file and prints one line per key: the key, its
/// value type, and a bounded preview of the value. With `--hex`, text
/// values that decode as base64 additionally get a 16-byte-per-line hex
/// dump of the decoded record — the form the byte-offset research is
/// done in.
#[derive(clap::Args)]
pub struct InspectArgs {
    /// Path to the snapshot JSON file (a flat key→value object).
    pub file: PathBuf,

    /// Hex-dump the decoded record of base64 text values.
    #[arg(long)]
    pub hex: bool,

    /// Inspect only this key.
    #[arg(long)]
    pub key: Option<String>,
}

/// Arguments for `dps decode`.
///
/// Runs every registered decoder against the snapshot and prints one
/// outcome per decoder: the typed reading with its confidence and
/// provenance, or the failure that took its place.
#[derive(clap::Args)]
pub struct DecodeArgs {
    /// Path to the snapshot JSON file.
    pub file: PathBuf,

    /// Emit the outcomes as JSON instead of the table form.
    #[arg(long)]
    pub json: bool,

    /// Calibrated raw byte value that maps to a 100% water tank.
    ///
    /// Defaults to 255 (the scale the key research validated to ~82%).
    #[arg(long)]
    pub tank_full_raw: Option<u8>,
}

/// Arguments for `dps coverage`.
///
/// Compares the snapshot's keys against the expected set (the monitored
/// key table by default) and prints per-key presence plus the aggregate
/// ratio.
#[derive(clap::Args)]
pub struct CoverageArgs {
    /// Path to the snapshot JSON file.
    pub file: PathBuf,

    /// Comma-separated expected keys (defaults to the monitored table).
    #[arg(long)]
    pub expected: Option<String>,

    /// Emit the report as JSON instead of the table form.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `dps poll`.
///
/// Drives the coordinator at a fixed interval, printing one summary line
/// (or JSON document) per cycle. The source is either a snapshot file
/// re-read on every tick — edit the file mid-run to watch keys appear
/// and vanish — or the built-in deterministic demo payload.
///
/// Stops after `--cycles N` cycles, or on ctrl-c.
#[derive(clap::Args)]
pub struct PollArgs {
    /// Path to a snapshot JSON file, re-read on every tick.
    #[arg(long, conflicts_with = "demo")]
    pub file: Option<PathBuf>,

    /// Poll the built-in demo payload instead of a file.
    #[arg(long)]
    pub demo: bool,

    /// Seconds between cycles.
    #[arg(long, default_value_t = 10)]
    pub interval_secs: u64,

    /// Stop after this many successful cycles (default: run until
    /// ctrl-c).
    #[arg(long)]
    pub cycles: Option<u64>,

    /// Device identifier tag carried in emitted events.
    #[arg(long, default_value = "x10-debug")]
    pub device_id: String,

    /// Emit each cycle result as JSON instead of a summary line.
    #[arg(long)]
    pub json: bool,

    /// Calibrated raw byte value that maps to a 100% water tank.
    #[arg(long)]
    pub tank_full_raw: Option<u8>,
}

// ── Shared helpers ────────────────────────────────────────────────────────────

/// Loads and ingests a snapshot JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the payload is not a
/// flat JSON object.
pub fn load_snapshot(path: &Path) -> Result<RawSnapshot> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    RawSnapshot::from_json_str(&text)
        .with_context(|| format!("cannot ingest {}", path.display()))
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Inspect(args) => cmd_inspect::run(&args),
        Commands::Decode(args) => cmd_decode::run(&args),
        Commands::Coverage(args) => cmd_coverage::run(&args),
        Commands::Poll(args) => cmd_poll::run(args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
