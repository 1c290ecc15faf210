use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glob::glob;
use lorwire_core::{
    HEARTBEAT_BYTES, HEARTBEAT_INTERVAL, LorError, Request, SourceConfig, describe_batch, to_hex,
    load_request_file, map_intensity, required_len, write_all,
};
use tracing::{debug, info};

mod logging;

use logging::{LogFormat, LogLevel, init_logging};

/// One day of frames at the recommended heartbeat interval.
const MAX_HEARTBEAT_COUNT: usize = 2 * 60 * 60 * 24;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit ",
    env!("LORWIRE_BUILD_COMMIT"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "lorwire")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Encoder for LOR lighting-control wire frames.",
    long_about = None,
    after_help = "Examples:\n  lorwire encode show.json -o show.bin\n  lorwire encode show.json --stdout\n  lorwire inspect show.json --pretty\n  lorwire intensity 0 128 255"
)]
struct Cli {
    /// Log verbosity (stderr)
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Warn, env = "LORWIRE_LOG_LEVEL")]
    log_level: LogLevel,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text, env = "LORWIRE_LOG_FORMAT")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode a JSON request file into wire bytes.
    Encode {
        /// Path to a .json request file (a glob matching one file is accepted)
        input: PathBuf,

        /// Output path for the raw encoded bytes
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        output: Option<PathBuf>,

        /// Write lowercase hex to stdout instead of a file
        #[arg(long, conflicts_with = "output")]
        stdout: bool,

        /// Destination buffer size in bytes (default: exactly what the batch needs)
        #[arg(long)]
        capacity: Option<usize>,

        /// Treat intensity arguments as 0-255 levels and map them to the native scale
        #[arg(long)]
        byte_levels: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,
    },
    /// Describe each encoded frame of a request file as JSON.
    Inspect {
        /// Path to a .json request file
        input: PathBuf,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Treat intensity arguments as 0-255 levels and map them to the native scale
        #[arg(long)]
        byte_levels: bool,
    },
    /// Map 0-255 levels onto the native 1-240 intensity scale.
    Intensity {
        /// Byte-domain levels
        #[arg(required = true)]
        levels: Vec<u8>,
    },
    /// Emit the fixed link heartbeat frame.
    Heartbeat {
        /// Number of heartbeat frames to emit
        #[arg(long, default_value_t = 1)]
        count: usize,

        /// Output path for the raw bytes
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        output: Option<PathBuf>,

        /// Write one hex frame per line to stdout
        #[arg(long, conflicts_with = "output")]
        stdout: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let result = match cli.command {
        Commands::Encode {
            input,
            output,
            stdout,
            capacity,
            byte_levels,
            quiet,
        } => cmd_encode(input, output, stdout, capacity, byte_levels, quiet),
        Commands::Inspect {
            input,
            pretty,
            compact,
            byte_levels,
        } => cmd_inspect(input, pretty, compact, byte_levels),
        Commands::Intensity { levels } => {
            cmd_intensity(&levels);
            Ok(())
        }
        Commands::Heartbeat {
            count,
            output,
            stdout,
        } => cmd_heartbeat(count, output, stdout),
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

fn cmd_encode(
    input: PathBuf,
    output: Option<PathBuf>,
    stdout: bool,
    capacity: Option<usize>,
    byte_levels: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&input)?;
    let requests = load_requests(&resolved_input, byte_levels)?;

    let needed = required_len(&requests);
    // A buffer of `needed` bytes behaves like any larger one.
    let capacity = capacity.map_or(needed, |capacity| capacity.min(needed));
    let mut buf = vec![0u8; capacity];
    let written = write_all(&mut buf, &requests).map_err(|err| match err {
        LorError::InsufficientCapacity { required, capacity } => CliError::new(
            format!(
                "capacity of {} bytes exceeded (needed {} bytes so far)",
                capacity, required
            ),
            Some(format!("use --capacity {} or more for this batch", needed)),
        ),
        other => CliError::new(other.to_string(), None),
    })?;
    buf.truncate(written);
    info!(frames = requests.len(), bytes = written, "batch encoded");

    if stdout {
        println!("{}", to_hex(&buf));
        return Ok(());
    }

    let output = output.ok_or_else(|| {
        CliError::new(
            "missing output path",
            Some("use -o/--output or --stdout".to_string()),
        )
    })?;
    ensure_distinct_output(&resolved_input, &output)?;
    write_output(&output, &buf)?;

    if !quiet {
        eprintln!("OK: {} bytes written -> {}", written, output.display());
    }
    Ok(())
}

fn cmd_inspect(
    input: PathBuf,
    pretty: bool,
    compact: bool,
    byte_levels: bool,
) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&input)?;
    let requests = load_requests(&resolved_input, byte_levels)?;
    let report = describe_batch(&requests);
    let json = serialize_report(&report, pretty, compact)?;
    println!("{}", json);
    Ok(())
}

fn cmd_intensity(levels: &[u8]) {
    for &level in levels {
        println!("{} -> {}", level, map_intensity(level));
    }
}

fn cmd_heartbeat(count: usize, output: Option<PathBuf>, stdout: bool) -> Result<(), CliError> {
    if count > MAX_HEARTBEAT_COUNT {
        return Err(CliError::new(
            format!("heartbeat count {} is too large", count),
            Some(format!("use --count {} or less", MAX_HEARTBEAT_COUNT)),
        ));
    }
    debug!(
        count,
        interval_ms = HEARTBEAT_INTERVAL.as_millis() as u64,
        "emitting heartbeat frames"
    );
    if stdout {
        let line = to_hex(&HEARTBEAT_BYTES);
        for _ in 0..count {
            println!("{}", line);
        }
        return Ok(());
    }

    let output = output.ok_or_else(|| {
        CliError::new(
            "missing output path",
            Some("use -o/--output or --stdout".to_string()),
        )
    })?;
    let bytes = HEARTBEAT_BYTES.repeat(count);
    write_output(&output, &bytes)
}

fn load_requests(input: &Path, byte_levels: bool) -> Result<Vec<Request>, CliError> {
    validate_input_file(input)?;
    let config = SourceConfig {
        intensity_fn: byte_levels.then_some(map_intensity as lorwire_core::IntensityFn),
    };
    let requests = load_request_file(input, &config)
        .with_context(|| format!("Failed to load requests: {}", input.display()))?;
    Ok(requests)
}

fn serialize_report(
    report: &lorwire_core::BatchReport,
    pretty: bool,
    compact: bool,
) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(report)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(report)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn write_output(output: &Path, bytes: &[u8]) -> Result<(), CliError> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    fs::write(output, bytes)
        .with_context(|| format!("Failed to write output: {}", output.display()))?;
    Ok(())
}

fn ensure_distinct_output(input: &Path, output: &Path) -> Result<(), CliError> {
    let input_abs = fs::canonicalize(input)
        .with_context(|| format!("Failed to resolve input path: {}", input.display()))?;
    let output_dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::canonicalize(parent).ok(),
        _ => fs::canonicalize(".").ok(),
    };
    let (Some(dir), Some(name)) = (output_dir, output.file_name()) else {
        return Ok(());
    };
    if dir.join(name) == input_abs {
        return Err(CliError::new(
            format!("output path must differ from input: {}", output.display()),
            Some("choose a different output path".to_string()),
        ));
    }
    Ok(())
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("use a .json request file".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("use a .json request file".to_string()),
        ));
    }
    let ext = input
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if ext != "json" {
        return Err(CliError::new(
            format!("unsupported input format '{}'", input.display()),
            Some("expected a .json request file".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern; expected a .json file".to_string()),
        ));
    }
    if matches.len() > 1 {
        let listed = matches
            .iter()
            .take(3)
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let more = if matches.len() > 3 { ", ..." } else { "" };
        return Err(CliError::new(
            format!(
                "multiple files match pattern '{}' ({} matches); matches: {}{}",
                pattern,
                matches.len(),
                listed,
                more
            ),
            Some("pass a single request file, or run once per file".to_string()),
        ));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
