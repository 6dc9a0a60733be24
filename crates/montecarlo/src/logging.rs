//! File logging for the CLI
//!
//! Everything goes to `<data_dir>/montecarlo.log` through a non-blocking
//! appender. The file is trimmed at startup once it grows past
//! [`MAX_LOG_BYTES`].

use std::fs::OpenOptions;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_FILE: &str = "montecarlo.log";
const MAX_LOG_BYTES: u64 = 5 * 1024 * 1024;
const TAIL_BYTES: u64 = 1024 * 1024;
const TRIM_MARKER: &[u8] = b"--- Log rotated (older entries removed) ---\n";

/// Cut the log down to its last `tail` bytes once it exceeds `limit`.
///
/// The kept tail starts on a line boundary. Returns whether the file was trimmed.
fn trim_log(path: &Path, limit: u64, tail: u64) -> io::Result<bool> {
    let mut file = match OpenOptions::new().read(true).write(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };
    let len = file.metadata()?.len();
    if len <= limit {
        return Ok(false);
    }

    file.seek(SeekFrom::Start(len.saturating_sub(tail)))?;
    let mut kept = Vec::with_capacity(tail as usize);
    file.read_to_end(&mut kept)?;
    let start = kept.iter().position(|&b| b == b'\n').map_or(0, |i| i + 1);

    file.set_len(0)?;
    file.rewind()?;
    file.write_all(TRIM_MARKER)?;
    file.write_all(&kept[start..])?;
    Ok(true)
}

/// Install the global subscriber writing to the data directory's log file.
///
/// `RUST_LOG` takes precedence over `level`. The returned guard flushes
/// buffered lines on drop and must be held until the program exits.
pub fn init_logging(data_dir: &Path, level: &str) -> color_eyre::Result<WorkerGuard> {
    std::fs::create_dir_all(data_dir)?;

    let log_path = data_dir.join(LOG_FILE);
    let trimmed = trim_log(&log_path, MAX_LOG_BYTES, TAIL_BYTES);

    let file = OpenOptions::new().create(true).append(true).open(&log_path)?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("montecarlo={level},montecarlo_core=warn")));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .init();

    match trimmed {
        Ok(true) => tracing::info!(path = %log_path.display(), "Trimmed log file"),
        Ok(false) => {}
        Err(e) => tracing::warn!(path = %log_path.display(), "Failed to trim log file: {e}"),
    }
    tracing::debug!(path = %log_path.display(), "Logging initialized");
    Ok(guard)
}
