//! Logging setup
//!
//! Two tracing layers:
//! - stdout, human readable
//! - daily rolling JSON files in the log directory
//!
//! `log` macro output is bridged into tracing, and rolled-over files from
//! earlier days are gzipped in the background.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Layer};

/// Log file prefix; the appender adds `.YYYY-MM-DD`.
pub const LOG_FILE_NAME: &str = "quest-editor.log";

/// Initialize the logging system.
///
/// `default_filter` applies when `RUST_LOG` is unset. Returns a `WorkerGuard`
/// which must be kept alive for the duration of the process so buffered file
/// output is flushed on shutdown.
pub fn init(log_dir: &Path, default_filter: &str) -> WorkerGuard {
    if !log_dir.exists() {
        if let Err(e) = fs::create_dir_all(log_dir) {
            eprintln!("Failed to create logs directory: {}", e);
        }
    }

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // JSON for easy ingestion
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_target(true)
        .with_filter(env_filter(default_filter));

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stdout)
        .with_target(false)
        .with_filter(env_filter(default_filter));

    let subscriber = tracing_subscriber::registry()
        .with(file_layer)
        .with(stdout_layer);
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to install tracing subscriber: {}", e);
    }

    if let Err(e) = tracing_log::LogTracer::init() {
        eprintln!("Failed to initialize LogTracer: {}", e);
    }

    // After init so the compressor's own log lines land somewhere.
    let log_dir_clone = log_dir.to_path_buf();
    std::thread::spawn(move || {
        compress_old_logs(&log_dir_clone);
    });

    tracing::info!(
        "Logging initialized. Writing to: {:?} (daily rolling)",
        log_dir.join(LOG_FILE_NAME)
    );

    guard
}

/// `RUST_LOG` if set, otherwise `default_filter`.
fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Whether a file in the log directory is a finished log awaiting compression.
fn should_compress(name: &str, today_suffix: &str) -> bool {
    name.starts_with(&format!("{LOG_FILE_NAME}."))
        && !name.ends_with(today_suffix)
        && !name.ends_with(".gz")
}

/// Compress rolled-over log files from previous days.
fn compress_old_logs(log_dir: &Path) {
    let today_suffix = chrono::Local::now().format("%Y-%m-%d").to_string();

    let Ok(entries) = fs::read_dir(log_dir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !should_compress(name, &today_suffix) {
            continue;
        }
        match compress_file(&path) {
            Ok(gz) => tracing::info!("Compressed old log: {:?}", gz),
            Err(e) => tracing::warn!("Failed to compress old log {:?}: {}", path, e),
        }
    }
}

/// Gzip `path` to `<path>.gz` and remove the original.
fn compress_file(path: &Path) -> io::Result<PathBuf> {
    let mut gz_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No filename"))?
        .to_os_string();
    gz_name.push(".gz");
    let gz_path = path.with_file_name(gz_name);

    if gz_path.exists() {
        return Ok(gz_path);
    }

    let mut reader = io::BufReader::new(fs::File::open(path)?);
    let mut encoder = GzEncoder::new(fs::File::create(&gz_path)?, Compression::default());
    io::copy(&mut reader, &mut encoder)?;
    encoder.finish()?;

    fs::remove_file(path)?;
    Ok(gz_path)
}
