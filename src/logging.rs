//! File logging for the `tabpad` binary.
//!
//! Records go to a daily `tabpad.log.<date>` under the data directory's
//! `logs/`, or under the temp dir when that cannot be created. `RUST_LOG`
//! overrides the default `tabpad=info` filter.

use std::io;
use std::path::PathBuf;

use tabpad::kernel::services::adapters::DataDir;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const LOG_FILE: &str = "tabpad.log";
const DEFAULT_FILTER: &str = "tabpad=info";

/// Flushes buffered records when dropped.
pub struct LoggingGuard {
    _worker: WorkerGuard,
}

pub fn init(data_dir: Option<&DataDir>) -> Option<LoggingGuard> {
    let log_dir = match data_dir.map(DataDir::create_logs) {
        Some(Ok(dir)) => dir,
        _ => fallback_log_dir().ok()?,
    };

    let appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE);
    let (writer, worker) = tracing_appender::non_blocking(appender);
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .try_init()
        .ok()?;

    install_panic_hook();
    tracing::info!(
        log_dir = %log_dir.display(),
        version = env!("CARGO_PKG_VERSION"),
        "logging started"
    );

    Some(LoggingGuard { _worker: worker })
}

fn fallback_log_dir() -> io::Result<PathBuf> {
    let dir = std::env::temp_dir().join("tabpad").join("logs");
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Records panics in the log, then defers to the previous hook so the
/// message still reaches stderr.
fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!(panic = %info, "panic");
        previous(info);
    }));
}
