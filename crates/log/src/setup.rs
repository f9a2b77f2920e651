use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

/// The handle for the log file writer guard (dropping it will disable the log
/// writer).
pub struct LogGuard {
    #[allow(dead_code)]
    guard: Option<WorkerGuard>,
}

/// Installs the global tracing subscriber.
///
/// Events are written to stdout and, if `log_dir` is given, to a file in that
/// directory named after the current local time. The level defaults to INFO
/// and may be overridden with `RUST_LOG`.
///
/// The returned guard must be kept alive for as long as logs are written.
pub fn init(log_dir: Option<&Path>) -> Result<LogGuard> {
    let (file_layer, guard) = match log_dir {
        Some(log_dir) => {
            // for file name
            let dt = chrono::Local::now();
            let path: PathBuf = dt.format("%Y-%m-%d_%H-%M-%S.log").to_string().into();

            let file_appender = tracing_appender::rolling::never(log_dir, path);
            let (non_blocking_log_writer, guard) = tracing_appender::non_blocking(file_appender);
            (
                Some(
                    fmt::layer()
                        .with_ansi(false)
                        .with_writer(non_blocking_log_writer),
                ),
                Some(guard),
            )
        }
        None => (None, None),
    };

    let collector = tracing_subscriber::registry()
        .with(
            EnvFilter::builder()
                // defaults to INFO if RUST_LOG not set
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .with(fmt::layer().with_writer(std::io::stdout))
        .with(file_layer);
    tracing::subscriber::set_global_default(collector)
        .context("Unable to set a global collector")?;

    Ok(LogGuard { guard })
}
