use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt::writer::BoxMakeWriter, EnvFilter};

const DEFAULT_FILTER: &str = "info";

/// Where and how ranking logs are written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogConfig {
    /// Directory for daily-rotated `<app>.log` files; stdout when `None`.
    pub dir: Option<PathBuf>,
    /// Fallback filter when `RUST_LOG` is unset.
    pub default_filter: Option<String>,
}

impl LogConfig {
    /// `RM_LOG_DIR` and `RM_LOG_LEVEL`.
    pub fn from_env() -> Self {
        Self {
            dir: std::env::var_os("RM_LOG_DIR").map(PathBuf::from),
            default_filter: std::env::var("RM_LOG_LEVEL").ok().filter(|v| !v.trim().is_empty()),
        }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let directive = self.default_filter.as_deref().unwrap_or(DEFAULT_FILTER);
            EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
        })
    }
}

fn file_writer(dir: &Path, app_name: &str) -> Option<(BoxMakeWriter, WorkerGuard)> {
    if let Err(err) = std::fs::create_dir_all(dir) {
        tracing::warn!(error = %err, dir = %dir.display(), "failed to create RM_LOG_DIR; falling back to stdout");
        return None;
    }

    let appender = tracing_appender::rolling::daily(dir, format!("{app_name}.log"));
    let (writer, guard) = tracing_appender::non_blocking(appender);
    Some((BoxMakeWriter::new(writer), guard))
}

/// Installs the global `tracing` subscriber. `RUST_LOG` takes precedence over the config.
///
/// Keep the returned guard alive for the lifetime of the process when logging to files,
/// otherwise buffered lines are dropped. Calling this twice is harmless; the second
/// subscriber is simply not installed.
pub fn init_tracing_subscriber(app_name: &str, config: &LogConfig) -> Option<WorkerGuard> {
    let builder = tracing_subscriber::fmt().with_env_filter(config.filter());

    match config.dir.as_deref().and_then(|dir| file_writer(dir, app_name)) {
        Some((writer, guard)) => {
            let _ = builder.with_ansi(false).with_writer(writer).try_init();
            Some(guard)
        }
        None => {
            let _ = builder.try_init();
            None
        }
    }
}
