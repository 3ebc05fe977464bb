//! Tracing setup. The TUI owns the terminal, so events go to a file.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum TelemetryError {
    #[error("cannot open log file: {0}")]
    Io(#[from] io::Error),
    #[error("a global subscriber is already installed")]
    AlreadyInstalled,
}

/// Install a global subscriber appending plain-text events to `path`.
pub fn init_tracing(path: impl AsRef<Path>) -> Result<(), TelemetryError> {
    let file = open_log(path.as_ref())?;
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|_| TelemetryError::AlreadyInstalled)
}

fn open_log(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}
