//! Log file setup.
//!
//! The terminal belongs to the TUI, so events go to `<page>.log` in the
//! storage directory. `RUST_LOG` overrides the default `info` filter.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{Error, Result};

/// Install the global subscriber writing to `<dir>/<page>.log`.
///
/// Returns the log file path.
pub fn init(dir: &Path, page: &str) -> Result<PathBuf> {
    let path = dir.join(format!("{page}.log"));
    let file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| Error::io(e, path.clone()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| Error::Msg(format!("Failed to install logger: {e}")))?;

    Ok(path)
}
