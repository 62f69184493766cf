//! Application logging
//!
//! The terminal belongs to the editor, so log output goes to a daily file
//! under `<config dir>/codepad/logs/`. The filter comes from `CODEPAD_LOG`
//! (e.g. `CODEPAD_LOG=codepad=trace`) and defaults to `warn`.

use std::fs;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::{EditorError, Result};

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "CODEPAD_LOG";

/// Get the path to the logs directory
pub fn logs_dir() -> PathBuf {
    Config::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("logs")
}

/// Install the global subscriber writing to the default logs directory
///
/// Keep the returned guard alive for the life of the program; dropping it
/// flushes buffered log lines.
pub fn init() -> Result<WorkerGuard> {
    init_in(&logs_dir())
}

/// Install the global subscriber writing to `dir`
pub fn init_in(dir: &Path) -> Result<WorkerGuard> {
    fs::create_dir_all(dir)?;

    let appender = tracing_appender::rolling::daily(dir, "codepad.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| EditorError::Logging(e.to_string()))?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logs_live_under_config_dir() {
        let dir = logs_dir();
        assert!(dir.ends_with("logs"));
    }

    #[test]
    fn test_init_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("logs");
        // A second global subscriber may already exist in this test binary;
        // either way the directory must be created first.
        let _ = init_in(&dir);
        assert!(dir.is_dir());
    }
}
