use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use color_eyre::Result;
use color_eyre::eyre::{WrapErr, eyre};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "reel=info,reel_core=info";

/// Where log lines go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Append to a file; used while the TUI owns the terminal
    File(PathBuf),
    Stderr,
}

/// Default log file: `<cache dir>/reel/reel.log`
pub fn default_log_file() -> Option<PathBuf> {
    dirs::cache_dir().map(|d| d.join("reel").join("reel.log"))
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Install the global `tracing` subscriber
pub fn init(target: &LogTarget) -> Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter());

    let installed = match target {
        LogTarget::File(path) => {
            let file = open_log_file(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
    };

    installed.map_err(|e| eyre!("failed to install log subscriber: {e}"))
}

fn open_log_file(path: &Path) -> Result<fs::File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create log directory {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .wrap_err_with(|| format!("failed to open log file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_log_file_creates_parents() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/dir/reel.log");

        open_log_file(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_default_log_file_name() {
        if let Some(path) = default_log_file() {
            assert!(path.ends_with("reel/reel.log"));
        }
    }
}
