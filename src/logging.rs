//! File logging for the terminal runner.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};

/// Install a global `tracing` subscriber that writes to `path`.
///
/// Never logs to the terminal: it is in raw mode on the alternate screen.
/// Fails if the file cannot be created or a subscriber is already installed.
pub fn init_file_logging(path: &Path) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow!(e))
        .context("installing the log subscriber")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_log(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("ladder-games-{}-{}.log", name, std::process::id()))
    }

    #[test]
    fn second_install_is_reported() {
        let first = temp_log("first");
        let second = temp_log("second");
        init_file_logging(&first).unwrap();
        tracing::info!("hello");

        let err = init_file_logging(&second).unwrap_err();
        assert!(err.to_string().contains("log subscriber"));

        let _ = std::fs::remove_file(first);
        let _ = std::fs::remove_file(second);
    }

    #[test]
    fn unwritable_path_is_reported() {
        let dir = std::env::temp_dir().join("ladder-games-missing-dir").join("x");
        let err = init_file_logging(&dir.join("run.log")).unwrap_err();
        assert!(err.to_string().contains("creating log file"));
    }
}
