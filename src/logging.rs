//! Tracing setup for the board server.
//!
//! Request spans come from the HTTP trace layer and board events from the
//! services; both go through the subscriber installed here. `RUST_LOG`
//! overrides the configured level when set.

use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Arc;

use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::Result;

/// sqlx logs every statement at info.
const QUIET_TARGETS: &[&str] = &["sqlx=warn"];

fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Build the event filter for a configured level name.
fn filter(level: &str) -> EnvFilter {
    let mut filter = EnvFilter::builder()
        .with_default_directive(parse_level(level).into())
        .from_env_lossy();
    for target in QUIET_TARGETS {
        if let Ok(directive) = target.parse() {
            filter = filter.add_directive(directive);
        }
    }
    filter
}

/// Open the log file for appending, creating missing parent directories.
fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

/// Install the global subscriber.
///
/// Events go to stdout, and are also appended to `config.file` when set.
/// Fails if the log file cannot be opened.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let Some(path) = config.file.as_deref() else {
        init_console_only(&config.level);
        return Ok(());
    };

    let log_file = Arc::new(open_log_file(Path::new(path))?);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stdout.and(log_file))
                .with_ansi(false)
                .with_target(true),
        )
        .with(filter(&config.level))
        .init();

    Ok(())
}

/// Install a stdout-only subscriber with colored output.
pub fn init_console_only(level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stdout)
                .with_ansi(true)
                .with_target(true),
        )
        .with(filter(level))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_parse_level() {
        for (name, level) in [
            ("trace", Level::TRACE),
            ("DEBUG", Level::DEBUG),
            ("Info", Level::INFO),
            ("warning", Level::WARN),
            ("error", Level::ERROR),
            ("verbose", Level::INFO),
            ("", Level::INFO),
        ] {
            assert_eq!(parse_level(name), level, "{name:?}");
        }
    }

    #[test]
    fn test_filter_quiets_sqlx() {
        assert!(filter("debug").to_string().contains("sqlx=warn"));
    }

    #[test]
    fn test_open_log_file_creates_directories_and_appends() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logs/nested/qaboard.log");

        writeln!(open_log_file(&path).unwrap(), "first").unwrap();
        writeln!(open_log_file(&path).unwrap(), "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn test_open_log_file_without_subdirectory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("qaboard.log");
        assert!(open_log_file(&path).is_ok());
        assert!(path.exists());
    }
}
