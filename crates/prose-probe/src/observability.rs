//! Logging setup: a stderr console layer plus an optional JSONL file layer.

use std::path::PathBuf;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

const LOG_PATH_ENV: &str = "PROSE_PROBE_LOG_PATH";
const LOG_DIR_ENV: &str = "PROSE_PROBE_LOG_DIR";
const LOG_FILE_PREFIX: &str = "prose-probe.jsonl";

/// Where the JSONL log file goes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LogTarget {
    /// A single, explicitly named file.
    File(PathBuf),
    /// Daily-rotated files inside a directory.
    Directory(PathBuf),
    /// Console only.
    #[default]
    None,
}

/// Resolved logging destinations.
#[derive(Debug, Clone, Default)]
pub struct ObservabilityConfig {
    /// File layer destination.
    pub target: LogTarget,
}

impl ObservabilityConfig {
    /// Resolve the log destination.
    ///
    /// Precedence: `PROSE_PROBE_LOG_PATH`, `PROSE_PROBE_LOG_DIR`, the
    /// configured `log_dir`, then the platform data directory.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        Self::resolve(
            non_empty_env(LOG_PATH_ENV),
            non_empty_env(LOG_DIR_ENV),
            config_log_dir,
            prose_probe_core::config::user_data_local_dir()
                .map(|dir| dir.join("logs").into_std_path_buf()),
        )
    }

    fn resolve(
        log_path: Option<PathBuf>,
        env_dir: Option<PathBuf>,
        config_dir: Option<PathBuf>,
        platform_dir: Option<PathBuf>,
    ) -> Self {
        let target = match (log_path, env_dir.or(config_dir).or(platform_dir)) {
            (Some(path), _) => LogTarget::File(path),
            (None, Some(dir)) => LogTarget::Directory(dir),
            (None, None) => LogTarget::None,
        };
        Self { target }
    }
}

fn non_empty_env(key: &str) -> Option<PathBuf> {
    std::env::var_os(key)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Filter for the file layer.
///
/// `RUST_LOG` wins; otherwise `-q` gives errors only, `-v` debug, `-vv`
/// trace, and no flag the configured level.
pub fn env_filter(quiet: bool, verbose: u8, default_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => default_level,
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    EnvFilter::new(level)
}

/// Filter for the stderr layer.
///
/// `RUST_LOG` applies here too. Without it the console stays quieter than
/// the file layer unless `-v` is given.
pub fn console_filter(quiet: bool, verbose: u8) -> EnvFilter {
    console_filter_from(std::env::var("RUST_LOG").ok().as_deref(), quiet, verbose)
}

fn console_filter_from(rust_log: Option<&str>, quiet: bool, verbose: u8) -> EnvFilter {
    rust_log
        .filter(|spec| !spec.trim().is_empty())
        .and_then(|spec| EnvFilter::try_new(spec).ok())
        .unwrap_or_else(|| EnvFilter::new(console_directive(quiet, verbose)))
}

const fn console_directive(quiet: bool, verbose: u8) -> &'static str {
    match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "debug",
        (false, _) => "trace",
    }
}

/// Install the global subscriber.
///
/// Returns the file writer's guard, which must be held until exit so
/// buffered lines are flushed. A log directory that cannot be created
/// downgrades to console-only logging.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
    console: EnvFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(console);

    let (file_writer, guard, fallback) = match open_appender(&config.target) {
        Ok(Some(appender)) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(writer), Some(guard), None)
        }
        Ok(None) => (None, None, None),
        Err(err) => (None, None, Some(err)),
    };

    let file_layer = file_writer.map(|writer| {
        fmt::layer()
            .json()
            .with_writer(writer)
            .with_ansi(false)
            .with_current_span(true)
            .with_filter(filter)
    });

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    if let Some(err) = fallback {
        tracing::warn!(error = %err, "file logging disabled");
    }

    Ok(guard)
}

fn open_appender(target: &LogTarget) -> anyhow::Result<Option<rolling::RollingFileAppender>> {
    match target {
        LogTarget::None => Ok(None),
        LogTarget::Directory(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            Ok(Some(rolling::daily(dir, LOG_FILE_PREFIX)))
        }
        LogTarget::File(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), PathBuf::from);
            let Some(name) = path.file_name() else {
                anyhow::bail!("log path has no file name: {}", path.display());
            };
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            Ok(Some(rolling::never(dir, name)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn explicit_path_wins() {
        let cfg = ObservabilityConfig::resolve(
            Some(PathBuf::from("/tmp/a.jsonl")),
            Some(PathBuf::from("/tmp/env")),
            Some(PathBuf::from("/tmp/config")),
            None,
        );
        assert_eq!(cfg.target, LogTarget::File(PathBuf::from("/tmp/a.jsonl")));
    }

    #[test]
    fn directory_precedence() {
        let cfg = ObservabilityConfig::resolve(
            None,
            None,
            Some(PathBuf::from("/tmp/config")),
            Some(PathBuf::from("/tmp/platform")),
        );
        assert_eq!(cfg.target, LogTarget::Directory(PathBuf::from("/tmp/config")));

        let cfg = ObservabilityConfig::resolve(None, None, None, None);
        assert_eq!(cfg.target, LogTarget::None);
    }

    #[test]
    fn console_filter_follows_flags() {
        let hint = |quiet, verbose| console_filter_from(None, quiet, verbose).max_level_hint();
        assert_eq!(hint(true, 3), Some(LevelFilter::ERROR));
        assert_eq!(hint(false, 0), Some(LevelFilter::WARN));
        assert_eq!(hint(false, 1), Some(LevelFilter::DEBUG));
        assert_eq!(hint(false, 2), Some(LevelFilter::TRACE));
    }

    #[test]
    fn rust_log_drives_console_filter() {
        let filter = console_filter_from(Some("debug"), false, 0);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
        let filter = console_filter_from(Some("trace"), true, 0);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));
    }

    #[test]
    fn blank_rust_log_falls_back_to_flags() {
        let filter = console_filter_from(Some("  "), false, 0);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn appender_creates_directory() {
        let tmp = tempfile::TempDir::new().unwrap();
        let dir = tmp.path().join("nested").join("logs");
        let appender = open_appender(&LogTarget::Directory(dir.clone())).unwrap();
        assert!(appender.is_some());
        assert!(dir.is_dir());
        assert!(open_appender(&LogTarget::None).unwrap().is_none());
    }
}
