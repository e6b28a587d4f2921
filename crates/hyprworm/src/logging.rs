//! Tracing subscriber setup
//!
//! Configuration is loaded before the real subscriber exists, so that phase
//! runs under a temporary stderr-only subscriber. Afterwards one global
//! subscriber is installed from the loaded [`Config`] and never changed.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use hyprworm_config::Config;
use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Run `f` with warnings and errors going to stderr
pub fn with_bootstrap<T>(f: impl FnOnce() -> T) -> T {
    let subscriber = fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::WARN)
        .finish();
    tracing::subscriber::with_default(subscriber, f)
}

/// Install the process-wide subscriber described by `config`
///
/// `RUST_LOG` takes precedence over `log_level`. A log file that cannot be
/// opened is reported and otherwise ignored.
pub fn init(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_directive()));
    let (subscriber, file_error) = build_subscriber(config, filter, std::io::stderr);
    subscriber.init();

    if let (Some(path), Some(e)) = (&config.log_file, file_error) {
        tracing::warn!("Cannot open log file {}: {}", path.display(), e);
    }
}

fn build_subscriber<W>(
    config: &Config,
    filter: EnvFilter,
    stderr: W,
) -> (impl Subscriber + Send + Sync + 'static, Option<std::io::Error>)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let (file, file_error) = match config.log_file.as_deref().map(open_log_file) {
        Some(Ok(file)) => (Some(file), None),
        Some(Err(e)) => (None, Some(e)),
        None => (None, None),
    };
    let file_layer = file.map(|file| {
        fmt::layer()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_target(false)
    });

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(stderr)
                .with_target(false),
        )
        .with(file_layer);

    (subscriber, file_error)
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyprworm_config::LogLevel;

    #[test]
    fn test_log_file_receives_events_at_or_above_level() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("hyprworm.log");
        std::fs::write(&path, "earlier run\n").unwrap();

        let config = Config {
            log_level: LogLevel::Warn,
            log_file: Some(path.clone()),
            ..Config::default()
        };

        let filter = EnvFilter::new(config.log_level.as_directive());
        let (subscriber, file_error) = build_subscriber(&config, filter, fmt::TestWriter::new());
        assert!(file_error.is_none());
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("suppressed message");
            tracing::warn!("kept message");
        });

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("earlier run\n"), "file must be appended to");
        assert!(contents.contains("WARN"));
        assert!(contents.contains("kept message"));
        assert!(!contents.contains("suppressed message"));
    }

    #[test]
    fn test_unopenable_log_file_is_reported() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = Config {
            // A directory cannot be opened for appending
            log_file: Some(temp_dir.path().to_path_buf()),
            ..Config::default()
        };

        let (_subscriber, file_error) =
            build_subscriber(&config, EnvFilter::new("info"), fmt::TestWriter::new());
        assert!(file_error.is_some());
    }
}
