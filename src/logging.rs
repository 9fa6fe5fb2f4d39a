use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

/// Initialise logging. When `debug` is set the default level is `debug` and
/// `RUST_LOG` may override it; otherwise the level is forced to `info`.
/// With `log_file` the output goes to that file instead of stderr.
///
/// Only the first call installs a subscriber.
pub fn init(debug: bool, log_file: Option<PathBuf>) {
    // Forcing `info` keeps a stray `RUST_LOG` in the user's environment from
    // turning on verbose output.
    let level = if debug { "debug" } else { "info" };

    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        EnvFilter::new(level)
    };

    let file = log_file.and_then(|path| match file_appender(&path) {
        Ok(appender) => Some(appender),
        Err(err) => {
            eprintln!("cannot log to {}: {err:#}; using stderr", path.display());
            None
        }
    });

    let _ = match file {
        Some(appender) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(appender)
            .try_init(),
        None => tracing_subscriber::fmt().with_env_filter(filter).try_init(),
    };
}

fn file_appender(path: &Path) -> anyhow::Result<RollingFileAppender> {
    let name = path
        .file_name()
        .context("log path has no file name")?
        .to_string_lossy()
        .into_owned();
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    Ok(RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(name)
        .build(dir)?)
}
