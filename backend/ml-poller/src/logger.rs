use crate::error::{PollerError, Result as PollerErrorResult};

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use fern::colors::{Color, ColoredLevelConfig};
use fern::{Dispatch, FormatCallback, Output};
use log::{Record, info};

/// Initialize logger with fern
///
/// # Arguments
/// * `log_level` - Log level filter
/// * `log_file` - Optional path to log file. None = stdout, Some = file output
/// * `colored` - Color the level on stdout (never applied to the file)
#[track_caller]
pub fn initialize(
    log_level: ml_config::LogLevel,
    log_file: Option<PathBuf>,
    colored: bool,
) -> PollerErrorResult<()> {
    let level_filter = log_level.0;

    let (output, colors) = open_sink(log_file.as_deref(), colored)?;

    Dispatch::new()
        .level(level_filter)
        // sqlx logs every statement it runs
        .level_for("sqlx", log::LevelFilter::Warn)
        .format(move |out, message, record| match colors {
            Some(colors) => write_line(out, message, record, colors.color(record.level())),
            None => write_line(out, message, record, record.level()),
        })
        .chain(output)
        .apply()
        .map_err(|e| PollerError::logger(format!("Failed to initialize logger: {e}")))?;

    match log_file {
        Some(ref path) => info!(
            "Logger initialized: level={:?}, file={}",
            level_filter,
            path.display()
        ),
        None => info!("Logger initialized: level={:?}, stdout", level_filter),
    }

    Ok(())
}

/// File output is never colored; stdout is colored on request.
#[track_caller]
pub(crate) fn open_sink(
    log_file: Option<&Path>,
    colored: bool,
) -> PollerErrorResult<(Output, Option<ColoredLevelConfig>)> {
    match log_file {
        Some(log_path) => {
            if let Some(parent) = log_path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| PollerError::io(parent, e))?;
            }
            let file = fern::log_file(log_path).map_err(|e| PollerError::io(log_path, e))?;
            Ok((file.into(), None))
        }
        None => Ok((std::io::stdout().into(), colored.then(level_colors))),
    }
}

fn level_colors() -> ColoredLevelConfig {
    ColoredLevelConfig::new()
        .trace(Color::Magenta)
        .debug(Color::Blue)
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red)
}

/// `[rfc3339 - LEVEL] message [file:line]`
fn write_line(
    out: FormatCallback<'_>,
    message: &fmt::Arguments<'_>,
    record: &Record<'_>,
    level: impl fmt::Display,
) {
    out.finish(format_args!(
        "[{date} - {level}] {message} [{file}:{line}]",
        date = humantime::format_rfc3339(SystemTime::now()),
        file = record.file().unwrap_or("unknown"),
        line = record.line().unwrap_or(0),
    ))
}
