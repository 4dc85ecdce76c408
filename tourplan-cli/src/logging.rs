//! Logger installation for the binary.

use std::io::Write;

use clap::ValueEnum;
use env_logger::{Builder, Target, WriteStyle};
use log::{Level, LevelFilter};
use serde::{Deserialize, Serialize};

use crate::CliError;

/// Verbosity accepted by `--log-level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only.
    Error,
    /// Warnings, including under-assigned workers and solver fallbacks.
    #[value(alias = "warning")]
    Warn,
    /// Run summaries.
    Info,
    /// Every committed job.
    Debug,
    /// Solver internals.
    Trace,
    /// Nothing.
    Off,
}

impl LogLevel {
    /// Matching `log` filter.
    #[must_use]
    pub const fn to_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
            Self::Off => LevelFilter::Off,
        }
    }
}

/// Install a compact stderr logger.
///
/// An explicit `level` wins; otherwise `RUST_LOG` applies on top of an
/// `info` default.
pub(crate) fn init_logging(level: Option<LogLevel>) -> Result<(), CliError> {
    let mut builder = Builder::new();
    builder
        .write_style(WriteStyle::Never)
        .target(Target::Stderr)
        .format(|buf, record| writeln!(buf, "{} {}", level_tag(record.level()), record.args()));
    match level {
        Some(explicit) => {
            builder.filter_level(explicit.to_filter());
        }
        None => {
            builder.filter_level(LevelFilter::Info).parse_default_env();
        }
    }
    builder.try_init()?;
    Ok(())
}

const fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(LogLevel::Error, LevelFilter::Error)]
    #[case(LogLevel::Warn, LevelFilter::Warn)]
    #[case(LogLevel::Info, LevelFilter::Info)]
    #[case(LogLevel::Debug, LevelFilter::Debug)]
    #[case(LogLevel::Trace, LevelFilter::Trace)]
    #[case(LogLevel::Off, LevelFilter::Off)]
    fn maps_levels_to_filters(#[case] level: LogLevel, #[case] filter: LevelFilter) {
        assert_eq!(level.to_filter(), filter);
    }

    #[rstest]
    fn tags_are_upper_case() {
        assert_eq!(level_tag(Level::Warn), "WARN");
        assert_eq!(level_tag(Level::Trace), "TRACE");
    }
}
