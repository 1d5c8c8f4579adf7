//! Forwarding of [`log`] records to a [`Logger`].
//!
//! Libraries using the `log` facade end up in the same output as the application's own entries.
//! `log` has no fatal level and one more verbose level than this crate, so [`log::Level::Trace`] is written as
//! [`Level::Debug`].
//! The record target becomes a `target` field.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use kvlog::Logger;
//!
//! kvlog::bridge::init(Arc::new(Logger::new())).unwrap();
//! log::info!(target: "oven", "preheating");
//! ```

use std::sync::Arc;

use crate::level::Level;
use crate::logger::Logger;
use crate::value::Value;

/// A [`log::Log`] implementation writing to a [`Logger`].
#[derive(Debug)]
pub struct LogBridge {
    logger: Arc<Logger>,
}

impl LogBridge {
    /// Creates a bridge writing to `logger`.
    pub fn new(logger: Arc<Logger>) -> Self {
        Self { logger }
    }

    /// The logger records are written to.
    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }
}

/// Maps a `log` level to the level it is written at.
pub fn level_from_log(level: log::Level) -> Level {
    match level {
        log::Level::Error => Level::Error,
        log::Level::Warn => Level::Warn,
        log::Level::Info => Level::Info,
        log::Level::Debug | log::Level::Trace => Level::Debug,
    }
}

/// Maps a threshold to the most verbose `log` level it lets through.
pub fn max_level_filter(threshold: Level) -> log::LevelFilter {
    match threshold {
        Level::Debug => log::LevelFilter::Trace,
        Level::Info => log::LevelFilter::Info,
        Level::Warn => log::LevelFilter::Warn,
        Level::Error => log::LevelFilter::Error,
        Level::Fatal | Level::Off => log::LevelFilter::Off,
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        self.logger
            .level()
            .allows(Some(level_from_log(metadata.level())))
    }

    fn log(&self, record: &log::Record<'_>) {
        let target = record.target();
        let keyvals = if target.is_empty() {
            Vec::new()
        } else {
            vec![Value::from("target"), Value::from(target)]
        };

        self.logger.emit(
            Some(level_from_log(record.level())),
            Some(record.args()),
            &keyvals,
        );
    }

    fn flush(&self) {
        let _ = self.logger.flush();
    }
}

/// Installs a [`LogBridge`] to `logger` as the global `log` logger.
///
/// The `log` max level is derived from the logger's current level.
pub fn init(logger: Arc<Logger>) -> Result<(), log::SetLoggerError> {
    let max_level = max_level_filter(logger.level());
    log::set_boxed_logger(Box::new(LogBridge::new(logger)))?;
    log::set_max_level(max_level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use log::Log;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::{LogBridge, level_from_log, max_level_filter};
    use crate::level::Level;
    use crate::logger::Logger;
    use crate::sink::Output;
    use crate::test_helpers::SharedBuffer;

    #[test_case(log::Level::Trace, Level::Debug; "trace")]
    #[test_case(log::Level::Debug, Level::Debug; "debug")]
    #[test_case(log::Level::Info, Level::Info; "info")]
    #[test_case(log::Level::Warn, Level::Warn; "warn")]
    #[test_case(log::Level::Error, Level::Error; "error")]
    fn levels(level: log::Level, expected: Level) {
        assert_eq!(level_from_log(level), expected);
    }

    #[test]
    fn max_levels() {
        assert_eq!(max_level_filter(Level::Debug), log::LevelFilter::Trace);
        assert_eq!(max_level_filter(Level::Warn), log::LevelFilter::Warn);
        assert_eq!(max_level_filter(Level::Fatal), log::LevelFilter::Off);
    }

    #[test]
    fn records_are_forwarded() {
        let buffer = SharedBuffer::default();
        let logger = Logger::builder()
            .output(Output::writer(buffer.clone()))
            .build();
        let bridge = LogBridge::new(Arc::new(logger));

        bridge.log(
            &log::Record::builder()
                .level(log::Level::Warn)
                .target("oven::door")
                .args(format_args!("door open for {}s", 30))
                .build(),
        );
        bridge.log(
            &log::Record::builder()
                .level(log::Level::Trace)
                .args(format_args!("filtered"))
                .build(),
        );
        bridge.log(
            &log::Record::builder()
                .level(log::Level::Info)
                .target("")
                .args(format_args!("no target"))
                .build(),
        );

        assert!(bridge.enabled(&log::Metadata::builder().level(log::Level::Info).build()));
        assert!(!bridge.enabled(&log::Metadata::builder().level(log::Level::Debug).build()));
        assert_eq!(
            buffer.contents(),
            "WARN door open for 30s target=oven::door\nINFO no target\n"
        );
    }
}
