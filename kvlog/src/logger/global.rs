//! The process-wide default logger.
//!
//! The free functions in this module, and the logging macros without a `logger:` argument, write to the default
//! logger, which starts out as [`Logger::new()`].
//!
//! # Examples
//!
//! ```rust
//! kvlog::set_report_caller(true);
//! kvlog::info("Starting oven", &["degree".into(), 400.into()]);
//! ```

use std::fmt;
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;

use super::Logger;
use crate::formatter::Formatter;
use crate::level::Level;
use crate::sink::Output;
use crate::value::Value;

static DEFAULT: LazyLock<RwLock<Arc<Logger>>> =
    LazyLock::new(|| RwLock::new(Arc::new(Logger::new())));

/// Returns the default logger.
pub fn default_logger() -> Arc<Logger> {
    DEFAULT.read().clone()
}

/// Replaces the default logger.
///
/// Helpers marked on the previous default logger are not carried over.
pub fn set_default(logger: Logger) {
    *DEFAULT.write() = Arc::new(logger);
}

/// Logs a debug message with the default logger.
pub fn debug(message: impl fmt::Display, keyvals: &[Value<'_>]) {
    default_logger().debug(message, keyvals);
}

/// Logs an info message with the default logger.
pub fn info(message: impl fmt::Display, keyvals: &[Value<'_>]) {
    default_logger().info(message, keyvals);
}

/// Logs a warning with the default logger.
pub fn warn(message: impl fmt::Display, keyvals: &[Value<'_>]) {
    default_logger().warn(message, keyvals);
}

/// Logs an error with the default logger.
pub fn error(message: impl fmt::Display, keyvals: &[Value<'_>]) {
    default_logger().error(message, keyvals);
}

/// Logs a fatal message with the default logger and terminates the process.
pub fn fatal(message: impl fmt::Display, keyvals: &[Value<'_>]) -> ! {
    default_logger().fatal(message, keyvals)
}

/// Logs a message without a level with the default logger.
pub fn print(message: impl fmt::Display, keyvals: &[Value<'_>]) {
    default_logger().print(message, keyvals);
}

/// Marks the calling function as a helper of the default logger.
pub fn helper() {
    default_logger().helper();
}

/// Returns a logger derived from the default logger with `keyvals` bound.
pub fn with(keyvals: &[Value<'_>]) -> Logger {
    default_logger().with(keyvals)
}

/// Sets the level of the default logger.
pub fn set_level(level: Level) {
    default_logger().set_level(level);
}

/// Sets the prefix of the default logger.
pub fn set_prefix(prefix: impl Into<String>) {
    default_logger().set_prefix(prefix);
}

/// Enables or disables reporting the call site on the default logger.
pub fn set_report_caller(report_caller: bool) {
    default_logger().set_report_caller(report_caller);
}

/// Enables or disables reporting the time on the default logger.
pub fn set_report_timestamp(report_timestamp: bool) {
    default_logger().set_report_timestamp(report_timestamp);
}

/// Replaces the output of the default logger.
pub fn set_output(output: Output) {
    default_logger().set_output(output);
}

/// Sets the output format of the default logger.
pub fn set_formatter(formatter: Formatter) {
    default_logger().set_formatter(formatter);
}
