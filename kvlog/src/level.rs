//! Log levels and level thresholds.
//!
//! Levels are ordered from most verbose to most critical:
//! [`Level::Debug`] < [`Level::Info`] < [`Level::Warn`] < [`Level::Error`] < [`Level::Fatal`] < [`Level::Off`].
//!
//! A logger drops every entry whose level is below its configured threshold.
//! [`Level::Off`] only makes sense as a threshold and suppresses every real level.
//! Entries written with [`Logger::print`](crate::Logger::print) carry no level at all and are never filtered.
//!
//! # Examples
//!
//! ```rust
//! use kvlog::Level;
//!
//! assert!(Level::Debug < Level::Info);
//! assert_eq!("warn".parse::<Level>(), Ok(Level::Warn));
//! assert_eq!(Level::Error.to_string(), "ERROR");
//! ```

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Log entry severity and logger threshold.
#[derive(
    Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// The "debug" level.
    ///
    /// Designates lower priority information.
    Debug,

    /// The "info" level.
    ///
    /// Designates useful information.
    #[default]
    Info,

    /// The "warn" level.
    ///
    /// Designates hazardous situations.
    Warn,

    /// The "error" level.
    ///
    /// Designates very serious errors.
    Error,

    /// The "fatal" level.
    ///
    /// Designates critical failures, [`Logger::fatal`](crate::Logger::fatal) terminates the process after
    /// writing the entry.
    Fatal,

    /// Threshold that suppresses every level.
    Off,
}

impl Level {
    /// All levels in ascending order.
    pub const ALL: [Level; 6] = [
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Fatal,
        Level::Off,
    ];

    /// Returns the upper case name used by the text formatter.
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
            Level::Off => "OFF",
        }
    }

    /// Returns `true` if an entry at `level` passes this threshold.
    ///
    /// `None` is the "no level" marker used by [`Logger::print`](crate::Logger::print) and always passes.
    pub fn allows(self, level: Option<Level>) -> bool {
        match level {
            Some(level) => self <= level,
            None => true,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a [`Level`] from an unknown name.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown level {0:?}, expected one of debug, info, warn, error, fatal or off")]
pub struct ParseLevelError(String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        Level::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(string.trim()))
            .ok_or_else(|| ParseLevelError(string.to_owned()))
    }
}
