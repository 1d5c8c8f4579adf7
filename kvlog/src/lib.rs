//! # `kvlog`
//!
//! Leveled, structured logging with human-readable text output.
//!
//! Every entry is a message plus a flat list of key/value pairs, written as one line of `key=value` text, or as a
//! JSON object.
//!
//! ## Features
//!
//! - **Levels**: `debug`, `info`, `warn`, `error` and `fatal`, with a per-logger threshold
//! - **Bound fields**: derived loggers carry key/value pairs into every entry they write
//! - **Call sites**: optional `<file:line>` of the calling code, skipping functions marked as helpers
//! - **Escaping**: control characters and quotes never break the line structure, multi-line values are indented
//! - **Styles**: colors and text attributes when writing to a terminal
//! - **`log` bridge**: records of libraries using the `log` facade end up in the same output
//!
//! ## Basic Usage
//!
//! ```rust
//! use kvlog::{Level, Logger, Output, info};
//!
//! let logger = Logger::builder()
//!     .output(Output::Stderr)
//!     .level(Level::Debug)
//!     .prefix("oven")
//!     .build();
//!
//! let degree = 400;
//! info!(logger: logger, "Starting oven", degree, "unit" = "celsius");
//!
//! let baker = logger.with(kvlog::keyvals!(name = "Hugo"));
//! baker.warn("Burnt", kvlog::keyvals!(cakes = 2));
//! ```
//!
//! Without a `logger:` argument the macros, and the free functions at the crate root, write to the process-wide
//! default logger, see [`global`].
//!
//! ```rust
//! kvlog::set_level(kvlog::Level::Warn);
//! kvlog::warn!("Low on flour", "grams" = 120);
//! ```

#![forbid(unsafe_code)]

pub mod bridge;
pub mod caller;
pub mod entry;
pub mod escape;
pub mod fields;
pub mod formatter;
pub mod level;
pub mod logger;
mod macros;
pub mod pool;
pub mod sink;
pub mod style;
#[doc(hidden)]
pub mod test_helpers;
pub mod time;
pub mod value;

pub use fields::Field;
pub use formatter::{Formatter, RenderError};
pub use level::{Level, ParseLevelError};
pub use logger::global::{
    debug, default_logger, error, fatal, helper, info, print, set_default, set_formatter, set_level,
    set_output, set_prefix, set_report_caller, set_report_timestamp, warn, with,
};
pub use logger::{Builder, Logger, global};
pub use sink::Output;
pub use style::{Color, Style, Styles};
pub use value::{MISSING_VALUE, Value};
