//! The logger façade.
//!
//! A [`Logger`] owns its configuration and a render buffer behind one lock.
//! Every log call holds the lock for the whole filter, assemble, render and write sequence, so concurrent callers
//! never interleave their lines.
//!
//! # Examples
//!
//! ```rust
//! use kvlog::test_helpers::SharedBuffer;
//! use kvlog::{Level, Logger, Output};
//!
//! let buffer = SharedBuffer::default();
//! let logger = Logger::builder()
//!     .output(Output::writer(buffer.clone()))
//!     .level(Level::Debug)
//!     .build();
//!
//! let requests = logger.with(&["service".into(), "api".into()]);
//! requests.debug("accepted", &["path".into(), "/health".into()]);
//!
//! assert_eq!(buffer.contents(), "DEBUG accepted service=api path=/health\n");
//! ```

use std::fmt;
use std::io;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::caller::CallerResolver;
use crate::entry::{self, Snapshot};
use crate::fields::BoundFields;
use crate::formatter::{Formatter, RenderContext};
use crate::level::Level;
use crate::sink::Output;
use crate::style::Styles;
use crate::time::{DEFAULT_TIME_FORMAT, TimeFunction, local_now};
use crate::value::Value;

mod builder;
pub mod global;

pub use self::builder::Builder;

/// Configuration copied into derived loggers.
#[derive(Clone, Debug)]
struct Config {
    level: Level,
    prefix: String,
    time_function: TimeFunction,
    time_format: String,
    formatter: Formatter,
    report_caller: bool,
    report_timestamp: bool,
    /// `None` styles the output only when it is a terminal.
    styles_enabled: Option<bool>,
    caller_offset: usize,
    styles: Arc<Styles>,
    fields: BoundFields,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: Level::Info,
            prefix: String::new(),
            time_function: local_now,
            time_format: DEFAULT_TIME_FORMAT.to_owned(),
            formatter: Formatter::Text,
            report_caller: false,
            report_timestamp: false,
            styles_enabled: None,
            caller_offset: 0,
            styles: Arc::default(),
            fields: BoundFields::default(),
        }
    }
}

#[derive(Debug)]
struct State {
    config: Config,
    output: Arc<Mutex<Output>>,
    terminal: bool,
    buffer: Vec<u8>,
}

impl State {
    fn new(config: Config, output: Arc<Mutex<Output>>, terminal: bool) -> Self {
        Self {
            config,
            output,
            terminal,
            buffer: Vec::new(),
        }
    }
}

/// A leveled key/value logger.
///
/// Every logging method takes a message and a flat `[key, value, key, value, ...]` slice, see
/// [`keyvals!`](crate::keyvals) for building one inline.
#[derive(Debug)]
pub struct Logger {
    state: RwLock<State>,
    resolver: CallerResolver,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Creates a logger writing text to stderr at [`Level::Info`].
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Returns a builder to configure a new logger.
    pub fn builder() -> Builder {
        Builder::default()
    }

    fn from_parts(config: Config, output: Output, resolver: CallerResolver) -> Self {
        let terminal = output.is_terminal();
        Self {
            state: RwLock::new(State::new(config, Arc::new(Mutex::new(output)), terminal)),
            resolver,
        }
    }

    /// Logs a debug message.
    pub fn debug(&self, message: impl fmt::Display, keyvals: &[Value<'_>]) {
        self.emit(Some(Level::Debug), Some(&message), keyvals);
    }

    /// Logs an info message.
    pub fn info(&self, message: impl fmt::Display, keyvals: &[Value<'_>]) {
        self.emit(Some(Level::Info), Some(&message), keyvals);
    }

    /// Logs a warning.
    pub fn warn(&self, message: impl fmt::Display, keyvals: &[Value<'_>]) {
        self.emit(Some(Level::Warn), Some(&message), keyvals);
    }

    /// Logs an error.
    pub fn error(&self, message: impl fmt::Display, keyvals: &[Value<'_>]) {
        self.emit(Some(Level::Error), Some(&message), keyvals);
    }

    /// Logs a fatal message and terminates the process with exit code 1.
    ///
    /// The entry is written and the output flushed before exiting, unless the level filters it out.
    pub fn fatal(&self, message: impl fmt::Display, keyvals: &[Value<'_>]) -> ! {
        self.emit(Some(Level::Fatal), Some(&message), keyvals);
        let _ = self.flush();
        std::process::exit(1)
    }

    /// Logs a message without a level, which is never filtered out.
    pub fn print(&self, message: impl fmt::Display, keyvals: &[Value<'_>]) {
        self.emit(None, Some(&message), keyvals);
    }

    /// Logs a message at `level`.
    ///
    /// Logging at [`Level::Fatal`] through this method does not terminate the process.
    pub fn log(&self, level: Level, message: impl fmt::Display, keyvals: &[Value<'_>]) {
        self.emit(Some(level), Some(&message), keyvals);
    }

    /// Writes one entry with an optional level and message.
    ///
    /// All other logging methods end up here.
    /// Write errors are ignored.
    pub fn emit(
        &self,
        level: Option<Level>,
        message: Option<&dyn fmt::Display>,
        keyvals: &[Value<'_>],
    ) {
        let mut state = self.state.write();
        let State {
            config,
            output,
            terminal,
            buffer,
        } = &mut *state;
        let mut output = output.lock();

        let snapshot = Snapshot {
            discard: output.is_discard(),
            threshold: config.level,
            prefix: &config.prefix,
            timestamp: config.report_timestamp.then_some(config.time_function),
            caller: config
                .report_caller
                .then_some((&self.resolver, config.caller_offset)),
            fields: &config.fields,
        };
        let Some(fields) = entry::assemble(&snapshot, level, message, keyvals) else {
            return;
        };

        let context = RenderContext {
            styles: config
                .styles_enabled
                .unwrap_or(*terminal)
                .then_some(&*config.styles),
            time_format: &config.time_format,
        };

        buffer.clear();
        if config.formatter.render(&fields, &context, buffer).is_ok() {
            // This is the logger, there is nowhere to report its own write errors.
            let _ = output.write_entry(buffer);
        }
        buffer.clear();
    }

    /// Marks the calling function as a helper.
    ///
    /// Reported call sites skip helper functions and point at their callers instead, through any number of nested
    /// helpers.
    ///
    /// ```rust
    /// use kvlog::Logger;
    ///
    /// fn start_oven(logger: &Logger, degree: u32) {
    ///     logger.helper();
    ///     logger.info("Starting oven", &["degree".into(), degree.into()]);
    /// }
    /// # start_oven(&Logger::builder().output(kvlog::Output::Discard).build(), 400);
    /// ```
    pub fn helper(&self) {
        self.resolver.mark_helper(0);
    }

    /// Returns a logger that adds `keyvals` to every entry, after the fields already bound to this one.
    ///
    /// The new logger starts with a copy of this logger's configuration and helpers and writes to the same output.
    /// Later changes to either logger do not affect the other.
    pub fn with(&self, keyvals: &[Value<'_>]) -> Logger {
        let state = self.state.read();
        let config = Config {
            fields: state.config.fields.appended(keyvals),
            ..state.config.clone()
        };

        Logger {
            state: RwLock::new(State::new(config, state.output.clone(), state.terminal)),
            resolver: self.resolver.snapshot(),
        }
    }

    /// The lowest level that is written.
    pub fn level(&self) -> Level {
        self.state.read().config.level
    }

    /// Sets the lowest level that is written.
    pub fn set_level(&self, level: Level) {
        self.state.write().config.level = level;
    }

    /// The prefix written before the message.
    pub fn prefix(&self) -> String {
        self.state.read().config.prefix.clone()
    }

    /// Sets the prefix written before the message, an empty prefix is omitted.
    pub fn set_prefix(&self, prefix: impl Into<String>) {
        self.state.write().config.prefix = prefix.into();
    }

    /// Sets the source of entry timestamps.
    pub fn set_time_function(&self, time_function: TimeFunction) {
        self.state.write().config.time_function = time_function;
    }

    /// Sets the `strftime` pattern of timestamps.
    pub fn set_time_format(&self, time_format: impl Into<String>) {
        self.state.write().config.time_format = time_format.into();
    }

    /// Sets the output format.
    pub fn set_formatter(&self, formatter: Formatter) {
        self.state.write().config.formatter = formatter;
    }

    /// Enables or disables reporting the call site.
    pub fn set_report_caller(&self, report_caller: bool) {
        self.state.write().config.report_caller = report_caller;
    }

    /// Enables or disables reporting the time.
    pub fn set_report_timestamp(&self, report_timestamp: bool) {
        self.state.write().config.report_timestamp = report_timestamp;
    }

    /// Sets how many additional frames are skipped when resolving the call site.
    pub fn set_caller_offset(&self, caller_offset: usize) {
        self.state.write().config.caller_offset = caller_offset;
    }

    /// Replaces the styles.
    pub fn set_styles(&self, styles: Styles) {
        self.state.write().config.styles = Arc::new(styles);
    }

    /// Forces styling on or off, `None` styles the output only if it is a terminal.
    pub fn set_styles_enabled(&self, enabled: Option<bool>) {
        self.state.write().config.styles_enabled = enabled;
    }

    /// Replaces the output.
    ///
    /// Loggers derived earlier keep writing to the previous output.
    pub fn set_output(&self, output: Output) {
        let mut state = self.state.write();
        state.terminal = output.is_terminal();
        state.output = Arc::new(Mutex::new(output));
    }

    /// Flushes the output.
    pub fn flush(&self) -> io::Result<()> {
        let state = self.state.read();
        let mut output = state.output.lock();
        output.flush()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use indoc::indoc;
    use pretty_assertions::assert_eq;

    use super::Logger;
    use crate::caller::Frame;
    use crate::formatter::Formatter;
    use crate::level::Level;
    use crate::sink::Output;
    use crate::style::Styles;
    use crate::test_helpers::{ScriptedFrames, SharedBuffer, zero_time};
    use crate::{Value, keyvals};

    fn logger() -> (Logger, SharedBuffer) {
        let buffer = SharedBuffer::default();
        let logger = Logger::builder()
            .output(Output::writer(buffer.clone()))
            .time_function(zero_time)
            .disable_styles()
            .build();
        (logger, buffer)
    }

    #[test]
    fn message_with_keyvals() {
        let (logger, buffer) = logger();
        logger.info("info", keyvals!("key1" = "val1", "key2" = "val2"));
        assert_eq!(buffer.contents(), "INFO info key1=val1 key2=val2\n");

        buffer.clear();
        logger.error("info", keyvals!("key1" = "val1", "key2" = "val2"));
        assert_eq!(buffer.contents(), "ERROR info key1=val1 key2=val2\n");
    }

    #[test]
    fn debug_below_threshold_writes_nothing() {
        let (logger, buffer) = logger();
        logger.debug("this is a debug message", &[]);
        assert_eq!(buffer.contents(), "");
    }

    #[test]
    fn off_suppresses_levels_but_not_print() {
        let (logger, buffer) = logger();
        logger.set_level(Level::Off);

        logger.error("error", &[]);
        logger.log(Level::Fatal, "fatal", &[]);
        assert_eq!(buffer.contents(), "");

        logger.print("always", keyvals!(count = 1));
        assert_eq!(buffer.contents(), "always count=1\n");
    }

    #[test]
    fn multi_line_value() {
        let (logger, buffer) = logger();
        logger.info("msg", keyvals!(trace = "line1\nline2"));
        assert_eq!(buffer.contents(), "INFO msg\n  trace=\n  │ line1\n  │ line2\n");
    }

    #[test]
    fn derived_fields_come_first() {
        let (logger, buffer) = logger();
        let derived = logger.with(keyvals!(service = "api"));

        derived.info("request", keyvals!(key1 = "val1"));
        logger.info("plain", keyvals!(key1 = "val1"));

        assert_eq!(
            buffer.contents(),
            indoc! {"
                INFO request service=api key1=val1
                INFO plain key1=val1
            "}
        );
    }

    #[test]
    fn derived_configuration_is_independent() {
        let (logger, buffer) = logger();
        let derived = logger.with(&[]);
        derived.set_prefix("child");
        logger.set_level(Level::Error);

        assert_eq!(logger.prefix(), "");
        assert_eq!(derived.level(), Level::Info);

        derived.warn("only child", &[]);
        logger.warn("filtered", &[]);
        assert_eq!(buffer.contents(), "WARN child: only child\n");
    }

    #[test]
    fn odd_keyvals_are_padded() {
        let (logger, buffer) = logger();
        logger.info("odd", &[Value::from("lonely")]);
        assert_eq!(buffer.contents(), "INFO odd lonely=MISSING_VALUE\n");
    }

    #[test]
    fn timestamp_prefix_and_caller() {
        let buffer = SharedBuffer::default();
        let logger = Logger::builder()
            .output(Output::writer(buffer.clone()))
            .time_function(zero_time)
            .time_format("%Y-%m-%d")
            .report_timestamp(true)
            .report_caller(true)
            .prefix("oven")
            .frame_source(Arc::new(ScriptedFrames(vec![
                Frame::new("oven::start", "/home/baker/oven/src/start.rs", 12),
                Frame::new("oven::main", "/home/baker/oven/src/main.rs", 4),
            ])))
            .build();

        logger.info("preheating", &[]);
        logger.set_caller_offset(1);
        logger.info("preheating", &[]);

        assert_eq!(
            buffer.contents(),
            indoc! {"
                1970-01-01 INFO <src/start.rs:12> oven: preheating
                1970-01-01 INFO <src/main.rs:4> oven: preheating
            "}
        );
    }

    #[test]
    fn json_formatter() {
        let (logger, buffer) = logger();
        logger.set_formatter(Formatter::Json);
        logger.set_prefix("oven");
        logger.warn("hot", keyvals!(degree = 400));
        assert_eq!(
            buffer.contents(),
            "{\"level\":\"warn\",\"prefix\":\"oven\",\"msg\":\"hot\",\"degree\":400}\n"
        );
    }

    #[test]
    fn forced_styles() {
        let (logger, buffer) = logger();
        logger.set_styles(Styles::default());
        logger.set_styles_enabled(Some(true));
        logger.info("hi", &[]);
        assert_eq!(buffer.contents(), "\u{1b}[1;36mINFO\u{1b}[0m hi\n");
    }

    #[test]
    fn discard_output() {
        let (logger, buffer) = logger();
        let derived = logger.with(keyvals!(k = 1));
        logger.set_output(Output::Discard);

        logger.print("dropped", &[]);
        derived.print("kept", &[]);
        assert_eq!(buffer.contents(), "kept k=1\n");
    }

    #[test]
    fn concurrent_lines_do_not_interleave() {
        let (logger, buffer) = logger();
        let logger = Arc::new(logger);

        let handles: Vec<_> = (0..4)
            .map(|thread| {
                let logger = Arc::clone(&logger);
                thread::spawn(move || {
                    let worker = logger.with(keyvals!(thread));
                    for index in 0..50 {
                        worker.info("tick", keyvals!(index, payload = "x".repeat(64)));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let contents = buffer.contents();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 200);
        for line in lines {
            assert!(line.starts_with("INFO tick thread="), "{line}");
            assert!(line.ends_with(&"x".repeat(64)), "{line}");
        }
    }
}
