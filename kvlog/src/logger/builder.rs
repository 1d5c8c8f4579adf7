use std::sync::Arc;

use super::{Config, Logger};
use crate::caller::{CallerResolver, CaptureFrames};
use crate::formatter::Formatter;
use crate::level::Level;
use crate::sink::Output;
use crate::style::Styles;
use crate::time::TimeFunction;
use crate::value::Value;

/// Builder for a [`Logger`].
///
/// Created via [`Logger::builder()`] and finalized with [`build()`](Builder::build).
///
/// # Examples
///
/// ```rust
/// use kvlog::{Formatter, Level, Logger, Output};
///
/// let logger = Logger::builder()
///     .output(Output::Stdout)
///     .level_from_env("OVEN_LOG")
///     .prefix("oven")
///     .report_caller(true)
///     .formatter(Formatter::Json)
///     .build();
/// ```
#[derive(Debug, Default)]
#[must_use]
pub struct Builder {
    config: Config,
    output: Output,
    frames: Option<Arc<dyn CaptureFrames>>,
}

impl Builder {
    /// Sets the output, stderr by default.
    pub fn output(mut self, output: Output) -> Self {
        self.output = output;
        self
    }

    /// Sets the lowest level that is written, [`Level::Info`] by default.
    pub fn level(mut self, level: Level) -> Self {
        self.config.level = level;
        self
    }

    /// Reads the level from the environment variable `name`, e.g. `OVEN_LOG=debug`.
    ///
    /// The current level is kept if the variable is unset or does not name a level.
    pub fn level_from_env(mut self, name: &str) -> Self {
        if let Ok(value) = std::env::var(name)
            && let Ok(level) = value.parse()
        {
            self.config.level = level;
        }
        self
    }

    /// Sets the prefix written before the message.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.prefix = prefix.into();
        self
    }

    /// Sets the source of entry timestamps, local time by default.
    pub fn time_function(mut self, time_function: TimeFunction) -> Self {
        self.config.time_function = time_function;
        self
    }

    /// Sets the `strftime` pattern of timestamps.
    pub fn time_format(mut self, time_format: impl Into<String>) -> Self {
        self.config.time_format = time_format.into();
        self
    }

    /// Sets the output format, [`Formatter::Text`] by default.
    pub fn formatter(mut self, formatter: Formatter) -> Self {
        self.config.formatter = formatter;
        self
    }

    /// Reports the call site of every entry.
    pub fn report_caller(mut self, report_caller: bool) -> Self {
        self.config.report_caller = report_caller;
        self
    }

    /// Reports the time of every entry.
    pub fn report_timestamp(mut self, report_timestamp: bool) -> Self {
        self.config.report_timestamp = report_timestamp;
        self
    }

    /// Never styles the output, even on a terminal.
    pub fn disable_styles(mut self) -> Self {
        self.config.styles_enabled = Some(false);
        self
    }

    /// Always styles the output, even if it is not a terminal.
    pub fn enable_styles(mut self) -> Self {
        self.config.styles_enabled = Some(true);
        self
    }

    /// Replaces the default styles.
    pub fn styles(mut self, styles: Styles) -> Self {
        self.config.styles = Arc::new(styles);
        self
    }

    /// Skips `caller_offset` more frames when resolving the call site, for loggers wrapped in another API.
    pub fn caller_offset(mut self, caller_offset: usize) -> Self {
        self.config.caller_offset = caller_offset;
        self
    }

    /// Binds `keyvals` to every entry of the logger.
    pub fn fields(mut self, keyvals: &[Value<'_>]) -> Self {
        self.config.fields = self.config.fields.appended(keyvals);
        self
    }

    /// Replaces the native stack walker used to resolve call sites.
    pub fn frame_source(mut self, frames: Arc<dyn CaptureFrames>) -> Self {
        self.frames = Some(frames);
        self
    }

    /// Creates the logger.
    pub fn build(self) -> Logger {
        let resolver = self
            .frames
            .map(CallerResolver::new)
            .unwrap_or_default();
        Logger::from_parts(self.config, self.output, resolver)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::keyvals;
    use crate::level::Level;
    use crate::logger::Logger;
    use crate::sink::Output;
    use crate::style::{Color, Style, Styles};
    use crate::test_helpers::SharedBuffer;

    #[test]
    fn defaults() {
        let logger = Logger::builder().build();
        assert_eq!(logger.level(), Level::Info);
        assert_eq!(logger.prefix(), "");
    }

    #[test]
    fn bound_fields_and_styles() {
        let buffer = SharedBuffer::default();
        let mut styles = Styles::default();
        styles.message = Style::new().fg(Color::Green);
        let logger = Logger::builder()
            .output(Output::writer(buffer.clone()))
            .fields(keyvals!(oven = 1))
            .fields(keyvals!(rack = "top"))
            .styles(styles)
            .enable_styles()
            .build();

        logger.print("baking", &[]);
        assert_eq!(
            buffer.contents(),
            "\u{1b}[32mbaking\u{1b}[0m \u{1b}[2moven\u{1b}[0m\u{1b}[2m=\u{1b}[0m1 \u{1b}[2mrack\u{1b}[0m\u{1b}[2m=\u{1b}[0mtop\n"
        );
    }
}
