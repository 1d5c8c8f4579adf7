//! Terminal styling of the text formatter.
//!
//! A [`Style`] is a set of SGR attributes wrapped around a piece of text.
//! [`Styles`] maps every part of an entry to its style, with optional overrides for individual keys.
//!
//! Styles are only applied when the output is a terminal and styling is not disabled, see
//! [`Builder::disable_styles`](crate::logger::Builder::disable_styles).
//! The escape sequences are written directly instead of going through `colored`'s global override, so one logger
//! with styles disabled never affects another one.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

pub use colored::Color;

use crate::level::Level;

/// A rendering transform: colors and text attributes.
///
/// The default style leaves text unchanged.
///
/// # Examples
///
/// ```rust
/// use kvlog::style::{Color, Style};
///
/// let style = Style::new().fg(Color::Red).bold();
/// assert_eq!(style.render("boom"), "\x1b[1;31mboom\x1b[0m");
/// assert_eq!(Style::new().render("plain"), "plain");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Style {
    foreground: Option<Color>,
    background: Option<Color>,
    bold: bool,
    dimmed: bool,
    italic: bool,
    underline: bool,
}

impl Style {
    /// The identity style.
    pub const fn new() -> Self {
        Self {
            foreground: None,
            background: None,
            bold: false,
            dimmed: false,
            italic: false,
            underline: false,
        }
    }

    /// Sets the foreground color.
    pub const fn fg(mut self, color: Color) -> Self {
        self.foreground = Some(color);
        self
    }

    /// Sets the background color.
    pub const fn bg(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Renders in bold.
    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Renders with reduced intensity.
    pub const fn dimmed(mut self) -> Self {
        self.dimmed = true;
        self
    }

    /// Renders in italics.
    pub const fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Renders underlined.
    pub const fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Returns `true` if this style leaves text unchanged.
    pub fn is_plain(&self) -> bool {
        *self == Self::new()
    }

    /// Appends `text` wrapped in this style's escape sequences to `output`.
    pub fn paint(&self, output: &mut Vec<u8>, text: &str) {
        if self.is_plain() || text.is_empty() {
            output.extend_from_slice(text.as_bytes());
            return;
        }

        let mut codes: Vec<Cow<'static, str>> = Vec::new();
        for (enabled, code) in [
            (self.bold, "1"),
            (self.dimmed, "2"),
            (self.italic, "3"),
            (self.underline, "4"),
        ] {
            if enabled {
                codes.push(Cow::Borrowed(code));
            }
        }
        codes.extend(self.foreground.map(|color| color.to_fg_str()));
        codes.extend(self.background.map(|color| color.to_bg_str()));

        output.extend_from_slice(b"\x1b[");
        output.extend_from_slice(codes.join(";").as_bytes());
        output.push(b'm');
        output.extend_from_slice(text.as_bytes());
        output.extend_from_slice(b"\x1b[0m");
    }

    /// Returns `text` wrapped in this style's escape sequences.
    pub fn render<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.is_plain() {
            return Cow::Borrowed(text);
        }
        let mut output = Vec::with_capacity(text.len() + 16);
        self.paint(&mut output, text);
        Cow::Owned(String::from_utf8_lossy(&output).into_owned())
    }
}

/// Styles of every part of a text entry.
#[derive(Clone, Debug, PartialEq)]
pub struct Styles {
    /// Timestamp.
    pub timestamp: Style,
    /// Caller, including the surrounding angle brackets.
    pub caller: Style,
    /// Prefix, including the trailing colon.
    pub prefix: Style,
    /// Message.
    pub message: Style,
    /// Keys without an entry in [`Styles::keys`].
    pub key: Style,
    /// Values without an entry in [`Styles::values`].
    pub value: Style,
    /// The `=` between key and value and the multi-line marker.
    pub separator: Style,
    /// Level names by level, levels without an entry are unstyled.
    pub levels: BTreeMap<Level, Style>,
    /// Overrides of [`Styles::key`] by key name.
    pub keys: HashMap<String, Style>,
    /// Overrides of [`Styles::value`] by key name.
    pub values: HashMap<String, Style>,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            timestamp: Style::new(),
            caller: Style::new().dimmed(),
            prefix: Style::new().bold().dimmed(),
            message: Style::new(),
            key: Style::new().dimmed(),
            value: Style::new(),
            separator: Style::new().dimmed(),
            levels: BTreeMap::from([
                (Level::Debug, Style::new().bold().fg(Color::Blue)),
                (Level::Info, Style::new().bold().fg(Color::Cyan)),
                (Level::Warn, Style::new().bold().fg(Color::Yellow)),
                (Level::Error, Style::new().bold().fg(Color::Red)),
                (Level::Fatal, Style::new().bold().fg(Color::Magenta)),
            ]),
            keys: HashMap::new(),
            values: HashMap::new(),
        }
    }
}

impl Styles {
    /// Style of the level name.
    pub fn level(&self, level: Level) -> Style {
        self.levels.get(&level).copied().unwrap_or_default()
    }

    /// Style of `key`, an entry in [`Styles::keys`] wins over [`Styles::key`].
    pub fn key_for(&self, key: &str) -> Style {
        self.keys.get(key).copied().unwrap_or(self.key)
    }

    /// Style of the value paired with `key`, an entry in [`Styles::values`] wins over [`Styles::value`].
    pub fn value_for(&self, key: &str) -> Style {
        self.values.get(key).copied().unwrap_or(self.value)
    }
}
