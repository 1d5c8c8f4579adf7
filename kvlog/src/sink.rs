//! Output destinations.

use std::fmt;
use std::io::{self, IsTerminal, Write};

/// Where a logger writes its entries.
#[derive(Default)]
pub enum Output {
    /// The process' standard error.
    #[default]
    Stderr,
    /// The process' standard output.
    Stdout,
    /// Drops every entry without rendering it.
    Discard,
    /// Any other writer.
    Writer(Box<dyn Write + Send>),
}

impl Output {
    /// Wraps `writer` as an output.
    pub fn writer(writer: impl Write + Send + 'static) -> Self {
        Output::Writer(Box::new(writer))
    }

    /// Returns `true` for [`Output::Discard`].
    pub fn is_discard(&self) -> bool {
        matches!(self, Output::Discard)
    }

    /// Returns `true` if the output is an interactive terminal.
    ///
    /// Arbitrary writers are never considered terminals.
    pub fn is_terminal(&self) -> bool {
        match self {
            Output::Stderr => io::stderr().is_terminal(),
            Output::Stdout => io::stdout().is_terminal(),
            Output::Discard | Output::Writer(_) => false,
        }
    }

    /// Writes one complete entry.
    pub fn write_entry(&mut self, entry: &[u8]) -> io::Result<()> {
        match self {
            Output::Stderr => io::stderr().lock().write_all(entry),
            Output::Stdout => io::stdout().lock().write_all(entry),
            Output::Discard => Ok(()),
            Output::Writer(writer) => writer.write_all(entry),
        }
    }

    /// Flushes buffered output.
    pub fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stderr => io::stderr().flush(),
            Output::Stdout => io::stdout().flush(),
            Output::Discard => Ok(()),
            Output::Writer(writer) => writer.flush(),
        }
    }
}

impl fmt::Debug for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Stderr => f.write_str("Stderr"),
            Output::Stdout => f.write_str("Stdout"),
            Output::Discard => f.write_str("Discard"),
            Output::Writer(_) => f.debug_tuple("Writer").finish_non_exhaustive(),
        }
    }
}
