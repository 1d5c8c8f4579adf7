//! String escaping for safe textual output.
//!
//! Two independent checks decide how a value is written by the text formatter:
//!
//! - [`needs_escape`]: the string contains a non-printable character or a `"`, so it has to go through [`escape`].
//! - [`needs_quoting`]: the string contains anything outside the ASCII range `-` through `~` and has to be wrapped
//!   in double quotes to stay unambiguous in a `key=value` list.
//!
//! Escapes follow the familiar backslash conventions (`\n`, `\t`, `\x1b`, `\u200b`, `\U000f0000`) so the output can
//! be read back.
//!
//! # Examples
//!
//! ```rust
//! use kvlog::escape::{escape, needs_quoting};
//!
//! assert_eq!(escape("plain", true), "plain");
//! assert_eq!(escape("tab\there", false), r"tab\there");
//! assert_eq!(escape(r#"say "hi""#, true), r#"say \"hi\""#);
//! assert!(needs_quoting("two words"));
//! ```

use std::borrow::Cow;
use std::fmt::Write;

use unicode_general_category::{GeneralCategory, get_general_category};

use crate::pool::ScratchPool;

static SCRATCH: ScratchPool = ScratchPool::new(16, 64 * 1024);

/// Returns `true` if `string` contains a non-printable character or a double quote.
pub fn needs_escape(string: &str) -> bool {
    string.chars().any(|c| !is_printable(c) || c == '"')
}

/// Returns `true` if any character of `string` falls outside the ASCII range `-` through `~`.
pub fn needs_quoting(string: &str) -> bool {
    string.chars().any(|c| !('-'..='~').contains(&c))
}

/// Escapes `string` for output.
///
/// Returns the input unchanged, without allocating, when [`needs_escape`] is `false`.
/// Double quotes are only escaped when `escape_quotes` is set.
pub fn escape(string: &str, escape_quotes: bool) -> Cow<'_, str> {
    if !needs_escape(string) {
        return Cow::Borrowed(string);
    }

    let mut scratch = SCRATCH.acquire();
    write_escaped(&mut scratch, string, escape_quotes);
    Cow::Owned(scratch.as_str().to_owned())
}

/// Appends the escaped form of `string` to `output`.
pub fn write_escaped(output: &mut String, string: &str, escape_quotes: bool) {
    for c in string.chars() {
        match c {
            '"' if escape_quotes => output.push_str("\\\""),
            c if is_printable(c) => output.push(c),
            '\u{07}' => output.push_str("\\a"),
            '\u{08}' => output.push_str("\\b"),
            '\u{0C}' => output.push_str("\\f"),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\t' => output.push_str("\\t"),
            '\u{0B}' => output.push_str("\\v"),
            // Writing into a `String` cannot fail.
            c if c < ' ' => {
                let _ = write!(output, "\\x{:02x}", u32::from(c));
            }
            c if u32::from(c) < 0x10000 => {
                let _ = write!(output, "\\u{:04x}", u32::from(c));
            }
            c => {
                let _ = write!(output, "\\U{:08x}", u32::from(c));
            }
        }
    }
}

/// Returns `true` for letters, marks, numbers, punctuation, symbols and the ASCII space.
///
/// Controls, separators other than the ASCII space, format characters, private use characters, unassigned code
/// points (noncharacters included) and the replacement character are not printable.
pub fn is_printable(c: char) -> bool {
    use GeneralCategory::*;

    if c == ' ' {
        return true;
    }
    if c == char::REPLACEMENT_CHARACTER {
        return false;
    }

    !matches!(
        get_general_category(c),
        Control
            | Format
            | PrivateUse
            | Unassigned
            | SpaceSeparator
            | LineSeparator
            | ParagraphSeparator
    )
}
