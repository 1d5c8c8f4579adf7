//! Human oriented text format.
//!
//! ```text
//! [<timestamp>] <LEVEL> [<caller>] [prefix:] <message> [key=value ...]
//! ```
//!
//! Values that need quoting are wrapped in `"` with embedded quotes and control characters escaped.
//! Values spanning several lines are written as an indented block below the entry:
//!
//! ```text
//! ERROR request failed
//!   trace=
//!   │ at handler.rs:10
//!   │ at main.rs:3
//! ```

use std::borrow::Cow;

use crate::escape::{escape, needs_quoting};
use crate::fields::Field;
use crate::formatter::RenderContext;
use crate::style::{Style, Styles};
use crate::time::format_timestamp;
use crate::value::Value;

const SEPARATOR: &str = "=";
const INDENT_SEPARATOR: &str = "  │ ";

/// Appends the text form of `fields` and a trailing newline to `output`.
pub fn render(fields: &[Field<'_>], context: &RenderContext<'_>, output: &mut Vec<u8>) {
    let style = |select: fn(&Styles) -> Style| context.styles.map(select).unwrap_or_default();
    let mut written = false;

    for (index, field) in fields.iter().enumerate() {
        let more = index + 1 < fields.len();

        match field {
            Field::Timestamp(time) => {
                write_space(output, &mut written);
                let timestamp = format_timestamp(time, context.time_format);
                style(|styles| styles.timestamp).paint(output, &timestamp);
            }
            Field::Level(level) => {
                write_space(output, &mut written);
                let style = context
                    .styles
                    .map(|styles| styles.level(*level))
                    .unwrap_or_default();
                style.paint(output, level.as_str());
            }
            Field::Caller(caller) => {
                write_space(output, &mut written);
                style(|styles| styles.caller).paint(output, &format!("<{caller}>"));
            }
            Field::Prefix(prefix) => {
                write_space(output, &mut written);
                style(|styles| styles.prefix).paint(output, &format!("{prefix}:"));
            }
            Field::Message(message) => {
                write_space(output, &mut written);
                style(|styles| styles.message).paint(output, message);
            }
            Field::Pair(key, value) => {
                write_pair(output, context, key, value, more, &mut written);
            }
        }
    }

    output.push(b'\n');
}

fn write_space(output: &mut Vec<u8>, written: &mut bool) {
    if *written {
        output.push(b' ');
    }
    *written = true;
}

fn write_pair(
    output: &mut Vec<u8>,
    context: &RenderContext<'_>,
    key: &Value<'_>,
    value: &Value<'_>,
    more: bool,
    written: &mut bool,
) {
    let key = key.to_text();
    if key.is_empty() {
        return;
    }
    let value = value.to_text();

    let (key_style, value_style, separator) = match context.styles {
        Some(styles) => (
            styles.key_for(&key),
            styles.value_for(&key),
            styles.separator,
        ),
        None => Default::default(),
    };

    if value.contains('\n') {
        output.extend_from_slice(b"\n  ");
        key_style.paint(output, &key);
        separator.paint(output, SEPARATOR);
        output.push(b'\n');
        write_indented(output, &value, separator, value_style, more);
        *written = true;
        return;
    }

    let value = if value.is_empty() {
        Cow::Borrowed(r#""""#)
    } else if needs_quoting(&value) {
        Cow::Owned(format!("\"{}\"", escape(&value, true)))
    } else {
        value
    };

    write_space(output, written);
    key_style.paint(output, &key);
    separator.paint(output, SEPARATOR);
    value_style.paint(output, &value);
}

/// Writes every line of `value` behind the indent marker.
///
/// The last line only gets a line break if more fields follow, the entry's own newline ends it otherwise.
fn write_indented(
    output: &mut Vec<u8>,
    value: &str,
    separator: Style,
    value_style: Style,
    more: bool,
) {
    let mut lines = value.split('\n').peekable();
    while let Some(line) = lines.next() {
        let last = lines.peek().is_none();
        if last && line.is_empty() {
            break;
        }

        separator.paint(output, INDENT_SEPARATOR);
        value_style.paint(output, &escape(line, false));
        if !last || more {
            output.push(b'\n');
        }
    }
}
