//! JSON lines format.
//!
//! Every entry is one JSON object, with the fields in entry order.
//! Reserved fields use the keys `time`, `level`, `caller`, `prefix` and `msg`.

use serde::ser::{SerializeMap, Serializer};

use crate::fields::Field;
use crate::formatter::{RenderContext, RenderError};
use crate::time::format_timestamp;

/// Appends the entry as a JSON object and a trailing newline to `output`.
pub fn render(
    fields: &[Field<'_>],
    context: &RenderContext<'_>,
    output: &mut Vec<u8>,
) -> Result<(), RenderError> {
    let mut serializer = serde_json::Serializer::new(&mut *output);
    let mut map = serializer.serialize_map(None)?;

    for field in fields {
        match field {
            Field::Timestamp(time) => {
                map.serialize_entry("time", &format_timestamp(time, context.time_format))?;
            }
            Field::Level(level) => map.serialize_entry("level", level)?,
            Field::Caller(caller) => map.serialize_entry("caller", caller)?,
            Field::Prefix(prefix) => map.serialize_entry("prefix", prefix)?,
            Field::Message(message) => map.serialize_entry("msg", message)?,
            Field::Pair(key, value) => {
                let key = key.to_text();
                if !key.is_empty() {
                    map.serialize_entry(&*key, value)?;
                }
            }
        }
    }

    map.end()?;
    output.push(b'\n');
    Ok(())
}
