//! Assembly of the ordered field sequence of one entry.

use std::borrow::Cow;
use std::fmt;

use crate::caller::CallerResolver;
use crate::fields::{BoundFields, Field, pairs};
use crate::level::Level;
use crate::time::TimeFunction;
use crate::value::Value;

/// The parts of a logger's configuration that shape an entry.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    /// Entries are dropped before any work is done.
    pub discard: bool,
    /// Lowest level that is written.
    pub threshold: Level,
    /// Prefix, omitted when empty.
    pub prefix: &'a str,
    /// Time source, `None` when timestamps are not reported.
    pub timestamp: Option<TimeFunction>,
    /// Resolver and extra frames to skip, `None` when the caller is not reported.
    pub caller: Option<(&'a CallerResolver, usize)>,
    /// Fields bound to the logger.
    pub fields: &'a BoundFields,
}

/// Builds the fields of one entry, or returns `None` if the entry is filtered out.
///
/// The reserved fields come first, followed by the bound fields and then `keyvals`.
/// An odd-length `keyvals` is padded with [`MISSING_VALUE`](crate::value::MISSING_VALUE).
pub fn assemble<'a>(
    snapshot: &Snapshot<'a>,
    level: Option<Level>,
    message: Option<&dyn fmt::Display>,
    keyvals: &'a [Value<'_>],
) -> Option<Vec<Field<'a>>> {
    if snapshot.discard || !snapshot.threshold.allows(level) {
        return None;
    }

    let mut fields = Vec::with_capacity(5 + keyvals.len().div_ceil(2));

    if let Some(now) = snapshot.timestamp {
        fields.push(Field::Timestamp(now()));
    }

    if let Some(level) = level {
        fields.push(Field::Level(level));
    }

    if let Some((resolver, offset)) = snapshot.caller
        && let Some(frame) = resolver.resolve(offset)
    {
        fields.push(Field::Caller(frame.to_string()));
    }

    if !snapshot.prefix.is_empty() {
        fields.push(Field::Prefix(Cow::Borrowed(snapshot.prefix)));
    }

    if let Some(message) = message {
        fields.push(Field::Message(message.to_string()));
    }

    fields.extend(
        snapshot
            .fields
            .iter()
            .map(|(key, value)| Field::Pair(key.as_borrowed(), value.as_borrowed())),
    );
    fields.extend(pairs(keyvals).map(|(key, value)| Field::Pair(key, value)));

    Some(fields)
}
