//! Fields of an assembled entry and fields bound to a logger.

use std::borrow::Cow;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset};

use crate::level::Level;
use crate::value::{MISSING_VALUE, Value};

/// One element of an assembled entry, in render order.
///
/// The reserved fields come first, in declaration order, followed by [`Field::Pair`]s.
#[derive(Clone, Debug, PartialEq)]
pub enum Field<'a> {
    /// Time the entry was created.
    Timestamp(DateTime<FixedOffset>),
    /// Entry level, absent for entries without a level.
    Level(Level),
    /// Call site as `dir/file.rs:line`.
    Caller(String),
    /// Logger prefix.
    Prefix(Cow<'a, str>),
    /// Entry message.
    Message(String),
    /// A bound or per-call key/value pair.
    Pair(Value<'a>, Value<'a>),
}

impl Field<'_> {
    /// Key used by formatters that name every field.
    pub fn key(&self) -> Cow<'_, str> {
        match self {
            Field::Timestamp(_) => Cow::Borrowed("time"),
            Field::Level(_) => Cow::Borrowed("level"),
            Field::Caller(_) => Cow::Borrowed("caller"),
            Field::Prefix(_) => Cow::Borrowed("prefix"),
            Field::Message(_) => Cow::Borrowed("msg"),
            Field::Pair(key, _) => key.to_text(),
        }
    }
}

/// Pairs up a flat `[key, value, key, value, ...]` slice.
///
/// An odd trailing key is paired with [`MISSING_VALUE`].
pub fn pairs<'a>(keyvals: &'a [Value<'_>]) -> impl Iterator<Item = (Value<'a>, Value<'a>)> {
    keyvals.chunks(2).map(|pair| {
        let value = pair
            .get(1)
            .map_or(Value::from(MISSING_VALUE), Value::as_borrowed);
        (pair[0].as_borrowed(), value)
    })
}

#[derive(Debug)]
struct Chunk {
    parent: Option<Arc<Chunk>>,
    pairs: Vec<(Value<'static>, Value<'static>)>,
}

/// Key/value pairs attached to a logger by [`Logger::with`](crate::Logger::with).
///
/// Appending never touches existing pairs: the result points at the original list and adds a new chunk, so
/// derived loggers share their common prefix.
#[derive(Clone, Debug, Default)]
pub struct BoundFields {
    last: Option<Arc<Chunk>>,
}

impl BoundFields {
    /// Returns a list with `keyvals` appended after the current pairs, padded like per-call keyvals.
    pub fn appended(&self, keyvals: &[Value<'_>]) -> Self {
        if keyvals.is_empty() {
            return self.clone();
        }

        let pairs = pairs(keyvals)
            .map(|(key, value)| (key.to_static(), value.to_static()))
            .collect();
        Self {
            last: Some(Arc::new(Chunk {
                parent: self.last.clone(),
                pairs,
            })),
        }
    }

    /// Iterates the pairs, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = (&Value<'static>, &Value<'static>)> {
        let mut chain = Vec::new();
        let mut next = self.last.as_deref();
        while let Some(chunk) = next {
            chain.push(chunk);
            next = chunk.parent.as_deref();
        }

        chain
            .into_iter()
            .rev()
            .flat_map(|chunk| chunk.pairs.iter().map(|(key, value)| (key, value)))
    }

    /// Number of bound pairs.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Returns `true` if no pair is bound.
    pub fn is_empty(&self) -> bool {
        self.last.is_none()
    }
}
