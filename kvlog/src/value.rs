//! Keys and values passed to the logging calls.
//!
//! Every call takes its extra context as a flat, ordered slice of [`Value`]s that alternates key and
//! value: `[key1, value1, key2, value2, ...]`.
//! Keys are values too and are rendered through their [`Display`](core::fmt::Display) form, an empty key
//! drops its pair.
//!
//! # Value Types
//!
//! The [`Value`] enum supports common data types:
//! - **String**: Text values, borrowed or owned
//! - **Bool**: Boolean values (true/false)
//! - **I64**: 64-bit signed integers
//! - **U64**: 64-bit unsigned integers
//! - **F64**: 64-bit floating-point numbers
//!
//! Anything else can be captured through [`Value::display`] or [`Value::debug`].
//!
//! # Examples
//!
//! ```rust
//! use kvlog::{Value, keyvals};
//!
//! let user_id = 123;
//! let flat: &[Value] = &["user_id".into(), user_id.into(), "admin".into(), true.into()];
//! assert_eq!(flat, keyvals!(user_id, admin = true));
//! ```

use std::borrow::Cow;
use std::fmt;

use serde::{Serialize, Serializer};

/// Placeholder paired with the last key of an odd-length keyvals sequence.
pub const MISSING_VALUE: &str = "MISSING_VALUE";

/// A key or value passed to a logging call.
#[derive(Clone, Debug, PartialEq)]
pub enum Value<'a> {
    /// A string value.
    String(Cow<'a, str>),
    /// A boolean value.
    Bool(bool),
    /// A 64-bit signed integer.
    I64(i64),
    /// A 64-bit unsigned integer.
    U64(u64),
    /// A 64-bit floating-point number.
    F64(f64),
}

impl<'a> Value<'a> {
    /// Captures the [`Display`](fmt::Display) form of `value`.
    pub fn display(value: impl fmt::Display) -> Self {
        Value::String(value.to_string().into())
    }

    /// Captures the alternate [`Debug`](fmt::Debug) form of `value` (`{:#?}`), which may span multiple lines.
    pub fn debug(value: impl fmt::Debug) -> Self {
        Value::String(format!("{value:#?}").into())
    }

    /// Converts `bytes` to a string value, invalid UTF-8 sequences become `U+FFFD`.
    pub fn from_utf8_lossy(bytes: &'a [u8]) -> Self {
        Value::String(String::from_utf8_lossy(bytes))
    }

    /// Returns a value borrowing from `self`, without copying string data.
    pub fn as_borrowed(&self) -> Value<'_> {
        match self {
            Value::String(value) => Value::String(Cow::Borrowed(value)),
            Value::Bool(value) => Value::Bool(*value),
            Value::I64(value) => Value::I64(*value),
            Value::U64(value) => Value::U64(*value),
            Value::F64(value) => Value::F64(*value),
        }
    }

    /// Returns the string content when this is a [`Value::String`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the [`Display`](fmt::Display) form, borrowing when this is already a string.
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            Value::String(value) => Cow::Borrowed(value),
            other => Cow::Owned(other.to_string()),
        }
    }

    /// Copies borrowed string data so the value can outlive the call it was passed to.
    pub fn to_static(&self) -> Value<'static> {
        match self {
            Value::String(value) => Value::String(Cow::Owned(String::from(&**value))),
            Value::Bool(value) => Value::Bool(*value),
            Value::I64(value) => Value::I64(*value),
            Value::U64(value) => Value::U64(*value),
            Value::F64(value) => Value::F64(*value),
        }
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(value) => f.write_str(value),
            Value::Bool(value) => write!(f, "{value}"),
            Value::I64(value) => write!(f, "{value}"),
            Value::U64(value) => write!(f, "{value}"),
            Value::F64(value) => write!(f, "{value}"),
        }
    }
}

impl Serialize for Value<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::String(value) => serializer.serialize_str(value),
            Value::Bool(value) => serializer.serialize_bool(*value),
            Value::I64(value) => serializer.serialize_i64(*value),
            Value::U64(value) => serializer.serialize_u64(*value),
            Value::F64(value) => serializer.serialize_f64(*value),
        }
    }
}

impl<'a> From<Cow<'a, str>> for Value<'a> {
    fn from(value: Cow<'a, str>) -> Self {
        Value::String(value)
    }
}

impl From<String> for Value<'_> {
    fn from(value: String) -> Self {
        Value::String(value.into())
    }
}

impl<'a> From<&'a String> for Value<'a> {
    fn from(value: &'a String) -> Self {
        Value::String(value.into())
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(value: &'a str) -> Self {
        Value::String(Cow::Borrowed(value))
    }
}

impl From<char> for Value<'_> {
    fn from(value: char) -> Self {
        Value::String(value.to_string().into())
    }
}

impl From<bool> for Value<'_> {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f32> for Value<'_> {
    fn from(value: f32) -> Self {
        Value::F64(value.into())
    }
}

impl From<f64> for Value<'_> {
    fn from(value: f64) -> Self {
        Value::F64(value)
    }
}

impl<'a> From<&Value<'a>> for Value<'a> {
    fn from(value: &Value<'a>) -> Self {
        value.clone()
    }
}

macro_rules! impl_from_integer {
    ($variant:ident($target:ty): $($source:ty),*) => {
        $(
            impl From<$source> for Value<'_> {
                fn from(value: $source) -> Self {
                    Value::$variant(<$target>::from(value))
                }
            }
        )*
    };
}

impl_from_integer!(I64(i64): i8, i16, i32, i64);
impl_from_integer!(U64(u64): u8, u16, u32, u64);

impl From<isize> for Value<'_> {
    fn from(value: isize) -> Self {
        // `isize` is at most 64 bits wide on every supported target.
        Value::I64(value as i64)
    }
}

impl From<usize> for Value<'_> {
    fn from(value: usize) -> Self {
        Value::U64(value as u64)
    }
}
