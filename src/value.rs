//! A single typed cell.
//!
//! [`Value`] holds one coerced field before it is committed to its column,
//! and is what [`ColumnValues::get`](crate::ColumnValues::get) hands back
//! for generic access.
//!
//! ```rust
//! use chunkcsv::Value;
//!
//! let value = Value::U16(65531);
//! assert_eq!(value.to_string(), "65531");
//! assert_eq!(Value::from("hi").as_str(), Some("hi"));
//! ```

use serde::Serialize;
use std::fmt;

/// One parsed field in its column's runtime representation.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Str(String),
    F32(f32),
    I32(i32),
    U32(u32),
    I16(i16),
    U16(u16),
    I8(i8),
    U8(u8),
}

impl Value {
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Widens any numeric variant to `f64`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Str(_) => None,
            Value::F32(v) => Some(f64::from(v)),
            Value::I32(v) => Some(f64::from(v)),
            Value::U32(v) => Some(f64::from(v)),
            Value::I16(v) => Some(f64::from(v)),
            Value::U16(v) => Some(f64::from(v)),
            Value::I8(v) => Some(f64::from(v)),
            Value::U8(v) => Some(f64::from(v)),
        }
    }

    /// Widens any integer variant to `i64`.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::I32(v) => Some(i64::from(v)),
            Value::U32(v) => Some(i64::from(v)),
            Value::I16(v) => Some(i64::from(v)),
            Value::U16(v) => Some(i64::from(v)),
            Value::I8(v) => Some(i64::from(v)),
            Value::U8(v) => Some(i64::from(v)),
            Value::Str(_) | Value::F32(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::F32(v) => write!(f, "{}", v),
            Value::I32(v) => write!(f, "{}", v),
            Value::U32(v) => write!(f, "{}", v),
            Value::I16(v) => write!(f, "{}", v),
            Value::U16(v) => write!(f, "{}", v),
            Value::I8(v) => write!(f, "{}", v),
            Value::U8(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

macro_rules! impl_from_number {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_from_number! {
    f32 => F32,
    i32 => I32,
    u32 => U32,
    i16 => I16,
    u16 => U16,
    i8 => I8,
    u8 => U8,
}
