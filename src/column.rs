//! Typed column storage.
//!
//! Each column owns one [`ColumnValues`] whose variant is chosen from the
//! column's [`ColumnFormat`] when the parser is built. Values are only ever
//! appended, one per completed row.

use crate::format::{ColumnFormat, ColumnType};
use crate::value::Value;
use serde::Serialize;

/// The values of one column, in the column's runtime representation.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ColumnValues {
    Skip,
    Str(Vec<String>),
    F32(Vec<f32>),
    I32(Vec<i32>),
    U32(Vec<u32>),
    I16(Vec<i16>),
    U16(Vec<u16>),
    I8(Vec<i8>),
    U8(Vec<u8>),
}

macro_rules! typed_accessor {
    ($($(#[$doc:meta])* $name:ident => $variant:ident($ty:ty)),* $(,)?) => {
        $(
            $(#[$doc])*
            #[must_use]
            pub fn $name(&self) -> Option<&[$ty]> {
                match self {
                    ColumnValues::$variant(v) => Some(v),
                    _ => None,
                }
            }
        )*
    };
}

impl ColumnValues {
    /// Empty storage matching `format`.
    #[must_use]
    pub fn for_format(format: ColumnFormat) -> Self {
        match (format.ty, format.unsigned) {
            (ColumnType::Skip, _) => ColumnValues::Skip,
            (ColumnType::Utf8String, _) => ColumnValues::Str(Vec::new()),
            (ColumnType::Float32, _) => ColumnValues::F32(Vec::new()),
            (ColumnType::Int32 | ColumnType::Int32Hex, false) => ColumnValues::I32(Vec::new()),
            (ColumnType::Int32 | ColumnType::Int32Hex, true) => ColumnValues::U32(Vec::new()),
            (ColumnType::Int16, false) => ColumnValues::I16(Vec::new()),
            (ColumnType::Int16, true) => ColumnValues::U16(Vec::new()),
            (ColumnType::Int8, false) => ColumnValues::I8(Vec::new()),
            (ColumnType::Int8, true) => ColumnValues::U8(Vec::new()),
        }
    }

    /// Appends one value. Returns the value back if its type does not match.
    pub(crate) fn push(&mut self, value: Value) -> Result<(), Value> {
        match (self, value) {
            (ColumnValues::Str(v), Value::Str(x)) => v.push(x),
            (ColumnValues::F32(v), Value::F32(x)) => v.push(x),
            (ColumnValues::I32(v), Value::I32(x)) => v.push(x),
            (ColumnValues::U32(v), Value::U32(x)) => v.push(x),
            (ColumnValues::I16(v), Value::I16(x)) => v.push(x),
            (ColumnValues::U16(v), Value::U16(x)) => v.push(x),
            (ColumnValues::I8(v), Value::I8(x)) => v.push(x),
            (ColumnValues::U8(v), Value::U8(x)) => v.push(x),
            (_, other) => return Err(other),
        }
        Ok(())
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        match self {
            ColumnValues::Skip => {}
            ColumnValues::Str(v) => v.reserve(additional),
            ColumnValues::F32(v) => v.reserve(additional),
            ColumnValues::I32(v) => v.reserve(additional),
            ColumnValues::U32(v) => v.reserve(additional),
            ColumnValues::I16(v) => v.reserve(additional),
            ColumnValues::U16(v) => v.reserve(additional),
            ColumnValues::I8(v) => v.reserve(additional),
            ColumnValues::U8(v) => v.reserve(additional),
        }
    }

    /// Number of stored values. Always zero for skipped columns.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Skip => 0,
            ColumnValues::Str(v) => v.len(),
            ColumnValues::F32(v) => v.len(),
            ColumnValues::I32(v) => v.len(),
            ColumnValues::U32(v) => v.len(),
            ColumnValues::I16(v) => v.len(),
            ColumnValues::U16(v) => v.len(),
            ColumnValues::I8(v) => v.len(),
            ColumnValues::U8(v) => v.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn is_skip(&self) -> bool {
        matches!(self, ColumnValues::Skip)
    }

    /// Copy of the value at `row`.
    #[must_use]
    pub fn get(&self, row: usize) -> Option<Value> {
        match self {
            ColumnValues::Skip => None,
            ColumnValues::Str(v) => v.get(row).cloned().map(Value::Str),
            ColumnValues::F32(v) => v.get(row).copied().map(Value::F32),
            ColumnValues::I32(v) => v.get(row).copied().map(Value::I32),
            ColumnValues::U32(v) => v.get(row).copied().map(Value::U32),
            ColumnValues::I16(v) => v.get(row).copied().map(Value::I16),
            ColumnValues::U16(v) => v.get(row).copied().map(Value::U16),
            ColumnValues::I8(v) => v.get(row).copied().map(Value::I8),
            ColumnValues::U8(v) => v.get(row).copied().map(Value::U8),
        }
    }

    typed_accessor! {
        /// String values, if this is a string column.
        as_strings => Str(String),
        as_f32 => F32(f32),
        /// Signed 32-bit values; also used by signed hex columns.
        as_i32 => I32(i32),
        /// Unsigned 32-bit values; also used by unsigned hex columns.
        as_u32 => U32(u32),
        as_i16 => I16(i16),
        as_u16 => U16(u16),
        as_i8 => I8(i8),
        as_u8 => U8(u8),
    }
}

/// A named, typed column.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Column {
    name: Option<String>,
    format: ColumnFormat,
    values: ColumnValues,
}

impl Column {
    #[must_use]
    pub fn new(format: ColumnFormat) -> Self {
        Column {
            name: None,
            format,
            values: ColumnValues::for_format(format),
        }
    }

    /// Header name; `None` for skipped columns or headerless input.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn format(&self) -> ColumnFormat {
        self.format
    }

    #[must_use]
    pub fn values(&self) -> &ColumnValues {
        &self.values
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = Some(name);
    }

    pub(crate) fn values_mut(&mut self) -> &mut ColumnValues {
        &mut self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_matches_format() {
        let unsigned_hex = ColumnFormat::new(ColumnType::Int32Hex, true);
        assert!(ColumnValues::for_format(unsigned_hex).as_u32().is_some());

        let skip = ColumnValues::for_format(ColumnFormat::new(ColumnType::Skip, false));
        assert!(skip.is_skip());
        assert_eq!(skip.get(0), None);
    }

    #[test]
    fn test_push_rejects_mismatched_value() {
        let mut values = ColumnValues::for_format(ColumnFormat::new(ColumnType::Int16, false));
        assert!(values.push(Value::I16(3)).is_ok());
        assert_eq!(values.push(Value::U16(3)), Err(Value::U16(3)));
        assert_eq!(values.as_i16(), Some(&[3][..]));
        assert_eq!(values.get(0), Some(Value::I16(3)));
        assert_eq!(values.get(1), None);
    }

    #[test]
    fn test_column_serializes_with_name() {
        let mut column = Column::new(ColumnFormat::new(ColumnType::Utf8String, false));
        column.set_name("city".to_string());
        column.values_mut().push(Value::from("Oslo")).unwrap();
        let json = serde_json::to_value(&column).unwrap();
        assert_eq!(json["name"], "city");
        assert_eq!(json["values"][0], "Oslo");
        assert_eq!(json["format"]["ty"], "Utf8String");
    }
}
