//! Column format strings.
//!
//! A format string has one tag per column. The tag picks the storage type:
//!
//! | Tag | Type | Signed | With `u` prefix |
//! |-----|------|--------|-----------------|
//! | `s` | string | `String` | not applicable |
//! | `f` | float | `f32` | not applicable |
//! | `L` | 32-bit integer | `i32` | `u32` |
//! | `d` | 16-bit integer | `i16` | `u16` |
//! | `c` | 8-bit integer | `i8` | `u8` |
//! | `x` | hex, 32-bit | `i32` | `u32` |
//! | `-` | skipped | nothing stored | not applicable |
//!
//! Whitespace between tags is ignored. Unknown tags do not fail the parse;
//! they turn the column into [`ColumnType::Skip`] and leave a [`Warning`].
//!
//! ```rust
//! use chunkcsv::{ColumnType, FormatSpec};
//!
//! let spec = FormatSpec::parse("sudL-").unwrap();
//! assert_eq!(spec.len(), 4);
//! assert_eq!(spec[1].ty, ColumnType::Int16);
//! assert!(spec[1].unsigned);
//! assert_eq!(spec[3].ty, ColumnType::Skip);
//! ```

use crate::{Error, Result, Warning};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

/// Storage type of a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    Skip,
    Utf8String,
    Float32,
    Int32,
    Int16,
    Int8,
    Int32Hex,
}

impl ColumnType {
    /// Maps a format tag to its column type.
    #[must_use]
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            b's' => Some(ColumnType::Utf8String),
            b'f' => Some(ColumnType::Float32),
            b'L' => Some(ColumnType::Int32),
            b'd' => Some(ColumnType::Int16),
            b'c' => Some(ColumnType::Int8),
            b'x' => Some(ColumnType::Int32Hex),
            b'-' => Some(ColumnType::Skip),
            _ => None,
        }
    }

    /// The tag character for this type.
    #[must_use]
    pub const fn tag(&self) -> char {
        match self {
            ColumnType::Skip => '-',
            ColumnType::Utf8String => 's',
            ColumnType::Float32 => 'f',
            ColumnType::Int32 => 'L',
            ColumnType::Int16 => 'd',
            ColumnType::Int8 => 'c',
            ColumnType::Int32Hex => 'x',
        }
    }

    /// Whether a `u` marker changes the representation of this type.
    #[must_use]
    pub const fn supports_unsigned(&self) -> bool {
        matches!(
            self,
            ColumnType::Int32 | ColumnType::Int16 | ColumnType::Int8 | ColumnType::Int32Hex
        )
    }
}

/// One column's type together with its signedness.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnFormat {
    pub ty: ColumnType,
    pub unsigned: bool,
}

impl ColumnFormat {
    #[must_use]
    pub const fn new(ty: ColumnType, unsigned: bool) -> Self {
        ColumnFormat { ty, unsigned }
    }

    #[must_use]
    pub const fn is_skip(&self) -> bool {
        matches!(self.ty, ColumnType::Skip)
    }

    /// Human readable name of the runtime representation.
    ///
    /// ```rust
    /// use chunkcsv::{ColumnFormat, ColumnType};
    ///
    /// assert_eq!(ColumnFormat::new(ColumnType::Int16, true).type_name(), "uint16_t");
    /// assert_eq!(ColumnFormat::new(ColumnType::Int32Hex, false).type_name(), "hex (int32_t)");
    /// ```
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match (self.ty, self.unsigned) {
            (ColumnType::Int32, true) => "uint32_t",
            (ColumnType::Int16, true) => "uint16_t",
            (ColumnType::Int8, true) => "uint8_t",
            (ColumnType::Int32Hex, true) => "hex (uint32_t)",
            (ColumnType::Utf8String, _) => "char*",
            (ColumnType::Float32, _) => "float",
            (ColumnType::Int32, false) => "int32_t",
            (ColumnType::Int16, false) => "int16_t",
            (ColumnType::Int8, false) => "char",
            (ColumnType::Int32Hex, false) => "hex (int32_t)",
            (ColumnType::Skip, _) => "-",
        }
    }
}

impl fmt::Display for ColumnFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unsigned {
            write!(f, "u")?;
        }
        write!(f, "{}", self.ty.tag())
    }
}

/// A compiled format string: one [`ColumnFormat`] per column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatSpec {
    columns: Vec<ColumnFormat>,
    warnings: Vec<Warning>,
}

impl FormatSpec {
    /// Compiles a format string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyFormat`] if the string defines no columns.
    /// Unknown tags are not errors; see [`FormatSpec::warnings`].
    pub fn parse(format: &str) -> Result<Self> {
        let mut columns = Vec::with_capacity(format.len());
        let mut warnings = Vec::new();
        let mut unsigned = false;

        for ch in format.chars().filter(|c| !c.is_whitespace()) {
            if ch == 'u' {
                unsigned = true;
                continue;
            }

            let column = columns.len();
            let ty = match u8::try_from(ch).ok().and_then(ColumnType::from_tag) {
                Some(ty) => ty,
                None => {
                    warnings.push(Warning::UnknownFormatTag { column, tag: ch });
                    ColumnType::Skip
                }
            };

            if unsigned && !ty.supports_unsigned() {
                // Unknown tags already carry a warning.
                if ty != ColumnType::Skip || ch == '-' {
                    warnings.push(Warning::UnsignedNotApplicable { column, tag: ch });
                }
                unsigned = false;
            }

            columns.push(ColumnFormat::new(ty, unsigned));
            unsigned = false;
        }

        if unsigned {
            warnings.push(Warning::DanglingUnsignedMarker);
        }
        if columns.is_empty() {
            return Err(Error::EmptyFormat);
        }

        Ok(FormatSpec { columns, warnings })
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Always false for a successfully parsed spec.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    #[must_use]
    pub fn get(&self, column: usize) -> Option<&ColumnFormat> {
        self.columns.get(column)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColumnFormat> {
        self.columns.iter()
    }

    /// Problems found while compiling the format string.
    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }
}

impl Index<usize> for FormatSpec {
    type Output = ColumnFormat;

    fn index(&self, column: usize) -> &ColumnFormat {
        &self.columns[column]
    }
}

impl<'a> IntoIterator for &'a FormatSpec {
    type Item = &'a ColumnFormat;
    type IntoIter = std::slice::Iter<'a, ColumnFormat>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}

impl fmt::Display for FormatSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for column in &self.columns {
            write!(f, "{}", column)?;
        }
        Ok(())
    }
}
