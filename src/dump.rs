//! Tabular diagnostic dump of a parser's contents.
//!
//! ```text
//! rows = 2, columns = 3
//!    Header:
//!       a | - | c
//!    Types:
//!       int32_t | - | char
//!    Values:
//!       1 | - | 3
//!       4 | - | 6
//! ```
//!
//! Floats are shown with two decimals and hex columns in upper-case hex.

use crate::column::ColumnValues;
use crate::format::ColumnType;
use crate::parser::Parser;
use crate::value::Value;
use std::fmt::{self, Write};

const SEPARATOR: &str = " | ";
const INDENT: &str = "      ";

fn write_cell(out: &mut impl Write, ty: ColumnType, values: &ColumnValues, row: usize) -> fmt::Result {
    match (ty, values.get(row)) {
        (ColumnType::Int32Hex, Some(Value::I32(v))) => write!(out, "{:X}", v as u32),
        (ColumnType::Int32Hex, Some(Value::U32(v))) => write!(out, "{:X}", v),
        (_, Some(Value::F32(v))) => write!(out, "{:.2}", v),
        (_, Some(value)) => write!(out, "{}", value),
        (_, None) => out.write_char('-'),
    }
}

/// Writes the dump of `parser` to `out`.
///
/// # Errors
///
/// Propagates formatter errors from `out`.
pub fn write_dump(parser: &Parser, out: &mut impl Write) -> fmt::Result {
    let columns = parser.columns();
    writeln!(
        out,
        "rows = {}, columns = {}",
        parser.row_count(),
        parser.column_count()
    )?;

    if parser.options().has_header {
        writeln!(out, "   Header:")?;
        let names: Vec<&str> = parser.header().map(|n| n.unwrap_or("-")).collect();
        writeln!(out, "{}{}", INDENT, names.join(SEPARATOR))?;
    } else {
        writeln!(out, "   (No header)")?;
    }

    writeln!(out, "   Types:")?;
    let types: Vec<&str> = columns.iter().map(|c| c.format().type_name()).collect();
    writeln!(out, "{}{}", INDENT, types.join(SEPARATOR))?;

    writeln!(out, "   Values:")?;
    for row in 0..parser.row_count() {
        out.write_str(INDENT)?;
        for (i, column) in columns.iter().enumerate() {
            if i > 0 {
                out.write_str(SEPARATOR)?;
            }
            write_cell(out, column.format().ty, column.values(), row)?;
        }
        out.write_char('\n')?;
    }
    Ok(())
}

impl Parser {
    /// The dump as a string.
    #[must_use]
    pub fn dump(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_dump(self, f)
    }
}
