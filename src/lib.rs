//! # chunkcsv
//!
//! An incremental parser for RFC 4180 style delimited text that stores each
//! column in its own strongly typed array.
//!
//! ## Why chunked?
//!
//! Devices with little memory often cannot hold a whole CSV file. `chunkcsv`
//! accepts input in pieces of any size, from single bytes to the whole file,
//! and produces the same columns however the input was split. Only the
//! unfinished field is ever buffered.
//!
//! ## Key Features
//!
//! - **Chunk invariant**: quoted fields, escaped quotes, delimiters and
//!   `\r\n` line breaks may straddle two `supply` calls
//! - **Typed columns**: a compact format string picks `String`, `f32` or a
//!   signed/unsigned 8/16/32-bit integer (decimal or hex) per column
//! - **Permissive numbers**: malformed numbers coerce like C's `atoi`
//!   family instead of failing the parse
//! - **No Unsafe Code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! ```rust
//! use chunkcsv::{Parser, ParserOptions};
//!
//! let mut parser = Parser::new(ParserOptions::new("sLuc")).unwrap();
//! parser.supply(b"name,score,le").unwrap();
//! parser.supply(b"vel\r").unwrap();
//! parser.supply(b"\n\"Smith, J\",42,3\r\n").unwrap();
//! parser.supply(b"Doe,-7,250").unwrap();
//! parser.finalize();
//!
//! assert_eq!(parser.row_count(), 2);
//! let names = parser.values_by_name("name").and_then(|v| v.as_strings()).unwrap();
//! assert_eq!(names, &["Smith, J".to_string(), "Doe".to_string()][..]);
//! let levels = parser.values_by_name("level").and_then(|v| v.as_u8()).unwrap();
//! assert_eq!(levels, &[3, 250][..]);
//! ```
//!
//! ## Format Strings
//!
//! | Tag | Stored as | With `u` prefix |
//! |-----|-----------|-----------------|
//! | `s` | `String` | - |
//! | `f` | `f32` | - |
//! | `L` | `i32` | `u32` |
//! | `d` | `i16` | `u16` |
//! | `c` | `i8` | `u8` |
//! | `x` | `i32` parsed as hex | `u32` |
//! | `-` | not stored | - |
//!
//! ## Errors and Warnings
//!
//! Only configuration problems, buffer limits, allocation failure and I/O
//! are [`Error`]s. Unknown format tags, input that ends inside a quoted
//! field and incomplete final rows are [`Warning`]s: the parse goes on and
//! the warnings are collected on the parser and sent to its
//! [`DiagnosticSink`].

pub mod assembler;
pub mod buffer;
pub mod coerce;
pub mod column;
pub mod diagnostics;
pub mod dump;
pub mod error;
pub mod format;
pub mod options;
pub mod parser;
pub mod scanner;
pub mod value;

pub use column::{Column, ColumnValues};
pub use diagnostics::{DiagnosticSink, FnSink, NoopSink, TracingSink};
pub use error::{Error, Result, Warning};
pub use format::{ColumnFormat, ColumnType, FormatSpec};
pub use options::{Delimiter, ParserOptions};
pub use parser::Parser;
pub use value::Value;

use std::io;

/// Parses a complete byte buffer.
///
/// Equivalent to one [`Parser::supply`] followed by [`Parser::finalize`].
///
/// # Examples
///
/// ```rust
/// use chunkcsv::{from_slice, ParserOptions};
///
/// let parser = from_slice(b"a,b,c\n1,2,3\n4,5,6\n", ParserOptions::new("L-c")).unwrap();
/// assert_eq!(parser.row_count(), 2);
/// assert!(parser.values_by_name("b").is_none());
/// ```
///
/// # Errors
///
/// Returns an error if the options are invalid or the input exceeds the
/// configured buffer limit.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice(input: &[u8], options: ParserOptions) -> Result<Parser> {
    Parser::parse(input, options)
}

/// Parses a complete string.
///
/// # Errors
///
/// Same as [`from_slice`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(input: &str, options: ParserOptions) -> Result<Parser> {
    Parser::parse(input.as_bytes(), options)
}

/// Reads an I/O stream to the end, feeding it to a new parser block by block.
///
/// # Examples
///
/// ```rust
/// use chunkcsv::{from_reader, ParserOptions};
/// use std::io::Cursor;
///
/// let input = Cursor::new(b"temp\n21.5\n19.25".to_vec());
/// let parser = from_reader(input, ParserOptions::new("f")).unwrap();
/// let temps = parser.values_by_name("temp").and_then(|v| v.as_f32()).unwrap();
/// assert_eq!(temps, &[21.5, 19.25][..]);
/// ```
///
/// # Errors
///
/// Returns an error if the options are invalid, reading fails, or the
/// buffer limit is exceeded.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R>(reader: R, options: ParserOptions) -> Result<Parser>
where
    R: io::Read,
{
    let mut parser = Parser::new(options)?;
    parser.read_from(reader, crate::parser::DEFAULT_READ_BLOCK)?;
    Ok(parser)
}
