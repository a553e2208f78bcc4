//! Error and warning types for chunked CSV parsing.
//!
//! The parser distinguishes between two classes of problems:
//!
//! - **Errors** ([`Error`]): conditions the caller must handle. These come from
//!   invalid configuration, exhausted memory, a configured buffer limit being
//!   exceeded, or I/O failures in the reader adapter.
//! - **Warnings** ([`Warning`]): malformed input or a questionable format
//!   string. The parse keeps going and degrades gracefully. Warnings are
//!   collected on the parser and forwarded to its
//!   [`DiagnosticSink`](crate::DiagnosticSink).
//!
//! Malformed numbers are neither: they coerce permissively (see
//! [`coerce`](crate::coerce)).
//!
//! ## Examples
//!
//! ```rust
//! use chunkcsv::{Error, Parser, ParserOptions};
//!
//! let result = Parser::new(ParserOptions::new(""));
//! assert!(matches!(result, Err(Error::EmptyFormat)));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all errors the parser reports to its caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The format string contained no column tags.
    #[error("Format string defines no columns")]
    EmptyFormat,

    /// A configuration option has an unusable value.
    #[error("Invalid option `{option}`: {msg}")]
    InvalidOption { option: &'static str, msg: String },

    /// Accepting the chunk would grow the leftover past the configured limit.
    #[error("Leftover buffer limit of {limit} bytes exceeded (would grow to {requested} bytes)")]
    BufferOverflow { limit: usize, requested: usize },

    /// A quoted field was still open when the input was finalized.
    #[error("Unterminated quoted field at row {row}, column {column}")]
    UnterminatedQuote { row: usize, column: usize },

    /// Memory for the leftover buffer could not be reserved.
    #[error("Out of memory while buffering {requested} bytes")]
    OutOfMemory { requested: usize },

    /// IO error while reading input
    #[error("IO error: {0}")]
    Io(String),
}

impl Error {
    /// Creates an invalid option error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chunkcsv::Error;
    ///
    /// let err = Error::invalid_option("delimiter", "must differ from the quote char");
    /// assert!(err.to_string().contains("`delimiter`"));
    /// ```
    pub fn invalid_option<T: fmt::Display>(option: &'static str, msg: T) -> Self {
        Error::InvalidOption {
            option,
            msg: msg.to_string(),
        }
    }

    /// Creates an I/O error for reading failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::io(&err.to_string())
    }
}

/// Non-fatal conditions recorded while configuring or feeding a parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Warning {
    /// A format tag was not recognized; the column is skipped.
    #[error("Unknown format tag '{tag}' for column {column}, column will be skipped")]
    UnknownFormatTag { column: usize, tag: char },

    /// An unsigned marker preceded a tag that has no unsigned representation.
    #[error("Unsigned marker has no effect on '{tag}' (column {column})")]
    UnsignedNotApplicable { column: usize, tag: char },

    /// The format string ended with an unsigned marker.
    #[error("Format string ends with a dangling unsigned marker")]
    DanglingUnsignedMarker,

    /// Input ended inside a quoted field; the field was dropped.
    #[error("Input ended inside a quoted field at row {row}, column {column} ({dropped_bytes} bytes dropped)")]
    UnterminatedQuote {
        row: usize,
        column: usize,
        dropped_bytes: usize,
    },

    /// Input ended part-way through a data row.
    #[error("Row {row} is incomplete: {fields} of {expected} fields received")]
    IncompleteRow {
        row: usize,
        fields: usize,
        expected: usize,
    },

    /// Input ended part-way through the header line.
    #[error("Header is incomplete: {fields} of {expected} names received")]
    IncompleteHeader { fields: usize, expected: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
