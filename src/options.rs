//! Configuration options for the parser.
//!
//! This module provides:
//!
//! - [`ParserOptions`]: the format string plus dialect settings
//! - [`Delimiter`]: the byte separating fields within a row
//!
//! Options derive serde's `Serialize`/`Deserialize`, so a parser can be
//! configured from any serde-compatible configuration file.
//!
//! ## Examples
//!
//! ```rust
//! use chunkcsv::{Delimiter, ParserOptions};
//!
//! let options = ParserOptions::new("sLf")
//!     .with_header(false)
//!     .with_delimiter(Delimiter::Semicolon)
//!     .with_quote_char(b'\'');
//! assert_eq!(options.delimiter.as_byte(), b';');
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Delimiter choice for separating fields.
///
/// # Examples
///
/// ```rust
/// use chunkcsv::Delimiter;
///
/// assert_eq!(Delimiter::Comma.as_byte(), b',');
/// assert_eq!(Delimiter::Tab.as_byte(), b'\t');
/// assert_eq!(Delimiter::Byte(b'#').as_byte(), b'#');
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Semicolon,
    Pipe,
    Byte(u8),
}

impl Delimiter {
    /// Returns the byte this delimiter matches.
    #[must_use]
    pub const fn as_byte(&self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Tab => b'\t',
            Delimiter::Semicolon => b';',
            Delimiter::Pipe => b'|',
            Delimiter::Byte(b) => *b,
        }
    }
}

impl From<u8> for Delimiter {
    fn from(byte: u8) -> Self {
        match byte {
            b',' => Delimiter::Comma,
            b'\t' => Delimiter::Tab,
            b';' => Delimiter::Semicolon,
            b'|' => Delimiter::Pipe,
            other => Delimiter::Byte(other),
        }
    }
}

fn default_has_header() -> bool {
    true
}

fn default_quote_char() -> u8 {
    b'"'
}

/// Configuration for a [`Parser`](crate::Parser).
///
/// `format` is required; everything else has a default: a header line is
/// expected, fields are comma separated and quoted with `"`, and the leftover
/// buffer is unbounded.
///
/// # Examples
///
/// ```rust
/// use chunkcsv::ParserOptions;
///
/// let options = ParserOptions::new("sd");
/// assert!(options.has_header);
/// assert_eq!(options.quote_char, b'"');
/// assert_eq!(options.max_buffer, None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserOptions {
    pub format: String,
    #[serde(default = "default_has_header")]
    pub has_header: bool,
    #[serde(default)]
    pub delimiter: Delimiter,
    #[serde(default = "default_quote_char")]
    pub quote_char: u8,
    #[serde(default)]
    pub max_buffer: Option<usize>,
}

impl ParserOptions {
    /// Creates default options for the given format string.
    #[must_use]
    pub fn new(format: impl Into<String>) -> Self {
        ParserOptions {
            format: format.into(),
            has_header: default_has_header(),
            delimiter: Delimiter::default(),
            quote_char: default_quote_char(),
            max_buffer: None,
        }
    }

    /// Sets whether the first line holds column names.
    #[must_use]
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Sets the field delimiter.
    ///
    /// Accepts a [`Delimiter`] or a raw byte:
    ///
    /// ```rust
    /// use chunkcsv::{Delimiter, ParserOptions};
    ///
    /// let options = ParserOptions::new("s").with_delimiter(b'\t');
    /// assert_eq!(options.delimiter, Delimiter::Tab);
    /// ```
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: impl Into<Delimiter>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Sets the quote character.
    #[must_use]
    pub fn with_quote_char(mut self, quote_char: u8) -> Self {
        self.quote_char = quote_char;
        self
    }

    /// Caps the number of bytes the parser may hold as leftover.
    ///
    /// Without a limit an unterminated quoted field buffers everything that
    /// follows it.
    #[must_use]
    pub fn with_max_buffer(mut self, limit: usize) -> Self {
        self.max_buffer = Some(limit);
        self
    }

    /// Checks the dialect bytes for conflicts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOption`] when the delimiter equals the quote
    /// character or when either of them is a line break byte.
    pub fn validate(&self) -> Result<()> {
        let delimiter = self.delimiter.as_byte();
        if matches!(delimiter, b'\r' | b'\n') {
            return Err(Error::invalid_option(
                "delimiter",
                "line break bytes cannot separate fields",
            ));
        }
        if matches!(self.quote_char, b'\r' | b'\n') {
            return Err(Error::invalid_option(
                "quote_char",
                "line break bytes cannot quote fields",
            ));
        }
        if delimiter == self.quote_char {
            return Err(Error::invalid_option(
                "quote_char",
                format!("must differ from the delimiter {:?}", delimiter as char),
            ));
        }
        Ok(())
    }
}
