//! Field scanner.
//!
//! [`scan_field`] looks at the bytes at a cursor and extracts exactly one
//! field, or reports that the field boundary is not visible yet.
//!
//! Two modes:
//!
//! - **Unquoted**: the field runs to the next delimiter, CR or LF.
//! - **Quoted**: the field starts with the quote char and runs to the next
//!   quote that is not doubled. `""` inside a quoted field is one literal
//!   quote.
//!
//! A terminator is a single delimiter byte or a whole run of CR/LF bytes,
//! so blank lines between rows are absorbed by the field that precedes them.
//!
//! While the input is still streaming the scanner never guesses. A closing
//! quote that is the last available byte could be the first half of an
//! escaped pair, and an unquoted field with no terminator could still grow,
//! so both report [`Scan::Incomplete`]. Once the input is finalized the end
//! of the buffer terminates the field instead.

use std::borrow::Cow;

/// Delimiter and quote bytes for one parser.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dialect {
    pub delimiter: u8,
    pub quote: u8,
}

impl Default for Dialect {
    fn default() -> Self {
        Dialect {
            delimiter: b',',
            quote: b'"',
        }
    }
}

/// What ended a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Terminator {
    /// A single delimiter byte.
    Delimiter,
    /// A run of CR/LF bytes.
    LineBreak,
    /// End of finalized input.
    EndOfInput,
    /// Nothing consumed after the closing quote; the next byte starts the
    /// next field.
    None,
}

/// One extracted field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field<'a> {
    /// Decoded field bytes, borrowed unless escaped quotes were collapsed.
    pub value: Cow<'a, [u8]>,
    /// Bytes consumed, including quotes and the terminator.
    pub consumed: usize,
    pub terminator: Terminator,
    pub quoted: bool,
    /// The CR/LF run reached the end of the buffer and may continue in the
    /// next chunk.
    pub open_line_break: bool,
}

/// Result of one scan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Scan<'a> {
    Field(Field<'a>),
    /// The field boundary is not visible yet; more input is needed.
    Incomplete,
    /// Finalized input ended inside a quoted field.
    Unterminated,
}

#[inline]
fn is_line_break(byte: u8) -> bool {
    byte == b'\r' || byte == b'\n'
}

/// Length of the CR/LF run at the start of `buf`.
#[inline]
pub fn line_break_run(buf: &[u8]) -> usize {
    buf.iter().take_while(|&&b| is_line_break(b)).count()
}

/// Consumes the terminator that starts `rest`.
///
/// Returns (bytes consumed, terminator, run reached end of buffer).
fn terminator_at(rest: &[u8], dialect: &Dialect) -> (usize, Terminator, bool) {
    match rest.first() {
        Some(&b) if b == dialect.delimiter => (1, Terminator::Delimiter, false),
        Some(&b) if is_line_break(b) => {
            let run = line_break_run(rest);
            (run, Terminator::LineBreak, run == rest.len())
        }
        Some(_) => (0, Terminator::None, false),
        None => (0, Terminator::EndOfInput, false),
    }
}

/// Extracts the field that starts at `buf[0]`.
///
/// `finalized` tells the scanner that no more bytes will follow `buf`.
///
/// # Examples
///
/// ```rust
/// use chunkcsv::scanner::{scan_field, Dialect, Scan, Terminator};
///
/// let dialect = Dialect::default();
/// match scan_field(b"\"a,\"\"b\"\"\",2\n", &dialect, false) {
///     Scan::Field(field) => {
///         assert_eq!(&*field.value, b"a,\"b\"");
///         assert_eq!(field.consumed, 10);
///         assert_eq!(field.terminator, Terminator::Delimiter);
///     }
///     other => panic!("unexpected {:?}", other),
/// }
///
/// assert_eq!(scan_field(b"12", &dialect, false), Scan::Incomplete);
/// ```
pub fn scan_field<'a>(buf: &'a [u8], dialect: &Dialect, finalized: bool) -> Scan<'a> {
    match buf.first() {
        Some(&b) if b == dialect.quote => scan_quoted(buf, dialect, finalized),
        _ => scan_unquoted(buf, dialect, finalized),
    }
}

fn scan_unquoted<'a>(buf: &'a [u8], dialect: &Dialect, finalized: bool) -> Scan<'a> {
    let end = buf
        .iter()
        .position(|&b| b == dialect.delimiter || is_line_break(b));

    match end {
        Some(len) => {
            let (term_len, terminator, open_line_break) = terminator_at(&buf[len..], dialect);
            Scan::Field(Field {
                value: Cow::Borrowed(&buf[..len]),
                consumed: len + term_len,
                terminator,
                quoted: false,
                open_line_break,
            })
        }
        None if finalized => Scan::Field(Field {
            value: Cow::Borrowed(buf),
            consumed: buf.len(),
            terminator: Terminator::EndOfInput,
            quoted: false,
            open_line_break: false,
        }),
        None => Scan::Incomplete,
    }
}

fn scan_quoted<'a>(buf: &'a [u8], dialect: &Dialect, finalized: bool) -> Scan<'a> {
    let quote = dialect.quote;
    let body = &buf[1..];
    let mut pos = 0;
    let mut escaped = false;

    let close = loop {
        match body[pos..].iter().position(|&b| b == quote) {
            Some(offset) => {
                let at = pos + offset;
                match body.get(at + 1) {
                    Some(&next) if next == quote => {
                        escaped = true;
                        pos = at + 2;
                    }
                    Some(_) => break at,
                    // The quote is the last byte; it may be half of an escaped pair.
                    None if finalized => break at,
                    None => return Scan::Incomplete,
                }
            }
            None if finalized => return Scan::Unterminated,
            None => return Scan::Incomplete,
        }
    };

    let raw = &body[..close];
    let value = if escaped {
        Cow::Owned(unescape(raw, quote))
    } else {
        Cow::Borrowed(raw)
    };

    let (term_len, terminator, open_line_break) = terminator_at(&body[close + 1..], dialect);
    Scan::Field(Field {
        value,
        consumed: close + 2 + term_len,
        terminator,
        quoted: true,
        open_line_break,
    })
}

/// Collapses every doubled quote in `raw` to a single quote.
fn unescape(raw: &[u8], quote: u8) -> Vec<u8> {
    let mut result = Vec::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        result.push(raw[i]);
        if raw[i] == quote && raw.get(i + 1) == Some(&quote) {
            i += 2;
        } else {
            i += 1;
        }
    }
    result
}
