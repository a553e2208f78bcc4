//! The streaming parser.
//!
//! [`Parser`] accepts input in fragments of any size and assembles it into
//! typed columns. Fragments can split a row anywhere: inside a quoted field,
//! between a closing quote and its delimiter, or between the `\r` and `\n`
//! of a line break. The result is the same as parsing the whole input in
//! one go.
//!
//! ## Usage
//!
//! ```rust
//! use chunkcsv::{Parser, ParserOptions};
//!
//! let mut parser = Parser::new(ParserOptions::new("sL")).unwrap();
//! for chunk in ["na", "me,co", "unt\nfoo,", "1\nbar,2"] {
//!     parser.supply(chunk.as_bytes()).unwrap();
//! }
//! parser.finalize();
//!
//! assert_eq!(parser.row_count(), 2);
//! let counts = parser.values_by_name("count").and_then(|v| v.as_i32());
//! assert_eq!(counts, Some(&[1, 2][..]));
//! ```
//!
//! ## Finalizing
//!
//! A field is only complete once its terminator has been seen, so the last
//! field of an input that does not end with a line break stays buffered
//! until [`Parser::finalize`] is called. Finalizing twice is harmless.
//!
//! Calls run to completion; there is no internal concurrency and no way to
//! roll back a supplied chunk.

use crate::assembler::{Assembler, RowState};
use crate::buffer::ChunkBuffer;
use crate::column::{Column, ColumnValues};
use crate::diagnostics::{DiagnosticSink, NoopSink};
use crate::format::FormatSpec;
use crate::options::ParserOptions;
use crate::scanner::{scan_field, Dialect, Scan, Terminator};
use crate::{Error, Result, Warning};
use std::fmt;
use std::io;
use tracing::{debug, trace};

/// Default block size used by [`Parser::read_from`] callers that have no preference.
pub const DEFAULT_READ_BLOCK: usize = 512;

/// Incremental CSV parser producing typed columns.
pub struct Parser {
    options: ParserOptions,
    spec: FormatSpec,
    dialect: Dialect,
    buffer: ChunkBuffer,
    assembler: Assembler,
    finalized: bool,
    after_delimiter: bool,
    warnings: Vec<Warning>,
    sink: Box<dyn DiagnosticSink>,
}

/// Outcome of one pass of the scan loop.
struct Drained {
    fields: usize,
    dropped: Option<(usize, usize)>,
}

impl Parser {
    /// Creates a streaming parser.
    ///
    /// # Errors
    ///
    /// Returns an error if the format string defines no columns or the
    /// options are inconsistent (see [`ParserOptions::validate`]).
    pub fn new(options: ParserOptions) -> Result<Self> {
        Self::with_sink(options, NoopSink)
    }

    /// Creates a streaming parser that reports warnings to `sink`.
    ///
    /// # Errors
    ///
    /// Same as [`Parser::new`].
    pub fn with_sink<S>(options: ParserOptions, sink: S) -> Result<Self>
    where
        S: DiagnosticSink + 'static,
    {
        options.validate()?;
        let spec = FormatSpec::parse(&options.format)?;
        let assembler = Assembler::new(&spec, options.has_header);

        let mut parser = Parser {
            dialect: Dialect {
                delimiter: options.delimiter.as_byte(),
                quote: options.quote_char,
            },
            buffer: ChunkBuffer::new(options.max_buffer),
            assembler,
            finalized: false,
            after_delimiter: false,
            warnings: Vec::new(),
            sink: Box::new(sink),
            spec,
            options,
        };
        for warning in parser.spec.warnings().to_vec() {
            parser.warn(warning);
        }
        debug!(format = %parser.spec, columns = parser.spec.len(), "parser created");
        Ok(parser)
    }

    /// Parses a complete input: one [`supply`](Self::supply) followed by
    /// [`finalize`](Self::finalize).
    ///
    /// # Errors
    ///
    /// Configuration errors as for [`Parser::new`], or a buffer error from
    /// the supply.
    ///
    /// ```rust
    /// use chunkcsv::{Parser, ParserOptions};
    ///
    /// let parser = Parser::parse(b"\"He said \"\"hi\"\"\",5\n", ParserOptions::new("sd").with_header(false)).unwrap();
    /// let text = parser.values_by_index(0).and_then(|v| v.as_strings()).unwrap();
    /// assert_eq!(text[0], "He said \"hi\"");
    /// ```
    pub fn parse(input: &[u8], options: ParserOptions) -> Result<Self> {
        let mut parser = Self::new(options)?;
        parser.supply(input)?;
        parser.finalize();
        Ok(parser)
    }

    /// Supplies the next fragment of input.
    ///
    /// Fragments may be any size, including empty. Supplying after
    /// [`finalize`](Self::finalize) resumes streaming.
    ///
    /// # Errors
    ///
    /// [`Error::BufferOverflow`] when the configured `max_buffer` would be
    /// exceeded and [`Error::OutOfMemory`] when the leftover cannot grow.
    /// The fragment is rejected as a whole; the parser state is unchanged.
    pub fn supply(&mut self, chunk: &[u8]) -> Result<()> {
        trace!(len = chunk.len(), leftover = self.buffer.len(), "supply");
        self.buffer.append(chunk)?;
        if self.buffer.is_empty() {
            return Ok(());
        }
        self.finalized = false;
        self.drain();
        Ok(())
    }

    /// Supplies a single byte.
    ///
    /// # Errors
    ///
    /// Same as [`Parser::supply`].
    pub fn supply_byte(&mut self, byte: u8) -> Result<()> {
        self.supply(&[byte])
    }

    /// Supplies a string fragment.
    ///
    /// # Errors
    ///
    /// Same as [`Parser::supply`].
    pub fn supply_str(&mut self, chunk: &str) -> Result<()> {
        self.supply(chunk.as_bytes())
    }

    /// Declares the end of input and forces the pending field through.
    ///
    /// An unterminated quoted field is dropped with a
    /// [`Warning::UnterminatedQuote`]. Calling this again with nothing
    /// buffered does nothing.
    pub fn finalize(&mut self) {
        self.finish();
    }

    /// Like [`finalize`](Self::finalize), but reports a dropped quoted field
    /// as an error.
    ///
    /// # Errors
    ///
    /// [`Error::UnterminatedQuote`] if input ended inside a quoted field.
    /// The rest of the parse is kept either way.
    pub fn finalize_strict(&mut self) -> Result<()> {
        match self.finish() {
            Some((row, column)) => Err(Error::UnterminatedQuote { row, column }),
            None => Ok(()),
        }
    }

    fn finish(&mut self) -> Option<(usize, usize)> {
        if self.finalized && self.buffer.is_empty() {
            return None;
        }
        self.finalized = true;

        let drained = self.drain();
        if self.after_delimiter {
            // `a,b,` ends with an empty field.
            self.after_delimiter = false;
            self.assembler.accept(b"");
        }

        let fields = self.assembler.cursor();
        if fields > 0 {
            let expected = self.assembler.columns().len();
            let warning = match self.assembler.state() {
                RowState::AwaitingHeader => Warning::IncompleteHeader { fields, expected },
                RowState::ParsingData => Warning::IncompleteRow {
                    row: self.assembler.rows(),
                    fields,
                    expected,
                },
            };
            self.warn(warning);
        }

        debug!(
            rows = self.assembler.rows(),
            fields = drained.fields,
            "input finalized"
        );
        drained.dropped
    }

    /// Scans the leftover for complete fields and hands them to the assembler.
    fn drain(&mut self) -> Drained {
        let data = self.buffer.as_slice();
        let mut pos = 0;
        let mut fields = 0;
        let mut open_line_break = false;
        let mut dropped = None;
        let mut unterminated = None;

        while pos < data.len() {
            match scan_field(&data[pos..], &self.dialect, self.finalized) {
                Scan::Field(field) => {
                    pos += field.consumed;
                    fields += 1;
                    open_line_break = field.open_line_break;
                    self.after_delimiter = field.terminator == Terminator::Delimiter;
                    self.assembler.accept(&field.value);
                }
                Scan::Incomplete => break,
                Scan::Unterminated => {
                    let row = self.assembler.rows();
                    let column = self.assembler.cursor();
                    let dropped_bytes = data.len() - pos;
                    pos = data.len();
                    open_line_break = false;
                    self.after_delimiter = false;
                    dropped = Some((row, column));
                    unterminated = Some(Warning::UnterminatedQuote {
                        row,
                        column,
                        dropped_bytes,
                    });
                }
            }
        }

        if let Some(warning) = unterminated {
            self.warn(warning);
        }

        self.buffer.consume(pos);
        if open_line_break {
            self.buffer.open_line_break();
        }
        trace!(fields, leftover = self.buffer.len(), "drained");
        Drained { fields, dropped }
    }

    fn warn(&mut self, warning: Warning) {
        self.sink.warning(&warning);
        self.warnings.push(warning);
    }

    /// Reads `reader` to the end in blocks of `block` bytes, supplying each
    /// block, then finalizes.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] on read failure; supply errors are passed through.
    pub fn read_from<R: io::Read>(&mut self, mut reader: R, block: usize) -> Result<()> {
        let mut buf = vec![0u8; block.max(1)];
        loop {
            match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => self.supply(&buf[..n])?,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        self.finalize();
        Ok(())
    }

    /// Pre-allocates room for `rows` more rows in every column.
    pub fn reserve(&mut self, rows: usize) {
        self.assembler.reserve(rows);
    }

    /// Number of columns in the format string.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.assembler.columns().len()
    }

    /// Number of complete data rows, excluding the header.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.assembler.rows()
    }

    /// Values of the first column named `name`.
    ///
    /// `None` if no such column exists. Skipped columns have no name.
    #[must_use]
    pub fn values_by_name(&self, name: &str) -> Option<&ColumnValues> {
        self.assembler
            .index_of(name)
            .and_then(|index| self.values_by_index(index))
    }

    /// Values of column `index`; `None` if out of range or skipped.
    #[must_use]
    pub fn values_by_index(&self, index: usize) -> Option<&ColumnValues> {
        self.assembler
            .columns()
            .get(index)
            .map(Column::values)
            .filter(|values| !values.is_skip())
    }

    #[must_use]
    pub fn column(&self, index: usize) -> Option<&Column> {
        self.assembler.columns().get(index)
    }

    #[must_use]
    pub fn columns(&self) -> &[Column] {
        self.assembler.columns()
    }

    /// Column names in order; `None` for skipped or unnamed columns.
    pub fn header(&self) -> impl Iterator<Item = Option<&str>> + '_ {
        self.assembler.columns().iter().map(Column::name)
    }

    #[must_use]
    pub fn format(&self) -> &FormatSpec {
        &self.spec
    }

    #[must_use]
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Everything reported so far, configuration warnings first.
    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Bytes supplied but not yet resolved into fields.
    #[must_use]
    pub fn leftover_len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Whether the header line is still being read.
    #[must_use]
    pub fn awaiting_header(&self) -> bool {
        self.assembler.state() == RowState::AwaitingHeader
    }
}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("options", &self.options)
            .field("rows", &self.assembler.rows())
            .field("cursor", &self.assembler.cursor())
            .field("leftover", &self.buffer.len())
            .field("finalized", &self.finalized)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headerless(format: &str) -> ParserOptions {
        ParserOptions::new(format).with_header(false)
    }

    #[test]
    fn test_bulk_parse() {
        let parser = Parser::parse(b"a,b\n1,x\n2,y", ParserOptions::new("Ls")).unwrap();
        assert_eq!(parser.column_count(), 2);
        assert_eq!(parser.row_count(), 2);
        assert_eq!(parser.values_by_name("a").unwrap().as_i32(), Some(&[1, 2][..]));
        let b = parser.values_by_name("b").unwrap().as_strings().unwrap();
        assert_eq!(b, &["x".to_string(), "y".to_string()][..]);
        assert!(parser.warnings().is_empty());
    }

    #[test]
    fn test_last_field_waits_for_finalize() {
        let mut parser = Parser::new(headerless("LL")).unwrap();
        parser.supply(b"1,2\n3,4").unwrap();
        assert_eq!(parser.row_count(), 1);
        assert_eq!(parser.leftover_len(), 1);

        parser.finalize();
        assert_eq!(parser.row_count(), 2);
        assert_eq!(parser.leftover_len(), 0);

        parser.finalize();
        assert_eq!(parser.row_count(), 2);
        assert!(parser.warnings().is_empty());
    }

    #[test]
    fn test_trailing_delimiter_yields_empty_field() {
        let parser = Parser::parse(b"1,", headerless("Ls")).unwrap();
        assert_eq!(parser.row_count(), 1);
        assert_eq!(
            parser.values_by_index(1).unwrap().as_strings(),
            Some(&[String::new()][..])
        );
    }

    #[test]
    fn test_finalize_after_line_break_adds_nothing() {
        let parser = Parser::parse(b"1,2\r\n", headerless("LL")).unwrap();
        assert_eq!(parser.row_count(), 1);
        assert!(parser.warnings().is_empty());
    }

    #[test]
    fn test_unterminated_quote_is_dropped() {
        let mut parser = Parser::new(headerless("Ls")).unwrap();
        parser.supply(b"1,\"abc").unwrap();
        assert_eq!(
            parser.finalize_strict(),
            Err(Error::UnterminatedQuote { row: 0, column: 1 })
        );
        assert_eq!(parser.row_count(), 0);
        assert_eq!(parser.leftover_len(), 0);
        assert!(parser.warnings().contains(&Warning::UnterminatedQuote {
            row: 0,
            column: 1,
            dropped_bytes: 4
        }));
        assert!(parser.warnings().contains(&Warning::IncompleteRow {
            row: 0,
            fields: 1,
            expected: 2
        }));
    }

    #[test]
    fn test_supply_after_finalize_resumes() {
        let mut parser = Parser::new(headerless("LL")).unwrap();
        parser.supply(b"1,2").unwrap();
        parser.finalize();
        assert!(parser.is_finalized());
        parser.supply(b"3,4\n").unwrap();
        assert!(!parser.is_finalized());
        assert_eq!(parser.row_count(), 2);
    }

    #[test]
    fn test_unknown_tag_warns_at_construction() {
        let parser = Parser::new(ParserOptions::new("Lz")).unwrap();
        assert_eq!(
            parser.warnings(),
            &[Warning::UnknownFormatTag { column: 1, tag: 'z' }]
        );
    }

    #[test]
    fn test_buffer_limit_rejects_chunk() {
        let mut parser = Parser::new(headerless("s").with_max_buffer(9)).unwrap();
        parser.supply(b"\"abcdef").unwrap();
        assert!(matches!(
            parser.supply(b"ghij"),
            Err(Error::BufferOverflow { limit: 9, .. })
        ));
        parser.supply(b"\"\n").unwrap();
        assert_eq!(
            parser.values_by_index(0).unwrap().as_strings(),
            Some(&["abcdef".to_string()][..])
        );
    }

    #[test]
    fn test_read_from_blocks() {
        let input: &[u8] = b"id,name\n7,\"x,y\"\n8,z";
        let mut parser = Parser::new(ParserOptions::new("ds")).unwrap();
        parser.read_from(input, 3).unwrap();
        assert_eq!(parser.row_count(), 2);
        assert_eq!(parser.values_by_name("id").unwrap().as_i16(), Some(&[7, 8][..]));
    }

    #[test]
    fn test_incomplete_header_warning() {
        let mut parser = Parser::new(ParserOptions::new("LLL")).unwrap();
        parser.supply(b"a,b").unwrap();
        parser.finalize();
        assert!(parser.awaiting_header());
        assert_eq!(
            parser.warnings(),
            &[Warning::IncompleteHeader {
                fields: 2,
                expected: 3
            }]
        );
    }
}
