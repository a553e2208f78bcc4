//! Row/column assembler.
//!
//! Routes each scanned field to its column. The first row names the columns
//! when a header is expected; every later row is coerced and staged, then
//! committed to the columns when its last field arrives. Committing per row
//! keeps every column exactly `row_count` long between calls, even while a
//! row is half received.

use crate::coerce::coerce;
use crate::column::Column;
use crate::format::FormatSpec;
use crate::value::Value;
use indexmap::IndexMap;
use tracing::trace;

/// Where the next field goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowState {
    AwaitingHeader,
    ParsingData,
}

#[derive(Debug)]
pub struct Assembler {
    columns: Vec<Column>,
    names: IndexMap<String, usize>,
    cursor: usize,
    state: RowState,
    rows: usize,
    staged: Vec<Value>,
}

impl Assembler {
    pub fn new(spec: &FormatSpec, has_header: bool) -> Self {
        let columns: Vec<Column> = spec.iter().copied().map(Column::new).collect();
        let staged = Vec::with_capacity(columns.iter().filter(|c| !c.format().is_skip()).count());
        Assembler {
            columns,
            names: IndexMap::new(),
            cursor: 0,
            state: if has_header {
                RowState::AwaitingHeader
            } else {
                RowState::ParsingData
            },
            rows: 0,
            staged,
        }
    }

    /// Accepts one complete field.
    pub fn accept(&mut self, raw: &[u8]) {
        let column = &mut self.columns[self.cursor];
        let format = column.format();

        match self.state {
            RowState::AwaitingHeader => {
                if !format.is_skip() {
                    let name = String::from_utf8_lossy(raw)
                        .trim_matches(|c: char| c.is_ascii_whitespace())
                        .to_string();
                    trace!(column = self.cursor, name = %name, "header field");
                    self.names.entry(name.clone()).or_insert(self.cursor);
                    column.set_name(name);
                }
            }
            RowState::ParsingData => {
                if let Some(value) = coerce(format, raw) {
                    trace!(row = self.rows, column = self.cursor, value = %value, "data field");
                    self.staged.push(value);
                }
            }
        }

        self.cursor += 1;
        if self.cursor == self.columns.len() {
            self.cursor = 0;
            match self.state {
                RowState::AwaitingHeader => self.state = RowState::ParsingData,
                RowState::ParsingData => self.commit_row(),
            }
        }
    }

    fn commit_row(&mut self) {
        let mut staged = self.staged.drain(..);
        for column in self.columns.iter_mut().filter(|c| !c.format().is_skip()) {
            if let Some(value) = staged.next() {
                if let Err(value) = column.values_mut().push(value) {
                    debug_assert!(false, "staged {:?} does not fit {}", value, column.format());
                }
            }
        }
        self.rows += 1;
    }

    pub fn reserve(&mut self, rows: usize) {
        for column in &mut self.columns {
            column.values_mut().reserve(rows);
        }
    }

    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Index of the first column carrying `name`.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.get(name).copied()
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn state(&self) -> RowState {
        self.state
    }
}
