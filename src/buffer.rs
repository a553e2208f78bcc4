//! Leftover buffer for chunked input.
//!
//! [`ChunkBuffer`] owns the bytes that were supplied but not yet resolved
//! into complete fields. Each supplied chunk is copied onto the end of the
//! leftover so the scanner sees one contiguous window; after the scan the
//! consumed prefix is dropped. Caller slices are never retained.
//!
//! The buffer also carries the one bit of cross-chunk terminator state: when
//! a field's CR/LF run ended exactly at the end of the previous window, the
//! run may continue in the next chunk, and those continuation bytes must not
//! be read as a new (empty) field.

use crate::scanner::line_break_run;
use crate::{Error, Result};

#[derive(Debug, Default)]
pub struct ChunkBuffer {
    data: Vec<u8>,
    skip_line_break: bool,
    limit: Option<usize>,
}

impl ChunkBuffer {
    #[must_use]
    pub fn new(limit: Option<usize>) -> Self {
        ChunkBuffer {
            data: Vec::new(),
            skip_line_break: false,
            limit,
        }
    }

    /// Appends a chunk to the leftover.
    ///
    /// Leading CR/LF bytes are dropped while a line break from the previous
    /// window is still open.
    ///
    /// # Errors
    ///
    /// [`Error::BufferOverflow`] if the configured limit would be exceeded,
    /// [`Error::OutOfMemory`] if the allocation fails. The buffer is left
    /// unchanged in both cases.
    pub fn append(&mut self, mut chunk: &[u8]) -> Result<()> {
        if self.skip_line_break && self.data.is_empty() {
            chunk = &chunk[line_break_run(chunk)..];
        }
        if chunk.is_empty() {
            return Ok(());
        }

        let requested = self.data.len() + chunk.len();
        if let Some(limit) = self.limit {
            if requested > limit {
                return Err(Error::BufferOverflow { limit, requested });
            }
        }
        self.data
            .try_reserve(chunk.len())
            .map_err(|_| Error::OutOfMemory { requested })?;
        self.data.extend_from_slice(chunk);
        self.skip_line_break = false;
        Ok(())
    }

    /// The current scan window.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Drops the first `n` bytes.
    pub fn consume(&mut self, n: usize) {
        if n >= self.data.len() {
            self.data.clear();
        } else {
            self.data.drain(..n);
        }
        // Keep a long-lived parser from pinning the peak allocation.
        if self.data.capacity() > 4096 && self.data.len() < self.data.capacity() / 4 {
            self.data.shrink_to(self.data.len().max(64));
        }
    }

    /// Marks the end of the window as sitting inside a CR/LF run.
    pub fn open_line_break(&mut self) {
        self.skip_line_break = true;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Discards everything, including the terminator state.
    pub fn clear(&mut self) {
        self.data.clear();
        self.skip_line_break = false;
    }
}
