//! Diagnostic sinks.
//!
//! A parser reports each [`Warning`] to the sink it was built with. The
//! default [`NoopSink`] discards them (they are still available from
//! [`Parser::warnings`](crate::Parser::warnings)); [`TracingSink`] turns
//! them into `tracing` events; [`FnSink`] hands them to a closure.
//!
//! ```rust
//! use chunkcsv::{FnSink, Parser, ParserOptions, Warning};
//! use std::sync::{Arc, Mutex};
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = {
//!     let seen = Arc::clone(&seen);
//!     FnSink(move |w: &Warning| seen.lock().unwrap().push(w.clone()))
//! };
//!
//! let parser = Parser::with_sink(ParserOptions::new("sq"), sink).unwrap();
//! assert_eq!(parser.warnings().len(), 1);
//! assert_eq!(seen.lock().unwrap().len(), 1);
//! ```

use crate::Warning;
use tracing::warn;

/// Receives warnings from a parser.
pub trait DiagnosticSink: Send {
    fn warning(&mut self, warning: &Warning);
}

/// Discards every warning.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn warning(&mut self, _warning: &Warning) {}
}

/// Emits every warning as a `tracing` event at WARN level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn warning(&mut self, warning: &Warning) {
        warn!(target: "chunkcsv", %warning, "csv parse warning");
    }
}

/// Adapts a closure into a sink.
pub struct FnSink<F>(pub F);

impl<F> DiagnosticSink for FnSink<F>
where
    F: FnMut(&Warning) + Send,
{
    fn warning(&mut self, warning: &Warning) {
        (self.0)(warning)
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for Box<S> {
    fn warning(&mut self, warning: &Warning) {
        (**self).warning(warning)
    }
}
