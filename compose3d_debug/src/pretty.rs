// Copyright 2026 the Compose3d Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use compose3d_core::trace::{ComposeEvent, PassSummary, RemoveEvent, TraceSink};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns its writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_compose(&mut self, e: &ComposeEvent) {
        let [tx, ty, tz] = e.matrix.translation();
        let _ = writeln!(
            self.writer,
            "[compose] pass={} node={} parts={} translate=({tx}, {ty}, {tz}) {}",
            e.pass_index, e.node.0, e.parts, e.matrix,
        );
    }

    fn on_remove(&mut self, e: &RemoveEvent) {
        let _ = writeln!(
            self.writer,
            "[remove] pass={} node={}",
            e.pass_index, e.node.0,
        );
    }

    fn on_pass(&mut self, s: &PassSummary) {
        let _ = writeln!(
            self.writer,
            "[pass] pass={} updated={} removed={}",
            s.pass_index, s.updated, s.removed,
        );
    }
}
