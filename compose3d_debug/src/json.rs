// Copyright 2026 the Compose3d Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON event export.
//!
//! [`JsonSink`] implements [`TraceSink`] by turning each event into a
//! [`serde_json::Value`] object with a `"kind"` field (`"compose"`,
//! `"remove"`, or `"pass"`). [`JsonSink::export`] writes the collected events
//! as one pretty-printed JSON array.

use std::io::{self, Write};

use serde_json::{Value, json};

use compose3d_core::trace::{ComposeEvent, PassSummary, RemoveEvent, TraceSink};

/// A [`TraceSink`] that collects events as JSON objects.
#[derive(Debug, Default)]
pub struct JsonSink {
    events: Vec<Value>,
}

impl JsonSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the events collected so far.
    #[must_use]
    pub fn events(&self) -> &[Value] {
        &self.events
    }

    /// Writes the collected events as a JSON array.
    pub fn export(&self, writer: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer_pretty(writer, &self.events)?;
        Ok(())
    }
}

impl TraceSink for JsonSink {
    fn on_compose(&mut self, e: &ComposeEvent) {
        self.events.push(json!({
            "kind": "compose",
            "pass": e.pass_index,
            "node": e.node.0,
            "parts": e.parts,
            "translation": e.matrix.translation(),
            "transform": e.matrix.to_transform_string(),
        }));
    }

    fn on_remove(&mut self, e: &RemoveEvent) {
        self.events.push(json!({
            "kind": "remove",
            "pass": e.pass_index,
            "node": e.node.0,
        }));
    }

    fn on_pass(&mut self, s: &PassSummary) {
        self.events.push(json!({
            "kind": "pass",
            "pass": s.pass_index,
            "updated": s.updated,
            "removed": s.removed,
        }));
    }
}
