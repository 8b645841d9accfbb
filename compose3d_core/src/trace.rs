// Copyright 2026 the Compose3d Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for presentation passes.
//!
//! This module provides a [`TraceSink`] trait with one method per event that
//! [`present`](crate::backend::present) emits. All method bodies default to
//! no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing. When **on**, each
//! method performs a single `Option` branch before dispatching.
//!
//! Registry mutators never emit events; only a presentation pass does.

use crate::matrix::Matrix;
use crate::registry::NodeId;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted for each node whose collapsed matrix is handed to a presenter.
#[derive(Clone, Copy, Debug)]
pub struct ComposeEvent {
    /// Caller-supplied pass counter.
    pub pass_index: u64,
    /// The node that was updated.
    pub node: NodeId,
    /// How many populated slots took part.
    pub parts: usize,
    /// The collapsed matrix.
    pub matrix: Matrix,
}

/// Emitted for each node whose stack was removed.
#[derive(Clone, Copy, Debug)]
pub struct RemoveEvent {
    /// Caller-supplied pass counter.
    pub pass_index: u64,
    /// The node that was removed.
    pub node: NodeId,
}

/// Per-pass summary produced by [`present`](crate::backend::present).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PassSummary {
    /// Caller-supplied pass counter.
    pub pass_index: u64,
    /// Number of nodes whose matrix was presented.
    pub updated: usize,
    /// Number of nodes reported as removed.
    pub removed: usize,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from presentation passes.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called once per updated node.
    fn on_compose(&mut self, e: &ComposeEvent) {
        _ = e;
    }

    /// Called once per removed node.
    fn on_remove(&mut self, e: &RemoveEvent) {
        _ = e;
    }

    /// Called at the end of every pass, including empty ones.
    fn on_pass(&mut self, s: &PassSummary) {
        _ = s;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`ComposeEvent`].
    #[inline]
    pub fn compose(&mut self, e: &ComposeEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_compose(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RemoveEvent`].
    #[inline]
    pub fn remove(&mut self, e: &RemoveEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_remove(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PassSummary`].
    #[inline]
    pub fn pass(&mut self, s: &PassSummary) {
        #[cfg(feature = "trace")]
        if let Some(sink) = &mut self.sink {
            sink.on_pass(s);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = s;
        }
    }
}
