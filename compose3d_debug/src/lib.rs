// Copyright 2026 the Compose3d Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Diagnostics for compose3d presentation passes.
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`json::JsonSink`]: collects events and exports them as a JSON array.
//! - [`presenter::CssRecorder`]: a [`Presenter`](compose3d_core::backend::Presenter)
//!   that keeps the latest `matrix3d(...)` string per node, for tests and
//!   headless runs.

pub mod json;
pub mod presenter;
pub mod pretty;
