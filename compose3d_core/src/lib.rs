// Copyright 2026 the Compose3d Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Composable 3D transform stacks for visual nodes.
//!
//! `compose3d_core` lets a caller describe a node's transform as an ordered set
//! of independently replaceable parts (translate, scale, axis-angle rotate),
//! collapse them into one 4×4 matrix, and exchange that matrix with a
//! rendering layer as a CSS `matrix3d(...)` string. It is `no_std` compatible
//! (with `alloc`).
//!
//! # Architecture
//!
//! ```text
//!   Descriptor ──► Descriptor::to_matrix() ──► TransformRegistry::set_slot()
//!                                                    │
//!                 ┌──────────────────────────────────┘
//!                 ▼
//!   TransformRegistry::apply() / evaluate() ──► Matrix ──► "matrix3d(...)"
//!                                                    │
//!                 ┌──────────────────────────────────┘
//!                 ▼
//!   Presenter::apply() (caller hands strings to its rendering layer)
//! ```
//!
//! **[`matrix`]**: Row-major 4×4 [`Matrix`](matrix::Matrix) with in-place
//! scale/translate/rotate and [`StackOrder`](matrix::StackOrder)-aware
//! multiplication.
//!
//! **[`css`]**: The `matrix3d(...)` text codec and the
//! [`CssMatrix`](css::CssMatrix) field-by-field handle.
//!
//! **[`descriptor`]**: Typed and untyped transform descriptors, validation,
//! and conversion to elementary matrices.
//!
//! **[`registry`]**: Per-node slot stacks. Slot 0 holds the reference matrix,
//! slots 1 through 10 hold parts multiplied in ascending order.
//!
//! **[`dirty`]**: Dirty channel used to report which stacks changed since the
//! last evaluation.
//!
//! **[`backend`]**: The [`Presenter`](backend::Presenter) trait and a
//! single-pass [`present`](backend::present) driver.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! presentation passes, with a zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! **[`error`]**: The crate's [`Error`](error::Error) type.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies and
//!   uses the platform float intrinsics for trigonometry.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod css;
pub mod descriptor;
pub mod dirty;
pub mod error;
pub mod matrix;
pub mod registry;
pub mod trace;
