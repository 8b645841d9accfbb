// Copyright 2026 the Compose3d Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Composed transform registry.
//!
//! Each visual node that takes part in composition owns a *stack*:
//!
//! - Slot 0, the reference matrix. It is the identity, or the node's
//!   pre-existing transform when [`init`](TransformRegistry::init) is asked to
//!   keep it. Slot 0 cannot be set through
//!   [`set_slot`](TransformRegistry::set_slot).
//! - Slots 1 through 10, each empty or holding the matrix of one
//!   [`Descriptor`](crate::descriptor::Descriptor).
//!
//! [`apply`](TransformRegistry::apply) multiplies slot 0 by every populated
//! slot in ascending index order using the registry's
//! [`StackOrder`](crate::matrix::StackOrder). Lower indices therefore act on
//! points first: a scale in slot 1 followed by a translation in slot 2 moves
//! the scaled node by the unscaled offset.
//!
//! # Lifecycle
//!
//! A node is uninitialized until `init`, active afterwards, and uninitialized
//! again after [`remove`](TransformRegistry::remove). Calling `init` on an
//! active node discards its previous stack, so every node has at most one.
//!
//! # Dirty tracking
//!
//! `init` and `set_slot` mark the node on the [`STACK`](crate::dirty::STACK)
//! channel; [`evaluate`](TransformRegistry::evaluate) reports marked and
//! removed nodes as [`StackChanges`]. Only nodes an earlier evaluate reported
//! are ever reported as removed.

mod evaluate;
mod id;
mod store;

pub use evaluate::{Composed, StackChanges};
pub use id::{MAX_SLOT, NodeId, REFERENCE_SLOT};
pub use store::TransformRegistry;
