// Copyright 2026 the Compose3d Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! The registry records which nodes need their collapsed matrix re-sent to the
//! rendering layer using [`understory_dirty`], keyed by the raw
//! [`NodeId`](crate::registry::NodeId) value. Stacks are independent of one
//! another, so marks never propagate between nodes.
//!
//! # Consumption
//!
//! Callers never query dirty state directly. Each
//! [`TransformRegistry::evaluate`](crate::registry::TransformRegistry::evaluate)
//! call drains the channel and surfaces the results as
//! [`StackChanges`](crate::registry::StackChanges).

use understory_dirty::Channel;

/// A node's stack was initialized or one of its slots changed.
///
/// Compacting a stack with `apply(.., true)` does not mark this channel, since
/// the collapsed matrix is unchanged.
pub const STACK: Channel = Channel::new(0);
