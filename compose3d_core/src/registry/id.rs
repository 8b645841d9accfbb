// Copyright 2026 the Compose3d Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node identity and slot numbering.

use core::fmt;

/// Index of the reference slot. It is seeded by
/// [`init`](super::TransformRegistry::init) and replaced by compaction, never
/// set directly.
pub const REFERENCE_SLOT: usize = 0;

/// Highest settable slot index. Settable slots are `1..=MAX_SLOT`.
pub const MAX_SLOT: usize = 10;

/// An opaque identity for a visual node.
///
/// The registry compares nodes by this value only; callers choose how ids map
/// to their own elements (a per-element counter, an arena index, ...).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}
