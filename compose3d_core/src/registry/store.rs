// Copyright 2026 the Compose3d Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node slot storage with initialization, slot updates, and collapse.

use alloc::vec::Vec;

use hashbrown::{HashMap, HashSet};
use understory_dirty::{CycleHandling, DirtyTracker};

use super::id::{MAX_SLOT, NodeId, REFERENCE_SLOT};
use crate::descriptor::Descriptor;
use crate::dirty;
use crate::error::Error;
use crate::matrix::{Matrix, StackOrder};

/// One node's transform stack.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ComposedStack {
    /// Slot 0.
    pub(crate) reference: Matrix,
    /// Slots 1..=MAX_SLOT, stored at `index - 1`.
    pub(crate) parts: [Option<Matrix>; MAX_SLOT],
}

impl ComposedStack {
    pub(crate) const fn new(reference: Matrix) -> Self {
        Self {
            reference,
            parts: [None; MAX_SLOT],
        }
    }

    /// Multiplies the reference by every populated part in ascending slot
    /// order. Returns the result and the number of parts multiplied.
    pub(crate) fn collapse(&self, order: StackOrder) -> (Matrix, usize) {
        let mut out = self.reference;
        let mut count = 0;
        for part in self.parts.iter().flatten() {
            out.multiply(part, order);
            count += 1;
        }
        (out, count)
    }
}

/// Owns the transform stacks of every participating node.
///
/// The registry is a plain value: create one per rendering surface (or per
/// application) and pass it by reference. It is not internally synchronized;
/// share it across threads only behind a single lock.
#[derive(Debug)]
pub struct TransformRegistry {
    order: StackOrder,
    pub(crate) stacks: HashMap<NodeId, ComposedStack>,

    // -- Dirty tracking --
    pub(crate) dirty: DirtyTracker<u32>,

    // -- Lifecycle tracking --
    /// Nodes reported as updated by an evaluate and not removed since.
    pub(crate) presented: HashSet<NodeId>,
    pub(crate) pending_removed: Vec<NodeId>,
}

impl Default for TransformRegistry {
    fn default() -> Self {
        Self::new(StackOrder::Standard)
    }
}

impl TransformRegistry {
    /// Creates an empty registry that multiplies stacks in `order`.
    #[must_use]
    pub fn new(order: StackOrder) -> Self {
        Self {
            order,
            stacks: HashMap::new(),
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            presented: HashSet::new(),
            pending_removed: Vec::new(),
        }
    }

    /// Returns the multiplication order this registry was created with.
    #[must_use]
    pub const fn order(&self) -> StackOrder {
        self.order
    }

    // -- Lifecycle API --

    /// Creates the stack for `owner`, replacing any existing one.
    ///
    /// With `keep_current`, slot 0 is seeded from `current` (the node's
    /// pre-existing transform, read by the caller); a missing `current` seeds
    /// the identity. Without `keep_current`, slot 0 is the identity.
    ///
    /// Returns [`Error::NonFiniteMatrix`] if the seed is not finite, leaving
    /// any existing stack for `owner` untouched.
    pub fn init(
        &mut self,
        owner: NodeId,
        keep_current: bool,
        current: Option<Matrix>,
    ) -> Result<(), Error> {
        let reference = match current {
            Some(current) if keep_current => current,
            _ => Matrix::IDENTITY,
        };
        if !reference.is_finite() {
            return Err(Error::NonFiniteMatrix);
        }
        self.stacks.insert(owner, ComposedStack::new(reference));
        self.pending_removed.retain(|&n| n != owner);
        self.dirty.mark(owner.0, dirty::STACK);
        Ok(())
    }

    /// Like [`init`](Self::init) with `keep_current`, taking the node's
    /// current transform as text (see [`css`](crate::css)).
    ///
    /// On a parse failure any existing stack for `owner` is left untouched.
    pub fn init_from_css(&mut self, owner: NodeId, current: &str) -> Result<(), Error> {
        let current = Matrix::from_transform_string(current)?;
        self.init(owner, true, Some(current))
    }

    /// Deletes the stack for `owner`. Returns whether one existed.
    ///
    /// The removal is reported by the next evaluate only if an earlier one
    /// reported the node as updated.
    pub fn remove(&mut self, owner: NodeId) -> bool {
        if self.stacks.remove(&owner).is_none() {
            return false;
        }
        self.dirty.remove_key(owner.0);
        if self.presented.remove(&owner) {
            self.pending_removed.push(owner);
        }
        true
    }

    /// Returns whether `owner` has a stack.
    #[must_use]
    pub fn contains(&self, owner: NodeId) -> bool {
        self.stacks.contains_key(&owner)
    }

    /// Returns the number of nodes with a stack.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    /// Returns `true` if no node has a stack.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    /// Returns every node with a stack, in ascending order.
    #[must_use]
    pub fn nodes(&self) -> Vec<NodeId> {
        let mut nodes: Vec<NodeId> = self.stacks.keys().copied().collect();
        nodes.sort_unstable();
        nodes
    }

    // -- Slot API --

    /// Sets or clears slot `index` (`1..=10`) of `owner`'s stack.
    ///
    /// `Some(descriptor)` is validated and replaced by its elementary matrix;
    /// `None` empties the slot. If the edited stack would collapse to a
    /// matrix that is not finite, [`Error::NonFiniteMatrix`] is returned. On
    /// any error the stack is unchanged.
    pub fn set_slot(
        &mut self,
        owner: NodeId,
        index: usize,
        descriptor: Option<Descriptor>,
    ) -> Result<(), Error> {
        if !(1..=MAX_SLOT).contains(&index) {
            return Err(Error::InvalidIndex(index));
        }
        let stack = self
            .stacks
            .get_mut(&owner)
            .ok_or(Error::UnknownOwner(owner))?;
        let part = match descriptor {
            Some(descriptor) => {
                descriptor.validate()?;
                Some(descriptor.to_matrix())
            }
            None => None,
        };
        let mut edited = *stack;
        edited.parts[index - 1] = part;
        if !edited.collapse(self.order).0.is_finite() {
            return Err(Error::NonFiniteMatrix);
        }
        *stack = edited;
        self.dirty.mark(owner.0, dirty::STACK);
        Ok(())
    }

    /// Returns the matrix held in slot `index` (`0..=10`) of `owner`'s stack.
    ///
    /// Slot 0 is always populated.
    pub fn slot(&self, owner: NodeId, index: usize) -> Result<Option<Matrix>, Error> {
        if index > MAX_SLOT {
            return Err(Error::InvalidIndex(index));
        }
        let stack = self.stacks.get(&owner).ok_or(Error::UnknownOwner(owner))?;
        Ok(if index == REFERENCE_SLOT {
            Some(stack.reference)
        } else {
            stack.parts[index - 1]
        })
    }

    /// Returns slot 0 of `owner`'s stack.
    pub fn reference(&self, owner: NodeId) -> Result<Matrix, Error> {
        self.stacks
            .get(&owner)
            .map(|stack| stack.reference)
            .ok_or(Error::UnknownOwner(owner))
    }

    // -- Collapse API --

    /// Collapses `owner`'s stack into one matrix.
    ///
    /// With `store`, the stack is compacted: slot 0 becomes the result and
    /// slots 1 through 10 are emptied, so later calls start from the
    /// collapsed matrix.
    pub fn apply(&mut self, owner: NodeId, store: bool) -> Result<Matrix, Error> {
        let order = self.order;
        let stack = self
            .stacks
            .get_mut(&owner)
            .ok_or(Error::UnknownOwner(owner))?;
        let (collapsed, _) = stack.collapse(order);
        if store {
            *stack = ComposedStack::new(collapsed);
        }
        Ok(collapsed)
    }

    /// Compacts `owner`'s stack. Same as `apply(owner, true)`.
    pub fn store(&mut self, owner: NodeId) -> Result<Matrix, Error> {
        self.apply(owner, true)
    }
}
