// Copyright 2026 the Compose3d Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change collection for rendering layers.
//!
//! Evaluation drains the [`STACK`](crate::dirty::STACK) channel, collapses
//! the stack of every marked node that is still registered, and moves the
//! pending removal list into the result. A node removed after being marked is
//! reported only as removed, and a node removed before any evaluate reported
//! it is not reported at all.

use alloc::vec::Vec;

use super::id::NodeId;
use super::store::TransformRegistry;
use crate::dirty;
use crate::matrix::Matrix;

/// A node's collapsed matrix as of one evaluation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Composed {
    /// The node the matrix belongs to.
    pub node: NodeId,
    /// Slot 0 multiplied by every populated slot.
    pub matrix: Matrix,
    /// How many populated slots (1 through 10) took part.
    pub parts: usize,
}

/// The set of changes produced by a single [`TransformRegistry::evaluate`]
/// call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StackChanges {
    /// Nodes whose stack was initialized or edited, in ascending id order.
    pub updated: Vec<Composed>,
    /// Nodes removed since the last evaluate, in ascending id order.
    pub removed: Vec<NodeId>,
}

impl StackChanges {
    /// Clears both change lists.
    pub fn clear(&mut self) {
        self.updated.clear();
        self.removed.clear();
    }

    /// Returns `true` if nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.updated.is_empty() && self.removed.is_empty()
    }
}

impl TransformRegistry {
    /// Collapses every stack edited since the last call and returns the
    /// changes.
    pub fn evaluate(&mut self) -> StackChanges {
        let mut changes = StackChanges::default();
        self.evaluate_into(&mut changes);
        changes
    }

    /// Like [`evaluate`](Self::evaluate), but reuses a caller-provided buffer
    /// to avoid allocation.
    pub fn evaluate_into(&mut self, changes: &mut StackChanges) {
        changes.clear();

        let mut marked: Vec<u32> = self
            .dirty
            .drain(dirty::STACK)
            .deterministic()
            .run()
            .collect();
        marked.sort_unstable();
        marked.dedup();

        let order = self.order();
        for node in marked.into_iter().map(NodeId) {
            let Some(stack) = self.stacks.get(&node) else {
                continue;
            };
            let (matrix, parts) = stack.collapse(order);
            self.presented.insert(node);
            changes.updated.push(Composed {
                node,
                matrix,
                parts,
            });
        }

        core::mem::swap(&mut self.pending_removed, &mut changes.removed);
        changes.removed.sort_unstable();
        changes.removed.dedup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Descriptor;

    #[test]
    fn first_evaluate_reports_initialized_nodes() {
        let mut reg = TransformRegistry::default();
        reg.init(NodeId(2), false, None).unwrap();
        reg.init(NodeId(1), true, Some(Matrix::from_scale(2.0, 2.0, 2.0))).unwrap();

        let changes = reg.evaluate();
        assert!(changes.removed.is_empty());
        assert_eq!(
            changes.updated,
            [
                Composed {
                    node: NodeId(1),
                    matrix: Matrix::from_scale(2.0, 2.0, 2.0),
                    parts: 0,
                },
                Composed {
                    node: NodeId(2),
                    matrix: Matrix::IDENTITY,
                    parts: 0,
                },
            ]
        );
    }

    #[test]
    fn evaluate_without_changes_is_empty() {
        let mut reg = TransformRegistry::default();
        reg.init(NodeId(1), false, None).unwrap();
        let _ = reg.evaluate();

        assert!(reg.evaluate().is_empty());
    }

    #[test]
    fn slot_edits_are_reported_once() {
        let node = NodeId(5);
        let mut reg = TransformRegistry::default();
        reg.init(node, false, None).unwrap();
        let _ = reg.evaluate();

        reg.set_slot(node, 1, Some(Descriptor::translate(3.0, 0.0, 0.0)))
            .unwrap();
        reg.set_slot(node, 2, Some(Descriptor::translate(0.0, 4.0, 0.0)))
            .unwrap();

        let changes = reg.evaluate();
        assert_eq!(changes.updated.len(), 1);
        assert_eq!(changes.updated[0].parts, 2);
        assert_eq!(changes.updated[0].matrix.translation(), [3.0, 4.0, 0.0]);
    }

    #[test]
    fn compaction_is_not_a_change() {
        let node = NodeId(5);
        let mut reg = TransformRegistry::default();
        reg.init(node, false, None).unwrap();
        reg.set_slot(node, 1, Some(Descriptor::scale(3.0, 3.0, 1.0)))
            .unwrap();
        let _ = reg.evaluate();

        reg.store(node).unwrap();
        assert!(reg.evaluate().is_empty());
    }

    #[test]
    fn failed_edit_is_not_a_change() {
        let node = NodeId(5);
        let mut reg = TransformRegistry::default();
        reg.init(node, false, None).unwrap();
        let _ = reg.evaluate();

        assert!(reg.set_slot(node, 0, None).is_err());
        assert!(reg.evaluate().is_empty());
    }

    #[test]
    fn removed_node_is_only_reported_as_removed() {
        let mut reg = TransformRegistry::default();
        reg.init(NodeId(1), false, None).unwrap();
        reg.init(NodeId(2), false, None).unwrap();
        let _ = reg.evaluate();

        reg.set_slot(NodeId(1), 1, Some(Descriptor::scale(2.0, 2.0, 2.0)))
            .unwrap();
        assert!(reg.remove(NodeId(1)));

        let changes = reg.evaluate();
        assert!(changes.updated.is_empty());
        assert_eq!(changes.removed, [NodeId(1)]);

        assert!(reg.evaluate().is_empty());
    }

    #[test]
    fn reinit_after_remove_cancels_the_removal() {
        let node = NodeId(3);
        let mut reg = TransformRegistry::default();
        reg.init(node, false, None).unwrap();
        let _ = reg.evaluate();

        reg.remove(node);
        reg.init(node, false, None).unwrap();

        let changes = reg.evaluate();
        assert!(changes.removed.is_empty());
        assert_eq!(changes.updated.len(), 1);
        assert_eq!(changes.updated[0].node, node);
    }

    #[test]
    fn evaluate_into_reuses_the_buffer() {
        let mut reg = TransformRegistry::default();
        let mut changes = StackChanges::default();

        reg.init(NodeId(1), false, None).unwrap();
        reg.evaluate_into(&mut changes);
        assert_eq!(changes.updated.len(), 1);

        reg.evaluate_into(&mut changes);
        assert!(changes.is_empty());
    }

    #[test]
    fn node_removed_before_any_evaluate_is_not_reported() {
        let mut reg = TransformRegistry::default();
        reg.init(NodeId(1), false, None).unwrap();
        reg.init(NodeId(2), false, None).unwrap();
        assert!(reg.remove(NodeId(1)));

        let changes = reg.evaluate();
        assert!(changes.removed.is_empty());
        assert_eq!(changes.updated.len(), 1);
        assert_eq!(changes.updated[0].node, NodeId(2));

        assert!(reg.remove(NodeId(2)));
        assert_eq!(reg.evaluate().removed, [NodeId(2)]);
    }
}
