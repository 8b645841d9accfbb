// Copyright 2026 the Compose3d Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contract between the registry and a rendering layer.
//!
//! The registry never touches a visual tree. A caller edits stacks, then runs
//! a presentation pass that hands the collapsed matrices to a [`Presenter`],
//! which writes them to its platform-native nodes (a DOM element's `transform`
//! property, a scene-graph node, a test recorder).
//!
//! ```rust,ignore
//! fn on_frame(pass_index: u64) {
//!     // Edit: update slots from gestures, animation, etc.
//!     registry.set_slot(node, 2, Some(Descriptor::rotate(0.0, 0.0, 1.0, angle)))?;
//!
//!     // Present: collapse edited stacks and hand them to the rendering layer
//!     present(&mut registry, &mut presenter, &mut tracer, pass_index);
//! }
//! ```

use crate::registry::{StackChanges, TransformRegistry};
use crate::trace::{ComposeEvent, PassSummary, RemoveEvent, Tracer};

/// Applies collapsed matrices to a rendering layer.
pub trait Presenter {
    /// Applies the given [`StackChanges`].
    ///
    /// Every updated node should have its transform replaced by
    /// [`Composed::matrix`](crate::registry::Composed::matrix), typically as
    /// [`Matrix::to_transform_string`](crate::matrix::Matrix::to_transform_string).
    /// Removed nodes keep whatever transform they last received.
    fn apply(&mut self, changes: &StackChanges);
}

/// Runs one presentation pass.
///
/// Evaluates `registry`, hands the changes to `presenter` (only when there are
/// any), emits one trace event per change plus a [`PassSummary`], and returns
/// the summary.
pub fn present<P: Presenter + ?Sized>(
    registry: &mut TransformRegistry,
    presenter: &mut P,
    tracer: &mut Tracer<'_>,
    pass_index: u64,
) -> PassSummary {
    let changes = registry.evaluate();
    if !changes.is_empty() {
        presenter.apply(&changes);
    }

    for composed in &changes.updated {
        tracer.compose(&ComposeEvent {
            pass_index,
            node: composed.node,
            parts: composed.parts,
            matrix: composed.matrix,
        });
    }
    for &node in &changes.removed {
        tracer.remove(&RemoveEvent { pass_index, node });
    }

    let summary = PassSummary {
        pass_index,
        updated: changes.updated.len(),
        removed: changes.removed.len(),
    };
    tracer.pass(&summary);
    summary
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;

    use super::*;
    use crate::descriptor::Descriptor;
    use crate::registry::NodeId;

    #[derive(Default)]
    struct Recorder {
        calls: usize,
        transforms: Vec<(NodeId, String)>,
        removed: Vec<NodeId>,
    }

    impl Presenter for Recorder {
        fn apply(&mut self, changes: &StackChanges) {
            self.calls += 1;
            for c in &changes.updated {
                self.transforms
                    .push((c.node, c.matrix.to_transform_string()));
            }
            self.removed.extend_from_slice(&changes.removed);
        }
    }

    #[test]
    fn present_hands_transform_strings_to_presenter() {
        let node = NodeId(1);
        let mut reg = TransformRegistry::default();
        reg.init(node, false, None).unwrap();
        reg.set_slot(node, 1, Some(Descriptor::translate(50.0, 50.0, 0.0)))
            .unwrap();

        let mut recorder = Recorder::default();
        let summary = present(&mut reg, &mut recorder, &mut Tracer::none(), 0);

        assert_eq!(
            summary,
            PassSummary {
                pass_index: 0,
                updated: 1,
                removed: 0,
            }
        );
        assert_eq!(
            recorder.transforms,
            [(
                node,
                String::from("matrix3d(1,0,0,0,0,1,0,0,0,0,1,0,50,50,0,1)")
            )]
        );
    }

    #[test]
    fn empty_pass_skips_presenter() {
        let mut reg = TransformRegistry::default();
        let mut recorder = Recorder::default();
        let summary = present(&mut reg, &mut recorder, &mut Tracer::none(), 7);

        assert_eq!(summary.pass_index, 7);
        assert_eq!(recorder.calls, 0);
    }

    #[test]
    fn removals_reach_presenter() {
        let mut reg = TransformRegistry::default();
        reg.init(NodeId(4), false, None).unwrap();
        let mut recorder = Recorder::default();
        present(&mut reg, &mut recorder, &mut Tracer::none(), 0);

        reg.remove(NodeId(4));
        let summary = present(&mut reg, &mut recorder, &mut Tracer::none(), 1);
        assert_eq!(summary.removed, 1);
        assert_eq!(recorder.removed, [NodeId(4)]);
        assert_eq!(recorder.calls, 2);
    }

    #[cfg(feature = "trace")]
    #[test]
    fn present_emits_one_event_per_change() {
        use crate::trace::TraceSink;

        #[derive(Default)]
        struct Log(Vec<(u64, NodeId, bool)>, usize);

        impl TraceSink for Log {
            fn on_compose(&mut self, e: &ComposeEvent) {
                self.0.push((e.pass_index, e.node, true));
            }
            fn on_remove(&mut self, e: &RemoveEvent) {
                self.0.push((e.pass_index, e.node, false));
            }
            fn on_pass(&mut self, _: &PassSummary) {
                self.1 += 1;
            }
        }

        let mut reg = TransformRegistry::default();
        reg.init(NodeId(1), false, None).unwrap();
        reg.init(NodeId(2), false, None).unwrap();
        let mut recorder = Recorder::default();
        present(&mut reg, &mut recorder, &mut Tracer::none(), 0);

        reg.set_slot(NodeId(1), 3, Some(Descriptor::scale(2.0, 2.0, 2.0)))
            .unwrap();
        reg.remove(NodeId(2));

        let mut log = Log::default();
        present(&mut reg, &mut recorder, &mut Tracer::new(&mut log), 9);
        assert_eq!(log.0, [(9, NodeId(1), true), (9, NodeId(2), false)]);
        assert_eq!(log.1, 1);
    }
}
