// Copyright 2026 the Compose3d Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A headless presenter that records transform strings.

use std::collections::BTreeMap;

use compose3d_core::backend::Presenter;
use compose3d_core::registry::{NodeId, StackChanges};

/// Keeps the latest `matrix3d(...)` string handed to each node.
///
/// Removed nodes are forgotten, matching a rendering layer that drops its
/// reference to the node.
#[derive(Clone, Debug, Default)]
pub struct CssRecorder {
    transforms: BTreeMap<NodeId, String>,
    applied: usize,
}

impl CssRecorder {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the last transform string written to `node`.
    #[must_use]
    pub fn transform(&self, node: NodeId) -> Option<&str> {
        self.transforms.get(&node).map(String::as_str)
    }

    /// Iterates over every recorded node and its transform, in node order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &str)> + '_ {
        self.transforms.iter().map(|(&node, css)| (node, css.as_str()))
    }

    /// Returns how many non-empty change sets were applied.
    #[must_use]
    pub fn applied(&self) -> usize {
        self.applied
    }
}

impl Presenter for CssRecorder {
    fn apply(&mut self, changes: &StackChanges) {
        self.applied += 1;
        for composed in &changes.updated {
            self.transforms
                .insert(composed.node, composed.matrix.to_transform_string());
        }
        for node in &changes.removed {
            self.transforms.remove(node);
        }
    }
}
