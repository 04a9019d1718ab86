// SPDX-FileCopyrightText: 2026 Kontor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parent-id index over a node slice.
//!
//! Built once per tree operation so traversal is O(n) instead of the naive
//! O(n²) scan-per-parent. The derived trees are identical either way; only
//! the construction cost differs.

use std::collections::{HashMap, HashSet};

use kontor_core::NodeId;
use kontor_model::TreeNode;

/// Children-by-parent index over one node slice.
pub struct ChildIndex {
    children: HashMap<NodeId, Vec<usize>>,
    ids: HashSet<NodeId>,
    roots: Vec<usize>,
}

impl ChildIndex {
    /// Index `nodes` by parent id.
    ///
    /// A node is a root when its parent reference is the root sentinel, when
    /// the parent id is absent from the slice (orphan, e.g. the parent was
    /// deleted concurrently), or when it references itself. Orphans must
    /// still render, so they are promoted rather than dropped.
    pub fn build<T: TreeNode>(nodes: &[T]) -> Self {
        let ids: HashSet<NodeId> = nodes.iter().map(TreeNode::id).collect();

        let mut children: HashMap<NodeId, Vec<usize>> = HashMap::new();
        let mut roots = Vec::new();
        for (i, node) in nodes.iter().enumerate() {
            let parent = node.parent_id();
            let is_root =
                parent.is_root_parent() || parent == node.id() || !ids.contains(&parent);
            if is_root {
                roots.push(i);
            } else {
                children.entry(parent).or_default().push(i);
            }
        }

        // Stable sort keeps input order for equal sort keys.
        let sort = |indices: &mut Vec<usize>| {
            indices.sort_by_key(|&i| nodes[i].sort_key());
        };
        sort(&mut roots);
        for indices in children.values_mut() {
            sort(indices);
        }

        Self {
            children,
            ids,
            roots,
        }
    }

    /// Root node indices in sibling order.
    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    /// Child indices of `parent` in sibling order.
    pub fn children_of(&self, parent: NodeId) -> &[usize] {
        self.children.get(&parent).map_or(&[], Vec::as_slice)
    }

    /// Whether `id` exists in the indexed slice.
    pub fn contains(&self, id: NodeId) -> bool {
        self.ids.contains(&id)
    }

    /// Whether `id` has at least one child.
    pub fn has_children(&self, id: NodeId) -> bool {
        self.children.get(&id).is_some_and(|c| !c.is_empty())
    }
}
