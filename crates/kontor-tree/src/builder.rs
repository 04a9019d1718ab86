// SPDX-FileCopyrightText: 2026 Kontor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Nested tree construction and pre-order flattening.

use kontor_core::NodeId;
use kontor_model::TreeNode;
use serde::Serialize;

use crate::index::ChildIndex;
use crate::MAX_DEPTH;

/// One node of the nested tree produced by [`build_tree`].
#[derive(Debug, Serialize)]
pub struct TreeEntry<'a, T> {
    pub node: &'a T,
    pub children: Vec<TreeEntry<'a, T>>,
}

/// One row of the flat sequence produced by [`flatten_for_table`].
///
/// `depth` is the number of parent hops to the row's root; list views render
/// it as `depth * indent_width` left padding.
#[derive(Debug, Serialize)]
pub struct TableRow<'a, T> {
    pub node: &'a T,
    pub depth: usize,
}

/// Convert a flat node slice into a nested tree.
///
/// Children of each parent are ordered by `sort_key` ascending, ties by input
/// order. Orphans surface as extra roots; see [`ChildIndex::build`].
pub fn build_tree<T: TreeNode>(nodes: &[T]) -> Vec<TreeEntry<'_, T>> {
    let index = ChildIndex::build(nodes);
    index
        .roots()
        .iter()
        .map(|&i| build_entry(nodes, &index, i, 0))
        .collect()
}

fn build_entry<'a, T: TreeNode>(
    nodes: &'a [T],
    index: &ChildIndex,
    at: usize,
    depth: usize,
) -> TreeEntry<'a, T> {
    let node = &nodes[at];
    // Each node sits in exactly one children list, so traversal cannot
    // revisit; the cap only stops descent through absurdly deep chains.
    let children = if depth >= MAX_DEPTH {
        Vec::new()
    } else {
        index
            .children_of(node.id())
            .iter()
            .map(|&i| build_entry(nodes, index, i, depth + 1))
            .collect()
    };
    TreeEntry { node, children }
}

/// Convert a flat node slice into a depth-annotated pre-order sequence.
///
/// Output length equals input length for well-formed forests (including
/// orphans, which appear once at depth 0); nodes trapped in a parent cycle
/// are unreachable from any root and are omitted rather than looped over.
pub fn flatten_for_table<T: TreeNode>(nodes: &[T]) -> Vec<TableRow<'_, T>> {
    let index = ChildIndex::build(nodes);
    let mut rows = Vec::with_capacity(nodes.len());
    for &root in index.roots() {
        flatten_into(nodes, &index, root, 0, &mut rows);
    }
    rows
}

fn flatten_into<'a, T: TreeNode>(
    nodes: &'a [T],
    index: &ChildIndex,
    at: usize,
    depth: usize,
    rows: &mut Vec<TableRow<'a, T>>,
) {
    let node = &nodes[at];
    rows.push(TableRow { node, depth });
    if depth >= MAX_DEPTH {
        return;
    }
    for &child in index.children_of(node.id()) {
        flatten_into(nodes, index, child, depth + 1, rows);
    }
}

/// Whether `node` has at least one child in `nodes`.
pub fn is_expandable<T: TreeNode>(node: &T, nodes: &[T]) -> bool {
    let id = node.id();
    nodes
        .iter()
        .any(|other| other.parent_id() == id && other.id() != id)
}

/// Ids of the subtree rooted at `root`, pre-order, root first.
///
/// Deleting a node cascades server-side: the client issues one delete for the
/// subtree root and never per-child calls. This enumeration exists so the
/// confirmation prompt can state exactly which nodes will disappear.
pub fn subtree_ids<T: TreeNode>(root: NodeId, nodes: &[T]) -> Vec<NodeId> {
    let index = ChildIndex::build(nodes);
    let mut ids = Vec::new();
    collect_subtree(&index, nodes, root, 0, &mut ids);
    ids
}

fn collect_subtree<T: TreeNode>(
    index: &ChildIndex,
    nodes: &[T],
    id: NodeId,
    depth: usize,
    ids: &mut Vec<NodeId>,
) {
    ids.push(id);
    if depth >= MAX_DEPTH {
        return;
    }
    for &child in index.children_of(id) {
        collect_subtree(index, nodes, nodes[child].id(), depth + 1, ids);
    }
}
