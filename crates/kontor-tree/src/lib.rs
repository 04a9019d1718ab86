// SPDX-FileCopyrightText: 2026 Kontor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tree construction and flattening for parent-referencing records.
//!
//! The backend serves menus and departments as flat lists; everything
//! tree-shaped on screen is derived here. Two derived forms exist: a nested
//! tree for selection widgets ([`build_tree`]) and a depth-annotated flat
//! sequence for indented table rows ([`flatten_for_table`]). Both are pure
//! functions over a node slice and share one sibling ordering rule: ascending
//! `sort_key`, ties by input order.
//!
//! Malformed input is handled deliberately rather than trusted away: a node
//! whose parent is missing is promoted to a root so it still renders, and
//! traversal carries a depth cap so a cyclic parent chain terminates instead
//! of recursing unboundedly.

pub mod builder;
pub mod index;

pub use builder::{build_tree, flatten_for_table, is_expandable, subtree_ids, TableRow, TreeEntry};
pub use index::ChildIndex;

/// Hard limit on traversal depth.
///
/// Well-formed console trees are a handful of levels deep; hitting this cap
/// means the input contained a parent cycle, and traversal stops descending
/// there.
pub const MAX_DEPTH: usize = 64;
