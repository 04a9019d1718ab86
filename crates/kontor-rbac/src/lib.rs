// SPDX-FileCopyrightText: 2026 Kontor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Role-to-menu permission working set.
//!
//! When the assignment view opens, the role's current grants are loaded into
//! a [`PermissionSet`]. All toggling is local; nothing touches the network
//! until the caller sends [`PermissionSet::commit_payload`] through the
//! gateway as one full-replace request. Because the backend overwrites the
//! whole grant collection, the payload is always the complete working set —
//! an id left out is an id revoked.
//!
//! Checking a parent does not implicitly check its children. That cascade is
//! a deliberate opt-in ([`CascadePolicy::WithDescendants`], wired to the
//! `console.cascade_checks` setting) because implicit grants are the kind of
//! surprise an operator cannot see until a user suddenly has access.

use std::collections::BTreeSet;

use kontor_core::NodeId;
use kontor_model::{MenuGrantRequest, Role, TreeNode};
use kontor_tree::subtree_ids;
use serde::{Deserialize, Serialize};

/// How toggling a node affects its descendants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CascadePolicy {
    /// Each id is toggled on its own; the default.
    #[default]
    Explicit,
    /// Toggling a node toggles its entire subtree.
    WithDescendants,
}

/// The set of menu ids being assembled for one role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionSet {
    granted: BTreeSet<NodeId>,
    policy: CascadePolicy,
}

impl PermissionSet {
    /// Empty working set.
    #[must_use]
    pub fn new(policy: CascadePolicy) -> Self {
        Self {
            granted: BTreeSet::new(),
            policy,
        }
    }

    /// Working set initialized from the role's current grants.
    #[must_use]
    pub fn load(role: &Role, policy: CascadePolicy) -> Self {
        Self {
            granted: role.menu_ids.iter().copied().collect(),
            policy,
        }
    }

    /// Toggle `id`, honoring the cascade policy.
    ///
    /// Under [`CascadePolicy::WithDescendants`] the subtree rooted at `id` is
    /// granted or revoked as a block, computed from `nodes` at toggle time.
    /// Disabled nodes cannot be granted through the cascade any more than
    /// directly; the revoke direction still sweeps the whole subtree so a
    /// stale grant on a since-disabled node gets cleaned up.
    pub fn toggle<T: TreeNode>(&mut self, id: NodeId, nodes: &[T]) {
        let revoking = self.granted.contains(&id);
        let targets: Vec<NodeId> = match self.policy {
            CascadePolicy::Explicit => vec![id],
            CascadePolicy::WithDescendants => {
                let subtree = subtree_ids(id, nodes);
                if revoking {
                    subtree
                } else {
                    subtree
                        .into_iter()
                        .filter(|t| nodes.iter().any(|n| n.id() == *t && n.enabled()))
                        .collect()
                }
            }
        };
        if revoking {
            for t in targets {
                self.granted.remove(&t);
            }
        } else {
            self.granted.extend(targets);
        }
    }

    /// Replace the whole working set, e.g. after a fresh load.
    pub fn replace(&mut self, ids: impl IntoIterator<Item = NodeId>) {
        self.granted = ids.into_iter().collect();
    }

    #[must_use]
    pub fn is_granted(&self, id: NodeId) -> bool {
        self.granted.contains(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.granted.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.granted.is_empty()
    }

    #[must_use]
    pub fn policy(&self) -> CascadePolicy {
        self.policy
    }

    /// The exact ids a commit will send, ascending.
    #[must_use]
    pub fn ids(&self) -> Vec<NodeId> {
        self.granted.iter().copied().collect()
    }

    /// Full-replace commit body for `POST /roles/{id}/menus`.
    ///
    /// Always the current working set, never a delta against prior commits;
    /// committing the same set twice is idempotent server-side.
    #[must_use]
    pub fn commit_payload(&self) -> MenuGrantRequest {
        MenuGrantRequest {
            menu_ids: self.ids(),
        }
    }
}

/// Ids an operator may grant: enabled nodes only.
///
/// Disabled nodes still appear in the rendered tree, they just cannot be
/// selected.
pub fn grantable_ids<T: TreeNode>(nodes: &[T]) -> Vec<NodeId> {
    nodes
        .iter()
        .filter(|n| n.enabled())
        .map(TreeNode::id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kontor_core::RoleId;
    use kontor_model::{DataScope, Menu, MenuKind};

    fn menu(id: i64, parent: i64, name: &str, enabled: bool) -> Menu {
        Menu {
            menu_id: NodeId(id),
            parent_id: NodeId(parent),
            menu_name: name.to_string(),
            order_num: 0,
            kind: MenuKind::Directory,
            path: None,
            component: None,
            perms: None,
            visible: true,
            enabled,
        }
    }

    fn forest() -> Vec<Menu> {
        vec![
            menu(1, 0, "System", true),
            menu(2, 1, "Users", true),
            menu(3, 1, "Roles", true),
            menu(4, 3, "Role Export", false),
        ]
    }

    fn role_with(menu_ids: Vec<NodeId>) -> Role {
        Role {
            role_id: RoleId(2),
            role_name: "Operator".into(),
            role_key: "operator".into(),
            role_sort: 1,
            data_scope: DataScope::All,
            enabled: true,
            menu_ids,
        }
    }

    #[test]
    fn load_starts_from_role_grants() {
        let role = role_with(vec![NodeId(1), NodeId(2)]);
        let set = PermissionSet::load(&role, CascadePolicy::Explicit);
        assert!(set.is_granted(NodeId(1)));
        assert!(set.is_granted(NodeId(2)));
        assert!(!set.is_granted(NodeId(3)));
    }

    #[test]
    fn load_defaults_to_empty() {
        let role = role_with(Vec::new());
        let set = PermissionSet::load(&role, CascadePolicy::Explicit);
        assert!(set.is_empty());
    }

    #[test]
    fn checking_a_parent_does_not_add_children() {
        let nodes = forest();
        let mut set = PermissionSet::new(CascadePolicy::Explicit);
        set.toggle(NodeId(1), &nodes);
        assert!(set.is_granted(NodeId(1)));
        assert!(!set.is_granted(NodeId(2)));
        assert!(!set.is_granted(NodeId(3)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn cascade_policy_grants_and_revokes_subtrees() {
        let nodes = forest();
        let mut set = PermissionSet::new(CascadePolicy::WithDescendants);
        // Disabled "Role Export" (4) sits under Roles (3) and must not be
        // swept in by the grant.
        set.toggle(NodeId(1), &nodes);
        assert_eq!(set.ids(), vec![NodeId(1), NodeId(2), NodeId(3)]);

        set.toggle(NodeId(3), &nodes);
        assert_eq!(set.ids(), vec![NodeId(1), NodeId(2)]);
    }

    #[test]
    fn cascade_grant_skips_disabled_descendants() {
        let nodes = forest();
        let mut set = PermissionSet::new(CascadePolicy::WithDescendants);
        set.toggle(NodeId(3), &nodes);
        assert!(set.is_granted(NodeId(3)));
        assert!(!set.is_granted(NodeId(4)));
    }

    #[test]
    fn cascade_revoke_sweeps_stale_disabled_grants() {
        // Role Export (4) was granted while still enabled, then disabled
        // backend-side. Revoking its parent must clear it out.
        let nodes = forest();
        let role = role_with(vec![NodeId(3), NodeId(4)]);
        let mut set = PermissionSet::load(&role, CascadePolicy::WithDescendants);
        set.toggle(NodeId(3), &nodes);
        assert!(set.is_empty());
    }

    #[test]
    fn toggle_is_an_involution() {
        let nodes = forest();
        for policy in [CascadePolicy::Explicit, CascadePolicy::WithDescendants] {
            let mut set = PermissionSet::new(policy);
            set.toggle(NodeId(1), &nodes);
            set.toggle(NodeId(1), &nodes);
            assert!(set.is_empty(), "policy {policy:?}");
        }
    }

    #[test]
    fn commit_payload_is_exactly_the_working_set() {
        let role = role_with(vec![NodeId(3), NodeId(1), NodeId(2)]);
        let set = PermissionSet::load(&role, CascadePolicy::Explicit);
        let payload = set.commit_payload();
        assert_eq!(payload.menu_ids, vec![NodeId(1), NodeId(2), NodeId(3)]);
    }

    #[test]
    fn shrinking_the_set_revokes_by_omission() {
        // The role used to hold {1,2,3}; the operator unchecks 3. The commit
        // body must carry only {1,2}: a full replace, never a merge.
        let role = role_with(vec![NodeId(1), NodeId(2), NodeId(3)]);
        let mut set = PermissionSet::load(&role, CascadePolicy::Explicit);
        set.toggle(NodeId(3), &forest());
        assert_eq!(set.commit_payload().menu_ids, vec![NodeId(1), NodeId(2)]);
    }

    #[test]
    fn grantable_ids_excludes_disabled_nodes() {
        let nodes = forest();
        let ids = grantable_ids(&nodes);
        assert_eq!(ids, vec![NodeId(1), NodeId(2), NodeId(3)]);
    }
}
