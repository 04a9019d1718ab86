// SPDX-FileCopyrightText: 2026 Kontor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `kontor grant` and `kontor delete-menu` commands.
//!
//! Grants are committed as one full-replace payload: whatever the working set
//! holds after `--set`/`--toggle` is exactly what the role ends up with, and
//! an id absent from it is revoked. There is no delta or merge path.

use std::collections::BTreeSet;

use colored::Colorize;
use kontor_client::Gateway;
use kontor_config::KontorConfig;
use kontor_core::{KontorError, NodeId, RoleId};
use kontor_model::TreeNode;
use kontor_rbac::{grantable_ids, CascadePolicy, PermissionSet};
use kontor_tree::{is_expandable, subtree_ids};

/// Run the `kontor grant` command.
///
/// Without `--set` or `--toggle`, prints the role's current grants.
pub async fn run_grant(
    gateway: &Gateway,
    config: &KontorConfig,
    role_id: i64,
    set: Option<Vec<i64>>,
    toggle: &[i64],
) -> Result<(), KontorError> {
    crate::require_login(gateway.session())?;

    let role_id = RoleId(role_id);
    let roles = gateway.role_list().await?;
    let role = roles
        .iter()
        .find(|r| r.role_id == role_id)
        .ok_or_else(|| KontorError::NotFound {
            message: format!("role {role_id} does not exist"),
        })?;
    let menus = gateway.menu_list().await?;

    let policy = if config.console.cascade_checks {
        CascadePolicy::WithDescendants
    } else {
        CascadePolicy::Explicit
    };
    let mut working = PermissionSet::load(role, policy);

    if set.is_none() && toggle.is_empty() {
        print_grants(&working, &menus, &role.role_name);
        return Ok(());
    }

    let grantable: BTreeSet<NodeId> = grantable_ids(&menus).into_iter().collect();
    if let Some(ids) = set {
        let ids: Vec<NodeId> = ids.into_iter().map(NodeId).collect();
        reject_ungrantable(&ids, &grantable)?;
        working.replace(ids);
    }
    for &id in toggle {
        let id = NodeId(id);
        // Toggling off an already-granted stale id is fine; toggling on
        // requires the node to be grantable.
        if !working.is_granted(id) {
            reject_ungrantable(&[id], &grantable)?;
        }
        working.toggle(id, &menus);
    }

    gateway.grant_menus(role_id, &working.commit_payload()).await?;
    println!(
        "{} Role {} now holds {} grant(s).",
        "ok:".green().bold(),
        role.role_name.bold(),
        working.len()
    );
    Ok(())
}

/// Run the `kontor delete-menu` command.
///
/// Deletion cascades server-side, so a node with children requires `--yes`;
/// the refusal lists every node the cascade would remove.
pub async fn run_delete_menu(
    gateway: &Gateway,
    menu_id: i64,
    yes: bool,
) -> Result<(), KontorError> {
    crate::require_login(gateway.session())?;

    let id = NodeId(menu_id);
    let menus = gateway.menu_list().await?;
    let node = menus
        .iter()
        .find(|m| m.id() == id)
        .ok_or_else(|| KontorError::NotFound {
            message: format!("menu {id} does not exist"),
        })?;

    if is_expandable(node, &menus) && !yes {
        let doomed = subtree_ids(id, &menus);
        eprintln!(
            "Deleting {} removes its whole subtree ({} nodes):",
            node.menu_name.bold(),
            doomed.len()
        );
        for sub_id in &doomed {
            if let Some(m) = menus.iter().find(|m| m.id() == *sub_id) {
                eprintln!("  #{sub_id}  {}", m.menu_name);
            }
        }
        return Err(KontorError::Validation(
            "refusing to delete a node with children; pass --yes to confirm".to_string(),
        ));
    }

    gateway.delete_menu(id).await?;
    println!(
        "{} Deleted menu {} (#{id}).",
        "ok:".green().bold(),
        node.menu_name.bold()
    );
    Ok(())
}

fn print_grants(working: &PermissionSet, menus: &[kontor_model::Menu], role_name: &str) {
    if working.is_empty() {
        println!("Role {} holds no grants.", role_name.bold());
        return;
    }
    println!("Role {} holds {} grant(s):", role_name.bold(), working.len());
    for id in working.ids() {
        match menus.iter().find(|m| m.id() == id) {
            Some(menu) => println!("  #{id}  {}", menu.menu_name),
            // Grants can outlive their menu on the backend.
            None => println!("  #{id}  {}", "(unknown menu)".dimmed()),
        }
    }
}

fn reject_ungrantable(ids: &[NodeId], grantable: &BTreeSet<NodeId>) -> Result<(), KontorError> {
    let bad: Vec<String> = ids
        .iter()
        .filter(|id| !grantable.contains(id))
        .map(|id| id.to_string())
        .collect();
    if bad.is_empty() {
        Ok(())
    } else {
        Err(KontorError::Validation(format!(
            "menu id(s) not grantable (unknown or disabled): {}",
            bad.join(", ")
        )))
    }
}
