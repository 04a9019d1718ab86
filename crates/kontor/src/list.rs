// SPDX-FileCopyrightText: 2026 Kontor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `kontor menus`, `kontor departments`, and `kontor roles` commands.
//!
//! Tree views nest children under parents; table views print the same
//! pre-order sequence with depth rendered as left padding, which keeps both
//! views in the exact order the backend's sort keys dictate.

use colored::Colorize;
use kontor_client::Gateway;
use kontor_config::KontorConfig;
use kontor_core::KontorError;
use kontor_model::{Menu, MenuKind, TreeNode};
use kontor_tree::{build_tree, flatten_for_table, TreeEntry};

/// Run the `kontor menus` command.
pub async fn run_menus(
    gateway: &Gateway,
    config: &KontorConfig,
    table: bool,
) -> Result<(), KontorError> {
    crate::require_login(gateway.session())?;
    let menus = gateway.menu_list().await?;
    if table {
        print_table(&menus, config.console.indent_width, |m: &Menu| {
            format!("[{}] #{}", kind_code(m.kind), m.menu_id)
        });
    } else {
        for entry in build_tree(&menus) {
            print_entry(&entry, 0, config.console.indent_width, &menu_decor);
        }
    }
    Ok(())
}

/// Run the `kontor departments` command.
pub async fn run_departments(
    gateway: &Gateway,
    config: &KontorConfig,
    table: bool,
) -> Result<(), KontorError> {
    crate::require_login(gateway.session())?;
    let departments = gateway.department_list().await?;
    if table {
        print_table(&departments, config.console.indent_width, |d| {
            format!("#{}", d.dept_id)
        });
    } else {
        for entry in build_tree(&departments) {
            print_entry(&entry, 0, config.console.indent_width, &|d| {
                plain_decor(d.label(), d.enabled())
            });
        }
    }
    Ok(())
}

/// Run the `kontor roles` command.
pub async fn run_roles(gateway: &Gateway) -> Result<(), KontorError> {
    crate::require_login(gateway.session())?;
    let roles = gateway.role_list().await?;
    if roles.is_empty() {
        println!("No roles.");
        return Ok(());
    }
    for role in &roles {
        let name = if role.enabled {
            role.role_name.normal()
        } else {
            format!("{} (disabled)", role.role_name).dimmed()
        };
        println!(
            "{:>4}  {}  key={} scope={} grants={}",
            role.role_id,
            name,
            role.role_key,
            role.data_scope,
            role.menu_ids.len()
        );
    }
    Ok(())
}

fn print_entry<T: TreeNode>(
    entry: &TreeEntry<'_, T>,
    depth: usize,
    indent_width: usize,
    decor: &dyn Fn(&T) -> colored::ColoredString,
) {
    let pad = " ".repeat(depth * indent_width);
    println!("{pad}{}", decor(entry.node));
    for child in &entry.children {
        print_entry(child, depth + 1, indent_width, decor);
    }
}

fn print_table<T: TreeNode>(nodes: &[T], indent_width: usize, suffix: impl Fn(&T) -> String) {
    for row in flatten_for_table(nodes) {
        let pad = " ".repeat(row.depth * indent_width);
        println!(
            "{pad}{}  {}",
            plain_decor(row.node.label(), row.node.enabled()),
            suffix(row.node).dimmed()
        );
    }
}

fn menu_decor(menu: &Menu) -> colored::ColoredString {
    let mut label = menu.menu_name.clone();
    if !menu.visible {
        label.push_str(" (hidden)");
    }
    if !menu.enabled {
        label.push_str(" (disabled)");
        return label.dimmed();
    }
    match menu.kind {
        MenuKind::Directory => label.bold(),
        MenuKind::Leaf => label.normal(),
        MenuKind::Action => label.dimmed(),
    }
}

fn plain_decor(label: &str, enabled: bool) -> colored::ColoredString {
    if enabled {
        label.normal()
    } else {
        format!("{label} (disabled)").dimmed()
    }
}

fn kind_code(kind: MenuKind) -> &'static str {
    match kind {
        MenuKind::Directory => "dir",
        MenuKind::Leaf => "screen",
        MenuKind::Action => "action",
    }
}
