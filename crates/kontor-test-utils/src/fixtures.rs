// SPDX-FileCopyrightText: 2026 Kontor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canned backend records for tests.
//!
//! The menu forest mirrors a typical fresh install: a System directory with
//! user and role screens, a standalone Monitoring leaf, and one disabled
//! entry so grant-picker filtering has something to filter.

use kontor_core::{NodeId, RoleId, UserId, ROOT_PARENT};
use kontor_model::{DataScope, Department, Menu, MenuKind, Role, UserProfile};

fn menu(
    id: i64,
    parent: i64,
    name: &str,
    order: i32,
    kind: MenuKind,
    enabled: bool,
) -> Menu {
    Menu {
        menu_id: NodeId(id),
        parent_id: NodeId(parent),
        menu_name: name.to_string(),
        order_num: order,
        kind,
        path: None,
        component: None,
        perms: None,
        visible: true,
        enabled,
    }
}

/// A small menu forest: System (Users, Roles with a query action),
/// Monitoring, and a disabled Legacy directory.
pub fn sample_menus() -> Vec<Menu> {
    vec![
        menu(1, 0, "System", 1, MenuKind::Directory, true),
        menu(100, 1, "Users", 1, MenuKind::Leaf, true),
        menu(101, 1, "Roles", 2, MenuKind::Leaf, true),
        menu(1001, 101, "Role Query", 1, MenuKind::Action, true),
        menu(2, 0, "Monitoring", 2, MenuKind::Leaf, true),
        menu(3, 0, "Legacy", 9, MenuKind::Directory, false),
    ]
}

/// Two-level department tree under a single head office.
pub fn sample_departments() -> Vec<Department> {
    vec![
        Department {
            dept_id: NodeId(100),
            parent_id: ROOT_PARENT,
            dept_name: "Head Office".to_string(),
            order_num: 0,
            leader: Some("admin".to_string()),
            enabled: true,
        },
        Department {
            dept_id: NodeId(101),
            parent_id: NodeId(100),
            dept_name: "Engineering".to_string(),
            order_num: 1,
            leader: None,
            enabled: true,
        },
        Department {
            dept_id: NodeId(102),
            parent_id: NodeId(100),
            dept_name: "Finance".to_string(),
            order_num: 2,
            leader: None,
            enabled: true,
        },
    ]
}

/// An admin role holding everything and an operator role holding a subset.
pub fn sample_roles() -> Vec<Role> {
    vec![
        Role {
            role_id: RoleId(1),
            role_name: "Administrator".to_string(),
            role_key: "admin".to_string(),
            role_sort: 1,
            data_scope: DataScope::All,
            enabled: true,
            menu_ids: vec![NodeId(1), NodeId(100), NodeId(101), NodeId(1001), NodeId(2)],
        },
        Role {
            role_id: RoleId(2),
            role_name: "Operator".to_string(),
            role_key: "operator".to_string(),
            role_sort: 2,
            data_scope: DataScope::DepartmentAndChildren,
            enabled: true,
            menu_ids: vec![NodeId(2)],
        },
    ]
}

pub fn admin_profile() -> UserProfile {
    UserProfile {
        user_id: UserId(1),
        username: "admin".to_string(),
        nick_name: Some("Administrator".to_string()),
        dept: sample_departments().into_iter().next(),
        roles: vec!["admin".to_string()],
        avatar: None,
    }
}
