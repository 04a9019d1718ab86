// SPDX-FileCopyrightText: 2026 Kontor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tree node records: menus and departments.
//!
//! Both record kinds form a forest via `parent_id`, with `0` as the
//! root-parent sentinel. The [`TreeNode`] trait is the seam the tree builder
//! and the permission set work against, so neither cares which record kind it
//! is handed.

use kontor_core::NodeId;
use serde::{Deserialize, Serialize};
use strum::Display;

/// Abstraction over parent-referencing records.
///
/// Implementations must return stable values: the tree builder assumes `id`
/// and `parent_id` do not change between calls while one traversal runs.
pub trait TreeNode {
    /// Backend-assigned identifier, unique within the record kind.
    fn id(&self) -> NodeId;

    /// Parent identifier; [`kontor_core::ROOT_PARENT`] for root nodes.
    fn parent_id(&self) -> NodeId;

    /// Display label, non-empty.
    fn label(&self) -> &str;

    /// Sort key among siblings; ties keep input order.
    fn sort_key(&self) -> i32;

    /// Disabled nodes stay in the tree but are excluded from grant pickers.
    fn enabled(&self) -> bool;
}

/// Menu node kind, wire-encoded as a single character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum MenuKind {
    /// A grouping node; no route of its own.
    #[serde(rename = "M")]
    Directory,
    /// A routable screen; `path` and `component` are meaningful.
    #[serde(rename = "C")]
    Leaf,
    /// A button-level action; only `perms` is meaningful.
    #[serde(rename = "F")]
    Action,
}

/// A menu record as served by `GET /menus/list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    pub menu_id: NodeId,
    pub parent_id: NodeId,
    pub menu_name: String,
    pub order_num: i32,
    #[serde(rename = "menuType")]
    pub kind: MenuKind,
    /// Route path; meaningful for [`MenuKind::Leaf`].
    #[serde(default)]
    pub path: Option<String>,
    /// Frontend component reference; meaningful for [`MenuKind::Leaf`].
    #[serde(default)]
    pub component: Option<String>,
    /// Permission string; meaningful for [`MenuKind::Leaf`] and
    /// [`MenuKind::Action`].
    #[serde(default)]
    pub perms: Option<String>,
    /// `"0"` shown, `"1"` hidden.
    #[serde(with = "shown_flag")]
    pub visible: bool,
    /// `"0"` normal, `"1"` disabled.
    #[serde(rename = "status", with = "shown_flag")]
    pub enabled: bool,
}

impl TreeNode for Menu {
    fn id(&self) -> NodeId {
        self.menu_id
    }

    fn parent_id(&self) -> NodeId {
        self.parent_id
    }

    fn label(&self) -> &str {
        &self.menu_name
    }

    fn sort_key(&self) -> i32 {
        self.order_num
    }

    fn enabled(&self) -> bool {
        self.enabled
    }
}

/// A department record as served by `GET /departments/list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub dept_id: NodeId,
    pub parent_id: NodeId,
    pub dept_name: String,
    pub order_num: i32,
    #[serde(default)]
    pub leader: Option<String>,
    /// `"0"` normal, `"1"` disabled.
    #[serde(rename = "status", with = "shown_flag")]
    pub enabled: bool,
}

impl TreeNode for Department {
    fn id(&self) -> NodeId {
        self.dept_id
    }

    fn parent_id(&self) -> NodeId {
        self.parent_id
    }

    fn label(&self) -> &str {
        &self.dept_name
    }

    fn sort_key(&self) -> i32 {
        self.order_num
    }

    fn enabled(&self) -> bool {
        self.enabled
    }
}

/// Backend status flags: `"0"` is the affirmative state, `"1"` the negated
/// one. Integers are accepted too since some endpoints emit bare digits.
pub(crate) mod shown_flag {
    use serde::de::{Deserializer, Error, Unexpected};
    use serde::ser::Serializer;
    use serde::Deserialize;

    pub fn serialize<S: Serializer>(value: &bool, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(if *value { "0" } else { "1" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<bool, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Digit(i64),
        }

        match Raw::deserialize(de)? {
            Raw::Text(s) if s == "0" => Ok(true),
            Raw::Text(s) if s == "1" => Ok(false),
            Raw::Digit(0) => Ok(true),
            Raw::Digit(1) => Ok(false),
            Raw::Text(s) => Err(D::Error::invalid_value(
                Unexpected::Str(&s),
                &"\"0\" or \"1\"",
            )),
            Raw::Digit(n) => Err(D::Error::invalid_value(
                Unexpected::Signed(n),
                &"0 or 1",
            )),
        }
    }
}
