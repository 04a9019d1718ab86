// SPDX-FileCopyrightText: 2026 Kontor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Role records and permission grant payloads.

use kontor_core::{NodeId, RoleId};
use serde::{Deserialize, Serialize};
use strum::Display;

/// Data visibility scope attached to a role, wire-encoded as a digit string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum DataScope {
    /// All data, no restriction.
    #[serde(rename = "1")]
    All,
    /// An explicitly chosen set of departments.
    #[serde(rename = "2")]
    Custom,
    /// The user's own department only.
    #[serde(rename = "3")]
    Department,
    /// The user's department and everything below it.
    #[serde(rename = "4")]
    DepartmentAndChildren,
    /// Records owned by the user themselves.
    #[serde(rename = "5")]
    SelfOnly,
}

/// A role record as served by `GET /roles/list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub role_id: RoleId,
    pub role_name: String,
    /// Unique machine identifier, e.g. `"admin"`.
    pub role_key: String,
    pub role_sort: i32,
    pub data_scope: DataScope,
    /// `"0"` normal, `"1"` disabled.
    #[serde(rename = "status", with = "super::node::shown_flag")]
    pub enabled: bool,
    /// Menu ids currently granted to this role. Absent means no grants.
    #[serde(default)]
    pub menu_ids: Vec<NodeId>,
}

/// Body of `POST /roles/{id}/menus`: a full replace of the role's grant set.
///
/// The backend overwrites the entire grant collection with this list, so the
/// payload must always carry the complete intended set, never a delta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuGrantRequest {
    pub menu_ids: Vec<NodeId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_deserializes_backend_shape() {
        let json = r#"{
            "roleId": 2,
            "roleName": "Operator",
            "roleKey": "operator",
            "roleSort": 2,
            "dataScope": "4",
            "status": "0",
            "menuIds": [1, 100, 101]
        }"#;
        let role: Role = serde_json::from_str(json).unwrap();
        assert_eq!(role.role_id, RoleId(2));
        assert_eq!(role.data_scope, DataScope::DepartmentAndChildren);
        assert!(role.enabled);
        assert_eq!(role.menu_ids, vec![NodeId(1), NodeId(100), NodeId(101)]);
    }

    #[test]
    fn missing_menu_ids_defaults_to_empty() {
        let json = r#"{
            "roleId": 3,
            "roleName": "Auditor",
            "roleKey": "auditor",
            "roleSort": 3,
            "dataScope": "5",
            "status": "1"
        }"#;
        let role: Role = serde_json::from_str(json).unwrap();
        assert!(role.menu_ids.is_empty());
        assert!(!role.enabled);
    }

    #[test]
    fn grant_request_serializes_camel_case() {
        let req = MenuGrantRequest {
            menu_ids: vec![NodeId(1), NodeId(2)],
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({"menuIds": [1, 2]}));
    }
}
