// SPDX-FileCopyrightText: 2026 Kontor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Kontor console client.
//!
//! This crate provides the error taxonomy and the shared identifier types
//! used throughout the Kontor workspace. Every other crate builds on the
//! definitions here.

pub mod error;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::KontorError;
pub use types::{NodeId, RoleId, UserId, ROOT_PARENT};
