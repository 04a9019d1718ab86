// SPDX-FileCopyrightText: 2026 Kontor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway and login flow for the Kontor console backend.
//!
//! Every protected request in the workspace goes through [`Gateway`], which
//! decorates it with the current bearer token and maps failures into the
//! shared error taxonomy. The one global side effect lives here: a response
//! that rejects the token clears the session, no matter which caller issued
//! the request. Requests are never queued or retried automatically.

pub mod fetch;
pub mod gateway;
pub mod login;

pub use fetch::{FetchSequence, FetchTicket};
pub use gateway::Gateway;
pub use login::LoginFlow;
