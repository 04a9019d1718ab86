// SPDX-FileCopyrightText: 2026 Kontor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authentication payloads: captcha challenge, login exchange, user profile.

use kontor_core::UserId;
use serde::{Deserialize, Serialize};

use crate::node::Department;

/// Captcha challenge served by `GET /captcha`.
///
/// The challenge id is opaque and single-use: it must accompany exactly one
/// login attempt and be refetched after any failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptchaChallenge {
    pub challenge_id: String,
    /// Base64-encoded PNG. Rendering is the caller's concern.
    pub image_base64: String,
}

/// Body of `POST /login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    /// The operator's transcription of the captcha image.
    pub captcha_response: String,
    pub challenge_id: String,
}

/// Successful reply to `POST /login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Opaque bearer credential; validity is time-boxed server-side.
    pub token: String,
}

/// The authenticated user's profile, served by `GET /currentUser`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: UserId,
    pub username: String,
    #[serde(default)]
    pub nick_name: Option<String>,
    #[serde(default)]
    pub dept: Option<Department>,
    /// Role keys held by this user.
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}
