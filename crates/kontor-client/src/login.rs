// SPDX-FileCopyrightText: 2026 Kontor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The interactive login flow.
//!
//! Drives the captcha-gated credential exchange against the gateway and the
//! session state machine: fetch a challenge, submit credentials plus the
//! operator's answer, and on success establish the session and cache the
//! profile. Every rejected attempt consumes the challenge and fetches a
//! fresh one; a challenge id is never reused.

use kontor_core::KontorError;
use kontor_model::{CaptchaChallenge, LoginRequest, UserProfile};
use tracing::{debug, warn};

use crate::gateway::Gateway;

/// One login conversation.
///
/// Holds the pending captcha challenge between `refresh_captcha` and
/// `submit`. Dropped after a successful login; the session lives on in the
/// shared [`kontor_session::SessionStore`].
pub struct LoginFlow {
    gateway: Gateway,
    challenge: Option<CaptchaChallenge>,
}

impl LoginFlow {
    pub fn new(gateway: Gateway) -> Self {
        Self {
            gateway,
            challenge: None,
        }
    }

    /// The challenge currently awaiting an answer, if any.
    pub fn challenge(&self) -> Option<&CaptchaChallenge> {
        self.challenge.as_ref()
    }

    /// Fetches a fresh captcha challenge, replacing any pending one.
    pub async fn refresh_captcha(&mut self) -> Result<&CaptchaChallenge, KontorError> {
        let challenge = self.gateway.captcha().await?;
        debug!(challenge_id = %challenge.challenge_id, "fetched captcha challenge");
        Ok(self.challenge.insert(challenge))
    }

    /// Submits credentials with the operator's captcha answer.
    ///
    /// On success the token is persisted, the profile fetched exactly once
    /// and cached, and the profile returned. On a rejected attempt the
    /// pending challenge is discarded and a replacement fetched before the
    /// error is returned, so the caller can immediately present it.
    pub async fn submit(
        &mut self,
        username: &str,
        password: &str,
        captcha_answer: &str,
    ) -> Result<UserProfile, KontorError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(KontorError::Validation(
                "username and password must not be blank".to_string(),
            ));
        }
        if captcha_answer.trim().is_empty() {
            return Err(KontorError::Validation(
                "captcha answer must not be blank".to_string(),
            ));
        }
        let challenge = self.challenge.take().ok_or_else(|| {
            KontorError::Validation("no captcha challenge; call refresh_captcha first".to_string())
        })?;

        let session = self.gateway.session().clone();
        session.begin_login()?;

        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
            captcha_response: captcha_answer.trim().to_string(),
            challenge_id: challenge.challenge_id,
        };

        let token = match self.gateway.login(&request).await {
            Ok(response) => response.token,
            Err(err) => {
                session.login_failed();
                if let Err(refresh_err) = self.refresh_captcha().await {
                    warn!(error = %refresh_err, "failed to rotate captcha after rejected login");
                }
                return Err(err);
            }
        };

        session.establish(&token)?;

        // The session is live from here; a profile failure does not undo it.
        let profile = self.gateway.current_user().await?;
        session.cache_profile(profile.clone());
        Ok(profile)
    }
}
