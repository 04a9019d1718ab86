// SPDX-FileCopyrightText: 2026 Kontor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `kontor whoami` command implementation.
//!
//! Serves the cached profile when one is held; otherwise refetches it, which
//! also doubles as a token check after a restart resumed a persisted session.

use colored::Colorize;
use kontor_client::Gateway;
use kontor_core::KontorError;
use kontor_model::UserProfile;

/// Run the `kontor whoami` command.
pub async fn run_whoami(gateway: &Gateway) -> Result<(), KontorError> {
    let session = gateway.session();
    crate::require_login(session)?;

    let profile = match session.profile() {
        Some(profile) => profile,
        None => {
            let profile = gateway.current_user().await?;
            session.cache_profile(profile.clone());
            profile
        }
    };

    print_profile(&profile);
    if let Some(expires_at) = session.expires_at() {
        println!("Session expires {expires_at}");
    }
    Ok(())
}

fn print_profile(profile: &UserProfile) {
    println!("{} (#{})", profile.username.bold(), profile.user_id);
    if let Some(nick) = &profile.nick_name {
        println!("Name:  {nick}");
    }
    if let Some(dept) = &profile.dept {
        println!("Dept:  {}", dept.dept_name);
    }
    if !profile.roles.is_empty() {
        println!("Roles: {}", profile.roles.join(", "));
    }
}
