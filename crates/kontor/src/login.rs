// SPDX-FileCopyrightText: 2026 Kontor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `kontor login` command implementation.
//!
//! Interactive captcha-gated login. The captcha image arrives as base64 PNG;
//! it is written to a temp file for the operator to open, since a terminal
//! cannot render it inline.

use std::io::Write;
use std::path::PathBuf;

use base64::Engine;
use colored::Colorize;
use kontor_client::{Gateway, LoginFlow};
use kontor_core::KontorError;
use kontor_model::CaptchaChallenge;
use tracing::debug;

const MAX_ATTEMPTS: u32 = 3;

/// Run the `kontor login` command.
pub async fn run_login(gateway: &Gateway, username_arg: Option<&str>) -> Result<(), KontorError> {
    let session = gateway.session();
    if session.authenticated() {
        println!(
            "Already logged in{}. Run {} first to switch users.",
            session
                .profile()
                .map(|p| format!(" as {}", p.username.bold()))
                .unwrap_or_default(),
            "kontor logout".bold()
        );
        return Ok(());
    }

    let mut flow = LoginFlow::new(gateway.clone());
    flow.refresh_captcha().await?;

    let mut last_err = KontorError::Internal("no login attempt made".to_string());
    for attempt in 1..=MAX_ATTEMPTS {
        let challenge = flow.challenge().ok_or_else(|| {
            KontorError::Internal("captcha rotation failed; try again".to_string())
        })?;
        let image_path = write_captcha_image(challenge)?;
        println!("Captcha image: {}", image_path.display());

        let username = match username_arg {
            Some(name) => name.to_string(),
            None => prompt_line("Username: ")?,
        };
        eprint!("Password: ");
        let password = rpassword::read_password()
            .map_err(|e| KontorError::Internal(format!("failed to read password: {e}")))?;
        let answer = prompt_line("Captcha answer: ")?;

        match flow.submit(&username, &password, &answer).await {
            Ok(profile) => {
                let _ = std::fs::remove_file(&image_path);
                println!(
                    "{} Logged in as {}.",
                    "ok:".green().bold(),
                    profile.username.bold()
                );
                return Ok(());
            }
            Err(err @ (KontorError::Authentication { .. } | KontorError::Validation(_))) => {
                let _ = std::fs::remove_file(&image_path);
                eprintln!("{} {err}", "login failed:".yellow().bold());
                debug!(attempt, "login attempt rejected");
                last_err = err;
            }
            Err(err) => {
                let _ = std::fs::remove_file(&image_path);
                return Err(err);
            }
        }
    }

    Err(last_err)
}

/// Decode the challenge image into a temp file the operator can open.
fn write_captcha_image(challenge: &CaptchaChallenge) -> Result<PathBuf, KontorError> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(challenge.image_base64.trim())
        .map_err(|e| KontorError::Internal(format!("captcha image is not valid base64: {e}")))?;
    let path = std::env::temp_dir().join(format!(
        "kontor-captcha-{}.png",
        captcha_file_stem(&challenge.challenge_id)
    ));
    std::fs::write(&path, bytes).map_err(|e| KontorError::Storage {
        source: Box::new(e),
    })?;
    Ok(path)
}

/// The challenge id is backend-supplied and untrusted; reduce it to a safe
/// filename component so it cannot steer the write outside the temp dir.
fn captcha_file_stem(challenge_id: &str) -> String {
    let stem: String = challenge_id
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    if stem.is_empty() {
        "challenge".to_string()
    } else {
        stem
    }
}

fn prompt_line(prompt: &str) -> Result<String, KontorError> {
    eprint!("{prompt}");
    std::io::stderr()
        .flush()
        .map_err(|e| KontorError::Internal(format!("failed to flush prompt: {e}")))?;
    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .map_err(|e| KontorError::Internal(format!("failed to read input: {e}")))?;
    Ok(line.trim().to_string())
}
