// SPDX-FileCopyrightText: 2026 Kontor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Kontor - an operator console client for RBAC-managed backends.
//!
//! This is the binary entry point for the Kontor console.

use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;
use kontor_client::Gateway;
use kontor_core::KontorError;
use kontor_session::SessionStore;

mod grant;
mod list;
mod login;
mod whoami;

/// Kontor - an operator console client for RBAC-managed backends.
#[derive(Parser, Debug)]
#[command(name = "kontor", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Log in to the console backend.
    Login {
        /// Username; prompted for when omitted.
        #[arg(long)]
        username: Option<String>,
    },
    /// Log out and discard the saved session.
    Logout,
    /// Show the authenticated user.
    Whoami,
    /// List menus as a tree.
    Menus {
        /// Render as a flat depth-indented table instead.
        #[arg(long)]
        table: bool,
    },
    /// List departments as a tree.
    Departments {
        /// Render as a flat depth-indented table instead.
        #[arg(long)]
        table: bool,
    },
    /// List roles and their grant counts.
    Roles,
    /// Show or replace a role's menu grants.
    Grant {
        /// Numeric role id.
        role_id: i64,
        /// Replace the grant set with exactly these menu ids.
        #[arg(long, value_delimiter = ',')]
        set: Option<Vec<i64>>,
        /// Toggle these menu ids in the role's current set.
        #[arg(long, value_delimiter = ',')]
        toggle: Vec<i64>,
    },
    /// Delete a menu node (and, server-side, its descendants).
    DeleteMenu {
        /// Numeric menu id.
        menu_id: i64,
        /// Skip the confirmation required for nodes with children.
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match kontor_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            kontor_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.console.log_level);

    let session = SessionStore::open(
        &config.session.token_path,
        chrono::Duration::days(config.session.token_ttl_days),
    );
    let gateway = match Gateway::new(
        &config.server.base_url,
        Duration::from_secs(config.server.timeout_secs),
        session.clone(),
    ) {
        Ok(gateway) => gateway,
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Login { username } => login::run_login(&gateway, username.as_deref()).await,
        Commands::Logout => {
            gateway.logout().await;
            println!("Logged out.");
            Ok(())
        }
        Commands::Whoami => whoami::run_whoami(&gateway).await,
        Commands::Menus { table } => list::run_menus(&gateway, &config, table).await,
        Commands::Departments { table } => list::run_departments(&gateway, &config, table).await,
        Commands::Roles => list::run_roles(&gateway).await,
        Commands::Grant {
            role_id,
            set,
            toggle,
        } => grant::run_grant(&gateway, &config, role_id, set, &toggle).await,
        Commands::DeleteMenu { menu_id, yes } => {
            grant::run_delete_menu(&gateway, menu_id, yes).await
        }
    };

    if let Err(err) = result {
        eprintln!("{} {err}", "error:".red().bold());
        if err.invalidates_session() {
            eprintln!("Your session has been cleared; run {} again.", "kontor login".bold());
        } else if err.is_retryable() {
            eprintln!("The backend may be temporarily unavailable; try again.");
        }
        std::process::exit(1);
    }
}

/// Route logs to stderr so command output stays pipeable.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("kontor={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Commands that talk to protected endpoints refuse to start anonymous, so
/// the operator gets "log in first" instead of a backend 401.
fn require_login(session: &SessionStore) -> Result<(), KontorError> {
    if session.authenticated() {
        Ok(())
    } else {
        Err(KontorError::Validation(
            "not logged in; run `kontor login` first".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn binary_loads_config_defaults() {
        // Defaults must be valid without any config file present.
        let config = kontor_config::load_and_validate_str("").expect("default config");
        assert_eq!(config.console.indent_width, 2);
        assert!(!config.console.cascade_checks);
    }
}
