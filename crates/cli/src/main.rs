//! Brand Mappers CLI - database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! bm-cli migrate
//!
//! # Give an existing account dashboard access
//! bm-cli admin grant -e nour@brand-mappers.com
//!
//! # Show which settings are stored
//! bm-cli settings list
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `admin grant|revoke|list` - Manage the admin role
//! - `settings list|show` - Inspect stored site content

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "bm-cli")]
#[command(author, version, about = "Brand Mappers CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage admin role grants
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Inspect stored site content
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Grant the admin role to an existing account
    Grant {
        /// Account email address
        #[arg(short, long)]
        email: String,
    },
    /// Revoke the admin role
    Revoke {
        /// Account email address
        #[arg(short, long)]
        email: String,
    },
    /// List admins
    List,
}

#[derive(Subcommand)]
enum SettingsAction {
    /// List every settings key and when it was last saved
    List,
    /// Print the stored JSON for one key
    Show {
        /// Settings key, e.g. `hero_content`
        key: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await,
        Commands::Admin { action } => match action {
            AdminAction::Grant { email } => commands::admin::grant(&email).await,
            AdminAction::Revoke { email } => commands::admin::revoke(&email).await,
            AdminAction::List => commands::admin::list().await,
        },
        Commands::Settings { action } => match action {
            SettingsAction::List => commands::settings::list().await,
            SettingsAction::Show { key } => commands::settings::show(&key).await,
        },
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_admin_grant() {
        let cli = Cli::try_parse_from(["bm-cli", "admin", "grant", "-e", "a@b.co"]);
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::Admin {
                action: AdminAction::Grant { .. }
            })
        ));
    }
}
