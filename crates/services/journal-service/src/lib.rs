//! Journal Service Library
//!
//! Accounts, pets and their medical records for owners and veterinarians.
//! Transports drive the [`service::Application`] trait; this crate also
//! ships a CLI for migrations and health checks.

pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use tracing::info;

use crate::config::JournalServiceConfig;
use crate::infra::Database;
use crate::service::{Application, Journal};

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let database = JournalServiceConfig::database_from_env();
    let db = Database::connect_without_migrations(&database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Load configuration, connect, ping and read through the wired application.
pub async fn check() -> Result<(), Box<dyn std::error::Error>> {
    let config = JournalServiceConfig::from_env()?;
    let db = Database::connect(&config.database).await?;
    db.ping().await?;

    let journal = Journal::from_connection(db.get_connection(), &config.jwt);
    let users = journal.users(false).await?;
    info!(?config, live_users = users.len(), "Journal service ready");
    Ok(())
}
