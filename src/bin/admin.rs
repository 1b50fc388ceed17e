//! CLI administration tool for link-relay.
//!
//! Runs maintenance operations directly against the database, without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Delete records expired for longer than the grace period
//! cargo run --bin admin -- sweep
//! cargo run --bin admin -- sweep --grace-seconds 0
//!
//! # Show metadata of one short link
//! cargo run --bin admin -- info Ab3dE9xZ
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_*` components (required)
//! - `SWEEP_GRACE_SECONDS`, `VALIDITY_WINDOW_SECONDS`: default grace for `sweep`

use link_relay::application::services::{ExpirySweeper, InfoService};
use link_relay::config::{Config, mask_connection_string};
use link_relay::domain::entities::DEFAULT_VALIDITY_WINDOW;
use link_relay::infrastructure::persistence::PgUrlRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

/// CLI tool for managing link-relay.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the expiry sweeper once
    Sweep {
        /// Seconds past expiry before a record is deleted
        #[arg(long)]
        grace_seconds: Option<u64>,
    },

    /// Show metadata of a short link
    Info {
        /// Short token
        token: String,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection and report record counts
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?;
    let pool = PgPool::connect(&database_url)
        .await
        .with_context(|| format!("Failed to connect to {}", mask_connection_string(&database_url)))?;

    match cli.command {
        Commands::Sweep { grace_seconds } => sweep(pool, grace_seconds).await?,
        Commands::Info { token } => info(pool, &token).await?,
        Commands::Db {
            action: DbAction::Check,
        } => db_check(&pool).await?,
    }

    Ok(())
}

/// Grace from the flag, then `SWEEP_GRACE_SECONDS`, then the validity window.
fn resolve_grace(flag: Option<u64>) -> Duration {
    let from_env = |key: &str| {
        std::env::var(key)
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
    };

    flag.map(Duration::from_secs)
        .or_else(|| from_env("SWEEP_GRACE_SECONDS"))
        .or_else(|| from_env("VALIDITY_WINDOW_SECONDS"))
        .unwrap_or(DEFAULT_VALIDITY_WINDOW)
}

async fn sweep(pool: PgPool, grace_seconds: Option<u64>) -> Result<()> {
    println!("{}", "🧹 Expiry Sweep".bright_blue().bold());
    println!();

    let grace = resolve_grace(grace_seconds);
    println!("  Grace: {}s", grace.as_secs().to_string().cyan());

    let repository = Arc::new(PgUrlRepository::new(Arc::new(pool)));
    let deleted = ExpirySweeper::new(repository, grace)
        .execute()
        .await
        .map_err(|e| anyhow::anyhow!("Sweep failed: {}", e))?;

    println!(
        "  Deleted: {}",
        deleted.to_string().bright_white().bold()
    );
    println!();
    println!("{}", "✅ Sweep complete".green().bold());

    Ok(())
}

async fn info(pool: PgPool, token: &str) -> Result<()> {
    let repository = Arc::new(PgUrlRepository::new(Arc::new(pool)));
    let record = InfoService::new(repository)
        .get_info(token)
        .await
        .map_err(|e| anyhow::anyhow!("{}: {}", token, e))?;

    let status = if record.is_expired() {
        "EXPIRED".red()
    } else {
        "ACTIVE".green()
    };

    println!("{}", "🔗 Short Link".bright_blue().bold());
    println!();
    println!("  Token:       {}", record.short_token.cyan());
    println!("  URL:         {}", record.original_url);
    println!("  Clicks:      {}", record.click_count.to_string().bright_white().bold());
    println!(
        "  Created:     {}",
        record.created_at.format("%Y-%m-%d %H:%M:%S UTC").to_string().bright_black()
    );
    println!(
        "  Valid until: {}",
        record.valid_until.format("%Y-%m-%d %H:%M:%S UTC").to_string().bright_black()
    );
    println!("  Status:      {}", status);
    println!();

    Ok(())
}

/// Verifies connectivity and prints total and expired record counts.
async fn db_check(pool: &PgPool) -> Result<()> {
    println!("{}", "🔍 Database Check".bright_blue().bold());
    println!();

    let result: (i32,) = sqlx::query_as("SELECT 1")
        .fetch_one(pool)
        .await
        .context("Database connection failed")?;

    if result.0 != 1 {
        anyhow::bail!("Unexpected response from database");
    }
    println!("  Connection: {}", "OK".green().bold());

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
        .fetch_one(pool)
        .await
        .context("Failed to count records (are migrations applied?)")?;

    let expired: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls WHERE valid_until <= NOW()")
        .fetch_one(pool)
        .await?;

    println!("  Records:    {}", total.to_string().bright_white().bold());
    println!("  Expired:    {}", expired.to_string().yellow());
    println!();

    Ok(())
}
