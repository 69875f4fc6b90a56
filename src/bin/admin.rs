//! CLI administration tool for shortlink.
//!
//! Creates and resolves short links and performs database maintenance without
//! going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a short link valid for 48 hours
//! cargo run --bin admin -- shorten https://example.com/long/path --hours 48
//!
//! # Resolve a short code
//! cargo run --bin admin -- resolve aB3dE8
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Delete records past their validity window
//! cargo run --bin admin -- db purge-expired --yes
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see [`shortlink::config`]. `DATABASE_URL` (or the
//! `DB_*` components) is required.

use shortlink::application::services::ServiceSettings;
use shortlink::config::{self, Config};
use shortlink::domain::entities::ExpireIn;
use shortlink::domain::repositories::RecordRepository;
use shortlink::infrastructure::persistence::PgRecordRepository;
use shortlink::server::{build_cache, connect_database};
use shortlink::state::AppState;
use shortlink::utils::code_generator::RandomCodeGenerator;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing shortlink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Create a short link
    Shorten {
        /// URL to shorten (http or https)
        url: String,

        /// Validity window in hours
        #[arg(long, default_value_t = 24)]
        hours: u32,
    },

    /// Resolve a short code to its original URL
    Resolve {
        /// Short code to look up
        code: String,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Delete records whose validity window has passed
    PurgeExpired {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    let pool = connect_database(&config).await?;

    match cli.command {
        Commands::Shorten { url, hours } => shorten(&config, pool, &url, hours).await?,
        Commands::Resolve { code } => resolve(&config, pool, &code).await?,
        Commands::Db { action } => handle_db_action(action, pool).await?,
    }

    Ok(())
}

/// Builds the same services the server runs, over the configured store and cache.
async fn app_state(config: &Config, pool: PgPool) -> AppState {
    let repository: Arc<dyn RecordRepository> = Arc::new(PgRecordRepository::new(Arc::new(pool)));

    AppState::new(
        repository,
        build_cache(config).await,
        Arc::new(RandomCodeGenerator::new(config.code_length)),
        ServiceSettings::from_config(config),
        config.base_url.clone(),
    )
}

/// Creates a short link and prints its details.
async fn shorten(config: &Config, pool: PgPool, url: &str, hours: u32) -> Result<()> {
    println!("{}", "✂️  Create Short Link".bright_blue().bold());
    println!();

    let expire_in = ExpireIn::from_hours(hours).context("--hours must be at least 1")?;

    let state = app_state(config, pool).await;
    let record = state
        .shorten_service
        .shorten(url, expire_in)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create short link: {}", e))?;

    println!("  Code:      {}", record.short_code.as_str().bright_yellow().bold());
    println!(
        "  Short URL: {}",
        state.shorten_service.short_url(&record.short_code).cyan()
    );
    println!("  Target:    {}", record.original_url);
    println!(
        "  Expires:   {}",
        record
            .expires_at()
            .format("%Y-%m-%d %H:%M UTC")
            .to_string()
            .bright_black()
    );
    println!();

    Ok(())
}

/// Resolves a code the same way a redirect would.
async fn resolve(config: &Config, pool: PgPool, code: &str) -> Result<()> {
    let state = app_state(config, pool).await;

    match state.resolve_service.resolve(code).await {
        Ok(url) => {
            println!("{} → {}", code.bright_yellow(), url.cyan());
            Ok(())
        }
        Err(e) => {
            println!("{} {}", "❌".red(), e.to_string().red());
            Err(anyhow::anyhow!("Failed to resolve '{}'", code))
        }
    }
}

/// Handles database maintenance commands.
async fn handle_db_action(action: DbAction, pool: PgPool) -> Result<()> {
    let repository = PgRecordRepository::new(Arc::new(pool));

    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            if !repository.health_check().await {
                anyhow::bail!("Database did not answer");
            }

            let records = repository
                .count_all()
                .await
                .context("Table short_urls is missing; start the server once to migrate")?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!(
                "  Records: {}",
                records.to_string().bright_green().bold()
            );
        }
        DbAction::PurgeExpired { yes } => {
            let expired = repository.count_expired().await?;

            if expired == 0 {
                println!("{}", "  No expired records".yellow());
                return Ok(());
            }

            println!(
                "  Expired records: {}",
                expired.to_string().bright_white().bold()
            );

            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt("Delete these records?")
                    .default(false)
                    .interact()?;

                if !confirmed {
                    println!("{}", "❌ Cancelled".red());
                    return Ok(());
                }
            }

            let removed = repository
                .purge_expired()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to purge: {}", e))?;

            println!(
                "{}",
                format!("✅ Removed {} record(s)", removed).green().bold()
            );
        }
    }

    Ok(())
}
