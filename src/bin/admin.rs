//! CLI administration tool for shorturl.
//!
//! Creates and inspects short codes directly against the database, without
//! going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL (host must resolve)
//! cargo run --bin admin -- shorten https://www.example.com
//!
//! # Look up a code
//! cargo run --bin admin -- resolve aB3dE5f
//!
//! # Count stored codes
//! cargo run --bin admin -- stats
//!
//! # Database tools
//! cargo run --bin admin -- db check
//! cargo run --bin admin -- db migrate
//! ```
//!
//! # Environment Variables
//!
//! Read and validated exactly as for the server (see [`shorturl::config`]):
//!
//! - `DATABASE_URL` or `DB_*` components (required)
//! - `CODE_LENGTH`, `CODE_MAX_ATTEMPTS`, `DNS_TIMEOUT_MS` (optional)

use shorturl::AppError;
use shorturl::application::services::{RedirectService, ShorteningService};
use shorturl::config::{self, Config};
use shorturl::domain::repositories::UrlRepository;
use shorturl::infrastructure::cache::NullCache;
use shorturl::infrastructure::dns::SystemResolver;
use shorturl::infrastructure::persistence::PgUrlRepository;
use shorturl::server::connect_pool;
use shorturl::utils::code_generator::CodeGenerator;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

/// CLI tool for managing shorturl.
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
    /// Create a short code for a URL
    Shorten {
        /// URL to shorten; its host must resolve
        url: String,
    },

    /// Print the URL stored for a code
    Resolve {
        /// Short code
        code: String,
    },

    /// Show statistics
    Stats,

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

    /// Show database info
    Info,

    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Invalid configuration")?;
    let pool = connect_pool(&config).await?;

    match cli.command {
        Commands::Shorten { url } => handle_shorten(&pool, &config, &url).await?,
        Commands::Resolve { code } => handle_resolve(&pool, &code).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn repository(pool: &PgPool) -> Arc<PgUrlRepository> {
    Arc::new(PgUrlRepository::new(Arc::new(pool.clone())))
}

/// Runs the same validation and collision handling as `POST /api/shorturl`.
async fn handle_shorten(pool: &PgPool, config: &Config, url: &str) -> Result<()> {
    println!("{}", "✂️  Shorten URL".bright_blue().bold());
    println!();

    let resolver = SystemResolver::with_timeout(Duration::from_millis(config.dns_timeout_ms));
    let service = ShorteningService::new(
        repository(pool),
        Arc::new(resolver),
        Arc::new(CodeGenerator::new(config.code_length)),
        config.code_max_attempts,
    );

    match service.shorten(url).await {
        Ok(record) => {
            println!("  URL:  {}", record.original_url.cyan());
            println!("  Code: {}", record.code.bright_yellow().bold());
            println!();
            println!(
                "  Redirect: {}",
                format!("/api/shorturl/{}", record.code).bright_white()
            );
        }
        Err(AppError::InvalidUrl { .. }) => {
            println!("{}", "❌ Invalid URL (malformed or host does not resolve)".red());
        }
        Err(e) => return Err(anyhow::anyhow!("Failed to shorten URL: {}", e)),
    }

    println!();
    Ok(())
}

async fn handle_resolve(pool: &PgPool, code: &str) -> Result<()> {
    let service = RedirectService::new(repository(pool), Arc::new(NullCache::new()));

    match service.resolve(code).await {
        Ok(url) => println!("{} → {}", code.bright_yellow(), url.cyan()),
        Err(AppError::NotFound { .. }) => {
            println!("{}", format!("⚠️  No URL stored for '{}'", code).yellow())
        }
        Err(e) => return Err(anyhow::anyhow!("Lookup failed: {}", e)),
    }

    Ok(())
}

/// Displays the number of stored codes.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let count = repository(pool)
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count codes: {}", e))?;

    println!(
        "  Short URLs: {}",
        count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
        DbAction::Migrate => {
            println!("{}", "🚚 Applying migrations...".bright_blue());

            sqlx::migrate!("./migrations")
                .run(pool)
                .await
                .context("Failed to apply migrations")?;

            println!("{}", "✅ Migrations applied".green().bold());
        }
    }

    Ok(())
}
