//! CLI administration tool for people-api.
//!
//! Issues bearer tokens, manages person records and inspects the database
//! without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Issue a bearer token for the admin account
//! cargo run --bin admin -- token issue
//!
//! # List persons
//! cargo run --bin admin -- person list --page 2 --page-size 20
//!
//! # Add and remove a person
//! cargo run --bin admin -- person add --first-name John --last-name Doe --email john.doe@example.com
//! cargo run --bin admin -- person remove 3
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Reads the same variables as the server (`DATABASE_URL` / `DATABASE_FILE`,
//! `ADMIN_USER`, `ADMIN_PASSWORD`, `JWT_SECRET`, ...).

use people_api::application::services::{AuthService, PersonService};
use people_api::config::{Config, load_from_env};
use people_api::domain::entities::NewPerson;
use people_api::domain::pagination::PageRequest;
use people_api::infrastructure::db;
use people_api::infrastructure::persistence::SqlitePersonRepository;

use anyhow::{Context, Result};
use chrono::DateTime;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Password};
use sqlx::SqlitePool;
use std::sync::Arc;

/// CLI tool for managing people-api.
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
    /// Issue bearer tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Manage person records
    Person {
        #[command(subcommand)]
        action: PersonAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Token subcommands.
#[derive(Subcommand)]
enum TokenAction {
    /// Issue a token after checking the admin password
    Issue {
        /// Account name (defaults to ADMIN_USER)
        #[arg(short, long)]
        username: Option<String>,
    },
}

/// Person management subcommands.
#[derive(Subcommand)]
enum PersonAction {
    /// List persons one page at a time
    List {
        #[arg(short, long)]
        page: Option<i64>,

        #[arg(short = 's', long)]
        page_size: Option<i64>,
    },

    /// Add a person
    Add {
        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        #[arg(long)]
        email: String,
    },

    /// Remove a person by id
    Remove {
        id: i64,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_from_env()?;

    match cli.command {
        Commands::Token { action } => handle_token_action(action, &config)?,
        Commands::Person { action } => {
            let pool = open_pool(&config).await?;
            handle_person_action(action, &pool).await?;
        }
        Commands::Db { action } => {
            let pool = open_pool(&config).await?;
            handle_db_action(action, &pool).await?;
        }
    }

    Ok(())
}

async fn open_pool(config: &Config) -> Result<SqlitePool> {
    let pool = db::connect(config)
        .await
        .context("Failed to connect to database")?;
    db::migrate(&pool)
        .await
        .context("Failed to run migrations")?;
    Ok(pool)
}

/// Dispatches token commands.
///
/// Tokens are stateless, so this needs the signing secret but no database.
fn handle_token_action(action: TokenAction, config: &Config) -> Result<()> {
    match action {
        TokenAction::Issue { username } => issue_token(config, username),
    }
}

/// Prompts for the password and prints a signed token.
///
/// # Flow
///
/// 1. Use `--username` or the configured admin name
/// 2. Prompt for the password (hidden input)
/// 3. Check credentials with the same service the server uses
/// 4. Print the token, its expiry and a usage example
fn issue_token(config: &Config, username: Option<String>) -> Result<()> {
    println!("{}", "🔑 Issue Bearer Token".bright_blue().bold());
    println!();

    let auth_service = AuthService::from_config(config);
    let username = username.unwrap_or_else(|| auth_service.admin_username().to_string());

    let password = Password::new()
        .with_prompt(format!("Password for {username}"))
        .interact()?;

    if !auth_service.validate_credentials(&username, &password) {
        anyhow::bail!("Invalid username or password");
    }

    let (token, expires_at) = auth_service
        .issue_token(&username)
        .context("Failed to generate token")?;

    let expires = DateTime::from_timestamp(expires_at, 0)
        .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| expires_at.to_string());

    println!();
    println!("{}", "Token details:".bright_white().bold());
    println!("  User:    {}", username.cyan());
    println!("  Expires: {}", expires.bright_black());
    println!("  Token:   {}", token.bright_yellow().bold());
    println!();
    println!("{}", "Example:".bright_white());
    println!(
        "  curl -X DELETE -H \"Authorization: Bearer {}\" http://localhost:8080/api/v1/person/1",
        token.bright_yellow()
    );
    println!();

    if config.uses_default_jwt_secret() {
        println!(
            "{}",
            "⚠️  Signed with the default JWT_SECRET. Do not use in production."
                .red()
                .bold()
        );
    }

    Ok(())
}

/// Dispatches person management commands.
async fn handle_person_action(action: PersonAction, pool: &SqlitePool) -> Result<()> {
    let repo = Arc::new(SqlitePersonRepository::new(Arc::new(pool.clone())));
    let service = PersonService::new(repo);

    match action {
        PersonAction::List { page, page_size } => list_persons(&service, page, page_size).await,
        PersonAction::Add {
            first_name,
            last_name,
            email,
        } => add_person(&service, NewPerson::new(first_name, last_name, email)).await,
        PersonAction::Remove { id, yes } => remove_person(&service, id, yes).await,
    }
}

/// Prints one page of persons.
///
/// # Output Format
///
/// ```text
/// 👥 Persons (page 1 of 1, 2 total)
///
///   ID    Name                           Email
///   ──────────────────────────────────────────────────────────────────────
///   1     John Doe                       john.doe@example.com
///   2     Jane Roe                       jane.roe@example.com
/// ```
async fn list_persons(
    service: &PersonService<SqlitePersonRepository>,
    page: Option<i64>,
    page_size: Option<i64>,
) -> Result<()> {
    let page = service
        .list(PageRequest::new(page, page_size))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list persons: {}", e))?;

    println!(
        "{} (page {} of {}, {} total)",
        "👥 Persons".bright_blue().bold(),
        page.info.current_page,
        page.info.total_pages,
        page.info.total_items
    );
    println!();

    if page.items.is_empty() {
        println!("{}", "  No records found".yellow());
        return Ok(());
    }

    println!(
        "  {:<5} {:<30} {}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "Email".bright_white().bold()
    );
    println!("  {}", "─".repeat(70).bright_black());

    for person in &page.items {
        println!(
            "  {:<5} {:<30} {}",
            person.id.to_string().bright_black(),
            person.full_name().cyan(),
            person.email
        );
    }
    println!();

    Ok(())
}

async fn add_person(
    service: &PersonService<SqlitePersonRepository>,
    new_person: NewPerson,
) -> Result<()> {
    let id = service
        .create(new_person)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to add person: {}", e))?;

    println!(
        "{} id #{}",
        "✅ Person added".green().bold(),
        id.to_string().bright_white().bold()
    );

    Ok(())
}

/// Removes a person after showing it and asking for confirmation (default: No).
async fn remove_person(
    service: &PersonService<SqlitePersonRepository>,
    id: i64,
    skip_confirm: bool,
) -> Result<()> {
    let person = service
        .get(id)
        .await
        .map_err(|e| anyhow::anyhow!("Person #{}: {}", id, e))?;

    println!("  Person: {}", person.full_name().cyan());
    println!("  Email:  {}", person.email.bright_black());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Remove this person?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete(id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to remove person: {}", e))?;

    println!("{}", format!("✅ id #{id} deleted").green().bold());

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &SqlitePool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT sqlite_version()")
                .fetch_one(pool)
                .await?;
            let people: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM people")
                .fetch_one(pool)
                .await?;

            println!("  SQLite:  {}", version.bright_white());
            println!("  Persons: {}", people.to_string().bright_green().bold());
            println!();
        }
    }

    Ok(())
}
