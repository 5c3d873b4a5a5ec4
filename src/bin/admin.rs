//! CLI administration tool for mechanic-shop.
//!
//! Operates directly on the database, without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Show row counts
//! cargo run --bin admin -- stats
//!
//! # Reset a customer's password (prompts for the new one)
//! cargo run --bin admin -- customer set-password jane@example.com
//!
//! # Issue a bearer token for a customer
//! cargo run --bin admin -- token issue 42
//! ```
//!
//! # Environment Variables
//!
//! Reads the same configuration as the server (see `mechanic_shop::config`).
//! `DATABASE_URL` and `JWT_SECRET` must be set.

use mechanic_shop::application::services::{AuthService, CustomerChanges, CustomerService};
use mechanic_shop::config::{self, Config};
use mechanic_shop::domain::repositories::{CustomerRepository, MechanicRepository};
use mechanic_shop::infrastructure::persistence::{PgCustomerRepository, PgMechanicRepository};
use mechanic_shop::server::connect_pool;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Password};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing mechanic-shop.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Show row counts per table
    Stats,

    /// Customer maintenance
    Customer {
        #[command(subcommand)]
        action: CustomerAction,
    },

    /// Bearer token operations
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[derive(Subcommand)]
enum CustomerAction {
    /// Replace a customer's password
    SetPassword {
        /// Email of the customer
        email: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum TokenAction {
    /// Issue a token for an existing customer
    Issue {
        /// Customer id the token is issued for
        customer_id: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;
    let pool = connect_pool(&config).await?;

    match cli.command {
        Commands::Db { action } => handle_db_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Customer { action } => handle_customer_action(action, &pool, &config).await?,
        Commands::Token { action } => handle_token_action(action, &pool, &config).await?,
    }

    Ok(())
}

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

            let migrations: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM _sqlx_migrations WHERE success",
            )
            .fetch_one(pool)
            .await
            .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", migrations.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}

const TOP_MECHANICS: usize = 5;

/// Displays row counts for every table and the busiest mechanics.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let tables = [
        ("Customers", "SELECT COUNT(*) FROM customers"),
        ("Mechanics", "SELECT COUNT(*) FROM mechanics"),
        ("Service tickets", "SELECT COUNT(*) FROM service_tickets"),
        ("Inventory items", "SELECT COUNT(*) FROM inventory"),
        ("Assignments", "SELECT COUNT(*) FROM service_mechanic"),
        ("Parts used", "SELECT COUNT(*) FROM service_ticket_inventory"),
    ];

    for (label, sql) in tables {
        let count: i64 = sqlx::query_scalar(sql).fetch_one(pool).await?;
        println!(
            "  {:<17}{}",
            format!("{label}:"),
            count.to_string().bright_green().bold()
        );
    }
    println!();

    let ranking = PgMechanicRepository::new(Arc::new(pool.clone()))
        .ranking()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to rank mechanics: {}", e))?;

    if ranking.is_empty() {
        return Ok(());
    }

    println!("{}", "🏆 Top mechanics".bright_blue().bold());
    println!();
    for entry in ranking.iter().take(TOP_MECHANICS) {
        println!(
            "  {:<4} {:<30} {}",
            entry.mechanic.id.to_string().bright_black(),
            entry.mechanic.name.cyan(),
            entry.ticket_count.to_string().bright_green().bold()
        );
    }
    println!();

    Ok(())
}

async fn handle_customer_action(
    action: CustomerAction,
    pool: &PgPool,
    config: &Config,
) -> Result<()> {
    let repo = Arc::new(PgCustomerRepository::new(Arc::new(pool.clone())));

    match action {
        CustomerAction::SetPassword { email, yes } => {
            println!("{}", "🔑 Set Customer Password".bright_blue().bold());
            println!();

            let customer = repo
                .find_by_email(&email)
                .await
                .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
                .context("Customer not found")?;

            println!("  Customer: {}", customer.name.cyan());
            println!("  ID:       {}", customer.id.to_string().bright_black());
            println!();

            let password = Password::new()
                .with_prompt("New password")
                .with_confirmation("Repeat password", "Passwords do not match")
                .interact()?;

            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt("Replace this customer's password?")
                    .default(false)
                    .interact()?;

                if !confirmed {
                    println!("{}", "❌ Cancelled".red());
                    return Ok(());
                }
            }

            let service = CustomerService::new(repo, config.bcrypt_cost);
            service
                .update(
                    customer.id,
                    CustomerChanges {
                        password: Some(password),
                        ..Default::default()
                    },
                )
                .await
                .map_err(|e| anyhow::anyhow!("Failed to update password: {}", e))?;

            println!();
            println!("{}", "✅ Password updated".green().bold());
            println!();
        }
    }

    Ok(())
}

async fn handle_token_action(action: TokenAction, pool: &PgPool, config: &Config) -> Result<()> {
    let repo = Arc::new(PgCustomerRepository::new(Arc::new(pool.clone())));

    match action {
        TokenAction::Issue { customer_id } => {
            let customer = repo
                .find_by_id(customer_id)
                .await
                .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
                .context("Customer not found")?;

            let auth = AuthService::new(repo, config.jwt_secret.clone(), config.jwt_ttl_hours);
            let token = auth
                .issue_token(customer.id)
                .map_err(|e| anyhow::anyhow!("Failed to issue token: {}", e))?;

            println!("{}", "🎫 Token issued".bright_blue().bold());
            println!();
            println!("  Customer: {} <{}>", customer.name.cyan(), customer.email);
            println!("  Expires:  in {}h", config.jwt_ttl_hours);
            println!();
            println!("  {}", token.bright_yellow());
            println!();
            println!("{}", "Example:".bright_white());
            println!(
                "  curl -H \"Authorization: Bearer {}\" http://{}/customers/my-tickets",
                token, config.listen_addr
            );
            println!();
        }
    }

    Ok(())
}
