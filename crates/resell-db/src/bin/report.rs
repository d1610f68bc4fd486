//! # Dashboard Report
//!
//! Loads one user's snapshot and prints the dashboard as JSON on stdout.
//! Logs go to stderr, so the output can be piped.
//!
//! ## Usage
//! ```bash
//! cargo run -p resell-db --bin report -- --user demo-user --db ./resell_dev.db --plan pro
//!
//! # Reproduce a past dashboard
//! cargo run -p resell-db --bin report -- --user demo-user --date 2026-03-31
//! ```
//!
//! ## Log Levels
//! - `RUST_LOG=debug` - per-row adapter messages
//! - Default: `info,sqlx=warn`

use std::env;
use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use resell_core::{build_dashboard, Plan};
use resell_db::{AppConfig, Database};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_help() {
    println!("Resell Desk Dashboard Report");
    println!();
    println!("Usage: report --user <ID> [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -u, --user <ID>        Owner whose articles are analysed (required)");
    println!("  -d, --db <PATH>        Database file path (default: from config)");
    println!("  -c, --config <PATH>    Config file (default: platform config dir)");
    println!("  -p, --plan <PLAN>      free | pro (default: from config)");
    println!("      --date <YYYY-MM-DD> Reference date (default: today, UTC)");
    println!("  -h, --help             Show this help message");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut user_id: Option<String> = None;
    let mut db_path: Option<PathBuf> = None;
    let mut config_path: Option<PathBuf> = None;
    let mut plan: Option<Plan> = None;
    let mut today = Utc::now().date_naive();

    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1).cloned();
        match args[i].as_str() {
            "--user" | "-u" => {
                user_id = value;
                i += 1;
            }
            "--db" | "-d" => {
                db_path = value.map(PathBuf::from);
                i += 1;
            }
            "--config" | "-c" => {
                config_path = value.map(PathBuf::from);
                i += 1;
            }
            "--plan" | "-p" => {
                plan = match value.as_deref() {
                    Some("free") => Some(Plan::Free),
                    Some("pro") => Some(Plan::Pro),
                    other => return Err(format!("unknown plan: {other:?}").into()),
                };
                i += 1;
            }
            "--date" => {
                let raw = value.unwrap_or_default();
                today = NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                    .map_err(|e| format!("invalid --date '{raw}': {e}"))?;
                i += 1;
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            other => return Err(format!("unknown argument: {other}").into()),
        }
        i += 1;
    }

    let Some(user_id) = user_id else {
        print_help();
        return Err("--user is required".into());
    };

    let mut config = AppConfig::load(config_path)?;
    if let Some(path) = db_path {
        config.database.path = path;
    }
    let plan = plan.unwrap_or(config.plan);

    info!(user_id = %user_id, %today, ?plan, "Building dashboard");

    let db = Database::new(config.database.db_config()).await?;
    let articles = db.load_snapshot(&user_id).await?;
    db.close().await;

    let dashboard = build_dashboard(&articles, today, &config.analytics, plan)?;
    println!("{}", serde_json::to_string_pretty(&dashboard)?);

    Ok(())
}
