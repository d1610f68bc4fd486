//! # Seed Data Generator
//!
//! Populates a database with demo purchase lots and sales for one user.
//!
//! ## Usage
//! ```bash
//! # 40 articles for "demo-user" (default)
//! cargo run -p resell-db --bin seed
//!
//! # Custom amount, user and database
//! cargo run -p resell-db --bin seed -- --count 200 --user u-42 --db ./data/resell.db
//! ```
//!
//! ## Generated Data
//! - Lots of 1 to 5 units bought over the last ~4 months
//! - Most lots partly sold, some sold out, a few left untouched
//! - Every 13th lot oversold by one unit, to exercise negative stock
//! - Sale prices between 1.2× and 3× unit cost, some with ad spend
//!
//! The closing snapshot check logs a warning for each oversold lot
//! (`RUST_LOG` overrides the default `info,sqlx=warn`).

use std::env;

use chrono::{Duration, NaiveDate, Utc};
use resell_db::{ArticleRow, Database, DbConfig, SaleRow};
use tracing_subscriber::EnvFilter;

/// Item families for realistic test data
const CATALOG: &[(&str, &[&str])] = &[
    (
        "Clothing",
        &[
            "Levi's 501 Jeans",
            "Carhartt Jacket",
            "Ralph Lauren Polo",
            "Patagonia Fleece",
            "Vintage Band Tee",
            "Wool Overcoat",
        ],
    ),
    (
        "Sneakers",
        &[
            "Nike Air Max 90",
            "Adidas Samba",
            "New Balance 550",
            "Converse Chuck 70",
            "Asics Gel-Lyte III",
        ],
    ),
    (
        "Electronics",
        &[
            "iPod Classic",
            "Nintendo DS Lite",
            "Polaroid Camera",
            "Walkman Cassette Player",
        ],
    ),
    (
        "Home",
        &[
            "Le Creuset Pot",
            "Ceramic Vase",
            "Teak Side Table",
            "Brass Lamp",
        ],
    ),
];

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut count: usize = 40;
    let mut db_path = String::from("./resell_dev.db");
    let mut user_id = String::from("demo-user");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(40);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--user" | "-u" => {
                if i + 1 < args.len() {
                    user_id = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Resell Desk Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of articles to generate (default: 40)");
                println!("  -d, --db <PATH>    Database file path (default: ./resell_dev.db)");
                println!("  -u, --user <ID>    Owner of the generated data (default: demo-user)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Resell Desk Seed Data Generator");
    println!("==================================");
    println!("Database: {}", db_path);
    println!("User:     {}", user_id);
    println!("Articles: {}", count);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.articles().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} articles", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating articles...");

    let today = Utc::now().date_naive();
    let names: Vec<&str> = CATALOG
        .iter()
        .flat_map(|(_, items)| items.iter().copied())
        .collect();

    let start = std::time::Instant::now();
    let mut generated = 0;
    let mut sales_generated = 0;

    for seed in 0..count {
        let (article, sales) = generate_lot(&user_id, names[seed % names.len()], seed, today);

        if let Err(e) = db.articles().insert(&article).await {
            eprintln!("Failed to insert {}: {}", article.name, e);
            continue;
        }
        for sale in &sales {
            if let Err(e) = db.sales().insert(sale).await {
                eprintln!("Failed to insert sale of {}: {}", article.name, e);
                continue;
            }
            sales_generated += 1;
        }

        generated += 1;
        if generated % 10 == 0 {
            println!("  Generated {} articles...", generated);
        }
    }

    println!();
    println!(
        "✓ Generated {} articles and {} sales in {:?}",
        generated,
        sales_generated,
        start.elapsed()
    );

    let snapshot = db.load_snapshot(&user_id).await?;
    println!("✓ Snapshot check: {} articles load cleanly", snapshot.len());

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Generates one purchase lot and its sales from a deterministic seed.
fn generate_lot(user_id: &str, name: &str, seed: usize, today: NaiveDate) -> (ArticleRow, Vec<SaleRow>) {
    let quantity = 1 + (seed % 5) as i64;
    let unit_cost = 4.0 + ((seed * 37) % 60) as f64;
    let days_ago = ((seed * 11) % 120) as i64;
    let purchase_date = today - Duration::days(days_ago);

    let article = ArticleRow::new(
        user_id,
        format!("{} #{}", name, seed + 1),
        unit_cost * quantity as f64,
        quantity,
        // Every 9th lot has no recorded purchase date.
        (seed % 9 != 8).then_some(purchase_date),
    );

    let mut sold = (seed % (quantity as usize + 1)) as i64;
    if seed % 13 == 12 {
        sold = quantity + 1;
    }

    let sales = (0..sold)
        .map(|n| {
            let offset = if days_ago == 0 {
                0
            } else {
                (n * 3 + (seed as i64 % 4)) % (days_ago + 1)
            };
            let sale_day = purchase_date + Duration::days(offset);
            let sale_date = sale_day
                .and_hms_opt(10 + (n % 8) as u32, 0, 0)
                .unwrap_or_default()
                .and_utc();

            let markup = 1.2 + ((seed + n as usize * 7) % 19) as f64 / 10.0;
            let ads_cost = (n % 3 == 0).then_some(1.5);

            SaleRow::new(&article.id, user_id, (unit_cost * markup).round(), sale_date, ads_cost)
        })
        .collect();

    (article, sales)
}
