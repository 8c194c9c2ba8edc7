//! # Demo Catalog Seeder
//!
//! Populates the database with the demo catalog.
//!
//! ## Usage
//! ```bash
//! # Seed ./storefront.db
//! cargo run -p storefront-db --bin seed
//!
//! # Specify database path
//! cargo run -p storefront-db --bin seed -- --db ./data/storefront.db
//! ```
//!
//! The Red Set keeps the id the one-hour lockout is configured for by
//! default, so a fresh server shows `itemLimit` on it out of the box.

use std::env;

use storefront_core::validation::validate_product;
use storefront_core::{DocumentId, Money, Product};
use storefront_db::{Database, DbConfig};

/// `(id, name, price, category)`
const CATALOG: &[(&str, &str, i64, Option<&str>)] = &[
    ("67cfc3218e6716214620f936", "Red Set", 50, None),
    ("67cfc3218e6716214620f937", "Green Set", 40, Some("green")),
    ("67cfc3218e6716214620f938", "Blue Set", 30, None),
    ("67cfc3218e6716214620f939", "Yellow Set", 50, None),
    ("67cfc3218e6716214620f93a", "Pink Set", 80, Some("pink")),
    ("67cfc3218e6716214620f93b", "Purple Set", 90, None),
    ("67cfc3218e6716214620f93c", "Orange Set", 120, Some("orange")),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./storefront.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Storefront Demo Catalog Seeder");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./storefront.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Storefront Demo Catalog Seeder");
    println!("==============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        db.close().await;
        return Ok(());
    }

    let mut inserted = 0;
    for &(raw_id, name, price, category) in CATALOG {
        let product = demo_product(raw_id, name, price, category)?;
        validate_product(&product)?;

        if let Err(e) = db.products().insert(&product).await {
            eprintln!("Failed to insert {}: {}", name, e);
            continue;
        }

        println!("  + {:<12} {:>8}", name, product.price.to_string());
        inserted += 1;
    }

    println!();
    println!("✓ Inserted {} products", inserted);

    db.close().await;
    Ok(())
}

fn demo_product(
    raw_id: &str,
    name: &str,
    price: i64,
    category: Option<&str>,
) -> Result<Product, storefront_core::CoreError> {
    let mut product = Product::new(DocumentId::parse(raw_id)?, name, Money::from_units(price));
    product.description = format!("Our {} bundle.", name.to_lowercase());
    product.image_url = format!("/images/{}.png", name.to_lowercase().replace(' ', "-"));
    product.category = category.map(str::to_string);
    Ok(product)
}
