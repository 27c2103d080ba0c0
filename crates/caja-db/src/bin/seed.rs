//! # Seed Data Generator
//!
//! Populates the database with demo catalog and sales data for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default development database
//! cargo run -p caja-db --bin seed
//!
//! # Specify database path
//! cargo run -p caja-db --bin seed -- --db ./data/caja.db
//! ```
//!
//! ## Generated Data
//! A small corner-store catalog (beverages, snacks, dairy, grocery) plus a
//! handful of sales spread across payment methods, so every list and report
//! screen has something to show on first launch.

use std::env;

use caja_core::{
    Money, NewSale, PaymentMethod, Product, ProductInput, SaleItemInput,
    DEFAULT_LOW_STOCK_THRESHOLD,
};
use caja_db::{Database, DbConfig};
use tracing_subscriber::EnvFilter;

/// Demo catalog: (name, price_cents, stock, category, barcode).
const CATALOG: &[(&str, i64, i64, &str, Option<&str>)] = &[
    ("Coca-Cola 500ml", 180, 48, "Beverages", Some("7790895000997")),
    ("Sparkling Water 1.5L", 120, 36, "Beverages", Some("7790895001232")),
    ("Coffee Beans 250g", 1099, 14, "Beverages", Some("7798062540017")),
    ("Alfajor Chocolate", 95, 60, "Snacks", Some("7790580660129")),
    ("Potato Chips 140g", 310, 25, "Snacks", Some("7790310984123")),
    ("Chocolate Bar 100g", 420, 18, "Snacks", Some("7790040123458")),
    ("Whole Milk 1L", 150, 30, "Dairy", Some("7790742330901")),
    ("Butter 200g", 380, 12, "Dairy", Some("7790742112345")),
    ("White Bread Loaf", 220, 8, "Bakery", None),
    ("Sugar 1kg", 160, 22, "Grocery", Some("7790150591536")),
    ("Yerba Mate 500g", 850, 16, "Grocery", Some("7790387014309")),
    ("Paper Napkins 50ct", 140, 3, "Household", None),
];

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,caja_db=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./caja_dev.db");

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
                println!("Caja Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./caja_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    init_tracing();

    println!("🌱 Caja Seed Data Generator");
    println!("===========================");
    println!("Database: {}", db_path);
    println!();

    // Connect to database
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing products
    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    // Seed the catalog
    println!();
    println!("Creating products...");

    let start = std::time::Instant::now();
    let mut created: Vec<Product> = Vec::with_capacity(CATALOG.len());

    for (name, price_cents, stock, category, barcode) in CATALOG {
        let input = ProductInput {
            name: (*name).to_string(),
            description: None,
            price_cents: *price_cents,
            stock: *stock,
            category: Some((*category).to_string()),
            barcode: barcode.map(str::to_string),
        };

        match db.products().create(input).await {
            Ok(product) => created.push(product),
            Err(e) => {
                eprintln!("Failed to create {}: {}", name, e);
                continue;
            }
        }
    }

    println!("✓ Created {} products", created.len());

    if created.len() < CATALOG.len() {
        println!("⚠ Catalog incomplete, skipping demo sales");
        return Ok(());
    }

    // Record a few sales across payment methods so reports have data
    println!();
    println!("Recording demo sales...");

    let plan: Vec<(Vec<(usize, i64)>, PaymentMethod, Option<&str>)> = vec![
        (vec![(0, 2), (3, 1)], PaymentMethod::Cash, None),
        (vec![(6, 1), (8, 1)], PaymentMethod::Debit, Some("Ana")),
        (vec![(2, 1)], PaymentMethod::MobileWallet, None),
        (vec![(10, 1), (9, 1)], PaymentMethod::Cash, None),
        (vec![(4, 2), (5, 1)], PaymentMethod::Credit, Some("Luis")),
    ];

    let mut recorded = 0;
    for (lines, method, customer) in plan {
        let items: Vec<SaleItemInput> = lines
            .into_iter()
            .map(|(idx, quantity)| SaleItemInput {
                product_id: created[idx].id.clone(),
                quantity,
                unit_price_cents: created[idx].price_cents,
            })
            .collect();

        let sale = NewSale {
            customer: customer.map(str::to_string),
            payment_method: method,
            items,
        };

        match db.sales().record_sale(sale).await {
            Ok(_) => recorded += 1,
            Err(e) => eprintln!("Failed to record sale: {}", e),
        }
    }

    let elapsed = start.elapsed();
    println!("✓ Recorded {} sales", recorded);
    println!();
    println!("✓ Seeded in {:?}", elapsed);

    // Read the data back through the report queries
    println!();
    println!("Verifying reports...");

    let today = db.reports().sales_today().await?;
    println!(
        "  Today: {} sales, {} revenue",
        today.sales_count,
        Money::from_cents(today.revenue_cents)
    );

    if let Some(best) = db.reports().best_selling_product().await? {
        println!("  Best seller: {} ({} units)", best.name, best.units_sold);
    }

    let low = db.products().low_stock(DEFAULT_LOW_STOCK_THRESHOLD).await?;
    println!("  {} products at or below restock threshold:", low.len());
    for product in &low {
        println!("    {} ({} left)", product.name, product.stock);
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
