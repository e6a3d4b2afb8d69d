//! # Seed Data Generator
//!
//! Fills a record store with demo inventory for development.
//!
//! ## Usage
//! ```bash
//! # Generate 50 vehicles (default) into the configured data file
//! cargo run -p dealer-store --bin seed
//!
//! # Generate custom amount
//! cargo run -p dealer-store --bin seed -- --count 200
//!
//! # Specify data file
//! cargo run -p dealer-store --bin seed -- --data ./dev_store.json
//! ```
//!
//! ## Generated Vehicles
//! Each make contributes its models; every model is offered in rotating
//! colors and model years. Prices are deterministic (derived from the row
//! index), so two seeded stores hold the same inventory apart from ids.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use dealer_core::{Money, NewVehicle};
use dealer_store::telemetry::init_tracing;
use dealer_store::{DealerConfig, InventoryService, RecordStore};

/// Makes and their models
const MAKES: &[(&str, &[&str])] = &[
    ("Honda", &["Civic", "Accord", "CR-V", "Jazz", "HR-V"]),
    ("Toyota", &["Corolla", "Camry", "RAV4", "Yaris", "Land Cruiser"]),
    ("Hyundai", &["Elantra", "Tucson", "Accent", "Sonata"]),
    ("Kia", &["Sportage", "Cerato", "Picanto", "Sorento"]),
    ("Nissan", &["Sunny", "Altima", "X-Trail", "Patrol"]),
    ("BMW", &["320i", "X3", "X5", "530i"]),
];

const COLORS: &[&str] = &["White", "Black", "Silver", "Red", "Blue", "Grey"];

/// Optional extras written into `specs`
const TRIMS: &[&str] = &["base", "sunroof", "leather seats", "navigation", "sport package"];

const DEFAULT_COUNT: usize = 50;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count = DEFAULT_COUNT;
    let mut data_path: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(DEFAULT_COUNT);
                    i += 1;
                }
            }
            "--data" | "-d" => {
                if i + 1 < args.len() {
                    data_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Dealer Records Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>     Number of vehicles to generate (default: {})", DEFAULT_COUNT);
                println!("  -d, --data <PATH>   Data file path (default: from dealer.toml)");
                println!("  -h, --help          Show this help message");
                return Ok(());
            }
            other => eprintln!("Ignoring unknown argument: {}", other),
        }
        i += 1;
    }

    let mut config = DealerConfig::load(None)?;
    if let Some(path) = data_path {
        config.store.data_path = path;
    }

    println!("Dealer Records Seed Data Generator");
    println!("==================================");
    println!("Data file: {}", config.store.data_path.display());
    println!("Vehicles:  {}", count);
    println!();

    let store = Arc::new(RecordStore::open(config.store.clone())?);
    let inventory = InventoryService::new(store);

    // Check existing inventory
    let existing = inventory.list()?.len();
    if existing > 0 {
        println!("Store already has {} vehicles", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the data file to regenerate.");
        return Ok(());
    }

    let models: Vec<(&str, &str)> = MAKES
        .iter()
        .flat_map(|(make, models)| models.iter().map(move |model| (*make, *model)))
        .collect();

    let mut generated = 0;
    let start = std::time::Instant::now();

    for seed in 0..count {
        let (make, model) = models[seed % models.len()];
        let vehicle = generate_vehicle(make, model, seed);

        match inventory.add_vehicle(vehicle) {
            Ok(_) => generated += 1,
            Err(e) => eprintln!("Failed to add {} {}: {}", make, model, e),
        }
    }

    let elapsed = start.elapsed();
    println!("Generated {} vehicles in {:?}", generated, elapsed);

    let available = inventory.list_available()?.len();
    let red = inventory.search("red")?.len();
    println!("  Available: {}", available);
    println!("  Search 'red': {} results", red);

    println!();
    println!("Seed complete!");

    Ok(())
}

/// Builds one vehicle; the same `seed` always gives the same vehicle.
fn generate_vehicle(make: &str, model: &str, seed: usize) -> NewVehicle {
    // 2015 through 2024
    let model_year = 2015 + (seed % 10) as i32;

    // Price: 8,000 - 57,500 in steps of 500, newer years cost more
    let base = 8_000 + ((seed * 37) % 80) as i64 * 500;
    let price = Money::from_major_minor(base + (model_year as i64 - 2015) * 1_000, 0);

    let color = COLORS[(seed / 3) % COLORS.len()];
    let trim = TRIMS[seed % TRIMS.len()];

    NewVehicle::new(format!("{} {}", make, model), model_year, price, color).specs(trim)
}
