//! # Legacy Data Migration
//!
//! Converts an old `data.json` into the current `data_store.json` shape.
//!
//! ## Usage
//! ```bash
//! cargo run -p dealer-store --bin migrate
//! cargo run -p dealer-store --bin migrate -- --from old/data.json --to data_store.json
//! cargo run -p dealer-store --bin migrate -- --force
//! ```
//!
//! Without `--force` an existing output file is left untouched and the run
//! fails.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use dealer_store::telemetry::init_tracing;
use dealer_store::{migrate_file, MigrateOptions};

const DEFAULT_FROM: &str = "data.json";
const DEFAULT_TO: &str = "data_store.json";

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut from = PathBuf::from(DEFAULT_FROM);
    let mut to = PathBuf::from(DEFAULT_TO);
    let mut options = MigrateOptions::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--from" | "-f" => {
                if i + 1 < args.len() {
                    from = PathBuf::from(&args[i + 1]);
                    i += 1;
                }
            }
            "--to" | "-t" => {
                if i + 1 < args.len() {
                    to = PathBuf::from(&args[i + 1]);
                    i += 1;
                }
            }
            "--force" => options.force = true,
            "--compact" => options.pretty = false,
            "--help" | "-h" => {
                println!("Dealer Records Legacy Migration");
                println!();
                println!("Usage: migrate [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -f, --from <PATH>   Legacy file (default: {})", DEFAULT_FROM);
                println!("  -t, --to <PATH>     Output file (default: {})", DEFAULT_TO);
                println!("      --force         Overwrite an existing output file");
                println!("      --compact       Write JSON without indentation");
                println!("  -h, --help          Show this help message");
                return ExitCode::SUCCESS;
            }
            other => eprintln!("Ignoring unknown argument: {}", other),
        }
        i += 1;
    }

    match migrate_file(&from, &to, options) {
        Ok(report) => {
            println!(
                "Migrated {} users, {} cars, {} invoices into {}",
                report.users,
                report.cars,
                report.invoices,
                to.display()
            );
            if report.defaulted_passwords > 0 {
                println!(
                    "  {} users had no password and were given the default",
                    report.defaulted_passwords
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Migration failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
