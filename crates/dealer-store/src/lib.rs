//! # dealer-store: Record Store for Dealer Records
//!
//! Owns the JSON backing file and every operation that reads or changes it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Dealer Records Data Flow                           │
//! │                                                                         │
//! │  Caller (menu, binary, test)                                           │
//! │       │  checks Role::allows(..) first                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   dealer-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Services    │    │  RecordStore  │    │  Migration   │  │   │
//! │  │   │               │    │  (store.rs)   │    │              │  │   │
//! │  │   │ Account       │───►│ RwLock<       │    │ legacy file  │  │   │
//! │  │   │ Inventory     │    │  Collections> │    │  -> current  │  │   │
//! │  │   │ Sales         │    │ read/transact │    │              │  │   │
//! │  │   │ Report        │    │ atomic save   │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   data_store.json   { "users": [..], "cars": [..],              │   │
//! │  │                       "invoices": [..] }                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - Record store, collections and atomic save
//! - [`service`] - Account, inventory, sales and reporting operations
//! - [`migration`] - Legacy data file conversion
//! - [`config`] - Store configuration and `dealer.toml` loading
//! - [`error`] - Store error types
//! - [`telemetry`] - Tracing subscriber setup
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use dealer_core::{NewAccount, RuleValidator, Role};
//! use dealer_store::{AccountService, DealerConfig, RecordStore, SalesService};
//!
//! let config = DealerConfig::load(None)?;
//! let store = Arc::new(RecordStore::open(config.store.clone())?);
//!
//! let accounts = AccountService::new(store.clone(), Arc::new(RuleValidator::new(config.validation)));
//! accounts.register(NewAccount::new("cust1", "Passw0rd!", Role::Customer))?;
//!
//! let sales = SalesService::new(store);
//! let invoice = sales.purchase("cust1", "car-1a2b3c4d")?;
//! # Ok::<(), dealer_store::StoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod migration;
pub mod service;
pub mod store;
pub mod telemetry;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{DealerConfig, ReportSettings, StoreConfig};
pub use error::{StoreError, StoreResult};
pub use migration::{migrate_file, MigrateOptions, MigrationReport};
pub use store::{Collections, RecordStore};

// Service re-exports for convenience
pub use service::{AccountService, InventoryService, ReportService, SalesService, Summary};
