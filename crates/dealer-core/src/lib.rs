//! # dealer-core: Pure Business Logic for Dealer Records
//!
//! This crate holds the dealership's entity model and every rule that can be
//! evaluated without touching the backing file.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Dealer Records Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │            Callers (migrate / seed binaries, tests)             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │     dealer-store services: Account, Inventory, Sales, Report    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ dealer-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌────────────┐ ┌────────────┐      │   │
//! │  │   │  types   │ │  money   │ │ validation │ │  identity  │      │   │
//! │  │   │ Account  │ │  Money   │ │ Validator  │ │  new_id    │      │   │
//! │  │   │ Vehicle  │ │ (cents)  │ │  rules     │ │  hashing   │      │   │
//! │  │   │ Invoice  │ └──────────┘ └────────────┘ └────────────┘      │   │
//! │  │   └──────────┘                                                  │   │
//! │  │                                                                 │   │
//! │  │   NO FILE I/O • NO LOGGING SETUP • NO CONFIG LOADING            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Entities (Account, Vehicle, Invoice) and their edit variants
//! - [`money`] - Money type with integer arithmetic
//! - [`identity`] - Entity ids and password digests
//! - [`validation`] - The `Validator` capability and field rules
//! - [`permission`] - What each role may do
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use dealer_core::money::Money;
//! use dealer_core::types::points_for_price;
//!
//! let price = Money::from_major_minor(15_000, 0);
//! assert_eq!(points_for_price(price), 15);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod identity;
pub mod money;
pub mod permission;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ErrorKind, ValidationError};
pub use money::Money;
pub use permission::Permission;
pub use types::*;
pub use validation::{RuleValidator, ValidationPolicy, Validator};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Price that earns one loyalty point, in cents (1000.00 in major units).
pub const POINT_VALUE_CENTS: i64 = 100_000;

/// Id prefix for accounts.
pub const USER_ID_PREFIX: &str = "user";

/// Id prefix for vehicles.
pub const CAR_ID_PREFIX: &str = "car";

/// Id prefix for invoices.
pub const INVOICE_ID_PREFIX: &str = "inv";

/// Gender recorded when none is supplied.
pub const DEFAULT_GENDER: &str = "M";
