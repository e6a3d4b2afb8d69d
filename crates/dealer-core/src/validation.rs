//! # Validation Module
//!
//! Input validation for registration and inventory edits.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Validator capability (pluggable)                             │
//! │  ├── username_valid / password_strong / phone_valid                    │
//! │  └── RuleValidator: the default rule set, driven by ValidationPolicy   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Field validators (this module, fixed)                        │
//! │  ├── validate_price                                                    │
//! │  └── Keep stored entities inside their invariants (price ≥ 0)          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Record store                                                 │
//! │  └── Username and id uniqueness                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use dealer_core::validation::{RuleValidator, ValidationPolicy, Validator};
//!
//! let validator = RuleValidator::new(ValidationPolicy::default());
//! assert!(validator.username_valid("cust1"));
//! assert!(validator.password_strong("Passw0rd!"));
//! assert!(!validator.phone_valid("555-0100"));
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{NewVehicle, VehicleUpdate};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Validator Capability
// =============================================================================

/// Account input rules consumed by the account service.
///
/// Implementations must be pure: same input, same answer.
pub trait Validator: Send + Sync {
    fn username_valid(&self, username: &str) -> bool;
    fn password_strong(&self, password: &str) -> bool;
    fn phone_valid(&self, phone: &str) -> bool;

    /// Minimum password length, reported in `WeakPassword` errors.
    fn password_min_len(&self) -> usize;
}

/// Tunables for [`RuleValidator`].
///
/// Loaded from the `[validation]` table of `dealer.toml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationPolicy {
    #[serde(default = "default_password_min_len")]
    pub password_min_len: usize,
    #[serde(default = "default_phone_min_len")]
    pub phone_min_len: usize,
    #[serde(default = "default_phone_max_len")]
    pub phone_max_len: usize,
}

fn default_password_min_len() -> usize {
    8
}

fn default_phone_min_len() -> usize {
    7
}

fn default_phone_max_len() -> usize {
    12
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        ValidationPolicy {
            password_min_len: default_password_min_len(),
            phone_min_len: default_phone_min_len(),
            phone_max_len: default_phone_max_len(),
        }
    }
}

/// Default rule set.
///
/// ## Rules
/// - Username: at least 3 characters, all alphanumeric, starts with a letter
/// - Password: at least `password_min_len` characters, with at least one
///   letter, one digit and one non-alphanumeric symbol
/// - Phone: ASCII digits only, length within `phone_min_len..=phone_max_len`
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleValidator {
    policy: ValidationPolicy,
}

impl RuleValidator {
    pub fn new(policy: ValidationPolicy) -> Self {
        RuleValidator { policy }
    }

    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }
}

impl Validator for RuleValidator {
    fn username_valid(&self, username: &str) -> bool {
        let mut chars = username.chars();
        let starts_with_letter = chars.next().is_some_and(char::is_alphabetic);

        starts_with_letter
            && username.chars().count() >= 3
            && username.chars().all(char::is_alphanumeric)
    }

    fn password_strong(&self, password: &str) -> bool {
        if password.chars().count() < self.policy.password_min_len {
            return false;
        }

        let has_letter = password.chars().any(char::is_alphabetic);
        let has_digit = password.chars().any(|c| c.is_numeric());
        let has_symbol = password.chars().any(|c| !c.is_alphanumeric());

        has_letter && has_digit && has_symbol
    }

    fn phone_valid(&self, phone: &str) -> bool {
        !phone.is_empty()
            && phone.chars().all(|c| c.is_ascii_digit())
            && (self.policy.phone_min_len..=self.policy.phone_max_len).contains(&phone.len())
    }

    fn password_min_len(&self) -> usize {
        self.policy.password_min_len
    }
}

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a price. Zero is allowed.
///
/// ## Example
/// ```rust
/// use dealer_core::money::Money;
/// use dealer_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_cents(0)).is_ok());
/// assert!(validate_price(Money::from_cents(-100)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates input for a new vehicle.
///
/// Any name is accepted, including an empty one.
pub fn validate_new_vehicle(new: &NewVehicle) -> ValidationResult<()> {
    validate_price(new.price)
}

/// Validates a single vehicle edit.
pub fn validate_vehicle_update(update: &VehicleUpdate) -> ValidationResult<()> {
    match update {
        VehicleUpdate::Price(price) => validate_price(*price),
        _ => Ok(()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
