//! # Error Types
//!
//! Domain-specific error types for dealer-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  dealer-core errors (this file)                                        │
//! │  ├── CoreError        - Business rule failures                         │
//! │  └── ValidationError  - Field-level input failures                     │
//! │                                                                         │
//! │  dealer-store errors (separate crate)                                  │
//! │  └── StoreError       - Backing file failures, wraps CoreError         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → caller               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every error maps onto one [`ErrorKind`] so callers can branch on the
//! category without matching every variant.

use thiserror::Error;

// =============================================================================
// Error Kind
// =============================================================================

/// Coarse error taxonomy shared by every layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Account or vehicle lookup miss.
    NotFound,
    /// Duplicate username or id.
    Conflict,
    /// Username, password, phone or field rule violation.
    ValidationFailed,
    /// Vehicle not available for purchase.
    PreconditionFailed,
    /// Wrong password or disabled account.
    Unauthorized,
    /// Backing file could not be read or written.
    PersistenceFailed,
}

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No account with this username.
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// No vehicle with this id.
    #[error("Vehicle not found: {0}")]
    VehicleNotFound(String),

    /// Username already registered.
    #[error("Username '{0}' already exists")]
    DuplicateUsername(String),

    /// An entity with this id is already stored.
    ///
    /// Only reachable through an id collision or a hand-edited data file.
    #[error("{entity} id '{id}' already exists")]
    DuplicateId { entity: &'static str, id: String },

    /// Username fails the validator.
    #[error("Invalid username '{0}': must start with a letter, be alphanumeric and at least 3 characters")]
    InvalidUsername(String),

    /// Password fails the validator.
    #[error("Password is too weak: needs at least {min_len} characters with a letter, a digit and a symbol")]
    WeakPassword { min_len: usize },

    /// Non-empty phone fails the validator.
    #[error("Invalid phone number: {0}")]
    InvalidPhone(String),

    /// Stored digest does not match the supplied password.
    #[error("Wrong password for {0}")]
    WrongPassword(String),

    /// Account exists but is disabled.
    #[error("Account {0} is disabled")]
    AccountDisabled(String),

    /// Vehicle is not in the `available` state.
    ///
    /// ## When This Occurs
    /// ```text
    /// purchase("cust1", "car-1a2b3c4d")
    ///      │
    ///      ▼
    /// status == sold | reserved
    ///      │
    ///      ▼
    /// VehicleNotAvailable { vehicle_id: "car-1a2b3c4d", status: "sold" }
    /// ```
    #[error("Vehicle {vehicle_id} is {status}, not available for purchase")]
    VehicleNotAvailable { vehicle_id: String, status: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Returns the taxonomy category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::UserNotFound(_) | CoreError::VehicleNotFound(_) => ErrorKind::NotFound,
            CoreError::DuplicateUsername(_) | CoreError::DuplicateId { .. } => ErrorKind::Conflict,
            CoreError::InvalidUsername(_)
            | CoreError::WeakPassword { .. }
            | CoreError::InvalidPhone(_)
            | CoreError::Validation(_) => ErrorKind::ValidationFailed,
            CoreError::VehicleNotAvailable { .. } => ErrorKind::PreconditionFailed,
            CoreError::WrongPassword(_) | CoreError::AccountDisabled(_) => ErrorKind::Unauthorized,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when a single field doesn't meet requirements.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Numeric value is negative where it must not be.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g., unparsable number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
