//! # Domain Types
//!
//! Entities tracked by the dealership.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Account      │   │    Vehicle      │   │    Invoice      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  username (uniq)│   │  name, color    │   │  customer (snap)│       │
//! │  │  password_digest│   │  model_year     │   │  vehicle (snap) │       │
//! │  │  role           │   │  price (Money)  │   │  price (snap)   │       │
//! │  │  loyalty_points │   │  status         │   │  points_earned  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │      Role       │   │ VehicleStatus   │                              │
//! │  │  Admin          │   │  available      │                              │
//! │  │  SalesAgent     │   │  sold           │                              │
//! │  │  Customer       │   │  reserved       │                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! An invoice copies the customer username, vehicle id and price at the time
//! of sale. Neither is a live reference: removing the account or the vehicle
//! later leaves the invoice intact.
//!
//! ## File Field Names
//! Serde renames keep the on-disk names of existing data files
//! (`password_hash`, `usertype`, `is_active`, `customer`, `car_id`, `date`).
//! The Rust names are accepted as aliases on read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use crate::error::ValidationError;
use crate::identity::{hash_password, new_id, verify_password};
use crate::money::Money;
use crate::{CAR_ID_PREFIX, DEFAULT_GENDER, INVOICE_ID_PREFIX, POINT_VALUE_CENTS, USER_ID_PREFIX};

// =============================================================================
// Role
// =============================================================================

/// What kind of account this is.
///
/// A single tag instead of one type per role: permission checks match on it
/// (see [`crate::permission`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Role {
    Admin,
    #[serde(rename = "SalesEmployee")]
    SalesAgent,
    #[default]
    Customer,
}

impl Role {
    /// All roles, in display order.
    pub const ALL: [Role; 3] = [Role::Admin, Role::SalesAgent, Role::Customer];

    /// The name written to the data file.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::SalesAgent => "SalesEmployee",
            Role::Customer => "Customer",
        }
    }

    /// Reads a stored role, case-insensitively. Anything unrecognised
    /// becomes `Customer`, the role with the fewest permissions.
    pub fn from_stored(raw: &str) -> Role {
        raw.parse().unwrap_or_else(|_| {
            warn!(usertype = %raw, "Unknown usertype, using Customer");
            Role::Customer
        })
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Role::from_stored(&raw))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    /// Case-insensitive; accepts both `SalesEmployee` and `SalesAgent`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "salesemployee" | "salesagent" => Ok(Role::SalesAgent),
            "customer" => Ok(Role::Customer),
            _ => Err(ValidationError::NotAllowed {
                field: "role".to_string(),
                allowed: Role::ALL.iter().map(|r| r.as_str().to_string()).collect(),
            }),
        }
    }
}

// =============================================================================
// Account
// =============================================================================

/// A registered user of the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique, immutable.
    #[serde(default = "default_user_id")]
    pub id: String,

    /// Unique, case-sensitive.
    pub username: String,

    /// Hex SHA-256 of the password. Empty means no password can match.
    #[serde(rename = "password_hash", alias = "password_digest", default)]
    pub password_digest: String,

    #[serde(rename = "usertype", alias = "role", default)]
    pub role: Role,

    #[serde(default)]
    pub phone: String,

    #[serde(default = "default_gender")]
    pub gender: String,

    /// Disabled accounts cannot authenticate.
    #[serde(rename = "is_active", alias = "active", default = "default_true")]
    pub active: bool,

    /// Only ever increased, and only by a purchase.
    #[serde(default)]
    pub loyalty_points: u64,
}

impl Account {
    /// Builds a fresh account: new id, hashed password, active, zero points.
    pub fn register(new: NewAccount) -> Self {
        let gender = if new.gender.trim().is_empty() {
            DEFAULT_GENDER.to_string()
        } else {
            new.gender
        };

        Account {
            id: new_id(USER_ID_PREFIX),
            username: new.username,
            password_digest: hash_password(&new.password),
            role: new.role,
            phone: new.phone,
            gender,
            active: true,
            loyalty_points: 0,
        }
    }

    /// Checks a plaintext password against the stored digest.
    #[inline]
    pub fn password_matches(&self, password: &str) -> bool {
        verify_password(password, &self.password_digest)
    }

    /// Adds earned points. Saturates instead of wrapping.
    #[inline]
    pub fn credit_points(&mut self, points: u64) {
        self.loyalty_points = self.loyalty_points.saturating_add(points);
    }
}

/// Registration input.
///
/// Carries the plaintext password only until [`Account::register`] hashes it.
#[derive(Clone, Default)]
pub struct NewAccount {
    pub username: String,
    pub password: String,
    pub role: Role,
    pub phone: String,
    pub gender: String,
}

impl NewAccount {
    /// Creates registration input with empty phone and default gender.
    pub fn new(username: impl Into<String>, password: impl Into<String>, role: Role) -> Self {
        NewAccount {
            username: username.into(),
            password: password.into(),
            role,
            phone: String::new(),
            gender: String::new(),
        }
    }

    /// Sets the phone number.
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    /// Sets the gender.
    pub fn gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = gender.into();
        self
    }
}

impl fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewAccount")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .field("phone", &self.phone)
            .field("gender", &self.gender)
            .finish()
    }
}

// =============================================================================
// Vehicle Status
// =============================================================================

/// Inventory state of a vehicle. Only `Available` is purchasable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    #[default]
    Available,
    Sold,
    Reserved,
}

impl VehicleStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "available",
            VehicleStatus::Sold => "sold",
            VehicleStatus::Reserved => "reserved",
        }
    }

    /// Reads a stored status, case-insensitively. Anything unrecognised
    /// becomes `Reserved`: the vehicle stays listed but cannot be bought.
    pub fn from_stored(raw: &str) -> VehicleStatus {
        raw.parse().unwrap_or_else(|_| {
            warn!(status = %raw, "Unknown vehicle status, using reserved");
            VehicleStatus::Reserved
        })
    }
}

impl<'de> Deserialize<'de> for VehicleStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(VehicleStatus::from_stored(&raw))
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "available" => Ok(VehicleStatus::Available),
            "sold" => Ok(VehicleStatus::Sold),
            "reserved" => Ok(VehicleStatus::Reserved),
            _ => Err(ValidationError::NotAllowed {
                field: "status".to_string(),
                allowed: vec![
                    "available".to_string(),
                    "sold".to_string(),
                    "reserved".to_string(),
                ],
            }),
        }
    }
}

// =============================================================================
// Vehicle
// =============================================================================

/// A vehicle in inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    #[serde(default = "default_car_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub model_year: i32,
    /// Never negative.
    #[serde(default)]
    pub price: Money,
    #[serde(default)]
    pub color: String,
    /// Free text.
    #[serde(default)]
    pub specs: String,
    #[serde(default)]
    pub status: VehicleStatus,
}

impl Vehicle {
    /// Builds an `Available` vehicle with a fresh id.
    pub fn new(new: NewVehicle) -> Self {
        Vehicle {
            id: new_id(CAR_ID_PREFIX),
            name: new.name,
            model_year: new.model_year,
            price: new.price,
            color: new.color,
            specs: new.specs,
            status: VehicleStatus::Available,
        }
    }

    #[inline]
    pub fn is_available(&self) -> bool {
        self.status == VehicleStatus::Available
    }

    /// Applies one typed edit.
    pub fn apply(&mut self, update: VehicleUpdate) {
        match update {
            VehicleUpdate::Name(name) => self.name = name,
            VehicleUpdate::ModelYear(year) => self.model_year = year,
            VehicleUpdate::Price(price) => self.price = price,
            VehicleUpdate::Color(color) => self.color = color,
            VehicleUpdate::Specs(specs) => self.specs = specs,
            VehicleUpdate::Status(status) => self.status = status,
        }
    }

    /// Search match: substring of name or color, or exact id.
    ///
    /// `term_lower` must already be lowercased.
    pub fn matches(&self, term_lower: &str) -> bool {
        self.name.to_lowercase().contains(term_lower)
            || self.color.to_lowercase().contains(term_lower)
            || self.id.to_lowercase() == term_lower
    }
}

/// Input for adding a vehicle.
#[derive(Debug, Clone, Default)]
pub struct NewVehicle {
    pub name: String,
    pub model_year: i32,
    pub price: Money,
    pub color: String,
    pub specs: String,
}

impl NewVehicle {
    pub fn new(
        name: impl Into<String>,
        model_year: i32,
        price: Money,
        color: impl Into<String>,
    ) -> Self {
        NewVehicle {
            name: name.into(),
            model_year,
            price,
            color: color.into(),
            specs: String::new(),
        }
    }

    pub fn specs(mut self, specs: impl Into<String>) -> Self {
        self.specs = specs.into();
        self
    }
}

// =============================================================================
// Vehicle Update
// =============================================================================

/// One editable vehicle field with its new value.
///
/// `id` is not editable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VehicleUpdate {
    Name(String),
    ModelYear(i32),
    Price(Money),
    Color(String),
    Specs(String),
    Status(VehicleStatus),
}

impl VehicleUpdate {
    /// Field names accepted by [`VehicleUpdate::parse`].
    pub const FIELDS: [&'static str; 6] =
        ["name", "model_year", "price", "color", "specs", "status"];

    /// Parses a `field = value` pair from text input.
    ///
    /// ## Returns
    /// * `Ok(Some(update))` - recognized field, valid value
    /// * `Ok(None)` - unrecognized field name, skipped on purpose
    /// * `Err(_)` - recognized field, value does not parse
    pub fn parse(field: &str, value: &str) -> Result<Option<Self>, ValidationError> {
        let update = match field.trim() {
            "name" => VehicleUpdate::Name(value.to_string()),
            "model_year" => {
                let year = value.trim().parse().map_err(|_| ValidationError::InvalidFormat {
                    field: "model_year".to_string(),
                    reason: "expected a whole year".to_string(),
                })?;
                VehicleUpdate::ModelYear(year)
            }
            "price" => VehicleUpdate::Price(Money::parse_decimal(value)?),
            "color" => VehicleUpdate::Color(value.to_string()),
            "specs" => VehicleUpdate::Specs(value.to_string()),
            "status" => VehicleUpdate::Status(value.parse()?),
            _ => return Ok(None),
        };
        Ok(Some(update))
    }

    /// The field this update targets.
    pub const fn field(&self) -> &'static str {
        match self {
            VehicleUpdate::Name(_) => "name",
            VehicleUpdate::ModelYear(_) => "model_year",
            VehicleUpdate::Price(_) => "price",
            VehicleUpdate::Color(_) => "color",
            VehicleUpdate::Specs(_) => "specs",
            VehicleUpdate::Status(_) => "status",
        }
    }
}

// =============================================================================
// Invoice
// =============================================================================

/// Record of one completed sale. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    #[serde(default = "default_invoice_id")]
    pub id: String,

    /// Username at time of sale (not a live reference).
    #[serde(rename = "customer", alias = "customer_username", default)]
    pub customer_username: String,

    /// Vehicle id at time of sale (not enforced to still exist).
    #[serde(rename = "car_id", alias = "vehicle_id", default)]
    pub vehicle_id: String,

    /// Vehicle price at time of sale (frozen).
    #[serde(default)]
    pub price: Money,

    #[serde(default)]
    pub points_earned: u64,

    #[serde(
        rename = "date",
        alias = "created_at",
        default,
        deserialize_with = "timestamp::deserialize"
    )]
    pub created_at: DateTime<Utc>,
}

impl Invoice {
    /// Freezes a sale of `vehicle` to `customer_username`.
    pub fn for_sale(customer_username: &str, vehicle: &Vehicle, points_earned: u64) -> Self {
        Invoice {
            id: new_id(INVOICE_ID_PREFIX),
            customer_username: customer_username.to_string(),
            vehicle_id: vehicle.id.clone(),
            price: vehicle.price,
            points_earned,
            created_at: Utc::now(),
        }
    }
}

// =============================================================================
// Loyalty
// =============================================================================

/// One point per whole 1000 of price, truncated. Never negative.
///
/// ## Example
/// ```rust
/// use dealer_core::{points_for_price, Money};
///
/// assert_eq!(points_for_price(Money::from_major_minor(20_000, 0)), 20);
/// assert_eq!(points_for_price(Money::from_major_minor(999, 99)), 0);
/// ```
pub fn points_for_price(price: Money) -> u64 {
    let points = price.whole_units_of(Money::from_cents(POINT_VALUE_CENTS));
    u64::try_from(points).unwrap_or(0)
}

// =============================================================================
// Serde Defaults
// =============================================================================

fn default_user_id() -> String {
    new_id(USER_ID_PREFIX)
}

fn default_car_id() -> String {
    new_id(CAR_ID_PREFIX)
}

fn default_invoice_id() -> String {
    new_id(INVOICE_ID_PREFIX)
}

fn default_gender() -> String {
    DEFAULT_GENDER.to_string()
}

fn default_true() -> bool {
    true
}

/// Invoice timestamp parsing.
///
/// Written as RFC 3339. Read as RFC 3339, the legacy `YYYY-MM-DD HH:MM:SS`
/// form (taken as UTC), or an empty string (Unix epoch).
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
    use serde::{de, Deserialize, Deserializer};

    const LEGACY_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

    pub fn parse(raw: &str) -> Result<DateTime<Utc>, String> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(DateTime::<Utc>::default());
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Ok(dt.with_timezone(&Utc));
        }
        LEGACY_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|naive| Utc.from_utc_datetime(&naive))
            .ok_or_else(|| format!("invalid timestamp '{}'", raw))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(de::Error::custom)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_register_defaults() {
        let account = Account::register(NewAccount::new("cust1", "Passw0rd!", Role::Customer));
        assert!(account.id.starts_with("user-"));
        assert!(account.active);
        assert_eq!(account.loyalty_points, 0);
        assert_eq!(account.gender, "M");
        assert_eq!(account.password_digest, hash_password("Passw0rd!"));
        assert!(account.password_matches("Passw0rd!"));
    }

    #[test]
    fn test_new_account_debug_redacts_password() {
        let new = NewAccount::new("cust1", "Passw0rd!", Role::Customer);
        let debug = format!("{:?}", new);
        assert!(!debug.contains("Passw0rd!"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_role_file_names() {
        assert_eq!(
            serde_json::to_string(&Role::SalesAgent).unwrap(),
            "\"SalesEmployee\""
        );
        let role: Role = serde_json::from_str("\"SalesAgent\"").unwrap();
        assert_eq!(role, Role::SalesAgent);
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert!("manager".parse::<Role>().is_err());
    }

    #[test]
    fn test_account_tolerates_missing_fields() {
        let account: Account = serde_json::from_str(r#"{"username": "old1", "extra": 1}"#).unwrap();
        assert_eq!(account.username, "old1");
        assert!(account.id.starts_with("user-"));
        assert_eq!(account.role, Role::Customer);
        assert_eq!(account.gender, "M");
        assert!(account.active);
        assert!(account.password_digest.is_empty());
        assert!(!account.password_matches(""));
    }

    #[test]
    fn test_account_requires_username() {
        assert!(serde_json::from_str::<Account>(r#"{"id": "user-1"}"#).is_err());
    }

    #[test]
    fn test_account_file_field_names() {
        let account = Account::register(NewAccount::new("admin1", "Passw0rd!", Role::Admin));
        let value = serde_json::to_value(&account).unwrap();
        assert!(value.get("password_hash").is_some());
        assert_eq!(value["usertype"], "Admin");
        assert_eq!(value["is_active"], true);
        assert!(value.get("password_digest").is_none());
    }

    #[test]
    fn test_vehicle_defaults_and_status() {
        let vehicle: Vehicle = serde_json::from_str(r#"{"name": "Civic"}"#).unwrap();
        assert_eq!(vehicle.status, VehicleStatus::Available);
        assert_eq!(vehicle.price, Money::zero());
        assert!(vehicle.id.starts_with("car-"));

        let sold: Vehicle =
            serde_json::from_str(r#"{"id": "car-1", "name": "Civic", "status": "sold"}"#).unwrap();
        assert!(!sold.is_available());
    }

    #[test]
    fn test_stored_enums_are_lenient() {
        let status: VehicleStatus = serde_json::from_str("\"Sold\"").unwrap();
        assert_eq!(status, VehicleStatus::Sold);
        let status: VehicleStatus = serde_json::from_str("\"in transit\"").unwrap();
        assert_eq!(status, VehicleStatus::Reserved);
        assert_eq!(
            serde_json::to_string(&VehicleStatus::Sold).unwrap(),
            "\"sold\""
        );

        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Admin);
        let role: Role = serde_json::from_str("\"Manager\"").unwrap();
        assert_eq!(role, Role::Customer);
        assert!(serde_json::from_str::<VehicleStatus>("3").is_err());
    }

    #[test]
    fn test_vehicle_matches() {
        let mut vehicle = Vehicle::new(NewVehicle::new(
            "Civic",
            2021,
            Money::from_major_minor(20_000, 0),
            "Dark Red",
        ));
        vehicle.id = "car-ABCD1234".to_string();

        assert!(vehicle.matches("red"));
        assert!(vehicle.matches("civ"));
        assert!(vehicle.matches("car-abcd1234"));
        assert!(!vehicle.matches("car-abcd"));
        assert!(!vehicle.matches("blue"));
    }

    #[test]
    fn test_vehicle_update_parse() {
        assert_eq!(
            VehicleUpdate::parse("price", "18500").unwrap(),
            Some(VehicleUpdate::Price(Money::from_major_minor(18_500, 0)))
        );
        assert_eq!(
            VehicleUpdate::parse("status", "Reserved").unwrap(),
            Some(VehicleUpdate::Status(VehicleStatus::Reserved))
        );
        assert_eq!(
            VehicleUpdate::parse("model_year", "2022").unwrap(),
            Some(VehicleUpdate::ModelYear(2022))
        );

        assert_eq!(VehicleUpdate::parse("wheels", "4").unwrap(), None);
        assert_eq!(VehicleUpdate::parse("id", "car-x").unwrap(), None);

        assert!(VehicleUpdate::parse("model_year", "soon").is_err());
        assert!(VehicleUpdate::parse("status", "stolen").is_err());
    }

    #[test]
    fn test_vehicle_apply() {
        let mut vehicle = Vehicle::new(NewVehicle::new("Civic", 2021, Money::zero(), "blue"));
        vehicle.apply(VehicleUpdate::Color("green".to_string()));
        vehicle.apply(VehicleUpdate::Status(VehicleStatus::Reserved));
        assert_eq!(vehicle.color, "green");
        assert_eq!(vehicle.status, VehicleStatus::Reserved);
    }

    #[test]
    fn test_invoice_snapshot() {
        let vehicle = Vehicle::new(NewVehicle::new(
            "Civic",
            2021,
            Money::from_major_minor(20_000, 0),
            "blue",
        ));
        let invoice = Invoice::for_sale("cust1", &vehicle, 20);
        assert!(invoice.id.starts_with("inv-"));
        assert_eq!(invoice.vehicle_id, vehicle.id);
        assert_eq!(invoice.price, vehicle.price);
        assert_eq!(invoice.points_earned, 20);
    }

    #[test]
    fn test_invoice_legacy_fields() {
        let invoice: Invoice = serde_json::from_str(
            r#"{"id": "inv-1", "customer": "cust1", "car_id": "car-1",
                "price": 15000.0, "points_earned": 15, "date": "2024-03-05 14:30:00"}"#,
        )
        .unwrap();
        assert_eq!(invoice.customer_username, "cust1");
        assert_eq!(invoice.vehicle_id, "car-1");
        assert_eq!(invoice.price.cents(), 1_500_000);
        assert_eq!(invoice.created_at.year(), 2024);
        assert_eq!(invoice.created_at.hour(), 14);

        let undated: Invoice = serde_json::from_str(r#"{"date": ""}"#).unwrap();
        assert_eq!(undated.created_at, DateTime::<Utc>::default());
    }

    #[test]
    fn test_invoice_timestamp_round_trip() {
        let vehicle = Vehicle::new(NewVehicle::new("Civic", 2021, Money::zero(), "blue"));
        let invoice = Invoice::for_sale("cust1", &vehicle, 0);
        let json = serde_json::to_string(&invoice).unwrap();
        let back: Invoice = serde_json::from_str(&json).unwrap();
        assert_eq!(back, invoice);
    }

    #[test]
    fn test_points_for_price() {
        assert_eq!(points_for_price(Money::from_major_minor(15_000, 0)), 15);
        assert_eq!(points_for_price(Money::from_major_minor(20_000, 0)), 20);
        assert_eq!(points_for_price(Money::from_major_minor(1_999, 99)), 1);
        assert_eq!(points_for_price(Money::zero()), 0);
        assert_eq!(points_for_price(Money::from_cents(-500_000)), 0);
    }

    #[test]
    fn test_credit_points_saturates() {
        let mut account = Account::register(NewAccount::new("cust1", "Passw0rd!", Role::Customer));
        account.loyalty_points = u64::MAX - 1;
        account.credit_points(5);
        assert_eq!(account.loyalty_points, u64::MAX);
    }
}
