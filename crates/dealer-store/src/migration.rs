//! # Legacy Migration
//!
//! Converts the older, looser data file into the current shape.
//!
//! ## Field Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Legacy                           Current                               │
//! │  ──────                           ───────                               │
//! │  users: {username, password, ..}  Account (password hashed)             │
//! │  users: [name, pw, type, phone,   Account (positional, active,          │
//! │          gender]                    zero points)                        │
//! │  cars:  {model, <extra keys>}     Vehicle (model -> model_year,         │
//! │                                     extras folded into specs)           │
//! │  invoices: {customer, car_id, ..} Invoice (copied field by field)       │
//! │                                                                         │
//! │  Missing ids: user-{username}, car-{name}, inv-{customer}               │
//! │  Taken ids:   first keeps it, later ones get -2, -3, ...                │
//! │  Missing password: "123456"                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every record is kept. Values that do not parse fall back to a safe value
//! and are logged at `warn`.

use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use dealer_core::identity::hash_password;
use dealer_core::types::timestamp;
use dealer_core::{
    Account, Invoice, Money, Role, Vehicle, VehicleStatus, CAR_ID_PREFIX, DEFAULT_GENDER,
    INVOICE_ID_PREFIX, USER_ID_PREFIX,
};

use crate::error::{StoreError, StoreResult};
use crate::store::{write_snapshot, Collections};

/// Password given to legacy users that never had one.
pub const LEGACY_DEFAULT_PASSWORD: &str = "123456";

/// Car keys that map to a field rather than into `specs`.
const CAR_FIELDS: [&str; 8] = [
    "id",
    "name",
    "model",
    "model_year",
    "price",
    "color",
    "status",
    "specs",
];

/// What a migration produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub users: usize,
    pub cars: usize,
    pub invoices: usize,
    /// Users that had no password and received the default.
    pub defaulted_passwords: usize,
}

/// Output options for [`migrate_file`].
#[derive(Debug, Clone, Copy)]
pub struct MigrateOptions {
    /// Replace an existing output file.
    pub force: bool,
    pub pretty: bool,
}

impl Default for MigrateOptions {
    fn default() -> Self {
        MigrateOptions {
            force: false,
            pretty: true,
        }
    }
}

/// Reads the legacy file at `from` and writes the current shape to `to`.
///
/// ## Errors
/// * `OutputExists` - `to` exists and `options.force` is false
/// * `PersistenceFailed` - `from` unreadable or not JSON, or `to` unwritable
/// * `Migration` - the legacy document has the wrong shape
pub fn migrate_file(
    from: &Path,
    to: &Path,
    options: MigrateOptions,
) -> StoreResult<MigrationReport> {
    if to.exists() && !options.force {
        return Err(StoreError::OutputExists(to.to_path_buf()));
    }

    info!(from = %from.display(), to = %to.display(), "Migrating legacy data");

    let bytes = fs::read(from).map_err(|e| StoreError::persistence(from, e))?;
    let legacy: Value = serde_json::from_slice(&bytes)
        .map_err(|e| StoreError::persistence(from, format!("malformed data: {}", e)))?;

    let (collections, report) = migrate_value(&legacy)?;
    write_snapshot(to, &collections, options.pretty)?;

    info!(
        users = report.users,
        cars = report.cars,
        invoices = report.invoices,
        defaulted_passwords = report.defaulted_passwords,
        "Migration complete"
    );
    Ok(report)
}

/// Converts a parsed legacy document.
pub fn migrate_value(legacy: &Value) -> StoreResult<(Collections, MigrationReport)> {
    let root = legacy
        .as_object()
        .ok_or_else(|| StoreError::Migration("top level must be an object".to_string()))?;

    let mut collections = Collections::default();
    let mut report = MigrationReport::default();

    let mut taken = HashSet::new();
    for (index, raw) in section(root, "users")?.iter().enumerate() {
        let (mut account, defaulted) = match raw {
            Value::Object(fields) => migrate_user_map(fields),
            Value::Array(items) => migrate_user_row(items),
            _ => {
                return Err(StoreError::Migration(format!(
                    "users[{}] is neither an object nor a list",
                    index
                )))
            }
        };
        if defaulted {
            report.defaulted_passwords += 1;
        }
        account.id = claim_id(&mut taken, account.id);
        collections.users.push(account);
    }

    let mut taken = HashSet::new();
    for (index, raw) in section(root, "cars")?.iter().enumerate() {
        let fields = raw
            .as_object()
            .ok_or_else(|| StoreError::Migration(format!("cars[{}] is not an object", index)))?;
        let mut vehicle = migrate_car(fields);
        vehicle.id = claim_id(&mut taken, vehicle.id);
        collections.cars.push(vehicle);
    }

    let mut taken = HashSet::new();
    for (index, raw) in section(root, "invoices")?.iter().enumerate() {
        let fields = raw.as_object().ok_or_else(|| {
            StoreError::Migration(format!("invoices[{}] is not an object", index))
        })?;
        let mut invoice = migrate_invoice(fields);
        invoice.id = claim_id(&mut taken, invoice.id);
        collections.invoices.push(invoice);
    }

    report.users = collections.users.len();
    report.cars = collections.cars.len();
    report.invoices = collections.invoices.len();
    Ok((collections, report))
}

fn section<'a>(root: &'a Map<String, Value>, key: &str) -> StoreResult<&'a [Value]> {
    match root.get(key) {
        None | Some(Value::Null) => Ok(&[][..]),
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(_) => Err(StoreError::Migration(format!("'{}' must be a list", key))),
    }
}

/// Returns `id` if it is free, otherwise the first free `id-2`, `id-3`, ...
fn claim_id(taken: &mut HashSet<String>, id: String) -> String {
    if taken.insert(id.clone()) {
        return id;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{}-{}", id, n);
        if taken.insert(candidate.clone()) {
            warn!(%id, renamed = %candidate, "Duplicate id, renumbered");
            return candidate;
        }
        n += 1;
    }
}

// =============================================================================
// Records
// =============================================================================

fn migrate_user_map(fields: &Map<String, Value>) -> (Account, bool) {
    let username = text(fields.get("username")).unwrap_or_default();
    let (password, defaulted) = match fields.get("password") {
        Some(value) => (text(Some(value)).unwrap_or_default(), false),
        None => (LEGACY_DEFAULT_PASSWORD.to_string(), true),
    };

    let account = Account {
        id: text(fields.get("id"))
            .unwrap_or_else(|| format!("{}-{}", USER_ID_PREFIX, fallback(&username))),
        password_digest: hash_password(&password),
        role: role(fields.get("usertype")),
        phone: text(fields.get("phone")).unwrap_or_default(),
        gender: text(fields.get("gender")).unwrap_or_else(|| DEFAULT_GENDER.to_string()),
        active: fields.get("is_active").and_then(Value::as_bool).unwrap_or(true),
        loyalty_points: fields
            .get("loyalty_points")
            .and_then(Value::as_u64)
            .unwrap_or(0),
        username,
    };
    (account, defaulted)
}

/// `[username, password, usertype, phone, gender]`, any suffix may be missing.
fn migrate_user_row(items: &[Value]) -> (Account, bool) {
    let username = text(items.first()).unwrap_or_else(|| "unknown".to_string());
    let (password, defaulted) = match items.get(1) {
        Some(value) => (text(Some(value)).unwrap_or_default(), false),
        None => (LEGACY_DEFAULT_PASSWORD.to_string(), true),
    };

    let account = Account {
        id: format!("{}-{}", USER_ID_PREFIX, username),
        password_digest: hash_password(&password),
        role: role(items.get(2)),
        phone: text(items.get(3)).unwrap_or_default(),
        gender: text(items.get(4)).unwrap_or_else(|| DEFAULT_GENDER.to_string()),
        active: true,
        loyalty_points: 0,
        username,
    };
    (account, defaulted)
}

fn migrate_car(fields: &Map<String, Value>) -> Vehicle {
    let name = text(fields.get("name")).unwrap_or_default();

    let mut specs: Vec<String> = fields
        .iter()
        .filter(|(key, _)| !CAR_FIELDS.contains(&key.as_str()))
        .map(|(key, value)| format!("{}:{}", key, plain(value)))
        .collect();
    if let Some(own) = text(fields.get("specs")).filter(|s| !s.trim().is_empty()) {
        specs.push(own);
    }

    let status = text(fields.get("status"))
        .map(|raw| VehicleStatus::from_stored(&raw))
        .unwrap_or_default();

    Vehicle {
        id: text(fields.get("id"))
            .unwrap_or_else(|| format!("{}-{}", CAR_ID_PREFIX, fallback(&name))),
        model_year: year(fields.get("model").or_else(|| fields.get("model_year"))),
        price: money(fields.get("price")),
        color: text(fields.get("color")).unwrap_or_default(),
        specs: specs.join(", "),
        status,
        name,
    }
}

fn migrate_invoice(fields: &Map<String, Value>) -> Invoice {
    let customer = text(fields.get("customer")).unwrap_or_default();
    let date = text(fields.get("date")).unwrap_or_default();
    let created_at = timestamp::parse(&date).unwrap_or_else(|reason| {
        warn!(%customer, %reason, "Unreadable invoice date, using epoch");
        Default::default()
    });

    Invoice {
        id: text(fields.get("id"))
            .unwrap_or_else(|| format!("{}-{}", INVOICE_ID_PREFIX, fallback(&customer))),
        vehicle_id: text(fields.get("car_id")).unwrap_or_default(),
        price: money(fields.get("price")),
        points_earned: fields
            .get("points_earned")
            .and_then(Value::as_u64)
            .unwrap_or(0),
        created_at,
        customer_username: customer,
    }
}

// =============================================================================
// Value Helpers
// =============================================================================

/// Strings as-is, numbers and booleans stringified, null as absent.
fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        other => Some(plain(other)),
    }
}

fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn fallback(key: &str) -> &str {
    if key.is_empty() {
        "xxx"
    } else {
        key
    }
}

fn role(value: Option<&Value>) -> Role {
    text(value)
        .map(|raw| Role::from_stored(&raw))
        .unwrap_or_default()
}

fn year(value: Option<&Value>) -> i32 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.and_then(|y| i32::try_from(y).ok()).unwrap_or(0)
}

fn money(value: Option<&Value>) -> Money {
    value
        .filter(|v| !v.is_null())
        .and_then(|v| serde_json::from_value::<Money>(v.clone()).ok())
        .unwrap_or_default()
}

// =============================================================================
// Unit Tests
// =============================================================================
