//! # Record Store
//!
//! In-memory collections backed by one JSON file.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Record Store                                   │
//! │                                                                         │
//! │  RecordStore::open(config) ← load() the backing file (or create it)    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │        RwLock<Collections>              │                           │
//! │  │  users: Vec<Account>                    │                           │
//! │  │  cars: Vec<Vehicle>                     │                           │
//! │  │  invoices: Vec<Invoice>                 │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                         │                                       │
//! │       │ read(|c| ..)            │ transact(|c| ..)                      │
//! │       ▼                         ▼                                       │
//! │  shared lock,              exclusive lock held across                   │
//! │  never persists            mutate ──► save ──► release                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Atomic Save
//! The full snapshot is written to a uniquely named sibling
//! (`data_store.<uuid>.tmp`), synced, then renamed over the target. A crash
//! mid-write leaves the previous file intact.
//!
//! ## Failure Semantics
//! A section that returns `Err` persists nothing. Sections must check their
//! preconditions before mutating: there is no rollback of in-memory changes.
//! A failed save after a successful mutation leaves memory ahead of the file;
//! the error is logged and returned.

use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{ErrorKind as IoErrorKind, Write};
use std::path::Path;
use std::sync::RwLock;
use tracing::{debug, error, info};
use uuid::Uuid;

use dealer_core::{Account, CoreError, CoreResult, Invoice, Vehicle};

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};

// =============================================================================
// Collections
// =============================================================================

/// Everything the backing file holds, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collections {
    #[serde(default)]
    pub users: Vec<Account>,
    #[serde(default)]
    pub cars: Vec<Vehicle>,
    #[serde(default)]
    pub invoices: Vec<Invoice>,
}

impl Collections {
    pub fn find_user_by_username(&self, username: &str) -> Option<&Account> {
        self.users.iter().find(|u| u.username == username)
    }

    pub fn find_user_by_username_mut(&mut self, username: &str) -> Option<&mut Account> {
        self.users.iter_mut().find(|u| u.username == username)
    }

    pub fn find_user_by_id(&self, id: &str) -> Option<&Account> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn find_car_by_id(&self, id: &str) -> Option<&Vehicle> {
        self.cars.iter().find(|c| c.id == id)
    }

    pub fn find_car_by_id_mut(&mut self, id: &str) -> Option<&mut Vehicle> {
        self.cars.iter_mut().find(|c| c.id == id)
    }

    /// Appends an account.
    ///
    /// ## Errors
    /// * `DuplicateUsername` - username already taken
    /// * `DuplicateId` - generated id collided with an existing one
    pub fn insert_user(&mut self, account: Account) -> CoreResult<()> {
        if self.find_user_by_username(&account.username).is_some() {
            return Err(CoreError::DuplicateUsername(account.username));
        }
        if self.find_user_by_id(&account.id).is_some() {
            return Err(CoreError::DuplicateId {
                entity: "user",
                id: account.id,
            });
        }
        self.users.push(account);
        Ok(())
    }

    /// Appends a vehicle, refusing an id that is already present.
    pub fn insert_car(&mut self, vehicle: Vehicle) -> CoreResult<()> {
        if self.find_car_by_id(&vehicle.id).is_some() {
            return Err(CoreError::DuplicateId {
                entity: "car",
                id: vehicle.id,
            });
        }
        self.cars.push(vehicle);
        Ok(())
    }

    /// Appends an invoice, refusing an id that is already present.
    pub fn insert_invoice(&mut self, invoice: Invoice) -> CoreResult<()> {
        if self.invoices.iter().any(|i| i.id == invoice.id) {
            return Err(CoreError::DuplicateId {
                entity: "invoice",
                id: invoice.id,
            });
        }
        self.invoices.push(invoice);
        Ok(())
    }
}

// =============================================================================
// Record Store
// =============================================================================

/// Owner of all entity collections and their file persistence.
///
/// ## Example
/// ```rust,no_run
/// use dealer_store::{RecordStore, StoreConfig};
///
/// let store = RecordStore::open(StoreConfig::new("data_store.json"))?;
/// let cars = store.read(|c| c.cars.len())?;
/// # Ok::<(), dealer_store::StoreError>(())
/// ```
#[derive(Debug)]
pub struct RecordStore {
    config: StoreConfig,
    state: RwLock<Collections>,
}

impl RecordStore {
    /// Opens the store, creating the backing file if it is absent.
    ///
    /// ## Errors
    /// `PersistenceFailed` if the file cannot be read or parsed, or cannot be
    /// created. Callers treat this as fatal.
    pub fn open(config: StoreConfig) -> StoreResult<Self> {
        info!(path = %config.data_path.display(), "Opening record store");

        let store = RecordStore {
            config,
            state: RwLock::new(Collections::default()),
        };
        store.load()?;
        Ok(store)
    }

    /// Replaces memory with the contents of the backing file.
    ///
    /// An absent file yields empty collections, which are persisted at once.
    pub fn load(&self) -> StoreResult<()> {
        let path = &self.config.data_path;
        let mut state = self.state.write().map_err(|_| StoreError::LockPoisoned)?;

        match fs::read(path) {
            Ok(bytes) => {
                *state = serde_json::from_slice(&bytes)
                    .map_err(|e| StoreError::persistence(path, format!("malformed data: {}", e)))?;
                info!(
                    users = state.users.len(),
                    cars = state.cars.len(),
                    invoices = state.invoices.len(),
                    "Record store loaded"
                );
            }
            Err(e) if e.kind() == IoErrorKind::NotFound => {
                info!(path = %path.display(), "Backing file absent, creating empty store");
                *state = Collections::default();
                write_snapshot(path, &*state, self.config.pretty)?;
            }
            Err(e) => return Err(StoreError::persistence(path, e)),
        }

        Ok(())
    }

    /// Writes the current snapshot to the backing file.
    ///
    /// Takes the exclusive lock so saves never interleave.
    pub fn save(&self) -> StoreResult<()> {
        let state = self.state.write().map_err(|_| StoreError::LockPoisoned)?;
        write_snapshot(&self.config.data_path, &*state, self.config.pretty)
    }

    /// Runs `f` under the shared lock. Never persists.
    pub fn read<T, F>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&Collections) -> T,
    {
        let state = self.state.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(f(&*state))
    }

    /// Runs `f` under the exclusive lock and persists once if it succeeds.
    ///
    /// ## Returns
    /// * `Ok(T)` - `f` succeeded and the snapshot is on disk
    /// * `Err(StoreError::Core)` - `f` rejected the operation; nothing saved
    /// * `Err(StoreError::PersistenceFailed)` - `f` succeeded, save did not
    pub fn transact<T, F>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&mut Collections) -> CoreResult<T>,
    {
        let mut state = self.state.write().map_err(|_| StoreError::LockPoisoned)?;
        let value = f(&mut *state)?;

        if let Err(err) = write_snapshot(&self.config.data_path, &*state, self.config.pretty) {
            error!(error = %err, "Save failed after mutation; memory and file diverged");
            return Err(err);
        }

        Ok(value)
    }

    pub fn find_user_by_username(&self, username: &str) -> StoreResult<Option<Account>> {
        self.read(|c| c.find_user_by_username(username).cloned())
    }

    pub fn find_user_by_id(&self, id: &str) -> StoreResult<Option<Account>> {
        self.read(|c| c.find_user_by_id(id).cloned())
    }

    pub fn find_car_by_id(&self, id: &str) -> StoreResult<Option<Vehicle>> {
        self.read(|c| c.find_car_by_id(id).cloned())
    }

    /// Clone of the whole snapshot.
    pub fn snapshot(&self) -> StoreResult<Collections> {
        self.read(Collections::clone)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.config.data_path
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }
}

// =============================================================================
// File I/O
// =============================================================================

/// Serializes `collections` and atomically replaces the file at `path`.
///
/// Parent directories are created as needed.
pub fn write_snapshot(path: &Path, collections: &Collections, pretty: bool) -> StoreResult<()> {
    let bytes = if pretty {
        serde_json::to_vec_pretty(collections)
    } else {
        serde_json::to_vec(collections)
    }
    .map_err(|e| StoreError::persistence(path, format!("encode failed: {}", e)))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| StoreError::persistence(path, e))?;
    }

    let tmp = path.with_extension(format!("{}.tmp", Uuid::new_v4().simple()));
    if let Err(e) = write_synced(&tmp, &bytes).and_then(|()| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(StoreError::persistence(path, e));
    }

    debug!(
        path = %path.display(),
        bytes = bytes.len(),
        users = collections.users.len(),
        cars = collections.cars.len(),
        invoices = collections.invoices.len(),
        "Snapshot saved"
    );
    Ok(())
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.flush()?;
    file.sync_all()
}

// =============================================================================
// Unit Tests
// =============================================================================
