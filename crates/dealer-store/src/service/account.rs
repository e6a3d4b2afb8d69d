//! # Account Service
//!
//! Registration, authentication and account administration.
//!
//! ## Registration Checks
//! ```text
//! register(new)
//!    │
//!    ├── username rule      ──► InvalidUsername
//!    ├── username taken     ──► DuplicateUsername
//!    ├── password rule      ──► WeakPassword
//!    ├── phone rule (if set)──► InvalidPhone
//!    │
//!    └── append + save ──► Account
//! ```
//! Checks run in this order inside one exclusive section, so two
//! registrations of the same name cannot both pass the duplicate check.

use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

use dealer_core::{Account, CoreError, NewAccount, Role, Validator};

use crate::error::StoreResult;
use crate::store::RecordStore;

/// Account operations.
#[derive(Clone)]
pub struct AccountService {
    store: Arc<RecordStore>,
    validator: Arc<dyn Validator>,
}

impl fmt::Debug for AccountService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountService")
            .field("store", &self.store.path())
            .finish_non_exhaustive()
    }
}

impl AccountService {
    pub fn new(store: Arc<RecordStore>, validator: Arc<dyn Validator>) -> Self {
        AccountService { store, validator }
    }

    /// Creates an account and persists it.
    ///
    /// An empty phone is accepted; a non-empty one must pass the phone rule.
    pub fn register(&self, new: NewAccount) -> StoreResult<Account> {
        debug!(username = %new.username, role = %new.role, "Registering account");

        let account = self.store.transact(|c| {
            if !self.validator.username_valid(&new.username) {
                return Err(CoreError::InvalidUsername(new.username.clone()));
            }
            if c.find_user_by_username(&new.username).is_some() {
                return Err(CoreError::DuplicateUsername(new.username.clone()));
            }
            if !self.validator.password_strong(&new.password) {
                return Err(CoreError::WeakPassword {
                    min_len: self.validator.password_min_len(),
                });
            }
            if !new.phone.is_empty() && !self.validator.phone_valid(&new.phone) {
                return Err(CoreError::InvalidPhone(new.phone.clone()));
            }

            let account = Account::register(new);
            c.insert_user(account.clone())?;
            Ok(account)
        })?;

        info!(
            id = %account.id,
            username = %account.username,
            role = %account.role,
            "Account registered"
        );
        Ok(account)
    }

    /// Verifies credentials. Never mutates or saves.
    ///
    /// ## Errors
    /// `UserNotFound`, `WrongPassword`, `AccountDisabled`, checked in that order.
    pub fn authenticate(&self, username: &str, password: &str) -> StoreResult<Account> {
        let account = self
            .store
            .find_user_by_username(username)?
            .ok_or_else(|| CoreError::UserNotFound(username.to_string()))?;

        if !account.password_matches(password) {
            warn!(%username, "Authentication failed: wrong password");
            return Err(CoreError::WrongPassword(username.to_string()).into());
        }
        if !account.active {
            warn!(%username, "Authentication refused: account disabled");
            return Err(CoreError::AccountDisabled(username.to_string()).into());
        }

        debug!(%username, "Authenticated");
        Ok(account)
    }

    /// Enables or disables an account.
    pub fn set_active(&self, username: &str, active: bool) -> StoreResult<Account> {
        let account = self.store.transact(|c| {
            let account = c
                .find_user_by_username_mut(username)
                .ok_or_else(|| CoreError::UserNotFound(username.to_string()))?;
            account.active = active;
            Ok(account.clone())
        })?;

        info!(%username, active, "Account active flag set");
        Ok(account)
    }

    /// Flips the active flag and returns the updated account.
    pub fn toggle_active(&self, username: &str) -> StoreResult<Account> {
        let account = self.store.transact(|c| {
            let account = c
                .find_user_by_username_mut(username)
                .ok_or_else(|| CoreError::UserNotFound(username.to_string()))?;
            account.active = !account.active;
            Ok(account.clone())
        })?;

        info!(%username, active = account.active, "Account active flag toggled");
        Ok(account)
    }

    /// Deletes an account. Its invoices stay, keyed by username.
    pub fn remove(&self, username: &str) -> StoreResult<Account> {
        let removed = self.store.transact(|c| {
            let index = c
                .users
                .iter()
                .position(|u| u.username == username)
                .ok_or_else(|| CoreError::UserNotFound(username.to_string()))?;
            Ok(c.users.remove(index))
        })?;

        info!(id = %removed.id, %username, "Account removed");
        Ok(removed)
    }

    /// All accounts in insertion order.
    pub fn list(&self) -> StoreResult<Vec<Account>> {
        self.store.read(|c| c.users.clone())
    }

    pub fn find(&self, username: &str) -> StoreResult<Option<Account>> {
        self.store.find_user_by_username(username)
    }

    /// Whether any Admin account exists. Used to bootstrap the first admin.
    pub fn has_admin(&self) -> StoreResult<bool> {
        self.store.read(|c| c.users.iter().any(|u| u.role == Role::Admin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;
    use dealer_core::{ErrorKind, RuleValidator};

    fn service() -> (tempfile::TempDir, AccountService) {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::open(StoreConfig::new(dir.path().join("data.json"))).unwrap();
        let service = AccountService::new(Arc::new(store), Arc::new(RuleValidator::default()));
        (dir, service)
    }

    #[test]
    fn test_register_check_order() {
        let (_dir, service) = service();

        // Bad username and weak password: username is reported first.
        let err = service
            .register(NewAccount::new("1x", "weak", Role::Customer))
            .unwrap_err();
        assert!(matches!(err.as_core(), Some(CoreError::InvalidUsername(_))));

        service
            .register(NewAccount::new("cust1", "Passw0rd!", Role::Customer))
            .unwrap();

        // Duplicate and weak password: duplicate is reported first.
        let err = service
            .register(NewAccount::new("cust1", "weak", Role::Customer))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        let err = service
            .register(NewAccount::new("cust2", "Passw0rd!", Role::Customer).phone("12ab"))
            .unwrap_err();
        assert!(matches!(err.as_core(), Some(CoreError::InvalidPhone(_))));
    }

    #[test]
    fn test_weak_password_reports_min_len() {
        let (_dir, service) = service();
        let err = service
            .register(NewAccount::new("cust1", "short1!", Role::Customer))
            .unwrap_err();
        assert!(matches!(
            err.as_core(),
            Some(CoreError::WeakPassword { min_len: 8 })
        ));
    }

    #[test]
    fn test_authenticate_order() {
        let (_dir, service) = service();
        service
            .register(NewAccount::new("cust1", "Passw0rd!", Role::Customer))
            .unwrap();

        assert!(matches!(
            service.authenticate("ghost", "Passw0rd!").unwrap_err().as_core(),
            Some(CoreError::UserNotFound(_))
        ));
        assert!(matches!(
            service.authenticate("cust1", "nope").unwrap_err().as_core(),
            Some(CoreError::WrongPassword(_))
        ));

        service.set_active("cust1", false).unwrap();
        let err = service.authenticate("cust1", "Passw0rd!").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert!(matches!(err.as_core(), Some(CoreError::AccountDisabled(_))));

        // Wrong password is still reported before disabled.
        assert!(matches!(
            service.authenticate("cust1", "nope").unwrap_err().as_core(),
            Some(CoreError::WrongPassword(_))
        ));
    }

    #[test]
    fn test_toggle_and_remove() {
        let (_dir, service) = service();
        service
            .register(NewAccount::new("cust1", "Passw0rd!", Role::Customer))
            .unwrap();

        assert!(!service.toggle_active("cust1").unwrap().active);
        assert!(service.toggle_active("cust1").unwrap().active);

        let removed = service.remove("cust1").unwrap();
        assert_eq!(removed.username, "cust1");
        assert!(service.list().unwrap().is_empty());
        assert_eq!(service.remove("cust1").unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_has_admin() {
        let (_dir, service) = service();
        assert!(!service.has_admin().unwrap());
        service
            .register(NewAccount::new("admin1", "Adm1n!pass", Role::Admin))
            .unwrap();
        assert!(service.has_admin().unwrap());
    }
}
