//! # Reporting
//!
//! Read-only views over the store. Nothing here mutates or saves.

use serde::Serialize;
use std::sync::Arc;

use dealer_core::{Account, Invoice, Money};

use crate::config::ReportSettings;
use crate::error::StoreResult;
use crate::store::RecordStore;

/// Store totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub users_count: usize,
    pub cars_count: usize,
    pub invoices_count: usize,
    /// Sum of invoice prices.
    pub total_revenue: Money,
}

/// Report queries.
#[derive(Debug, Clone)]
pub struct ReportService {
    store: Arc<RecordStore>,
    settings: ReportSettings,
}

impl ReportService {
    pub fn new(store: Arc<RecordStore>) -> Self {
        ReportService {
            store,
            settings: ReportSettings::default(),
        }
    }

    /// Uses `settings.top_n` for [`ReportService::top_accounts`].
    pub fn with_settings(mut self, settings: ReportSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn summary(&self) -> StoreResult<Summary> {
        self.store.read(|c| Summary {
            users_count: c.users.len(),
            cars_count: c.cars.len(),
            invoices_count: c.invoices.len(),
            total_revenue: c.invoices.iter().map(|i| i.price).sum(),
        })
    }

    /// The `n` accounts with the most points, highest first.
    ///
    /// Ties keep insertion order.
    pub fn top_accounts_by_points(&self, n: usize) -> StoreResult<Vec<Account>> {
        let mut accounts = self.store.read(|c| c.users.clone())?;
        accounts.sort_by(|a, b| b.loyalty_points.cmp(&a.loyalty_points));
        accounts.truncate(n);
        Ok(accounts)
    }

    /// Top accounts using the configured count.
    pub fn top_accounts(&self) -> StoreResult<Vec<Account>> {
        self.top_accounts_by_points(self.settings.top_n)
    }

    /// Every invoice, oldest first.
    pub fn sold_invoices(&self) -> StoreResult<Vec<Invoice>> {
        self.store.read(|c| c.invoices.clone())
    }

    /// Invoices recorded for `username`.
    pub fn invoices_for(&self, username: &str) -> StoreResult<Vec<Invoice>> {
        self.store.read(|c| {
            c.invoices
                .iter()
                .filter(|i| i.customer_username == username)
                .cloned()
                .collect()
        })
    }
}
