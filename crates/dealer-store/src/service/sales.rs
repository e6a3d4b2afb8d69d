//! # Sales Workflow
//!
//! The one operation that must change three collections together.
//!
//! ## Purchase Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 purchase(customer, vehicle_id)                          │
//! │                 (single exclusive section)                              │
//! │                                                                         │
//! │  1. find vehicle          ──► VehicleNotFound      (nothing changed)   │
//! │  2. status == available?  ──► VehicleNotAvailable  (nothing changed)   │
//! │  3. points = floor(price / 1000)                                       │
//! │  4. append invoice (snapshot of username, vehicle id, price)           │
//! │  5. vehicle.status = sold                                              │
//! │  6. credit points if the account exists                                │
//! │  7. save once, then release the lock                                   │
//! │                                                                         │
//! │  A concurrent second purchase of the same vehicle waits on the lock    │
//! │  and then fails at step 2.                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;
use tracing::{info, warn};

use dealer_core::{points_for_price, CoreError, Invoice, VehicleStatus};

use crate::error::StoreResult;
use crate::store::RecordStore;

/// Sale operations.
#[derive(Debug, Clone)]
pub struct SalesService {
    store: Arc<RecordStore>,
}

impl SalesService {
    pub fn new(store: Arc<RecordStore>) -> Self {
        SalesService { store }
    }

    /// Sells an available vehicle to `customer_username`.
    ///
    /// A username with no matching account still completes the sale; no
    /// points are credited and a warning is logged.
    pub fn purchase(&self, customer_username: &str, vehicle_id: &str) -> StoreResult<Invoice> {
        let (invoice, credited) = self.store.transact(|c| {
            let vehicle = c
                .find_car_by_id(vehicle_id)
                .ok_or_else(|| CoreError::VehicleNotFound(vehicle_id.to_string()))?;
            if !vehicle.is_available() {
                return Err(CoreError::VehicleNotAvailable {
                    vehicle_id: vehicle_id.to_string(),
                    status: vehicle.status.to_string(),
                });
            }

            let points = points_for_price(vehicle.price);
            let invoice = Invoice::for_sale(customer_username, vehicle, points);
            c.insert_invoice(invoice.clone())?;

            if let Some(vehicle) = c.find_car_by_id_mut(vehicle_id) {
                vehicle.status = VehicleStatus::Sold;
            }

            let credited = match c.find_user_by_username_mut(customer_username) {
                Some(account) => {
                    account.credit_points(points);
                    true
                }
                None => false,
            };

            Ok((invoice, credited))
        })?;

        if !credited {
            warn!(
                customer = %customer_username,
                invoice = %invoice.id,
                "Sale to unknown account; no loyalty points credited"
            );
        }

        info!(
            invoice = %invoice.id,
            vehicle = %vehicle_id,
            customer = %customer_username,
            price = %invoice.price,
            points = invoice.points_earned,
            "Vehicle sold"
        );
        Ok(invoice)
    }
}
