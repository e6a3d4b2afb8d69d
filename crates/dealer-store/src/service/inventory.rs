//! # Inventory Service
//!
//! Vehicle add, edit, removal and lookup.
//!
//! Edits arrive as typed [`VehicleUpdate`]s. Unknown field names never reach
//! this service: [`VehicleUpdate::parse`] drops them at the text boundary.

use std::sync::Arc;
use tracing::{debug, info};

use dealer_core::validation::{validate_new_vehicle, validate_vehicle_update};
use dealer_core::{CoreError, NewVehicle, Vehicle, VehicleUpdate};

use crate::error::StoreResult;
use crate::store::RecordStore;

/// Vehicle operations.
#[derive(Debug, Clone)]
pub struct InventoryService {
    store: Arc<RecordStore>,
}

impl InventoryService {
    pub fn new(store: Arc<RecordStore>) -> Self {
        InventoryService { store }
    }

    /// Adds an `available` vehicle and persists it.
    ///
    /// ## Errors
    /// `ValidationFailed` for a negative price. Any name is accepted.
    pub fn add_vehicle(&self, new: NewVehicle) -> StoreResult<Vehicle> {
        validate_new_vehicle(&new).map_err(CoreError::from)?;

        let vehicle = Vehicle::new(new);
        self.store.transact(|c| c.insert_car(vehicle.clone()))?;

        info!(id = %vehicle.id, name = %vehicle.name, price = %vehicle.price, "Vehicle added");
        Ok(vehicle)
    }

    /// Applies `updates` in order and persists once.
    ///
    /// All updates are validated before the vehicle is touched, so a rejected
    /// edit leaves it unchanged. An empty list still checks that the vehicle
    /// exists.
    pub fn edit_vehicle(&self, id: &str, updates: Vec<VehicleUpdate>) -> StoreResult<Vehicle> {
        for update in &updates {
            validate_vehicle_update(update).map_err(CoreError::from)?;
        }

        let fields: Vec<&'static str> = updates.iter().map(VehicleUpdate::field).collect();

        let vehicle = self.store.transact(|c| {
            let vehicle = c
                .find_car_by_id_mut(id)
                .ok_or_else(|| CoreError::VehicleNotFound(id.to_string()))?;
            for update in updates {
                vehicle.apply(update);
            }
            Ok(vehicle.clone())
        })?;

        info!(%id, ?fields, "Vehicle edited");
        Ok(vehicle)
    }

    /// Removes a vehicle whatever its status.
    pub fn remove_vehicle(&self, id: &str) -> StoreResult<Vehicle> {
        let removed = self.store.transact(|c| {
            let index = c
                .cars
                .iter()
                .position(|v| v.id == id)
                .ok_or_else(|| CoreError::VehicleNotFound(id.to_string()))?;
            Ok(c.cars.remove(index))
        })?;

        info!(%id, status = %removed.status, "Vehicle removed");
        Ok(removed)
    }

    /// Case-insensitive match on name or color substring, or exact id.
    pub fn search(&self, term: &str) -> StoreResult<Vec<Vehicle>> {
        let term = term.to_lowercase();
        let hits = self.store.read(|c| {
            c.cars
                .iter()
                .filter(|v| v.matches(&term))
                .cloned()
                .collect::<Vec<_>>()
        })?;

        debug!(%term, hits = hits.len(), "Vehicle search");
        Ok(hits)
    }

    pub fn get(&self, id: &str) -> StoreResult<Vehicle> {
        Ok(self
            .store
            .find_car_by_id(id)?
            .ok_or_else(|| CoreError::VehicleNotFound(id.to_string()))?)
    }

    /// All vehicles in insertion order.
    pub fn list(&self) -> StoreResult<Vec<Vehicle>> {
        self.store.read(|c| c.cars.clone())
    }

    pub fn list_available(&self) -> StoreResult<Vec<Vehicle>> {
        self.store.read(|c| {
            c.cars
                .iter()
                .filter(|v| v.is_available())
                .cloned()
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;
    use dealer_core::{ErrorKind, Money, VehicleStatus};

    fn service() -> (tempfile::TempDir, InventoryService) {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::open(StoreConfig::new(dir.path().join("data.json"))).unwrap();
        (dir, InventoryService::new(Arc::new(store)))
    }

    fn dollars(major: i64) -> Money {
        Money::from_major_minor(major, 0)
    }

    #[test]
    fn test_add_vehicle_validation() {
        let (_dir, service) = service();

        let unnamed = service
            .add_vehicle(NewVehicle::new("", 2020, dollars(1), "red"))
            .unwrap();
        assert_eq!(unnamed.name, "");

        let err = service
            .add_vehicle(NewVehicle::new("Civic", 2020, Money::from_cents(-1), "red"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);

        let vehicle = service
            .add_vehicle(NewVehicle::new("Civic", 2020, Money::zero(), "red"))
            .unwrap();
        assert_eq!(vehicle.status, VehicleStatus::Available);
        assert_eq!(service.list().unwrap().len(), 2);
    }

    #[test]
    fn test_edit_vehicle() {
        let (_dir, service) = service();
        let vehicle = service
            .add_vehicle(NewVehicle::new("Civic", 2020, dollars(20_000), "red"))
            .unwrap();

        let mut updates = Vec::new();
        for (field, value) in [("price", "18500"), ("wheels", "4"), ("color", "blue")] {
            if let Some(update) = VehicleUpdate::parse(field, value).unwrap() {
                updates.push(update);
            }
        }
        let edited = service.edit_vehicle(&vehicle.id, updates).unwrap();

        assert_eq!(edited.price, dollars(18_500));
        assert_eq!(edited.color, "blue");
        assert_eq!(edited.id, vehicle.id);
    }

    #[test]
    fn test_rejected_edit_leaves_vehicle_unchanged() {
        let (_dir, service) = service();
        let vehicle = service
            .add_vehicle(NewVehicle::new("Civic", 2020, dollars(20_000), "red"))
            .unwrap();

        let err = service
            .edit_vehicle(
                &vehicle.id,
                vec![
                    VehicleUpdate::Color("green".into()),
                    VehicleUpdate::Price(Money::from_cents(-100)),
                ],
            )
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);
        assert_eq!(service.get(&vehicle.id).unwrap(), vehicle);

        let err = service.edit_vehicle("car-missing", Vec::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_remove_sold_vehicle() {
        let (_dir, service) = service();
        let vehicle = service
            .add_vehicle(NewVehicle::new("Civic", 2020, dollars(1), "red"))
            .unwrap();
        service
            .edit_vehicle(&vehicle.id, vec![VehicleUpdate::Status(VehicleStatus::Sold)])
            .unwrap();

        service.remove_vehicle(&vehicle.id).unwrap();
        assert!(service.list().unwrap().is_empty());
        assert_eq!(
            service.remove_vehicle(&vehicle.id).unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_search_and_available() {
        let (_dir, service) = service();
        let red = service
            .add_vehicle(NewVehicle::new("Civic", 2020, dollars(1), "Red"))
            .unwrap();
        let blue = service
            .add_vehicle(NewVehicle::new("Accord", 2021, dollars(1), "blue"))
            .unwrap();
        service
            .add_vehicle(NewVehicle::new("Redline", 2022, dollars(1), "white"))
            .unwrap();

        let names: Vec<_> = service.search("RED").unwrap().into_iter().map(|v| v.name).collect();
        assert_eq!(names, vec!["Civic", "Redline"]);

        let by_id = service.search(&blue.id.to_uppercase()).unwrap();
        assert_eq!(by_id.len(), 1);
        assert_eq!(by_id[0].id, blue.id);

        service
            .edit_vehicle(&red.id, vec![VehicleUpdate::Status(VehicleStatus::Reserved)])
            .unwrap();
        assert_eq!(service.list_available().unwrap().len(), 2);
    }

    #[test]
    fn test_search_term_is_not_trimmed() {
        let (_dir, service) = service();
        service
            .add_vehicle(NewVehicle::new("Model S", 2020, dollars(1), "black"))
            .unwrap();
        service
            .add_vehicle(NewVehicle::new("Civic", 2020, dollars(1), "red"))
            .unwrap();

        let names: Vec<_> = service.search(" ").unwrap().into_iter().map(|v| v.name).collect();
        assert_eq!(names, vec!["Model S"]);
        assert!(service.search(" civic").unwrap().is_empty());
    }
}
