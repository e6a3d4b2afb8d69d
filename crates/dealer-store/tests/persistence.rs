//! Backing file behavior: loading, tolerance, atomic save and migration.

use std::fs;
use std::sync::Arc;

use dealer_core::{ErrorKind, Money, NewAccount, Role, RuleValidator, VehicleStatus};
use dealer_store::{
    migrate_file, AccountService, MigrateOptions, RecordStore, SalesService, StoreConfig,
    StoreError,
};

#[test]
fn absent_file_is_created_with_empty_collections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fresh").join("data_store.json");

    let store = RecordStore::open(StoreConfig::new(&path)).unwrap();

    let on_disk: serde_json::Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
    assert_eq!(
        on_disk,
        serde_json::json!({"users": [], "cars": [], "invoices": []})
    );
    assert!(store.snapshot().unwrap().users.is_empty());
}

#[test]
fn load_tolerates_missing_and_unknown_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data_store.json");
    fs::write(
        &path,
        r#"{
            "users": [{"id": "user-1", "username": "old1", "favourite": "blue"}],
            "cars": [{"id": "car-1", "name": "Civic", "price": "15000.00"}],
            "invoices": [{"id": "inv-1", "customer": "old1", "car_id": "car-9",
                          "price": 9000, "date": "2022-01-01 10:00:00"}],
            "schema": 2
        }"#,
    )
    .unwrap();

    let store = RecordStore::open(StoreConfig::new(&path)).unwrap();
    let c = store.snapshot().unwrap();

    let user = &c.users[0];
    assert_eq!(user.role, Role::Customer);
    assert!(user.active);
    assert_eq!(user.gender, "M");
    assert_eq!(user.loyalty_points, 0);

    let car = &c.cars[0];
    assert_eq!(car.status, VehicleStatus::Available);
    assert_eq!(car.price, Money::from_major_minor(15_000, 0));

    assert_eq!(c.invoices[0].price, Money::from_major_minor(9_000, 0));
}

#[test]
fn malformed_file_is_persistence_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data_store.json");
    fs::write(&path, r#"{"users": [{"password_hash": "abc"}]}"#).unwrap();

    let err = RecordStore::open(StoreConfig::new(&path)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PersistenceFailed);
    assert!(matches!(err, StoreError::PersistenceFailed { .. }));

    // The bad file is left for inspection.
    assert!(fs::read_to_string(&path).unwrap().contains("password_hash"));
}

#[test]
fn load_reads_status_and_usertype_in_any_case() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data_store.json");
    fs::write(
        &path,
        r#"{
            "users": [{"id": "user-1", "username": "boss", "usertype": "admin"},
                      {"id": "user-2", "username": "temp", "usertype": "Intern"}],
            "cars": [{"id": "car-1", "name": "Civic", "status": "Sold"},
                     {"id": "car-2", "name": "Accord", "status": "AVAILABLE"},
                     {"id": "car-3", "name": "Corolla", "status": "on hold"}]
        }"#,
    )
    .unwrap();

    let store = Arc::new(RecordStore::open(StoreConfig::new(&path)).unwrap());
    let c = store.snapshot().unwrap();
    assert_eq!(c.users[0].role, Role::Admin);
    assert_eq!(c.users[1].role, Role::Customer);
    let statuses: Vec<_> = c.cars.iter().map(|v| v.status).collect();
    assert_eq!(
        statuses,
        vec![VehicleStatus::Sold, VehicleStatus::Available, VehicleStatus::Reserved]
    );

    let sales = SalesService::new(store.clone());
    for id in ["car-1", "car-3"] {
        let err = sales.purchase("boss", id).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PreconditionFailed);
    }
    sales.purchase("boss", "car-2").unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains(r#""status": "sold""#));
    assert!(!contents.contains("Sold"));
}

#[test]
fn failed_save_after_mutation_keeps_memory() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("data");
    let config = StoreConfig::new(data_dir.join("data_store.json"));
    let store = Arc::new(RecordStore::open(config).unwrap());
    let accounts = AccountService::new(store.clone(), Arc::new(RuleValidator::default()));

    fs::remove_dir_all(&data_dir).unwrap();
    fs::write(&data_dir, "not a directory").unwrap();

    let err = accounts
        .register(NewAccount::new("cust1", "Passw0rd!", Role::Customer))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PersistenceFailed);
    assert!(matches!(err, StoreError::PersistenceFailed { .. }));

    let users = accounts.list().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].username, "cust1");
}

#[test]
fn save_round_trip_is_exact() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data_store.json");
    fs::write(
        &path,
        r#"{
            "users": [{"id": "user-a", "username": "cust1", "password_hash": "00",
                       "usertype": "SalesEmployee", "phone": "5550100", "gender": "F",
                       "is_active": false, "loyalty_points": 12}],
            "cars": [{"id": "car-a", "name": "Civic", "model_year": 2021, "price": 20000.5,
                      "color": "red", "specs": "base", "status": "reserved"}],
            "invoices": [{"id": "inv-a", "customer": "cust1", "car_id": "car-a",
                          "price": 20000.5, "points_earned": 20,
                          "date": "2024-06-01T08:30:00Z"}]
        }"#,
    )
    .unwrap();

    let first = RecordStore::open(StoreConfig::new(&path)).unwrap();
    first.save().unwrap();
    let second = RecordStore::open(StoreConfig::new(&path)).unwrap();

    assert_eq!(first.snapshot().unwrap(), second.snapshot().unwrap());
    assert_eq!(second.snapshot().unwrap().users[0].role, Role::SalesAgent);
}

#[test]
fn no_temporary_files_after_saves() {
    let dir = tempfile::tempdir().unwrap();
    let store = RecordStore::open(StoreConfig::new(dir.path().join("data_store.json"))).unwrap();
    for _ in 0..5 {
        store.save().unwrap();
    }

    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn migration_writes_loadable_store() {
    let dir = tempfile::tempdir().unwrap();
    let legacy = dir.path().join("data.json");
    let output = dir.path().join("data_store.json");
    fs::write(
        &legacy,
        r#"{
            "users": [
                {"username": "admin1", "password": "Adm1n!pass", "usertype": "Admin"},
                ["cust1", "Passw0rd!", "Customer", "5550100", "F"]
            ],
            "cars": [{"name": "Civic", "model": 2019, "price": 15000, "color": "red", "doors": 4}],
            "invoices": [{"customer": "cust1", "car_id": "car-Civic", "price": 15000,
                          "points_earned": 15, "date": "2023-05-01 12:00:00"}]
        }"#,
    )
    .unwrap();

    let report = migrate_file(&legacy, &output, MigrateOptions::default()).unwrap();
    assert_eq!((report.users, report.cars, report.invoices), (2, 1, 1));

    let contents = fs::read_to_string(&output).unwrap();
    assert!(!contents.contains("Passw0rd!"));
    assert!(!contents.contains("Adm1n!pass"));

    let store = RecordStore::open(StoreConfig::new(&output)).unwrap();
    let c = store.snapshot().unwrap();
    assert!(c.find_user_by_username("cust1").unwrap().password_matches("Passw0rd!"));
    assert_eq!(c.cars[0].specs, "doors:4");
    assert_eq!(c.cars[0].model_year, 2019);
    assert_eq!(c.invoices[0].points_earned, 15);
}

#[test]
fn migration_refuses_to_overwrite_without_force() {
    let dir = tempfile::tempdir().unwrap();
    let legacy = dir.path().join("data.json");
    let output = dir.path().join("data_store.json");
    fs::write(&legacy, r#"{"users": [["cust1"]]}"#).unwrap();
    fs::write(&output, "keep me").unwrap();

    let err = migrate_file(&legacy, &output, MigrateOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(fs::read_to_string(&output).unwrap(), "keep me");

    let options = MigrateOptions {
        force: true,
        ..MigrateOptions::default()
    };
    let report = migrate_file(&legacy, &output, options).unwrap();
    assert_eq!(report.users, 1);
    assert_eq!(report.defaulted_passwords, 1);
}

#[test]
fn migration_of_missing_legacy_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let err = migrate_file(
        &dir.path().join("absent.json"),
        &dir.path().join("out.json"),
        MigrateOptions::default(),
    )
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::PersistenceFailed);
    assert!(!dir.path().join("out.json").exists());
}

#[test]
fn migrated_cars_with_the_same_name_are_each_sellable() {
    let dir = tempfile::tempdir().unwrap();
    let legacy = dir.path().join("data.json");
    let output = dir.path().join("data_store.json");
    fs::write(
        &legacy,
        r#"{"cars": [{"name": "Civic", "price": 15000, "color": "red"},
                     {"name": "Civic", "price": 16000, "color": "blue"}]}"#,
    )
    .unwrap();
    migrate_file(&legacy, &output, MigrateOptions::default()).unwrap();

    let store = Arc::new(RecordStore::open(StoreConfig::new(&output)).unwrap());
    let ids: Vec<_> = store.snapshot().unwrap().cars.into_iter().map(|v| v.id).collect();
    assert_eq!(ids, vec!["car-Civic", "car-Civic-2"]);

    let sales = SalesService::new(store.clone());
    sales.purchase("walkin", "car-Civic").unwrap();
    let blue = sales.purchase("walkin", "car-Civic-2").unwrap();
    assert_eq!(blue.price, Money::from_major_minor(16_000, 0));
}
