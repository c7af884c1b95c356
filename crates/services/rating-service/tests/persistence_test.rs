//! File-backed persistence across store instances.

use std::fs;

use rust_decimal::Decimal;

use domain::{NewUser, UserRole, RATINGS_KEY, STORES_KEY, USERS_KEY};
use rating_service_lib::config::RatingServiceConfig;
use rating_service_lib::open_store;
use rating_service_lib::persistence::{FileStore, PersistenceGateway};
use rating_service_lib::DomainStore;

fn config_for(dir: &std::path::Path) -> RatingServiceConfig {
    RatingServiceConfig::default().with_data_dir(Some(dir.to_path_buf()))
}

#[test]
fn test_fresh_directory_seeds_admin_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&config_for(dir.path()));

    assert_eq!(store.users().len(), 1);
    assert!(store
        .authenticate("RKADD@gmail.com", "RKADD@147852369", UserRole::Administrator)
        .is_some());
    assert!(!dir.path().join(format!("{}.json", USERS_KEY)).exists());
}

#[test]
fn test_collections_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());

    {
        let mut store = open_store(&config);
        let jane = store
            .add_user(NewUser::new("Jane Doe", "jane@x.com", "", UserRole::NormalUser, "Abc@1234"))
            .unwrap();
        let owner = store
            .add_user(NewUser::new("Olive Owner", "olive@x.com", "", UserRole::StoreOwner, "Abc@1234"))
            .unwrap();
        let cafe = store.add_store(owner.id, "Cafe", "1 Main St").unwrap();
        store.upsert_rating(jane.id, cafe.id, 4).unwrap();
    }

    let store = open_store(&config);
    assert_eq!(store.users().len(), 3);
    assert_eq!(store.stores().len(), 1);
    assert_eq!(store.ratings().len(), 1);
    assert_eq!(store.overall_rating(1), Some(Decimal::from(4)));
}

#[test]
fn test_persisted_format_uses_original_field_names() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = DomainStore::open(PersistenceGateway::new(FileStore::new(dir.path())));
    let owner = store
        .add_user(NewUser::new("Olive Owner", "olive@x.com", "", UserRole::StoreOwner, "Abc@1234"))
        .unwrap();
    store.add_store(owner.id, "Cafe", "1 Main St").unwrap();

    let users: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("sr_users.json")).unwrap()).unwrap();
    assert_eq!(users[1]["role"], "Store Owner");
    assert_eq!(users[1]["password"], "Abc@1234");

    let stores: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("sr_stores.json")).unwrap()).unwrap();
    assert_eq!(stores[0]["ownerId"], owner.id);
    assert_eq!(stores[0]["name"], "Cafe");
}

#[test]
fn test_corrupt_files_fall_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(format!("{}.json", USERS_KEY)), "{broken").unwrap();
    fs::write(dir.path().join(format!("{}.json", STORES_KEY)), "[{\"id\":").unwrap();
    fs::write(dir.path().join(format!("{}.json", RATINGS_KEY)), "42").unwrap();

    let store = open_store(&config_for(dir.path()));

    assert_eq!(store.users().len(), 1);
    assert!(store.users()[0].is_admin());
    assert!(store.stores().is_empty());
    assert!(store.ratings().is_empty());
}
