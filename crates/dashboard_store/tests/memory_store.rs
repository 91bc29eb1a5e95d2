use dashboard_core::{FieldValue, Record};
use dashboard_store::{FaultMode, MemoryStore, RecordStore, StoreError};

fn soup() -> Record {
    Record {
        name: Some(FieldValue::from("Soup")),
        rating: Some(FieldValue::from(4)),
        ..Record::default()
    }
}

#[test]
fn seeded_records_get_identifiers() {
    let mut store = MemoryStore::with_records(&[soup(), soup()]);
    let fetched = store.fetch_all().unwrap();
    assert_eq!(fetched.len(), 2);
    assert_ne!(fetched[0].id, fetched[1].id);
}

#[test]
fn unreachable_store_fails_without_touching_data() {
    let mut store = MemoryStore::with_records(&[soup()]);
    store.set_fault(FaultMode::Unreachable);

    assert!(matches!(store.fetch_all(), Err(StoreError::Unavailable(_))));
    assert!(store.replace_all(&[]).is_err());
    assert_eq!(store.len(), 1);
}

#[test]
fn insert_failure_leaves_collection_empty() {
    let mut store = MemoryStore::with_records(&[soup(), soup()]);
    store.set_fault(FaultMode::InsertFails);

    let err = store.replace_all(&[soup()]).unwrap_err();
    assert!(err.to_string().contains("after deleting 2 documents"));
    assert!(store.is_empty());

    store.set_fault(FaultMode::Healthy);
    assert!(store.fetch_all().unwrap().is_empty());
}
