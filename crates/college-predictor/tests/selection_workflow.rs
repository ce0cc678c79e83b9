//! Selection store scenarios against the on-disk JSON record.

use std::fs;

use chrono::Utc;
use college_predictor::workflows::prediction::Catalogue;
use college_predictor::workflows::selection::{
    comparison_table, JsonFilePersistence, SelectionEntry, SelectionError, SelectionStore,
    COMPARE_CAPACITY,
};

fn entry(catalogue: &Catalogue, id: &str) -> SelectionEntry {
    let offering = catalogue.find(id).expect("catalogue offering");
    SelectionEntry::from_offering(offering, Utc::now())
}

#[test]
fn shortlist_survives_restart_and_respects_capacity() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("selection.json");
    let catalogue = Catalogue::builtin();

    {
        let mut store = SelectionStore::load(JsonFilePersistence::new(&path));
        store.add_favorite(entry(&catalogue, "iit-bombay-ee"));
        for id in [
            "nit-kurukshetra-computer",
            "iit-delhi-cse",
            "nit-suratkal-cse",
            "nit-trichy-ece",
        ] {
            store.add_to_compare(entry(&catalogue, id)).expect("room");
        }
        assert_eq!(
            store.add_to_compare(entry(&catalogue, "nit-warangal-mech")),
            Err(SelectionError::CapacityExceeded {
                capacity: COMPARE_CAPACITY
            })
        );
    }

    let store = SelectionStore::load(JsonFilePersistence::new(&path));
    assert!(store.is_favorite("iit-bombay-ee"));
    assert_eq!(store.compare_list().len(), COMPARE_CAPACITY);
    assert_eq!(store.compare_list()[0].id, "nit-kurukshetra-computer");

    let table = comparison_table(store.compare_list());
    let closing = table.row("Closing Rank").expect("closing rank row");
    assert_eq!(closing.values[0], "1,118");
    assert_eq!(closing.values[1], "10");
}

#[test]
fn unreadable_record_degrades_to_empty_and_is_replaced_on_next_change() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("selection.json");
    fs::write(&path, "not json at all").expect("write garbage");
    let catalogue = Catalogue::builtin();

    let mut store = SelectionStore::load(JsonFilePersistence::new(&path));
    assert!(store.favorites().is_empty());
    assert!(store.compare_list().is_empty());

    store.add_favorite(entry(&catalogue, "iit-delhi-cse"));

    let reloaded = SelectionStore::load(JsonFilePersistence::new(&path));
    assert_eq!(reloaded.favorites().len(), 1);
}
