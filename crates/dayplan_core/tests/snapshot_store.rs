use dayplan_core::db::migrations::latest_version;
use dayplan_core::db::open_db_in_memory;
use dayplan_core::{
    load_snapshot, save_snapshot, DateKey, KeyValueStore, PlannerSnapshot, PlannerState,
    SqliteKeyValueStore, StoreError, COMPLETED_KEY, TASKS_KEY,
};
use rusqlite::Connection;
use std::collections::BTreeMap;

fn date(value: &str) -> DateKey {
    DateKey::parse(value).unwrap()
}

#[test]
fn kv_put_get_roundtrip_and_overwrite() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();

    assert_eq!(store.get("missing").unwrap(), None);

    store.put("greeting", "hello").unwrap();
    assert_eq!(store.get("greeting").unwrap().as_deref(), Some("hello"));

    store.put("greeting", "replaced").unwrap();
    assert_eq!(store.get("greeting").unwrap().as_deref(), Some("replaced"));
}

#[test]
fn put_many_writes_every_pair() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();

    store.put_many(&[("first", "1"), ("second", "2")]).unwrap();

    assert_eq!(store.get("first").unwrap().as_deref(), Some("1"));
    assert_eq!(store.get("second").unwrap().as_deref(), Some("2"));
}

#[test]
fn store_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteKeyValueStore::try_new(&conn) {
        Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn store_rejects_connection_without_kv_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteKeyValueStore::try_new(&conn);
    assert!(matches!(
        result,
        Err(StoreError::MissingRequiredTable("planner_kv"))
    ));
}

#[test]
fn load_with_no_persisted_keys_yields_empty_snapshot() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();

    let snapshot = load_snapshot(&store).unwrap();
    assert_eq!(snapshot, PlannerSnapshot::default());
}

#[test]
fn corrupt_task_half_does_not_block_completion_half() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();

    store.put(TASKS_KEY, "{definitely not json").unwrap();
    store.put(COMPLETED_KEY, r#"{"2025-03-10":[0]}"#).unwrap();

    let snapshot = load_snapshot(&store).unwrap();
    assert!(snapshot.tasks.is_empty());
    assert_eq!(snapshot.completed[&date("2025-03-10")], vec![0]);
}

#[test]
fn corrupt_completion_half_does_not_block_task_half() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();

    store
        .put(TASKS_KEY, r#"{"2025-03-10":["Buy milk"]}"#)
        .unwrap();
    store.put(COMPLETED_KEY, "[1,2,").unwrap();

    let snapshot = load_snapshot(&store).unwrap();
    assert_eq!(snapshot.tasks[&date("2025-03-10")], vec!["Buy milk"]);
    assert!(snapshot.completed.is_empty());
}

#[test]
fn saved_snapshot_matches_original_wire_layout() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();

    let day = date("2025-03-10");
    let mut state = PlannerState::new(day);
    state.add_task(day, "Buy milk");
    state.add_task(day, "Call Bob");
    state.toggle_completion(day, 0);

    save_snapshot(&store, &PlannerSnapshot::capture(&state)).unwrap();

    let tasks: serde_json::Value =
        serde_json::from_str(&store.get(TASKS_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(
        tasks,
        serde_json::json!({ "2025-03-10": ["Buy milk", "Call Bob"] })
    );

    let completed: serde_json::Value =
        serde_json::from_str(&store.get(COMPLETED_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(completed, serde_json::json!({ "2025-03-10": [0] }));
}

#[test]
fn capture_omits_dates_without_completion_marks() {
    let day = date("2025-03-10");
    let quiet = date("2025-03-11");
    let mut state = PlannerState::new(day);
    state.add_task(day, "a");
    state.add_task(quiet, "b");
    state.toggle_completion(day, 0);

    let snapshot = PlannerSnapshot::capture(&state);
    assert!(snapshot.tasks.contains_key(&quiet));
    assert!(!snapshot.completed.contains_key(&quiet));
}

#[test]
fn restore_tolerates_duplicate_and_out_of_range_completion_indices() {
    let day = date("2025-03-10");
    let mut tasks = BTreeMap::new();
    tasks.insert(day, vec!["a".to_string(), "b".to_string()]);
    let mut completed = BTreeMap::new();
    completed.insert(day, vec![0, 0, 9]);

    let state = PlannerState::restore(date("2025-03-11"), tasks, completed);

    let entries = state.tasks_for(day);
    assert_eq!(entries.len(), 2);
    assert!(state.is_completed(day, entries[0].id));
    assert!(!state.is_completed(day, entries[1].id));
}

#[test]
fn restore_drops_empty_sequences_and_orphaned_completion() {
    let mut tasks = BTreeMap::new();
    tasks.insert(date("2025-03-10"), Vec::new());
    let mut completed = BTreeMap::new();
    completed.insert(date("2025-03-10"), vec![0]);
    completed.insert(date("2025-03-11"), vec![0, 1]);

    let state = PlannerState::restore(date("2025-03-12"), tasks, completed);

    assert_eq!(state.dates().count(), 0);
    let snapshot = PlannerSnapshot::capture(&state);
    assert_eq!(snapshot, PlannerSnapshot::default());
}
