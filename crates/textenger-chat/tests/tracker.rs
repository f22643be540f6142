use std::sync::Arc;

use jiff::Timestamp;
use textenger_core::models::message_id::MessageId;
use textenger_core::storage_keys;
use textenger_storage::file::FileStore;
use textenger_storage::kv::{KeyValueStore, UnavailableStore};
use textenger_storage::memory::MemoryStore;

use textenger_chat::tracker::LastSeenTracker;

fn at(millis: i64) -> Timestamp {
    Timestamp::from_millisecond(millis).unwrap()
}

#[test]
fn update_then_get_returns_record() {
    let mut tracker = LastSeenTracker::open(MemoryStore::new());
    tracker.update_last_seen_position("room_1", 3, Some("user-9"));

    let record = tracker.get_last_seen_position("room_1").unwrap();
    assert_eq!(record.message_id, MessageId::Number(3));
    assert_eq!(record.user_id.as_deref(), Some("user-9"));
    assert!(record.timestamp > 0);
}

#[test]
fn update_overwrites_previous_record() {
    let mut tracker = LastSeenTracker::open(MemoryStore::new());
    tracker.update_last_seen_position("room_1", 3, None);
    tracker.update_last_seen_position("room_1", "abc", None);

    assert_eq!(tracker.get_all_positions().len(), 1);
    assert_eq!(
        tracker.get_last_seen_position("room_1").unwrap().message_id,
        MessageId::Text("abc".into())
    );
}

#[test]
fn repeated_identical_updates_keep_one_record() {
    let mut tracker = LastSeenTracker::open(MemoryStore::new());
    for _ in 0..3 {
        tracker.update_last_seen_position_at("room_1", 5, None, at(1_000));
    }
    let all = tracker.get_all_positions();
    assert_eq!(all.len(), 1);
    assert_eq!(all["room_1"].timestamp, 1_000);
}

#[test]
fn remove_then_get_is_absent() {
    let mut tracker = LastSeenTracker::open(MemoryStore::new());
    tracker.update_last_seen_position("room_1", 3, None);
    tracker.remove_last_seen_position("room_1");
    assert!(tracker.get_last_seen_position("room_1").is_none());

    tracker.remove_last_seen_position("never-set");
}

#[test]
fn clear_all_removes_every_record() {
    let mut tracker = LastSeenTracker::open(MemoryStore::new());
    tracker.update_last_seen_position("room_1", 3, None);
    tracker.update_last_seen_position("dm_2", 8, None);

    tracker.clear_all_positions();
    assert!(tracker.get_last_seen_position("room_1").is_none());
    assert!(tracker.get_last_seen_position("dm_2").is_none());
}

#[test]
fn every_update_is_written_through() {
    let store = Arc::new(MemoryStore::new());
    let mut tracker = LastSeenTracker::open(Arc::clone(&store));

    tracker.update_last_seen_position_at("room_1", 3, None, at(42));
    let raw = store.get(storage_keys::LAST_SEEN_POSITIONS).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "room_1": { "messageId": 3, "timestamp": 42 } })
    );

    tracker.clear_all_positions();
    let raw = store.get(storage_keys::LAST_SEEN_POSITIONS).unwrap().unwrap();
    assert_eq!(raw, "{}");
}

#[test]
fn positions_survive_restart_on_disk() {
    let dir = tempfile::tempdir().unwrap();

    let mut tracker = LastSeenTracker::open(FileStore::new(dir.path()));
    tracker.update_last_seen_position("room_1", 3, None);
    drop(tracker);

    let reopened = LastSeenTracker::open(FileStore::new(dir.path()));
    assert_eq!(
        reopened.get_last_seen_position("room_1").unwrap().message_id,
        MessageId::Number(3)
    );
}

#[test]
fn teardown_clears_and_returns_store() {
    let mut tracker = LastSeenTracker::open(MemoryStore::new());
    tracker.update_last_seen_position("room_1", 3, None);

    let store = tracker.teardown();
    let next = LastSeenTracker::open(store);
    assert!(next.get_all_positions().is_empty());
}

#[test]
fn corrupt_store_behaves_as_empty() {
    let store = MemoryStore::new();
    store
        .set(storage_keys::LAST_SEEN_POSITIONS, "{ definitely not json")
        .unwrap();

    let tracker = LastSeenTracker::open(store);
    assert!(tracker.get_last_seen_position("room_1").is_none());
    assert!(tracker.is_message_new("room_1", &MessageId::Number(1), None));
}

#[test]
fn corrupt_record_is_dropped_and_others_kept() {
    let store = MemoryStore::new();
    store
        .set(
            storage_keys::LAST_SEEN_POSITIONS,
            r#"{
                "room_1": { "messageId": 3, "timestamp": 10 },
                "room_2": { "messageId": null },
                "room_3": "garbage"
            }"#,
        )
        .unwrap();

    let tracker = LastSeenTracker::open(store);
    assert!(tracker.get_last_seen_position("room_1").is_some());
    assert!(tracker.get_last_seen_position("room_2").is_none());
    assert!(tracker.get_last_seen_position("room_3").is_none());
}

#[test]
fn unavailable_store_never_panics() {
    let mut tracker = LastSeenTracker::open(UnavailableStore);
    tracker.update_last_seen_position("room_1", 3, None);

    // The in-memory table still answers for the rest of the run.
    assert!(tracker.get_last_seen_position("room_1").is_some());
    tracker.remove_last_seen_position("room_1");
    tracker.clear_all_positions();
}

#[test]
fn everything_is_new_without_a_record() {
    let tracker = LastSeenTracker::open(MemoryStore::new());
    assert!(tracker.is_message_new("room_1", &MessageId::Number(1), None));
    assert!(tracker.is_message_new("room_1", &MessageId::from("x"), Some(5)));
}

#[test]
fn newness_prefers_timestamps() {
    let mut tracker = LastSeenTracker::open(MemoryStore::new());
    tracker.update_last_seen_position_at("room_1", 10, None, at(5_000));

    // A lower id sent later is new when timestamps are available.
    assert!(tracker.is_message_new("room_1", &MessageId::Number(2), Some(6_000)));
    assert!(!tracker.is_message_new("room_1", &MessageId::Number(20), Some(4_000)));
}

#[test]
fn newness_falls_back_to_numeric_ids() {
    let mut tracker = LastSeenTracker::open(MemoryStore::new());
    tracker.update_last_seen_position_at("room_1", 10, None, at(5_000));

    assert!(tracker.is_message_new("room_1", &MessageId::Number(11), None));
    assert!(!tracker.is_message_new("room_1", &MessageId::Number(10), None));
    assert!(!tracker.is_message_new("room_1", &MessageId::Number(3), None));
}

#[test]
fn text_ids_without_timestamp_are_not_new() {
    let mut tracker = LastSeenTracker::open(MemoryStore::new());
    tracker.update_last_seen_position_at("room_1", "m-10", None, at(5_000));

    assert!(!tracker.is_message_new("room_1", &MessageId::from("m-11"), None));
    assert!(!tracker.is_message_new("room_1", &MessageId::Number(99), None));
}

#[test]
fn mark_conversation_as_read_records_latest() {
    let mut tracker = LastSeenTracker::open(MemoryStore::new());
    tracker.update_last_seen_position("room_1", 3, Some("user-1"));
    tracker.mark_conversation_as_read("room_1", 10);

    let record = tracker.get_last_seen_position("room_1").unwrap();
    assert_eq!(record.message_id, MessageId::Number(10));
    assert!(record.user_id.is_none());
}
