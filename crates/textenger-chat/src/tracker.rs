use std::collections::BTreeMap;

use jiff::Timestamp;
use textenger_core::models::last_seen::{ConversationLastSeen, LastSeenPosition};
use textenger_core::models::message_id::MessageId;
use textenger_core::storage_keys;
use textenger_storage::kv::KeyValueStore;
use textenger_storage::state::{load_state, save_state};

use crate::error::ChatError;

/// Durable map from conversation id to the last message the user viewed.
///
/// The table is loaded once when the tracker opens and written through to
/// the store as a whole after every change. Storage failures are logged and
/// swallowed: an unreadable store behaves as an empty one.
pub struct LastSeenTracker<S: KeyValueStore> {
    store: S,
    positions: ConversationLastSeen,
}

impl<S: KeyValueStore> LastSeenTracker<S> {
    /// Load the table from `store`. Called once at app start.
    pub fn open(store: S) -> Self {
        let positions = match read_table(&store) {
            Ok(positions) => positions,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load last seen positions");
                ConversationLastSeen::new()
            }
        };
        tracing::debug!(conversations = positions.len(), "last seen tracker opened");
        Self { store, positions }
    }

    /// Clear every position and hand the store back. Called at logout so the
    /// next account on this device starts clean.
    pub fn teardown(mut self) -> S {
        self.clear_all_positions();
        self.store
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn update_last_seen_position(
        &mut self,
        conversation_id: &str,
        message_id: impl Into<MessageId>,
        user_id: Option<&str>,
    ) {
        self.update_last_seen_position_at(conversation_id, message_id, user_id, Timestamp::now());
    }

    /// Upsert with an explicit recording time.
    pub fn update_last_seen_position_at(
        &mut self,
        conversation_id: &str,
        message_id: impl Into<MessageId>,
        user_id: Option<&str>,
        at: Timestamp,
    ) {
        let position = LastSeenPosition {
            message_id: message_id.into(),
            timestamp: at.as_millisecond(),
            user_id: user_id.map(str::to_string),
        };
        tracing::debug!(
            conversation_id,
            message_id = %position.message_id,
            "last seen position updated"
        );
        self.positions.insert(conversation_id.to_string(), position);
        self.persist();
    }

    pub fn get_last_seen_position(&self, conversation_id: &str) -> Option<&LastSeenPosition> {
        self.positions.get(conversation_id)
    }

    pub fn remove_last_seen_position(&mut self, conversation_id: &str) {
        if self.positions.remove(conversation_id).is_some() {
            tracing::debug!(conversation_id, "last seen position removed");
        }
        self.persist();
    }

    pub fn clear_all_positions(&mut self) {
        let cleared = self.positions.len();
        self.positions.clear();
        self.persist();
        tracing::info!(cleared, "all last seen positions cleared");
    }

    /// Snapshot of the whole table.
    pub fn get_all_positions(&self) -> ConversationLastSeen {
        self.positions.clone()
    }

    /// Record `latest_message_id` as seen. Used when the user sends a
    /// message, having implicitly read everything before it.
    pub fn mark_conversation_as_read(
        &mut self,
        conversation_id: &str,
        latest_message_id: impl Into<MessageId>,
    ) {
        self.update_last_seen_position(conversation_id, latest_message_id, None);
    }

    /// Whether a message arrived after the user's last-seen point.
    ///
    /// Everything is new when there is no record. Timestamps are compared
    /// when both sides have one, then numeric ids. Text ids without a
    /// timestamp cannot be ordered and report `false`.
    pub fn is_message_new(
        &self,
        conversation_id: &str,
        message_id: &MessageId,
        message_timestamp: Option<i64>,
    ) -> bool {
        let Some(last_seen) = self.get_last_seen_position(conversation_id) else {
            return true;
        };

        let message_timestamp = message_timestamp.filter(|ts| *ts != 0);
        if let Some(ts) = message_timestamp {
            if last_seen.timestamp != 0 {
                return ts > last_seen.timestamp;
            }
        }

        if let Some(ordering) = message_id.numeric_cmp(&last_seen.message_id) {
            return ordering.is_gt();
        }

        message_timestamp.is_some_and(|ts| ts > last_seen.timestamp)
    }

    fn persist(&self) {
        if let Err(e) = save_state(&self.store, storage_keys::LAST_SEEN_POSITIONS, &self.positions) {
            tracing::warn!(error = %e, "failed to save last seen positions");
        }
    }
}

/// Read the stored table, dropping individual records that do not parse.
fn read_table(store: &impl KeyValueStore) -> Result<ConversationLastSeen, ChatError> {
    let raw: Option<BTreeMap<String, serde_json::Value>> =
        load_state(store, storage_keys::LAST_SEEN_POSITIONS)?;

    let mut positions = ConversationLastSeen::new();
    for (conversation_id, value) in raw.unwrap_or_default() {
        match serde_json::from_value::<LastSeenPosition>(value) {
            Ok(position) => {
                positions.insert(conversation_id, position);
            }
            Err(e) => {
                tracing::warn!(conversation_id, error = %e, "dropping corrupt last seen record");
            }
        }
    }
    Ok(positions)
}
