use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::message_id::MessageId;

/// Pointer to the last message a user viewed in one conversation.
///
/// `timestamp` is milliseconds since the Unix epoch at the time the record
/// was written, matching what the web client stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LastSeenPosition {
    pub message_id: MessageId,
    #[ts(type = "number")]
    pub timestamp: i64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    #[ts(optional)]
    pub user_id: Option<String>,
}

impl LastSeenPosition {
    pub fn recorded_at(&self) -> Option<jiff::Timestamp> {
        jiff::Timestamp::from_millisecond(self.timestamp).ok()
    }
}

/// The whole last-seen table, keyed by conversation id. At most one record
/// per conversation.
pub type ConversationLastSeen = BTreeMap<String, LastSeenPosition>;
