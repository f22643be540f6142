//! Conversation id conventions.
//!
//! Rooms and direct-message threads share one id space in the last-seen
//! table, so the kind is encoded as a prefix.

use crate::error::CoreError;
use crate::models::conversation::ConversationKind;

const ROOM_PREFIX: &str = "room_";
const DM_PREFIX: &str = "dm_";

pub fn room(id: impl std::fmt::Display) -> String {
    format!("{ROOM_PREFIX}{id}")
}

pub fn dm(id: impl std::fmt::Display) -> String {
    format!("{DM_PREFIX}{id}")
}

/// Split a conversation id into its kind and the bare id after the prefix.
pub fn parse(conversation_id: &str) -> Result<(ConversationKind, &str), CoreError> {
    let (kind, rest) = if let Some(rest) = conversation_id.strip_prefix(ROOM_PREFIX) {
        (ConversationKind::Room, rest)
    } else if let Some(rest) = conversation_id.strip_prefix(DM_PREFIX) {
        (ConversationKind::Dm, rest)
    } else {
        return Err(CoreError::InvalidConversationId(
            conversation_id.to_string(),
        ));
    };

    if rest.is_empty() {
        return Err(CoreError::InvalidConversationId(
            conversation_id.to_string(),
        ));
    }
    Ok((kind, rest))
}
