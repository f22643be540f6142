use serde::{Deserialize, Serialize};
use textenger_core::models::message_id::MessageId;

/// Anything a conversation view lists. Lists are passed in display order,
/// oldest first.
pub trait ChatMessage {
    fn message_id(&self) -> &MessageId;

    /// Send time in Unix milliseconds, when the backend provides one.
    fn sent_at(&self) -> Option<i64> {
        None
    }
}

impl ChatMessage for MessageId {
    fn message_id(&self) -> &MessageId {
        self
    }
}

/// A message as loaded from the backend, reduced to what scrolling needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadedMessage {
    pub id: MessageId,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

impl LoadedMessage {
    pub fn new(id: impl Into<MessageId>) -> Self {
        Self {
            id: id.into(),
            timestamp: None,
        }
    }

    pub fn sent_at_millis(mut self, millis: i64) -> Self {
        self.timestamp = Some(millis);
        self
    }
}

impl ChatMessage for LoadedMessage {
    fn message_id(&self) -> &MessageId {
        &self.id
    }

    fn sent_at(&self) -> Option<i64> {
        self.timestamp
    }
}

/// Position of the message with `id`, compared by textual form.
pub fn position_of<M: ChatMessage>(messages: &[M], id: &MessageId) -> Option<usize> {
    messages.iter().position(|m| m.message_id().matches(id))
}
