//! Where to scroll when a conversation view opens.
//!
//! Resolution happens once per open: the resolver starts `Unresolved`, moves
//! to one of the two resolved states on the first call that has messages to
//! work with, and stays there until the view is reset.

use textenger_core::models::conversation::ConversationKind;
use textenger_core::models::last_seen::LastSeenPosition;
use textenger_core::models::message_id::MessageId;

use crate::message::{ChatMessage, position_of};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollState {
    Unresolved,
    ResolvedToBottom,
    ResolvedToPosition,
}

/// Why a view resumed at the newest message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BottomReason {
    DirectMessage,
    NoRecord,
    /// The recorded message is not in the loaded list, e.g. history was pruned.
    StalePointer,
    /// The user marked the conversation read.
    MarkedRead,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrollTarget {
    /// Jump to the newest message.
    Bottom {
        index: usize,
        message_id: MessageId,
        reason: BottomReason,
    },
    /// Smooth-scroll to a previously seen message, leaving `padding_px` of
    /// space above it.
    Message {
        index: usize,
        message_id: MessageId,
        padding_px: u32,
    },
}

impl ScrollTarget {
    pub fn index(&self) -> usize {
        match self {
            ScrollTarget::Bottom { index, .. } | ScrollTarget::Message { index, .. } => *index,
        }
    }

    pub fn message_id(&self) -> &MessageId {
        match self {
            ScrollTarget::Bottom { message_id, .. } | ScrollTarget::Message { message_id, .. } => {
                message_id
            }
        }
    }

    pub fn state(&self) -> ScrollState {
        match self {
            ScrollTarget::Bottom { .. } => ScrollState::ResolvedToBottom,
            ScrollTarget::Message { .. } => ScrollState::ResolvedToPosition,
        }
    }
}

/// Pure resume policy. `None` only when `messages` is empty.
pub fn resolve_scroll_target<M: ChatMessage>(
    kind: ConversationKind,
    last_seen: Option<&LastSeenPosition>,
    messages: &[M],
    padding_px: u32,
) -> Option<ScrollTarget> {
    let newest_index = messages.len().checked_sub(1)?;
    let bottom = |reason| ScrollTarget::Bottom {
        index: newest_index,
        message_id: messages[newest_index].message_id().clone(),
        reason,
    };

    if kind == ConversationKind::Dm {
        return Some(bottom(BottomReason::DirectMessage));
    }

    let Some(last_seen) = last_seen else {
        return Some(bottom(BottomReason::NoRecord));
    };

    match position_of(messages, &last_seen.message_id) {
        Some(index) => Some(ScrollTarget::Message {
            index,
            message_id: messages[index].message_id().clone(),
            padding_px,
        }),
        None => Some(bottom(BottomReason::StalePointer)),
    }
}

/// One-shot guard around [`resolve_scroll_target`].
#[derive(Debug, Clone)]
pub struct ScrollResolver {
    state: ScrollState,
    padding_px: u32,
}

impl ScrollResolver {
    pub fn new(padding_px: u32) -> Self {
        Self {
            state: ScrollState::Unresolved,
            padding_px,
        }
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    pub fn is_resolved(&self) -> bool {
        self.state != ScrollState::Unresolved
    }

    /// Re-arm for the next open.
    pub fn reset(&mut self) {
        self.state = ScrollState::Unresolved;
    }

    /// Resolve the first time there are messages; `None` on every later call
    /// until [`reset`](Self::reset).
    pub fn resolve<M: ChatMessage>(
        &mut self,
        kind: ConversationKind,
        last_seen: Option<&LastSeenPosition>,
        messages: &[M],
    ) -> Option<ScrollTarget> {
        if self.is_resolved() {
            return None;
        }
        let target = resolve_scroll_target(kind, last_seen, messages, self.padding_px)?;
        self.state = target.state();
        Some(target)
    }
}
