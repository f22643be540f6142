use jiff::Timestamp;
use textenger_core::models::conversation::ConversationKind;
use textenger_core::models::message_id::MessageId;
use textenger_storage::kv::KeyValueStore;

use crate::config::ScrollConfig;
use crate::guard::SmoothScrollGuard;
use crate::message::ChatMessage;
use crate::scroll::{BottomReason, ScrollResolver, ScrollState, ScrollTarget};
use crate::tracker::LastSeenTracker;
use crate::visibility::{Span, VisibilityObserver};

/// Scroll bookkeeping for the conversation currently on screen.
///
/// The tracker is not owned: one tracker serves every view in the app and is
/// passed in by reference on each call.
#[derive(Debug, Clone)]
pub struct ConversationView {
    conversation_id: String,
    kind: ConversationKind,
    open: bool,
    resolver: ScrollResolver,
    observer: VisibilityObserver,
    guard: SmoothScrollGuard,
}

impl ConversationView {
    /// Open a view. Scroll resolution is armed and the observer starts.
    pub fn open(conversation_id: impl Into<String>, kind: ConversationKind, config: ScrollConfig) -> Self {
        let mut observer = VisibilityObserver::new(config.visibility_threshold);
        observer.observe();
        let conversation_id = conversation_id.into();
        tracing::debug!(%conversation_id, %kind, "conversation view opened");
        Self {
            conversation_id,
            kind,
            open: true,
            resolver: ScrollResolver::new(config.padding_px),
            observer,
            guard: SmoothScrollGuard::new(config.smooth_scroll_guard_ms),
        }
    }

    pub fn conversation_id(&self) -> &str {
        &self.conversation_id
    }

    pub fn kind(&self) -> ConversationKind {
        self.kind
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn scroll_state(&self) -> ScrollState {
        self.resolver.state()
    }

    /// Show a different conversation in this view. Counts as close + open.
    pub fn switch_to(&mut self, conversation_id: impl Into<String>, kind: ConversationKind) {
        let conversation_id = conversation_id.into();
        if self.open && conversation_id == self.conversation_id && kind == self.kind {
            return;
        }
        self.close();
        self.conversation_id = conversation_id;
        self.kind = kind;
        self.reopen();
    }

    pub fn close(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        self.observer.disconnect();
        self.resolver.reset();
        self.guard.release();
        tracing::debug!(conversation_id = %self.conversation_id, "conversation view closed");
    }

    pub fn reopen(&mut self) {
        if self.open {
            return;
        }
        self.open = true;
        self.resolver.reset();
        self.observer.observe();
        tracing::debug!(conversation_id = %self.conversation_id, "conversation view reopened");
    }

    /// Resolve the initial scroll target once messages are loaded. Later
    /// calls in the same open return `None`.
    pub fn on_messages_loaded<M: ChatMessage, S: KeyValueStore>(
        &mut self,
        tracker: &LastSeenTracker<S>,
        messages: &[M],
        now: Timestamp,
    ) -> Option<ScrollTarget> {
        if !self.open {
            return None;
        }
        let last_seen = tracker.get_last_seen_position(&self.conversation_id);
        let target = self.resolver.resolve(self.kind, last_seen, messages)?;
        if matches!(target, ScrollTarget::Message { .. }) {
            self.guard.try_begin(now);
        }
        tracing::debug!(
            conversation_id = %self.conversation_id,
            index = target.index(),
            message_id = %target.message_id(),
            "scroll target resolved"
        );
        Some(target)
    }

    /// Re-run resolution in the same open, e.g. after the user asked to
    /// jump back to where they left off. Refused while a smooth scroll is
    /// still running.
    pub fn resume<M: ChatMessage, S: KeyValueStore>(
        &mut self,
        tracker: &LastSeenTracker<S>,
        messages: &[M],
        now: Timestamp,
    ) -> Option<ScrollTarget> {
        if !self.open || self.guard.is_blocked(now) {
            return None;
        }
        self.resolver.reset();
        self.on_messages_loaded(tracker, messages, now)
    }

    /// Record the bottom-most visible message as seen.
    pub fn on_viewport_changed<M: ChatMessage, S: KeyValueStore>(
        &mut self,
        tracker: &mut LastSeenTracker<S>,
        messages: &[M],
        layout: &[Span],
        viewport: Span,
    ) -> Option<MessageId> {
        if !self.open {
            return None;
        }
        self.observer
            .on_visibility_changed(&self.conversation_id, messages, layout, viewport, tracker)
    }

    /// Whether `message` arrived after this conversation's last-seen record.
    /// The message's send time is used when it carries one.
    pub fn is_new<M: ChatMessage, S: KeyValueStore>(&self, tracker: &LastSeenTracker<S>, message: &M) -> bool {
        tracker.is_message_new(&self.conversation_id, message.message_id(), message.sent_at())
    }

    /// Mark everything read and jump to the newest message. Called when the
    /// user sends a message.
    pub fn mark_as_read<M: ChatMessage, S: KeyValueStore>(
        &mut self,
        tracker: &mut LastSeenTracker<S>,
        messages: &[M],
    ) -> Option<ScrollTarget> {
        if !self.open {
            return None;
        }
        let index = messages.len().checked_sub(1)?;
        let latest = messages[index].message_id().clone();
        tracker.mark_conversation_as_read(&self.conversation_id, latest.clone());
        Some(ScrollTarget::Bottom {
            index,
            message_id: latest,
            reason: BottomReason::MarkedRead,
        })
    }
}
