//! Which messages are on screen.
//!
//! The host reports element and viewport extents along the scroll axis; the
//! observer turns those reports into last-seen updates whenever the
//! bottom-most visible message changes.

use textenger_core::models::message_id::MessageId;
use textenger_storage::kv::KeyValueStore;

use crate::message::ChatMessage;
use crate::tracker::LastSeenTracker;

/// Vertical extent in one coordinate space, `top <= bottom`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub top: f64,
    pub bottom: f64,
}

impl Span {
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    pub fn height(&self) -> f64 {
        (self.bottom - self.top).max(0.0)
    }

    /// Share of this span covered by `viewport`, in `[0, 1]`.
    pub fn visible_fraction(&self, viewport: Span) -> f64 {
        let height = self.height();
        if height == 0.0 {
            let inside = self.top >= viewport.top && self.top <= viewport.bottom;
            return if inside { 1.0 } else { 0.0 };
        }
        let overlap = self.bottom.min(viewport.bottom) - self.top.max(viewport.top);
        (overlap.max(0.0) / height).min(1.0)
    }
}

/// Index of the bottom-most element that is on screen and at least
/// `threshold` visible.
pub fn last_visible_index(elements: &[Span], viewport: Span, threshold: f64) -> Option<usize> {
    elements.iter().rposition(|el| {
        let fraction = el.visible_fraction(viewport);
        fraction > 0.0 && fraction >= threshold
    })
}

/// Feeds viewport changes into the tracker while a view is open.
#[derive(Debug, Clone)]
pub struct VisibilityObserver {
    threshold: f64,
    observing: bool,
    last_reported: Option<MessageId>,
}

impl VisibilityObserver {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            observing: false,
            last_reported: None,
        }
    }

    pub fn observe(&mut self) {
        self.observing = true;
    }

    /// Stop reacting to viewport changes. Called when the view closes.
    pub fn disconnect(&mut self) {
        self.observing = false;
        self.last_reported = None;
    }

    pub fn is_observing(&self) -> bool {
        self.observing
    }

    /// Handle one "visible region changed" notification.
    ///
    /// `layout[i]` is the extent of `messages[i]`. Returns the id written to
    /// the tracker, or `None` when nothing changed.
    pub fn on_visibility_changed<M: ChatMessage, S: KeyValueStore>(
        &mut self,
        conversation_id: &str,
        messages: &[M],
        layout: &[Span],
        viewport: Span,
        tracker: &mut LastSeenTracker<S>,
    ) -> Option<MessageId> {
        if !self.observing {
            return None;
        }

        let rendered = messages.len().min(layout.len());
        let index = last_visible_index(&layout[..rendered], viewport, self.threshold)?;
        let message_id = messages[index].message_id();

        if self
            .last_reported
            .as_ref()
            .is_some_and(|prev| prev.matches(message_id))
        {
            return None;
        }

        tracker.update_last_seen_position(conversation_id, message_id.clone(), None);
        self.last_reported = Some(message_id.clone());
        Some(message_id.clone())
    }
}
