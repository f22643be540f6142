use jiff::Timestamp;

/// Blocks new programmatic smooth scrolls while one is still animating.
#[derive(Debug, Clone)]
pub struct SmoothScrollGuard {
    window_ms: i64,
    blocked_until_ms: Option<i64>,
}

impl SmoothScrollGuard {
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms: i64::try_from(window_ms).unwrap_or(i64::MAX),
            blocked_until_ms: None,
        }
    }

    pub fn is_blocked(&self, now: Timestamp) -> bool {
        self.blocked_until_ms
            .is_some_and(|until| now.as_millisecond() < until)
    }

    /// Start a scroll at `now` unless one is in flight. Returns whether the
    /// caller may scroll.
    pub fn try_begin(&mut self, now: Timestamp) -> bool {
        if self.is_blocked(now) {
            return false;
        }
        self.blocked_until_ms = Some(now.as_millisecond().saturating_add(self.window_ms));
        true
    }

    pub fn release(&mut self) {
        self.blocked_until_ms = None;
    }
}
