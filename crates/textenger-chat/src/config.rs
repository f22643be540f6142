use serde::{Deserialize, Serialize};

pub const DEFAULT_SCROLL_PADDING_PX: u32 = 100;
pub const DEFAULT_VISIBILITY_THRESHOLD: f64 = 0.5;
pub const DEFAULT_SMOOTH_SCROLL_GUARD_MS: u64 = 500;

/// Tunables for one conversation view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Gap left above a resumed message so it is not flush with the top edge.
    pub padding_px: u32,
    /// Fraction of a message's height that must be on screen for it to count
    /// as seen.
    pub visibility_threshold: f64,
    /// How long a smooth scroll blocks another programmatic scroll.
    pub smooth_scroll_guard_ms: u64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            padding_px: DEFAULT_SCROLL_PADDING_PX,
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
            smooth_scroll_guard_ms: DEFAULT_SMOOTH_SCROLL_GUARD_MS,
        }
    }
}
