use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Debug view of the current feed session, safe to show in the UI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionInfo {
    pub has_active_seed: bool,
    /// Parsed from the timestamp prefix of the seed.
    pub session_start_time: Option<jiff::Timestamp>,
    /// First 12 characters of the seed followed by `...`.
    pub seed_preview: Option<String>,
}
