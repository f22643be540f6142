//! Storage key conventions.
//!
//! Each key holds one whole value. The last-seen table is written and read as
//! a single JSON document; nothing is ever partially updated at this layer.

/// Durable key holding the JSON mapping of conversation id to last-seen record.
pub const LAST_SEEN_POSITIONS: &str = "textenger_last_seen_positions";

/// Session-scoped key holding the feed shuffle seed.
pub const SESSION_SEED: &str = "textenger-session-seed";
