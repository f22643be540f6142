//! textenger-core
//!
//! Pure domain types and key conventions shared by the feed and chat crates.
//! No storage or I/O lives here.

pub mod conversation_ids;
pub mod error;
pub mod models;
pub mod storage_keys;
