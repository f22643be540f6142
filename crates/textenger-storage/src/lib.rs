//! textenger-storage
//!
//! Synchronous key-value storage. A session-scoped in-memory store and a
//! durable file-backed store behind one trait.

pub mod error;
pub mod file;
pub mod kv;
pub mod memory;
pub mod state;
