//! textenger-chat
//!
//! Last-seen bookkeeping for rooms and direct messages: a durable record of
//! the last message viewed per conversation, and the scroll logic that
//! resumes a conversation where the user left off.

pub mod config;
pub mod error;
pub mod guard;
pub mod message;
pub mod scroll;
pub mod tracker;
pub mod view;
pub mod visibility;
