pub mod conversation;
pub mod last_seen;
pub mod message_id;
pub mod session;
