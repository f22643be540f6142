//! textenger-feed
//!
//! Per-session feed ordering. A seed is drawn once per session and every
//! render in that session shuffles the same posts into the same order.

pub mod feed;
pub mod seed;
pub mod session;
pub mod shuffle;
