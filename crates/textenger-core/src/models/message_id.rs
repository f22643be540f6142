use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Identifier of a chat message as the backend hands it out.
///
/// Some backends use sequential integers, others opaque strings. Only the
/// numeric form carries an ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum MessageId {
    Number(i64),
    Text(String),
}

impl MessageId {
    pub fn as_number(&self) -> Option<i64> {
        match self {
            MessageId::Number(n) => Some(*n),
            MessageId::Text(_) => None,
        }
    }

    /// True when both ids have the same textual form, so `3` matches `"3"`.
    pub fn matches(&self, other: &MessageId) -> bool {
        match (self, other) {
            (MessageId::Number(a), MessageId::Number(b)) => a == b,
            (MessageId::Text(a), MessageId::Text(b)) => a == b,
            (MessageId::Number(n), MessageId::Text(s))
            | (MessageId::Text(s), MessageId::Number(n)) => n.to_string() == *s,
        }
    }

    /// Compare two ids when both are numeric. String ids are not ordered.
    pub fn numeric_cmp(&self, other: &MessageId) -> Option<Ordering> {
        Some(self.as_number()?.cmp(&other.as_number()?))
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageId::Number(n) => write!(f, "{n}"),
            MessageId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for MessageId {
    fn from(n: i64) -> Self {
        MessageId::Number(n)
    }
}

impl From<i32> for MessageId {
    fn from(n: i32) -> Self {
        MessageId::Number(i64::from(n))
    }
}

impl From<u32> for MessageId {
    fn from(n: u32) -> Self {
        MessageId::Number(i64::from(n))
    }
}

impl From<&str> for MessageId {
    fn from(s: &str) -> Self {
        MessageId::Text(s.to_string())
    }
}

impl From<String> for MessageId {
    fn from(s: String) -> Self {
        MessageId::Text(s)
    }
}

impl std::str::FromStr for MessageId {
    type Err = std::convert::Infallible;

    /// Integers parse as numeric ids, anything else stays text.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<i64>() {
            Ok(n) => MessageId::Number(n),
            Err(_) => MessageId::Text(s.to_string()),
        })
    }
}
