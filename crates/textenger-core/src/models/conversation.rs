use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// What kind of conversation a view is showing. Decides where scrolling
/// resumes when the view opens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ConversationKind {
    /// Direct-message thread. Always resumes at the newest message.
    Dm,
    /// Multi-party room. Resumes at the last message the user saw.
    #[default]
    Room,
}

impl std::fmt::Display for ConversationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConversationKind::Dm => f.write_str("dm"),
            ConversationKind::Room => f.write_str("room"),
        }
    }
}

impl std::str::FromStr for ConversationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dm" => Ok(ConversationKind::Dm),
            "room" => Ok(ConversationKind::Room),
            other => Err(format!("unknown conversation kind: {other}")),
        }
    }
}
