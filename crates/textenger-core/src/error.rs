use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid conversation id: {0}")]
    InvalidConversationId(String),
}
