use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("storage error: {0}")]
    Storage(#[from] textenger_storage::error::StorageError),
}
