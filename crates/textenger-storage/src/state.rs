use serde::{Serialize, de::DeserializeOwned};

use crate::error::StorageError;
use crate::kv::KeyValueStore;

/// Load a JSON document from a key. `Ok(None)` when the key is absent.
pub fn load_state<T: DeserializeOwned>(
    store: &impl KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    let value: T = serde_json::from_str(&raw)?;
    Ok(Some(value))
}

/// Serialize a value and write it to a key in one piece.
pub fn save_state<T: Serialize>(
    store: &impl KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let body = serde_json::to_string(value)?;
    store.set(key, &body)
}
