use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use textenger_chat::config::{
    DEFAULT_SCROLL_PADDING_PX, DEFAULT_SMOOTH_SCROLL_GUARD_MS, DEFAULT_VISIBILITY_THRESHOLD,
    ScrollConfig,
};
use textenger_storage::file::FileStore;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextengerConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    /// Where the durable store lives. `None` uses the platform data dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    pub scroll_padding_px: u32,
    pub smooth_scroll_guard_ms: u64,
    /// Added in v1.
    pub visibility_threshold: f64,
    pub created_at: jiff::Timestamp,
}

impl Default for TextengerConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            data_dir: None,
            scroll_padding_px: DEFAULT_SCROLL_PADDING_PX,
            smooth_scroll_guard_ms: DEFAULT_SMOOTH_SCROLL_GUARD_MS,
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
            created_at: jiff::Timestamp::now(),
        }
    }
}

impl TextengerConfig {
    pub fn scroll_config(&self) -> ScrollConfig {
        ScrollConfig {
            padding_px: self.scroll_padding_px,
            visibility_threshold: self.visibility_threshold,
            smooth_scroll_guard_ms: self.smooth_scroll_guard_ms,
        }
    }

    pub fn store_root(&self) -> eyre::Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => FileStore::default_root().ok_or_else(|| eyre::eyre!("no data directory found")),
        }
    }
}

fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("com.textenger.desktop"))
}

pub fn default_config_path() -> eyre::Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

pub fn load_config(path: &Path) -> eyre::Result<TextengerConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: TextengerConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Load the config at `path`, writing a default one first if none exists.
pub fn load_or_init(path: &Path) -> eyre::Result<TextengerConfig> {
    if path.exists() {
        return load_config(path);
    }
    let config = TextengerConfig::default();
    save_config(path, &config)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
/// Each migration is a pure transform on the raw JSON value.
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update Textenger."
        ));
    }

    // v0 → v1: add visibility_threshold
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        obj.entry("visibility_threshold")
            .or_insert(serde_json::json!(DEFAULT_VISIBILITY_THRESHOLD));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (added visibility_threshold)");
    }

    Ok(json)
}

pub fn save_config(path: &Path, config: &TextengerConfig) -> eyre::Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| eyre::eyre!("config path has no parent: {}", path.display()))?;
    std::fs::create_dir_all(dir)?;

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}

pub fn delete_config(path: &Path) -> eyre::Result<()> {
    if path.exists() {
        std::fs::remove_file(path)?;
        tracing::info!(path = %path.display(), "config deleted");
    }
    Ok(())
}
