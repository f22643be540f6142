use textenger_cli::config::{TextengerConfig, load_config, load_or_init, save_config};

#[test]
fn missing_config_is_initialised_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");

    let config = load_or_init(&path).unwrap();
    assert!(path.exists());
    assert_eq!(config.config_version, 1);
    assert_eq!(config.scroll_padding_px, 100);
    assert_eq!(config.smooth_scroll_guard_ms, 500);
    assert_eq!(config.visibility_threshold, 0.5);

    let reloaded = load_config(&path).unwrap();
    assert_eq!(reloaded, config);
}

#[test]
fn v0_config_gains_visibility_threshold() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{
            "scroll_padding_px": 80,
            "smooth_scroll_guard_ms": 250,
            "created_at": "2025-01-01T00:00:00Z"
        }"#,
    )
    .unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config.config_version, 1);
    assert_eq!(config.scroll_padding_px, 80);
    assert_eq!(config.visibility_threshold, 0.5);

    let scroll = config.scroll_config();
    assert_eq!(scroll.padding_px, 80);
    assert_eq!(scroll.smooth_scroll_guard_ms, 250);
}

#[test]
fn newer_config_versions_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{
            "config_version": 99,
            "scroll_padding_px": 80,
            "smooth_scroll_guard_ms": 250,
            "visibility_threshold": 0.5,
            "created_at": "2025-01-01T00:00:00Z"
        }"#,
    )
    .unwrap();

    let err = load_config(&path).unwrap_err();
    assert!(err.to_string().contains("newer than this build supports"));
}

#[test]
fn save_stamps_current_version_and_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    let config = TextengerConfig {
        config_version: 0,
        data_dir: Some(dir.path().join("store")),
        ..TextengerConfig::default()
    };
    save_config(&path, &config).unwrap();

    let loaded = load_config(&path).unwrap();
    assert_eq!(loaded.config_version, 1);
    assert_eq!(loaded.store_root().unwrap(), dir.path().join("store"));
    assert!(!dir.path().join("config.json.tmp").exists());
}
