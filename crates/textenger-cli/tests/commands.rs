use std::path::Path;

use clap::Parser;
use textenger_chat::tracker::LastSeenTracker;
use textenger_cli::commands::{Cli, parse_messages, run, run_demo};
use textenger_cli::config::{TextengerConfig, save_config};
use textenger_core::models::message_id::MessageId;
use textenger_storage::file::FileStore;

fn write_config(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("config.json");
    let config = TextengerConfig {
        data_dir: Some(dir.join("store")),
        ..TextengerConfig::default()
    };
    save_config(&path, &config).unwrap();
    path
}

fn run_args(args: &[&str]) -> String {
    let cli = Cli::try_parse_from(args).unwrap();
    let mut out = Vec::new();
    run(cli, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn message_lists_expand_ranges() {
    let raw = vec!["1..3".to_string(), "abc".to_string(), "7".to_string()];
    let ids: Vec<MessageId> = parse_messages(&raw)
        .unwrap()
        .into_iter()
        .map(|m| m.id)
        .collect();
    assert_eq!(
        ids,
        vec![
            MessageId::Number(1),
            MessageId::Number(2),
            MessageId::Number(3),
            MessageId::Text("abc".into()),
            MessageId::Number(7),
        ]
    );

    assert!(parse_messages(&["5..2".to_string()]).is_err());
}

#[test]
fn oversized_ranges_are_rejected() {
    assert!(parse_messages(&["1..9999999999999".to_string()]).is_err());
    assert_eq!(parse_messages(&["1..100000".to_string()]).unwrap().len(), 100_000);
}

#[test]
fn non_numeric_ranges_are_text_ids() {
    let raw = vec!["thread..reply".to_string(), "a..3".to_string()];
    let ids: Vec<MessageId> = parse_messages(&raw)
        .unwrap()
        .into_iter()
        .map(|m| m.id)
        .collect();
    assert_eq!(
        ids,
        vec![
            MessageId::Text("thread..reply".into()),
            MessageId::Text("a..3".into()),
        ]
    );
}

#[test]
fn feed_with_fixed_seed_is_stable() {
    let args = ["textenger", "feed", "--seed", "ab", "1", "2", "3", "4", "5"];
    let first = run_args(&args);
    let second = run_args(&args);
    assert_eq!(first, second);
    assert!(first.starts_with("seed:    ab\n"));
    assert!(first.contains("  1. 3\n"));
    assert!(first.contains("  5. 1\n"));
}

#[test]
fn last_seen_commands_persist_to_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());
    let config = config.to_str().unwrap();

    run_args(&["textenger", "--config", config, "last-seen", "set", "room_1", "3"]);

    let tracker = LastSeenTracker::open(FileStore::new(dir.path().join("store")));
    assert_eq!(
        tracker.get_last_seen_position("room_1").unwrap().message_id,
        MessageId::Number(3)
    );

    let out = run_args(&["textenger", "--config", config, "last-seen", "is-new", "room_1", "4"]);
    assert_eq!(out.trim(), "true");

    let out = run_args(&[
        "textenger", "--config", config, "resolve", "room_1", "--messages", "1..10",
    ]);
    assert!(out.starts_with("resume: message 3"), "{out}");

    run_args(&["textenger", "--config", config, "last-seen", "clear"]);
    let out = run_args(&["textenger", "--config", config, "last-seen", "get", "room_1"]);
    assert_eq!(out.trim(), "no last seen position for room_1");
}

#[test]
fn dm_prefix_resolves_to_bottom() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());
    let config = config.to_str().unwrap();

    run_args(&["textenger", "--config", config, "last-seen", "set", "dm_7", "3"]);
    let out = run_args(&[
        "textenger", "--config", config, "resolve", "dm_7", "--messages", "1..10",
    ]);
    assert!(out.starts_with("bottom: message 10"), "{out}");
}

#[test]
fn demo_walks_through_every_resume_case() {
    let mut out = Vec::new();
    run_demo(&TextengerConfig::default(), "1", &mut out).unwrap();
    let out = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines.len(), 5);
    assert!(lines[0].ends_with("bottom: message 10 (index 9, NoRecord)"));
    assert!(lines[1].ends_with("resume: message 3 (index 2, 100px padding)"));
    assert!(lines[2].ends_with("bottom: message 60 (index 10, StalePointer)"));
    assert!(lines[3].ends_with("bottom: message 10 (index 9, DirectMessage)"));
    assert!(lines[4].ends_with("bottom: message 10 (index 9, NoRecord)"));
}
