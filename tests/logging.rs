//! Logging setup tests
//!
//! Installs the global subscriber, so this file holds a single test.

#![cfg(not(target_os = "windows"))]

use std::fs;

use tree_icons::config_paths::{self, LOG_FILE_PREFIX};

#[test]
fn test_init_twice_keeps_first_subscriber() {
    let home = tempfile::tempdir().unwrap();
    std::env::set_var("XDG_CONFIG_HOME", home.path());

    tree_icons::tracing::init();
    tree_icons::tracing::init();
    tracing::warn!("icons column logging test");

    let logs = config_paths::logs_dir().unwrap();
    assert!(logs.starts_with(home.path()));
    let log_files: Vec<_> = fs::read_dir(&logs)
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().starts_with(LOG_FILE_PREFIX))
        .collect();
    assert_eq!(log_files.len(), 1);

    let content = fs::read_to_string(log_files[0].path()).unwrap();
    assert!(content.contains("icons column logging test"));

    std::env::remove_var("XDG_CONFIG_HOME");
}
