//! Icons column tests: rendered text, highlight spans and table reloads

mod common;

use std::path::Path;

use common::{empty_clipboard, no_mark_context, test_config, FakeFs};
use tree_icons::column::DEFAULT_SYNTAX_NAME;
use tree_icons::{
    ClipboardAction, ClipboardState, EmitMode, EntryDescriptor, HighlightCommand, HighlightSpan,
    IconConfig, IconsColumn,
};

#[test]
fn test_length_is_column_length() {
    let column = IconsColumn::new(&test_config()).unwrap();

    assert_eq!(column.length(), 2);
    assert_eq!(column.syntax_name(), DEFAULT_SYNTAX_NAME);
}

#[test]
fn test_get_returns_padded_icon() {
    let column = IconsColumn::new(&test_config()).unwrap();
    let fs = FakeFs::default();

    let text = column.get(
        &EntryDescriptor::file(Path::new("/project/lib.rs")),
        &no_mark_context(),
        &empty_clipboard(),
        &fs,
    );

    assert_eq!(text, "r ");
}

#[test]
fn test_get_with_highlights_offsets_span_by_start() {
    let mut column = IconsColumn::new(&test_config()).unwrap();
    column.start = 4;
    let fs = FakeFs::default();

    let (text, spans) = column.get_with_highlights(
        &EntryDescriptor::directory(Path::new("/project/src")),
        &no_mark_context(),
        &empty_clipboard(),
        &fs,
    );

    assert_eq!(text, "d ");
    assert_eq!(
        spans,
        vec![HighlightSpan {
            highlight: "TreeIcons_directory".to_string(),
            start: 4,
            byte_len: 2,
        }]
    );
}

#[test]
fn test_default_icon_has_no_span() {
    let column = IconsColumn::new(&test_config()).unwrap();
    let fs = FakeFs::default();

    let (text, spans) = column.get_with_highlights(
        &EntryDescriptor::file(Path::new("/project/blob.bin")),
        &no_mark_context(),
        &empty_clipboard(),
        &fs,
    );

    assert_eq!(text, "D ");
    assert!(spans.is_empty());
}

#[test]
fn test_blank_clipboard_entry_has_no_span() {
    let column = IconsColumn::new(&test_config()).unwrap();
    let fs = FakeFs::default();
    let path = Path::new("/project/lib.rs");
    let clipboard = ClipboardState::new(ClipboardAction::None, [path]);

    let (text, spans) = column.get_with_highlights(
        &EntryDescriptor::file(path),
        &no_mark_context(),
        &clipboard,
        &fs,
    );

    assert_eq!(text, "");
    assert!(spans.is_empty());
}

#[test]
fn test_custom_syntax_name_prefixes_groups() {
    let column = IconsColumn::with_syntax_name(&test_config(), "Explorer_icons").unwrap();

    let commands = column.highlight_commands(EmitMode::Full);

    assert!(commands
        .iter()
        .all(|c| c.group().starts_with("Explorer_icons_")));
    assert!(commands.iter().any(|c| matches!(
        c,
        HighlightCommand::DefineMatch { contained_in, .. } if contained_in == "Explorer_icons"
    )));
}

#[test]
fn test_reload_swaps_table_but_keeps_old_snapshot() {
    let mut column = IconsColumn::new(&test_config()).unwrap();
    let before = column.snapshot();

    let config = test_config()
        .overlay_yaml("settings:\n  column_length: 4\n")
        .unwrap();
    column.reload(&config).unwrap();

    assert_eq!(column.length(), 4);
    assert_eq!(before.column_length(), 2);
}

#[test]
fn test_failed_reload_keeps_previous_table() {
    let mut column = IconsColumn::new(&test_config()).unwrap();
    let mut broken = test_config();
    broken.icons.mark_icon = None;

    assert!(column.reload(&broken).is_err());
    assert_eq!(column.length(), 2);
    assert_eq!(
        column.highlight_commands(EmitMode::LinkOnly),
        IconsColumn::new(&test_config())
            .unwrap()
            .highlight_commands(EmitMode::LinkOnly)
    );
}

#[test]
fn test_builtin_column() {
    let column = IconsColumn::new(&IconConfig::builtin().unwrap()).unwrap();

    assert_eq!(column.length(), 1);
    assert!(!column.highlight_commands(EmitMode::Full).is_empty());
}
