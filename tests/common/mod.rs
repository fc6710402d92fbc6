//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tree_icons::{ClipboardState, FsProbe, HighlightTable, IconConfig, RenderContext};

/// Small config with ASCII icons so assertions stay readable
pub const TEST_YAML: &str = r##"
settings:
  column_length: 2
  enable_syntax_highlight: true
icons:
  default_icon: "D"
  mark_icon: "*"
  copy_icon: "C"
  move_icon: "M"
  directory_icon: "d"
  parent_icon: "P"
  directory_symlink_icon: "L"
  root_opened_tree_icon: "O"
  nested_opened_tree_icon: "o"
  nested_closed_tree_icon: "c"
  pattern_matches:
    '.*\.min\.js$': { icon: "m", color: "F16529", term_color: "166" }
    'spec': { icon: "s", color: "#8DC149" }
  exact_matches:
    readme: { icon: "R", color: "519ABA", term_color: "67" }
    makefile: { icon: "K", color: "6D8086" }
  exact_dir_matches:
    .git: { icon: "G", color: "626262", term_color: "241" }
    Music: { icon: "U", color: "626262" }
  extensions:
    js: { icon: "J", color: "CBCB41", term_color: "185" }
    rs: { icon: "r", color: "DEA584", term_color: "180" }
    md: { icon: "w", color: "519ABA" }
"##;

pub const PREFIX: &str = "TreeIcons";

pub fn test_config() -> IconConfig {
    IconConfig::from_yaml(TEST_YAML).unwrap()
}

pub fn test_table() -> HighlightTable {
    HighlightTable::build(&test_config(), PREFIX).unwrap()
}

/// Context where the view has no dedicated mark column
pub fn no_mark_context() -> RenderContext {
    RenderContext::new(["icons", "filename"])
}

pub fn mark_context() -> RenderContext {
    RenderContext::new(["mark", "icons", "filename"])
}

pub fn empty_clipboard() -> ClipboardState {
    ClipboardState::default()
}

/// Filesystem stand-in that reports configured symlinks and counts probes
#[derive(Default)]
pub struct FakeFs {
    symlinks: HashSet<PathBuf>,
    probes: Cell<usize>,
}

impl FakeFs {
    pub fn with_symlinks<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            symlinks: paths.into_iter().map(Into::into).collect(),
            probes: Cell::new(0),
        }
    }

    pub fn probes(&self) -> usize {
        self.probes.get()
    }
}

impl FsProbe for FakeFs {
    fn is_symlink(&self, path: &Path) -> bool {
        self.probes.set(self.probes.get() + 1);
        self.symlinks.contains(path)
    }
}
