//! Icon resolution for a single explorer entry
//!
//! Resolution is a pure lookup against a [`HighlightTable`]. The only filesystem
//! access is the symlink probe, which runs for plain top-level directories only.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::table::{HighlightEntry, HighlightTable, IconKind};

/// Read-only filesystem queries needed during resolution
pub trait FsProbe {
    fn is_symlink(&self, path: &Path) -> bool;
}

/// [`FsProbe`] backed by `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFs;

impl FsProbe for StdFs {
    fn is_symlink(&self, path: &Path) -> bool {
        std::fs::symlink_metadata(path)
            .map(|m| m.file_type().is_symlink())
            .unwrap_or(false)
    }
}

/// One row of the explorer listing
#[derive(Debug, Clone, Copy)]
pub struct EntryDescriptor<'a> {
    pub path: &'a Path,
    pub is_directory: bool,
    pub is_selected: bool,
    pub is_root: bool,
    /// Tree depth, 0 for entries directly under the listed directory
    pub level: usize,
    pub is_opened_tree: bool,
}

impl<'a> EntryDescriptor<'a> {
    pub fn file(path: &'a Path) -> Self {
        Self {
            path,
            is_directory: false,
            is_selected: false,
            is_root: false,
            level: 0,
            is_opened_tree: false,
        }
    }

    pub fn directory(path: &'a Path) -> Self {
        Self {
            is_directory: true,
            ..Self::file(path)
        }
    }

    pub fn root(path: &'a Path) -> Self {
        Self {
            is_root: true,
            ..Self::directory(path)
        }
    }

    pub fn selected(mut self, is_selected: bool) -> Self {
        self.is_selected = is_selected;
        self
    }

    pub fn at_level(mut self, level: usize) -> Self {
        self.level = level;
        self
    }

    pub fn opened(mut self, is_opened_tree: bool) -> Self {
        self.is_opened_tree = is_opened_tree;
        self
    }

    /// Final path component, empty for paths like `/`
    fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Columns active in the view being rendered
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    pub columns: Vec<String>,
}

impl RenderContext {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }
}

/// Pending clipboard operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClipboardAction {
    #[default]
    None,
    Copy,
    Move,
}

/// Clipboard contents as seen by the view
#[derive(Debug, Clone, Default)]
pub struct ClipboardState {
    pub action: ClipboardAction,
    pub members: HashSet<PathBuf>,
}

impl ClipboardState {
    pub fn new<I, P>(action: ClipboardAction, members: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            action,
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, path: &Path) -> bool {
        !self.members.is_empty() && self.members.contains(path)
    }
}

/// Result of resolving one entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved<'t> {
    Icon(&'t HighlightEntry),
    /// Clipboard member with no pending action: empty text, no highlight
    Blank,
}

impl<'t> Resolved<'t> {
    pub fn text(&self) -> &'t str {
        match *self {
            Resolved::Icon(entry) => &entry.text,
            Resolved::Blank => "",
        }
    }

    pub fn entry(&self) -> Option<&'t HighlightEntry> {
        match *self {
            Resolved::Icon(entry) => Some(entry),
            Resolved::Blank => None,
        }
    }

    pub fn highlight(&self) -> Option<&'t str> {
        self.entry().map(|e| e.highlight.as_str())
    }
}

/// Pick the icon for `entry`; the first matching rule wins
///
/// Order: selection mark, clipboard action, root, directory rules, then file rules
/// (pattern, exact name, extension, default). File rules match on the lowercased
/// name; directory names match case-sensitively.
pub fn resolve<'t>(
    entry: &EntryDescriptor<'_>,
    context: &RenderContext,
    clipboard: &ClipboardState,
    table: &'t HighlightTable,
    fs: &dyn FsProbe,
) -> Resolved<'t> {
    let icon = move |kind: IconKind| Resolved::Icon(&table.item(kind).entry);

    if entry.is_selected && !context.has_column("mark") {
        return icon(IconKind::Mark);
    }

    if clipboard.contains(entry.path) {
        return match clipboard.action {
            ClipboardAction::Copy => icon(IconKind::Copy),
            ClipboardAction::Move => icon(IconKind::Move),
            ClipboardAction::None => Resolved::Blank,
        };
    }

    if entry.is_root {
        return icon(IconKind::ParentDirectory);
    }

    let name = entry.name();

    if entry.is_directory {
        if let Some(rule) = table.exact_dir(&name) {
            return Resolved::Icon(rule);
        }
        if entry.level > 0 {
            return if entry.is_opened_tree {
                icon(IconKind::NestedOpenedTree)
            } else {
                icon(IconKind::NestedClosedTree)
            };
        }
        if entry.is_opened_tree {
            return icon(IconKind::RootOpenedTree);
        }
        if fs.is_symlink(entry.path) {
            return icon(IconKind::SymlinkDirectory);
        }
        return icon(IconKind::Directory);
    }

    let filename = name.to_lowercase();
    let ext = extension_of(&filename);

    table
        .match_pattern(&filename)
        .or_else(|| table.exact_file(&filename))
        .or_else(|| table.extension(ext))
        .map(Resolved::Icon)
        .unwrap_or_else(|| icon(IconKind::Default))
}

/// Text after the last `.` of a file name, empty if there is none
///
/// A leading dot does not start an extension: `.bashrc` has none.
pub fn extension_of(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(0) | None => "",
        Some(i) => &filename[i + 1..],
    }
}
