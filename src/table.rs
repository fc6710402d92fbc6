//! Highlight table construction
//!
//! The table is the precomputed form of an [`IconConfig`]: every icon padded to
//! the column width, paired with the highlight group that colors it. It is built
//! once per configuration load and never mutated afterwards.

use std::collections::HashMap;

use regex::Regex;
use unicode_width::UnicodeWidthStr;

use crate::config::{ConfigError, IconConfig, IconRule, RuleTable};

/// Simple (non-table) icon categories, in emission order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconKind {
    Mark,
    Copy,
    Move,
    Directory,
    ParentDirectory,
    SymlinkDirectory,
    RootOpenedTree,
    NestedOpenedTree,
    NestedClosedTree,
    Default,
}

impl IconKind {
    pub const ALL: [IconKind; 10] = [
        IconKind::Mark,
        IconKind::Copy,
        IconKind::Move,
        IconKind::Directory,
        IconKind::ParentDirectory,
        IconKind::SymlinkDirectory,
        IconKind::RootOpenedTree,
        IconKind::NestedOpenedTree,
        IconKind::NestedClosedTree,
        IconKind::Default,
    ];

    /// Suffix of the highlight group name
    pub fn name(self) -> &'static str {
        match self {
            IconKind::Mark => "icon_mark",
            IconKind::Copy => "copy",
            IconKind::Move => "move",
            IconKind::Directory => "directory",
            IconKind::ParentDirectory => "parent_directory",
            IconKind::SymlinkDirectory => "symlink_directory",
            IconKind::RootOpenedTree => "root_opened_tree",
            IconKind::NestedOpenedTree => "nested_opened_tree",
            IconKind::NestedClosedTree => "nested_closed_tree",
            IconKind::Default => "default",
        }
    }

    /// Configuration key holding this icon
    pub fn config_key(self) -> &'static str {
        match self {
            IconKind::Mark => "mark_icon",
            IconKind::Copy => "copy_icon",
            IconKind::Move => "move_icon",
            IconKind::Directory => "directory_icon",
            IconKind::ParentDirectory => "parent_icon",
            IconKind::SymlinkDirectory => "directory_symlink_icon",
            IconKind::RootOpenedTree => "root_opened_tree_icon",
            IconKind::NestedOpenedTree => "nested_opened_tree_icon",
            IconKind::NestedClosedTree => "nested_closed_tree_icon",
            IconKind::Default => "default_icon",
        }
    }

    /// Host highlight group the icon is linked to, `None` when left uncolored
    pub fn link_group(self) -> Option<&'static str> {
        match self {
            IconKind::Mark => Some("Statement"),
            IconKind::Copy | IconKind::Move => Some("Special"),
            IconKind::Directory
            | IconKind::ParentDirectory
            | IconKind::SymlinkDirectory
            | IconKind::RootOpenedTree
            | IconKind::NestedOpenedTree
            | IconKind::NestedClosedTree => Some("Directory"),
            IconKind::Default => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Rule tables, in emission order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Pattern,
    ExactFile,
    ExactDir,
    Extension,
}

impl RuleKind {
    pub const ALL: [RuleKind; 4] = [
        RuleKind::Pattern,
        RuleKind::ExactFile,
        RuleKind::ExactDir,
        RuleKind::Extension,
    ];

    pub fn config_key(self) -> &'static str {
        match self {
            RuleKind::Pattern => "pattern_matches",
            RuleKind::ExactFile => "exact_matches",
            RuleKind::ExactDir => "exact_dir_matches",
            RuleKind::Extension => "extensions",
        }
    }
}

/// A padded icon and the highlight group that colors it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightEntry {
    /// Icon left-justified and space-filled to the column width
    pub text: String,
    /// Full highlight group name, e.g. `TreeIcons_directory`
    pub highlight: String,
    /// Byte length of `text`
    pub byte_len: usize,
    /// Whether the emitter registers `highlight` with the host
    pub styled: bool,
}

/// How a highlight group gets its color
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HighlightStyle {
    /// Link to an existing host group
    Link(&'static str),
    /// Explicit colors; `gui` is six hex digits without `#`
    Color { gui: String, term: Option<String> },
}

/// One table row: the icon as configured plus its derived entry
#[derive(Debug, Clone)]
pub struct Category {
    /// Raw icon, used as the character class of the syntax match
    pub icon: String,
    pub entry: HighlightEntry,
    pub style: Option<HighlightStyle>,
}

/// A rule table row, keyed by its match key
#[derive(Debug, Clone)]
pub struct RuleCategory {
    pub key: String,
    pub category: Category,
}

#[derive(Debug, Clone)]
struct PatternCategory {
    regex: Regex,
    rule: RuleCategory,
}

/// Precomputed icons and highlight groups for one configuration
#[derive(Debug, Clone)]
pub struct HighlightTable {
    prefix: String,
    column_length: usize,
    syntax_highlight: bool,
    items: [Category; 10],
    patterns: Vec<PatternCategory>,
    exact_files: Vec<RuleCategory>,
    exact_dirs: Vec<RuleCategory>,
    extensions: Vec<RuleCategory>,
    exact_file_index: HashMap<String, usize>,
    exact_dir_index: HashMap<String, usize>,
    extension_index: HashMap<String, usize>,
}

/// Strip everything but ASCII letters so a match key can form a group name
///
/// Distinct keys may sanitize to the same token; they then share a group name.
pub fn sanitize_key(key: &str) -> String {
    key.chars().filter(|c| c.is_ascii_alphabetic()).collect()
}

/// Left-justify `icon` in `width` display cells
pub fn pad_icon(icon: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(icon);
    let mut text = String::with_capacity(icon.len() + width.saturating_sub(used));
    text.push_str(icon);
    text.extend(std::iter::repeat(' ').take(width.saturating_sub(used)));
    text
}

fn validate_color(key: &str, color: &str) -> Result<String, ConfigError> {
    let hex = color.trim_start_matches('#');
    if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(hex.to_string())
    } else {
        Err(ConfigError::InvalidColor {
            key: key.to_string(),
            color: color.to_string(),
        })
    }
}

impl HighlightTable {
    /// Build a table from `config`, naming groups `{prefix}_{name}`
    ///
    /// Fails without producing a table if any category is missing or invalid.
    pub fn build(config: &IconConfig, prefix: &str) -> Result<Self, ConfigError> {
        let column_length = config.settings.column_length;
        if column_length == 0 {
            return Err(ConfigError::InvalidColumnLength(column_length));
        }
        let syntax_highlight = config.settings.enable_syntax_highlight;

        let entry = |icon: &str, name: &str, styled: bool| {
            let text = pad_icon(icon, column_length);
            HighlightEntry {
                byte_len: text.len(),
                text,
                highlight: format!("{}_{}", prefix, name),
                styled,
            }
        };

        let mut icons = [""; IconKind::ALL.len()];
        for (slot, kind) in icons.iter_mut().zip(IconKind::ALL) {
            *slot = simple_icon(config, kind).ok_or(ConfigError::MissingIcon(kind.config_key()))?;
        }
        let items = std::array::from_fn(|i| {
            let kind = IconKind::ALL[i];
            // Only the mark stays colored when syntax highlighting is off
            let style = kind
                .link_group()
                .filter(|_| syntax_highlight || kind == IconKind::Mark)
                .map(HighlightStyle::Link);
            Category {
                icon: icons[i].to_string(),
                entry: entry(icons[i], kind.name(), style.is_some()),
                style,
            }
        });

        let rows = |kind: RuleKind| -> Result<Vec<RuleCategory>, ConfigError> {
            let rules =
                rule_table(config, kind).ok_or(ConfigError::MissingTable(kind.config_key()))?;
            rules
                .iter()
                .map(|(key, rule)| rule_category(key, rule, &entry, syntax_highlight))
                .collect()
        };

        let patterns = rows(RuleKind::Pattern)?
            .into_iter()
            .map(|rule| {
                let regex = Regex::new(&rule.key).map_err(|e| ConfigError::InvalidPattern {
                    pattern: rule.key.clone(),
                    reason: e.to_string(),
                })?;
                Ok(PatternCategory { regex, rule })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;
        let exact_files = rows(RuleKind::ExactFile)?;
        let exact_dirs = rows(RuleKind::ExactDir)?;
        let extensions = rows(RuleKind::Extension)?;

        let table = HighlightTable {
            prefix: prefix.to_string(),
            column_length,
            syntax_highlight,
            items,
            exact_file_index: index_of(&exact_files),
            exact_dir_index: index_of(&exact_dirs),
            extension_index: index_of(&extensions),
            patterns,
            exact_files,
            exact_dirs,
            extensions,
        };

        tracing::debug!(
            prefix,
            column_length,
            patterns = table.patterns.len(),
            exact_files = table.exact_files.len(),
            exact_dirs = table.exact_dirs.len(),
            extensions = table.extensions.len(),
            "Built icon highlight table"
        );

        Ok(table)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn column_length(&self) -> usize {
        self.column_length
    }

    pub fn syntax_highlight(&self) -> bool {
        self.syntax_highlight
    }

    pub fn item(&self, kind: IconKind) -> &Category {
        &self.items[kind.index()]
    }

    /// Rows of a rule table in configured order
    pub fn rules(&self, kind: RuleKind) -> Box<dyn Iterator<Item = &RuleCategory> + '_> {
        match kind {
            RuleKind::Pattern => Box::new(self.patterns.iter().map(|p| &p.rule)),
            RuleKind::ExactFile => Box::new(self.exact_files.iter()),
            RuleKind::ExactDir => Box::new(self.exact_dirs.iter()),
            RuleKind::Extension => Box::new(self.extensions.iter()),
        }
    }

    /// First pattern whose regex matches anywhere in `filename`
    pub fn match_pattern(&self, filename: &str) -> Option<&HighlightEntry> {
        self.patterns
            .iter()
            .find(|p| p.regex.is_match(filename))
            .map(|p| &p.rule.category.entry)
    }

    pub fn exact_file(&self, filename: &str) -> Option<&HighlightEntry> {
        lookup(&self.exact_files, &self.exact_file_index, filename)
    }

    pub fn exact_dir(&self, dirname: &str) -> Option<&HighlightEntry> {
        lookup(&self.exact_dirs, &self.exact_dir_index, dirname)
    }

    pub fn extension(&self, ext: &str) -> Option<&HighlightEntry> {
        lookup(&self.extensions, &self.extension_index, ext)
    }
}

fn simple_icon(config: &IconConfig, kind: IconKind) -> Option<&str> {
    let icons = &config.icons;
    let icon = match kind {
        IconKind::Mark => &icons.mark_icon,
        IconKind::Copy => &icons.copy_icon,
        IconKind::Move => &icons.move_icon,
        IconKind::Directory => &icons.directory_icon,
        IconKind::ParentDirectory => &icons.parent_icon,
        IconKind::SymlinkDirectory => &icons.directory_symlink_icon,
        IconKind::RootOpenedTree => &icons.root_opened_tree_icon,
        IconKind::NestedOpenedTree => &icons.nested_opened_tree_icon,
        IconKind::NestedClosedTree => &icons.nested_closed_tree_icon,
        IconKind::Default => &icons.default_icon,
    };
    icon.as_deref()
}

fn rule_table(config: &IconConfig, kind: RuleKind) -> Option<&RuleTable> {
    let icons = &config.icons;
    match kind {
        RuleKind::Pattern => icons.pattern_matches.as_ref(),
        RuleKind::ExactFile => icons.exact_matches.as_ref(),
        RuleKind::ExactDir => icons.exact_dir_matches.as_ref(),
        RuleKind::Extension => icons.extensions.as_ref(),
    }
}

fn rule_category(
    key: &str,
    rule: &IconRule,
    entry: &impl Fn(&str, &str, bool) -> HighlightEntry,
    syntax_highlight: bool,
) -> Result<RuleCategory, ConfigError> {
    let gui = validate_color(key, &rule.color)?;
    let style = syntax_highlight.then(|| HighlightStyle::Color {
        gui,
        term: rule.term_color.clone(),
    });
    Ok(RuleCategory {
        key: key.to_string(),
        category: Category {
            icon: rule.icon.clone(),
            entry: entry(&rule.icon, &sanitize_key(key), style.is_some()),
            style,
        },
    })
}

/// First row wins when keys repeat
fn index_of(rows: &[RuleCategory]) -> HashMap<String, usize> {
    let mut index = HashMap::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        index.entry(row.key.clone()).or_insert(i);
    }
    index
}

fn lookup<'t>(
    rows: &'t [RuleCategory],
    index: &HashMap<String, usize>,
    key: &str,
) -> Option<&'t HighlightEntry> {
    index.get(key).map(|&i| &rows[i].category.entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_key_keeps_ascii_letters() {
        assert_eq!(sanitize_key(".*\\.min\\.js$"), "minjs");
        assert_eq!(sanitize_key("docker-compose.yml"), "dockercomposeyml");
        assert_eq!(sanitize_key("c++"), "c");
        assert_eq!(sanitize_key("日本.txt"), "txt");
    }

    #[test]
    fn test_pad_icon_fills_to_width() {
        assert_eq!(pad_icon("*", 3), "*  ");
        assert_eq!(pad_icon("abc", 2), "abc");
        assert_eq!(pad_icon("", 2), "  ");
    }

    #[test]
    fn test_pad_icon_byte_len_counts_multibyte() {
        let text = pad_icon("\u{e5ff}", 2);
        assert_eq!(text.chars().count(), 2);
        assert_eq!(text.len(), 4);
    }

    #[test]
    fn test_kind_order_matches_index() {
        for (i, kind) in IconKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }
}
