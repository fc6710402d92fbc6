//! Icon configuration
//!
//! The configuration is YAML with two sections, `settings` and `icons`. A built-in
//! set is compiled into the binary; a user file at `~/.config/tree-icons/icons.yaml`
//! is merged on top of it.
//!
//! Values are kept as loaded (every field optional). Validation happens when the
//! highlight table is built, so a config missing a category only fails there.

use std::fmt;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// Built-in icon set, embedded at compile time
pub const DEFAULT_ICONS_YAML: &str = include_str!("../icons/default.yaml");

/// Errors raised while loading configuration or building a table from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    /// A required simple icon (e.g. `mark_icon`) is absent
    MissingIcon(&'static str),
    /// A required rule table (e.g. `extensions`) is absent
    MissingTable(&'static str),
    InvalidPattern { pattern: String, reason: String },
    InvalidColor { key: String, color: String },
    InvalidColumnLength(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
            ConfigError::MissingIcon(name) => write!(f, "Missing icon: {}", name),
            ConfigError::MissingTable(name) => write!(f, "Missing rule table: {}", name),
            ConfigError::InvalidPattern { pattern, reason } => {
                write!(f, "Invalid pattern '{}': {}", pattern, reason)
            }
            ConfigError::InvalidColor { key, color } => {
                write!(f, "Invalid color '{}' for '{}'", color, key)
            }
            ConfigError::InvalidColumnLength(len) => {
                write!(f, "Invalid column length: {}", len)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// A single icon rule from a pattern, exact or extension table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IconRule {
    pub icon: String,
    /// GUI color as hex RGB, with or without a leading `#`
    pub color: String,
    /// Terminal palette color
    #[serde(default, alias = "termColor")]
    pub term_color: Option<String>,
}

impl IconRule {
    pub fn new(icon: &str, color: &str) -> Self {
        Self {
            icon: icon.to_string(),
            color: color.to_string(),
            term_color: None,
        }
    }

    pub fn with_term_color(mut self, term_color: &str) -> Self {
        self.term_color = Some(term_color.to_string());
        self
    }
}

/// Rules keyed by match key, in the order they were written
///
/// Lookups scan linearly; tables are small and the highlight table keeps its own
/// index for the hot path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleTable {
    entries: Vec<(String, IconRule)>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&IconRule> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, r)| r)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Insert a rule, replacing an existing rule with the same key in place
    pub fn insert(&mut self, key: impl Into<String>, rule: IconRule) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = rule,
            None => self.entries.push((key, rule)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &IconRule)> {
        self.entries.iter().map(|(k, r)| (k.as_str(), r))
    }

    /// `self`'s rules first, then the rules of `base` whose keys `self` lacks
    fn layered_over(&self, base: &RuleTable) -> RuleTable {
        let mut merged = self.clone();
        for (key, rule) in base.iter() {
            if !merged.contains_key(key) {
                merged.entries.push((key.to_string(), rule.clone()));
            }
        }
        merged
    }
}

impl<K: Into<String>> FromIterator<(K, IconRule)> for RuleTable {
    fn from_iter<I: IntoIterator<Item = (K, IconRule)>>(iter: I) -> Self {
        let mut table = RuleTable::new();
        for (key, rule) in iter {
            table.insert(key, rule);
        }
        table
    }
}

impl<'de> Deserialize<'de> for RuleTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RuleTableVisitor;

        impl<'de> Visitor<'de> for RuleTableVisitor {
            type Value = RuleTable;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a mapping of match keys to icon rules")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<RuleTable, A::Error> {
                let mut table = RuleTable::new();
                while let Some((key, rule)) = map.next_entry::<String, IconRule>()? {
                    table.insert(key, rule);
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(RuleTableVisitor)
    }
}

/// Column settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Column width in display cells
    #[serde(default = "default_column_length", alias = "columnLength")]
    pub column_length: usize,
    #[serde(default = "default_true", alias = "enableSyntaxHighlight")]
    pub enable_syntax_highlight: bool,
}

fn default_column_length() -> usize {
    1
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            column_length: default_column_length(),
            enable_syntax_highlight: true,
        }
    }
}

/// Raw icon definitions as written in YAML
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Icons {
    pub default_icon: Option<String>,
    pub mark_icon: Option<String>,
    pub copy_icon: Option<String>,
    pub move_icon: Option<String>,
    pub directory_icon: Option<String>,
    pub parent_icon: Option<String>,
    pub directory_symlink_icon: Option<String>,
    pub root_opened_tree_icon: Option<String>,
    pub nested_opened_tree_icon: Option<String>,
    pub nested_closed_tree_icon: Option<String>,
    pub pattern_matches: Option<RuleTable>,
    pub exact_matches: Option<RuleTable>,
    pub exact_dir_matches: Option<RuleTable>,
    pub extensions: Option<RuleTable>,
}

/// User-facing icons configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IconConfig {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub icons: Icons,
}

/// Same shape as [`IconConfig`] but with optional settings, for layering a user
/// file over the built-in set
#[derive(Debug, Default, Deserialize)]
struct IconConfigOverlay {
    #[serde(default)]
    settings: SettingsOverlay,
    #[serde(default)]
    icons: Icons,
}

#[derive(Debug, Default, Deserialize)]
struct SettingsOverlay {
    #[serde(default, alias = "columnLength")]
    column_length: Option<usize>,
    #[serde(default, alias = "enableSyntaxHighlight")]
    enable_syntax_highlight: Option<bool>,
}

impl IconConfig {
    /// Parse a complete configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// The built-in icon set
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_yaml(DEFAULT_ICONS_YAML)
    }

    /// Parse `yaml` as a partial configuration and layer it over `self`
    ///
    /// Simple icons and settings given in `yaml` replace those in `self`. Rules in
    /// `yaml` tables come first, so they take priority under first-match lookup;
    /// rules of `self` with the same key are dropped.
    pub fn overlay_yaml(&self, yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(self.clone());
        }
        let overlay: IconConfigOverlay =
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        Ok(self.overlaid(overlay))
    }

    fn overlaid(&self, overlay: IconConfigOverlay) -> Self {
        let base = &self.icons;
        let user = overlay.icons;

        fn icon(user: Option<String>, base: &Option<String>) -> Option<String> {
            user.or_else(|| base.clone())
        }

        fn table(user: Option<RuleTable>, base: &Option<RuleTable>) -> Option<RuleTable> {
            match (user, base) {
                (Some(user), Some(base)) => Some(user.layered_over(base)),
                (Some(user), None) => Some(user),
                (None, base) => base.clone(),
            }
        }

        IconConfig {
            settings: Settings {
                column_length: overlay
                    .settings
                    .column_length
                    .unwrap_or(self.settings.column_length),
                enable_syntax_highlight: overlay
                    .settings
                    .enable_syntax_highlight
                    .unwrap_or(self.settings.enable_syntax_highlight),
            },
            icons: Icons {
                default_icon: icon(user.default_icon, &base.default_icon),
                mark_icon: icon(user.mark_icon, &base.mark_icon),
                copy_icon: icon(user.copy_icon, &base.copy_icon),
                move_icon: icon(user.move_icon, &base.move_icon),
                directory_icon: icon(user.directory_icon, &base.directory_icon),
                parent_icon: icon(user.parent_icon, &base.parent_icon),
                directory_symlink_icon: icon(
                    user.directory_symlink_icon,
                    &base.directory_symlink_icon,
                ),
                root_opened_tree_icon: icon(
                    user.root_opened_tree_icon,
                    &base.root_opened_tree_icon,
                ),
                nested_opened_tree_icon: icon(
                    user.nested_opened_tree_icon,
                    &base.nested_opened_tree_icon,
                ),
                nested_closed_tree_icon: icon(
                    user.nested_closed_tree_icon,
                    &base.nested_closed_tree_icon,
                ),
                pattern_matches: table(user.pattern_matches, &base.pattern_matches),
                exact_matches: table(user.exact_matches, &base.exact_matches),
                exact_dir_matches: table(user.exact_dir_matches, &base.exact_dir_matches),
                extensions: table(user.extensions, &base.extensions),
            },
        }
    }

    /// Load the built-in set layered with the user file at `path`
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("{}: {}", path.display(), e)))?;
        Self::builtin()?.overlay_yaml(&content)
    }

    /// Load config from the user config directory, falling back to the built-in set
    ///
    /// A user file that is absent or unreadable is logged and ignored.
    pub fn load() -> Result<Self, ConfigError> {
        let Some(path) = crate::config_paths::icons_file() else {
            tracing::debug!("No config directory available, using built-in icons");
            return Self::builtin();
        };

        if !path.exists() {
            tracing::debug!(
                "Icons file not found at {}, using built-in icons",
                path.display()
            );
            return Self::builtin();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded icons from {}", path.display());
                Ok(config)
            }
            Err(e) => {
                tracing::warn!("Failed to load icons at {}: {}", path.display(), e);
                Self::builtin()
            }
        }
    }
}
