//! The icons column as seen by the explorer view
//!
//! Wraps a [`HighlightTable`] snapshot. Reloading builds a complete new table
//! first and only then replaces the snapshot, so a failed reload keeps the old
//! table and an in-progress render never sees a partial one.

use std::sync::Arc;

use crate::commands::{emit, EmitMode, HighlightCommand};
use crate::config::{ConfigError, IconConfig};
use crate::resolve::{resolve, ClipboardState, EntryDescriptor, FsProbe, RenderContext, Resolved};
use crate::table::HighlightTable;

/// Default name of the syntax region the icon matches are contained in
pub const DEFAULT_SYNTAX_NAME: &str = "TreeIcons";

/// Inline highlight for part of a rendered row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightSpan {
    pub highlight: String,
    /// Byte offset of the span within the row
    pub start: usize,
    pub byte_len: usize,
}

#[derive(Debug, Clone)]
pub struct IconsColumn {
    table: Arc<HighlightTable>,
    syntax_name: String,
    /// Byte offset of this column within a row, set by the view
    pub start: usize,
}

impl IconsColumn {
    pub fn new(config: &IconConfig) -> Result<Self, ConfigError> {
        Self::with_syntax_name(config, DEFAULT_SYNTAX_NAME)
    }

    pub fn with_syntax_name(config: &IconConfig, syntax_name: &str) -> Result<Self, ConfigError> {
        let table = HighlightTable::build(config, syntax_name)?;
        Ok(Self {
            table: Arc::new(table),
            syntax_name: syntax_name.to_string(),
            start: 0,
        })
    }

    /// Column for the user's icons file, or the built-in set
    ///
    /// A user file that parses but does not build into a table (bad pattern,
    /// color or column length) falls back to the built-in set, like one that
    /// fails to parse.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::new(&IconConfig::load()?) {
            Ok(column) => Ok(column),
            Err(e) => {
                tracing::warn!("Invalid icons config, using built-in icons: {}", e);
                Self::new(&IconConfig::builtin()?)
            }
        }
    }

    pub fn syntax_name(&self) -> &str {
        &self.syntax_name
    }

    /// Current table; stays valid across later reloads
    pub fn snapshot(&self) -> Arc<HighlightTable> {
        Arc::clone(&self.table)
    }

    /// Replace the table with one built from `config`
    ///
    /// On error the current table is kept.
    pub fn reload(&mut self, config: &IconConfig) -> Result<(), ConfigError> {
        match HighlightTable::build(config, &self.syntax_name) {
            Ok(table) => {
                self.table = Arc::new(table);
                tracing::info!(syntax = %self.syntax_name, "Reloaded icon table");
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Keeping previous icon table, reload failed: {}", e);
                Err(e)
            }
        }
    }

    /// Column width in display cells
    pub fn length(&self) -> usize {
        self.table.column_length()
    }

    pub fn resolve<'t>(
        &'t self,
        entry: &EntryDescriptor<'_>,
        context: &RenderContext,
        clipboard: &ClipboardState,
        fs: &dyn FsProbe,
    ) -> Resolved<'t> {
        resolve(entry, context, clipboard, &self.table, fs)
    }

    /// Icon text for `entry`
    pub fn get(
        &self,
        entry: &EntryDescriptor<'_>,
        context: &RenderContext,
        clipboard: &ClipboardState,
        fs: &dyn FsProbe,
    ) -> String {
        self.resolve(entry, context, clipboard, fs).text().to_string()
    }

    /// Icon text for `entry` and the span coloring it
    ///
    /// No span is produced for icons whose group is not registered with the host.
    pub fn get_with_highlights(
        &self,
        entry: &EntryDescriptor<'_>,
        context: &RenderContext,
        clipboard: &ClipboardState,
        fs: &dyn FsProbe,
    ) -> (String, Vec<HighlightSpan>) {
        let resolved = self.resolve(entry, context, clipboard, fs);
        let spans = resolved
            .entry()
            .filter(|e| e.styled)
            .map(|e| HighlightSpan {
                highlight: e.highlight.clone(),
                start: self.start,
                byte_len: e.byte_len,
            })
            .into_iter()
            .collect();
        (resolved.text().to_string(), spans)
    }

    pub fn highlight_commands(&self, mode: EmitMode) -> Vec<HighlightCommand> {
        emit(&self.table, mode)
    }
}
