//! Highlight registration commands
//!
//! Commands describe the syntax groups the host has to register so icons get
//! colored. They are plain values; the host executes them in order.

use std::fmt;

use crate::table::{Category, HighlightStyle, HighlightTable, IconKind, RuleKind};

/// How much of the highlight setup to emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmitMode {
    /// Clear and redefine syntax matches, then (re)apply colors
    #[default]
    Full,
    /// Only (re)apply colors; the syntax matches are already registered
    LinkOnly,
}

/// A single highlight operation for the host's syntax engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HighlightCommand {
    ClearSyntax {
        group: String,
    },
    /// Match any character of `icon`, contained in the column's region
    DefineMatch {
        group: String,
        icon: String,
        contained_in: String,
    },
    LinkHighlight {
        group: String,
        target: &'static str,
    },
    ColorHighlight {
        group: String,
        gui: String,
        term: Option<String>,
    },
}

impl HighlightCommand {
    pub fn group(&self) -> &str {
        match self {
            HighlightCommand::ClearSyntax { group }
            | HighlightCommand::DefineMatch { group, .. }
            | HighlightCommand::LinkHighlight { group, .. }
            | HighlightCommand::ColorHighlight { group, .. } => group,
        }
    }
}

/// Escape characters that are special inside a `[...]` collection
fn char_class(icon: &str) -> String {
    let mut class = String::with_capacity(icon.len() + 2);
    for c in icon.chars() {
        if matches!(c, '\\' | ']' | '^' | '-' | '/') {
            class.push('\\');
        }
        class.push(c);
    }
    class
}

/// Renders the command as an editor ex command
impl fmt::Display for HighlightCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HighlightCommand::ClearSyntax { group } => {
                write!(f, "silent! syntax clear {}", group)
            }
            HighlightCommand::DefineMatch {
                group,
                icon,
                contained_in,
            } => write!(
                f,
                "syntax match {} /[{}]/ contained containedin={}",
                group,
                char_class(icon),
                contained_in
            ),
            HighlightCommand::LinkHighlight { group, target } => {
                write!(f, "highlight default link {} {}", group, target)
            }
            HighlightCommand::ColorHighlight { group, gui, term } => {
                write!(f, "highlight default {} guifg=#{}", group, gui)?;
                if let Some(term) = term {
                    write!(f, " ctermfg={}", term)?;
                }
                Ok(())
            }
        }
    }
}

/// Highlight commands for every styled category of `table`
///
/// Order: the simple icons (mark, copy, move, directory, parent, symlink
/// directory, root opened, nested opened, nested closed) followed by the
/// pattern, exact file, exact directory and extension tables in configured order.
pub fn emit(table: &HighlightTable, mode: EmitMode) -> Vec<HighlightCommand> {
    let mut commands = Vec::new();

    for kind in IconKind::ALL {
        push_category(&mut commands, table.item(kind), table.prefix(), mode);
    }
    for kind in RuleKind::ALL {
        for rule in table.rules(kind) {
            push_category(&mut commands, &rule.category, table.prefix(), mode);
        }
    }

    tracing::debug!(?mode, count = commands.len(), "Emitted highlight commands");
    commands
}

fn push_category(
    commands: &mut Vec<HighlightCommand>,
    category: &Category,
    contained_in: &str,
    mode: EmitMode,
) {
    let Some(style) = &category.style else {
        return;
    };
    let group = &category.entry.highlight;

    if mode == EmitMode::Full {
        commands.push(HighlightCommand::ClearSyntax {
            group: group.clone(),
        });
        // An empty collection is not a valid pattern
        if !category.icon.is_empty() {
            commands.push(HighlightCommand::DefineMatch {
                group: group.clone(),
                icon: category.icon.clone(),
                contained_in: contained_in.to_string(),
            });
        }
    }

    commands.push(match style {
        HighlightStyle::Link(target) => HighlightCommand::LinkHighlight {
            group: group.clone(),
            target: *target,
        },
        HighlightStyle::Color { gui, term } => HighlightCommand::ColorHighlight {
            group: group.clone(),
            gui: gui.clone(),
            term: term.clone(),
        },
    });
}
