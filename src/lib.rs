//! File-type icons for a file-explorer column
//!
//! This crate picks one icon and one highlight group per explorer entry and
//! produces the highlight registrations the host editor needs to color them.
//!
//! ```text
//! IconConfig → HighlightTable → resolve() per entry
//!                             → emit() → Vec<HighlightCommand>
//! ```

pub mod column;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod resolve;
pub mod table;
pub mod tracing;

// Re-export commonly used types
pub use column::{HighlightSpan, IconsColumn};
pub use commands::{emit, EmitMode, HighlightCommand};
pub use config::{ConfigError, IconConfig, IconRule, RuleTable};
pub use resolve::{
    resolve, ClipboardAction, ClipboardState, EntryDescriptor, FsProbe, RenderContext, Resolved,
    StdFs,
};
pub use table::{HighlightEntry, HighlightTable, IconKind};
