//! # Quire Core
//!
//! Tab lifecycle, editor statistics and the plumbing between the shell
//! (menus, dialogs, preferences) and the editing UI.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                        Workbench                          │
//! │  ┌──────────────┐ ┌──────────────────┐ ┌──────────────┐  │
//! │  │ TabRegistry  │ │ StatisticsAggr.  │ │   EventBus   │  │
//! │  └──────────────┘ └──────────────────┘ └──────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//!        ▲ ShellEvent                         │ WorkbenchEvent
//!        │                                    ▼
//!  ┌─────┴────────┐  ┌─────────────┐   ┌─────────────┐
//!  │   MenuBar    │  │ Preferences │   │ ThemeCatalog│
//!  └──────────────┘  └─────────────┘   └─────────────┘
//! ```
//!
//! ## Learning: Module Organization
//!
//! Each concern lives in its own file and the crate root re-exports the
//! types callers need, so the UI crate can write `quire_core::TabRegistry`
//! instead of reaching into submodules.

pub mod config;
pub mod event;
pub mod format;
pub mod language;
pub mod menu;
pub mod preferences;
pub mod stats;
pub mod tab;
pub mod theme;
pub mod workbench;

pub use config::ShellConfig;
pub use event::{EventBus, OpenTab, ShellEvent, WorkbenchEvent};
pub use format::FormatError;
pub use language::Language;
pub use menu::{Accelerator, MenuAction, MenuBar, MenuContext, MenuEntry, MenuItem};
pub use preferences::Preferences;
pub use stats::{EditorStatistics, SelectionStatistics, StatisticsAggregator};
pub use tab::{NewTab, Tab, TabId, TabRegistry};
pub use theme::{Rgb, ThemeCatalog, ThemeSheet};
pub use workbench::{EditorCommand, Response, Workbench};

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in core operations
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Tab not found: {0}")]
    TabNotFound(TabId),

    #[error("Tab has no file: {0}")]
    NoFile(TabId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Preferences error: {0}")]
    Preferences(#[from] preferences::PreferencesError),

    #[error("Format error: {0}")]
    Format(#[from] FormatError),
}
