//! # Quire UI
//!
//! The editor window, built with iced.
//!
//! ## Architecture
//!
//! The UI follows the Elm architecture (TEA):
//! - **Model**: [`App`], which owns the core `Workbench`
//! - **Message**: everything that can happen (clicks, keys, dialog results)
//! - **Update**: `(state, message) -> state + follow-up task`
//! - **View**: `state -> widgets`
//!
//! Tab bookkeeping lives in `quire-core`; this crate only keeps the editor
//! widget's working copy of each tab and mirrors edits back into the core.

pub mod app;
pub mod highlighter;
pub mod theme;

pub use app::{run, App, Flags};
