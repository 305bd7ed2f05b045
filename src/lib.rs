// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. dispatch::DispatchError)
    clippy::module_name_repetitions
)]

//! # Scribe
//!
//! A terminal text editor that rewrites selected text through a remote
//! text-processing endpoint.
//!
//! Select text with the mouse and a popup offers four actions
//! (paraphrase, expand, summarize, translate). The chosen action and the
//! selected text are posted to the endpoint; a successful response replaces
//! the editor content.
//!
//! ## Architecture
//!
//! Scribe uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop, routes and state
//! - [`editor`]: Rope-backed text buffer with mouse selection
//! - [`selection`]: Selection tracking and popup anchoring
//! - [`dispatch`]: Action requests, HTTP client and stale-response guard
//! - [`ui`]: Terminal UI components
//! - [`config`]: Saved defaults and flag parsing

pub mod app;
pub mod config;
pub mod dispatch;
pub mod editor;
pub mod selection;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model, Route};
    pub use crate::dispatch::{ActionClient, Command, HttpActionClient};
    pub use crate::editor::EditorBuffer;
    pub use crate::selection::{SelectionProvider, SelectionTracker};
}
