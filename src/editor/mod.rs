//! Text buffer for the dashboard's editable field.
//!
//! Provides a rope-backed text buffer with cursor management and a
//! mouse-driven selection, designed for integration into the TEA architecture.

mod buffer;

pub use buffer::{BufferPos, Cursor, Direction, EditorBuffer, Span};
