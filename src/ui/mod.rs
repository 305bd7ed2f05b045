//! Terminal UI components.
//!
//! This module contains all rendering code:
//! - page chrome (title and status bars) wrapped around each route
//! - the login form and the dashboard editor
//! - overlays for the action popup and help

mod overlays;
mod render;
mod status;

pub use overlays::{action_popup_rect, popup_button_at, popup_rect};
pub use render::{editor_text_area, render, split_rows};
