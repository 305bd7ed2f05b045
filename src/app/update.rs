use crate::app::{Model, ToastLevel};
use crate::dispatch::{Command, DispatchOutcome};
use crate::editor::{BufferPos, Direction};
use crate::selection::BufferSelection;

use super::route::Route;

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Routing
    /// Show a page (redirects are followed)
    Navigate(Route),
    /// Type a character into the login form
    LoginInput(char),
    /// Delete the last character of the login form
    LoginBackspace,
    /// Submit the login form
    LoginSubmit,

    // Editor
    /// Insert a character at the cursor
    EditorInsertChar(char),
    /// Delete character before cursor (Backspace)
    EditorDeleteBack,
    /// Delete character at cursor (Delete)
    EditorDeleteForward,
    /// Split line at cursor (Enter)
    EditorSplitLine,
    /// Move cursor in a direction
    EditorMoveCursor(Direction),
    /// Move cursor to beginning of line (Home)
    EditorMoveHome,
    /// Move cursor to end of line (End)
    EditorMoveEnd,
    /// Scroll editor viewport up by n lines
    EditorScrollUp(usize),
    /// Scroll editor viewport down by n lines
    EditorScrollDown(usize),

    // Selection
    /// Mouse pressed inside the editor
    PointerDown(BufferPos),
    /// Mouse dragged while pressed
    PointerDrag(BufferPos),
    /// Mouse released; re-reads the selection
    PointerUp(BufferPos),

    // Actions
    /// Popup button clicked
    RequestAction(Command),
    /// A dispatch came back from the worker
    DispatchFinished(DispatchOutcome),

    // Window
    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,
    /// Terminal resized
    Resize(u16, u16),
    /// Redraw screen
    Redraw,

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here. Requests
/// are only queued here; the event loop sends them.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        // Routing
        Message::Navigate(route) => {
            model.route = route.resolve();
        }
        Message::LoginInput(ch) => {
            model.login_input.push(ch);
        }
        Message::LoginBackspace => {
            model.login_input.pop();
        }
        Message::LoginSubmit => {
            let name = model.login_input.trim().to_string();
            if name.is_empty() {
                model.show_toast(ToastLevel::Warning, "Enter a name to continue");
            } else {
                model.show_toast(ToastLevel::Info, format!("Signed in as {name}"));
                model.user = Some(name);
                model.route = Route::Dashboard;
            }
        }

        // Editor
        Message::EditorInsertChar(ch) => {
            model.editor.insert_char(ch);
            model.ensure_cursor_visible();
        }
        Message::EditorDeleteBack => {
            model.editor.delete_back();
            model.ensure_cursor_visible();
        }
        Message::EditorDeleteForward => {
            model.editor.delete_forward();
        }
        Message::EditorSplitLine => {
            model.editor.split_line();
            model.ensure_cursor_visible();
        }
        Message::EditorMoveCursor(dir) => {
            model.editor.move_cursor(dir);
            model.ensure_cursor_visible();
        }
        Message::EditorMoveHome => {
            model.editor.move_home();
        }
        Message::EditorMoveEnd => {
            model.editor.move_end();
        }
        Message::EditorScrollUp(n) => {
            model.editor_scroll = model.editor_scroll.saturating_sub(n);
        }
        Message::EditorScrollDown(n) => {
            let max = model.editor.line_count().saturating_sub(1);
            model.editor_scroll = (model.editor_scroll + n).min(max);
        }

        // Selection
        Message::PointerDown(pos) => {
            model.editor.begin_selection(pos.line, pos.col);
            model.pointer_held = true;
        }
        Message::PointerDrag(pos) => {
            if model.pointer_held {
                model.editor.extend_selection(pos.line, pos.col);
            }
        }
        Message::PointerUp(pos) => {
            if model.pointer_held {
                model.editor.extend_selection(pos.line, pos.col);
            }
            model.pointer_held = false;
            let area = model.editor_area();
            let scroll_y = i32::try_from(model.editor_scroll).unwrap_or(i32::MAX);
            let provider = BufferSelection::new(&model.editor, area, model.editor_scroll);
            model.tracker.on_pointer_up(&provider, scroll_y);
        }

        // Actions
        Message::RequestAction(command) => {
            if model.queue_action(command).is_none() {
                tracing::debug!(%command, "action ignored without a selection");
            }
        }
        Message::DispatchFinished(outcome) => {
            apply_outcome(&mut model, outcome);
        }

        // Window
        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
        }
        Message::HideHelp => {
            model.help_visible = false;
        }
        Message::Resize(width, height) => {
            model.terminal_size = (width, height);
            model.ensure_cursor_visible();
        }
        // Redraw: no state change needed
        Message::Redraw => {}

        // Application
        Message::Quit => {
            model.should_quit = true;
        }
    }
    model
}

/// Apply a finished dispatch. Outcomes of superseded requests change nothing.
fn apply_outcome(model: &mut Model, outcome: DispatchOutcome) {
    let DispatchOutcome {
        token,
        command,
        result,
    } = outcome;
    if !model.tokens.settle(token) {
        tracing::debug!(%token, %command, "discarding superseded response");
        return;
    }
    match result {
        Ok(text) => {
            tracing::info!(%token, %command, chars = text.chars().count(), "replacing editor content");
            model.editor.set_text(&text);
            model.ensure_cursor_visible();
        }
        Err(err) => {
            tracing::warn!(%token, %command, error = %err, "action request failed");
        }
    }
    model.editor.clear_selection();
    model.tracker.clear();
    model.in_flight = None;
}
