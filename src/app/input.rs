use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::app::{App, Message, Model, Route};
use crate::dispatch::Command;
use crate::editor::{BufferPos, Direction};

use super::event_loop::ResizeDebouncer;

impl App {
    pub(super) fn handle_event(
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(*key, model),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Resize(w, h) => {
                tracing::trace!(width = w, height = h, "resize queued");
                resize_debouncer.queue(*w, *h, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if model.help_visible {
            return Some(Message::HideHelp);
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && matches!(key.code, KeyCode::Char('q' | 'c')) {
            return Some(Message::Quit);
        }
        if key.code == KeyCode::F(1) {
            return Some(Message::ToggleHelp);
        }

        match model.route {
            Route::Entry | Route::Login => Self::handle_login_key(key),
            Route::Dashboard => Self::handle_editor_key(key, model),
        }
    }

    fn handle_login_key(key: KeyEvent) -> Option<Message> {
        match key.code {
            KeyCode::Enter => Some(Message::LoginSubmit),
            KeyCode::Backspace => Some(Message::LoginBackspace),
            KeyCode::Esc => Some(Message::Quit),
            KeyCode::Char(c)
                if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                Some(Message::LoginInput(c))
            }
            _ => None,
        }
    }

    fn handle_editor_key(key: KeyEvent, model: &Model) -> Option<Message> {
        let page = usize::from(model.editor_area().height.max(1));
        match key.code {
            // Popup shortcuts
            KeyCode::Char(c @ '1'..='4') if key.modifiers.contains(KeyModifiers::ALT) => {
                if !model.popup_visible() {
                    return None;
                }
                let idx = usize::from(c as u8 - b'1');
                Command::ALL.get(idx).copied().map(Message::RequestAction)
            }
            KeyCode::Char(c)
                if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                Some(Message::EditorInsertChar(c))
            }
            KeyCode::Enter => Some(Message::EditorSplitLine),
            KeyCode::Tab => Some(Message::EditorInsertChar('\t')),
            KeyCode::Backspace => Some(Message::EditorDeleteBack),
            KeyCode::Delete => Some(Message::EditorDeleteForward),
            KeyCode::Up => Some(Message::EditorMoveCursor(Direction::Up)),
            KeyCode::Down => Some(Message::EditorMoveCursor(Direction::Down)),
            KeyCode::Left => Some(Message::EditorMoveCursor(Direction::Left)),
            KeyCode::Right => Some(Message::EditorMoveCursor(Direction::Right)),
            KeyCode::Home => Some(Message::EditorMoveHome),
            KeyCode::End => Some(Message::EditorMoveEnd),
            KeyCode::PageUp => Some(Message::EditorScrollUp(page)),
            KeyCode::PageDown => Some(Message::EditorScrollDown(page)),
            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.help_visible || model.route != Route::Dashboard {
            return None;
        }

        let popup = crate::ui::popup_rect(model);
        let in_popup = popup.is_some_and(|rect| point_in_rect(mouse.column, mouse.row, rect));
        let area = model.editor_area();
        let in_editor = point_in_rect(mouse.column, mouse.row, area);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if in_popup {
                    return None;
                }
                in_editor.then(|| Message::PointerDown(buffer_pos_at(model, area, mouse)))
            }
            MouseEventKind::Drag(MouseButton::Left) => model
                .pointer_held
                .then(|| Message::PointerDrag(buffer_pos_at(model, area, mouse))),
            MouseEventKind::Up(MouseButton::Left) => {
                if !model.pointer_held
                    && let Some(rect) = popup.filter(|_| in_popup)
                {
                    return crate::ui::popup_button_at(rect, mouse.column, mouse.row)
                        .map(Message::RequestAction);
                }
                (in_editor || model.pointer_held)
                    .then(|| Message::PointerUp(buffer_pos_at(model, area, mouse)))
            }
            MouseEventKind::ScrollDown => Some(Message::EditorScrollDown(3)),
            MouseEventKind::ScrollUp => Some(Message::EditorScrollUp(3)),
            _ => None,
        }
    }
}

/// Buffer position under a mouse cell; points outside the text clamp to it.
fn buffer_pos_at(model: &Model, area: Rect, mouse: MouseEvent) -> BufferPos {
    let editor = &model.editor;
    let last = editor.line_count().saturating_sub(1);
    let row = usize::from(mouse.row.saturating_sub(area.y));
    let line = model.editor_scroll + row;
    if mouse.row >= area.bottom() || line > last {
        return BufferPos {
            line: last,
            col: editor.line_len(last),
        };
    }
    let display = usize::from(mouse.column.saturating_sub(area.x));
    BufferPos {
        line,
        col: editor.col_for_display(line, display),
    }
}

const fn point_in_rect(col: u16, row: u16, rect: Rect) -> bool {
    col >= rect.x && col < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}
