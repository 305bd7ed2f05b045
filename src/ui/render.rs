use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::Model;
use crate::app::Route;
use crate::editor::Span as SelectedSpan;

use super::{overlays, status};

const PLACEHOLDER: &str = "Edit text here with AI.";

/// Split the screen into title bar, page body and status bar.
pub fn split_rows(area: Rect) -> (Rect, Rect, Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);
    (rows[0], rows[1], rows[2])
}

/// Where editor text is drawn: the body minus the editor's border.
pub fn editor_text_area(area: Rect) -> Rect {
    let (_, body, _) = split_rows(area);
    body.inner(Margin {
        horizontal: 1,
        vertical: 1,
    })
}

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let (title, body, status_row) = split_rows(area);

    status::render_title_bar(model, frame, title);
    match model.route {
        Route::Entry | Route::Login => render_login(model, frame, body),
        Route::Dashboard => render_dashboard(model, frame, body),
    }
    status::render_status_bar(model, frame, status_row);
    if body.height > 0 {
        let toast_row = Rect::new(body.x, body.bottom() - 1, body.width, 1);
        status::render_toast_bar(model, frame, toast_row);
    }

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
}

fn render_login(model: &Model, frame: &mut Frame, area: Rect) {
    let width = 50_u16.min(area.width);
    let height = 9_u16.min(area.height);
    let popup = Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    );

    let dim = Style::default().fg(Color::Indexed(245));
    let lines = vec![
        Line::raw("Enter a name to open the dashboard."),
        Line::raw(""),
        Line::from(vec![
            Span::styled("Name: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(model.login_input.as_str()),
        ]),
        Line::raw(""),
        Line::styled("Enter continue · Esc quit · F1 help", dim),
    ];
    let block = Block::default()
        .title("Sign in")
        .borders(Borders::ALL)
        .padding(Padding::horizontal(1));
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);

    if !model.help_visible {
        let input_x = popup.x + 2 + 6 + width_u16(&model.login_input);
        let input_y = popup.y + 3;
        if input_x < popup.right() && input_y < popup.bottom() {
            frame.set_cursor_position((input_x, input_y));
        }
    }
}

fn render_dashboard(model: &Model, frame: &mut Frame, area: Rect) {
    let block = Block::default().title("Editor").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let editor = &model.editor;
    let span = editor.selection_span();
    let visible = usize::from(inner.height);
    let end = (model.editor_scroll + visible).min(editor.line_count());

    let lines: Vec<Line> = if editor.line_count() == 1 && editor.line_len(0) == 0 {
        vec![Line::styled(
            PLACEHOLDER,
            Style::default().fg(Color::Indexed(245)),
        )]
    } else {
        (model.editor_scroll..end)
            .map(|idx| {
                let text = editor.line_at(idx).unwrap_or_default();
                highlight_line(idx, text, span)
            })
            .collect()
    };
    frame.render_widget(Paragraph::new(lines), inner);

    if let Some(popup) = overlays::popup_rect(model) {
        overlays::render_action_popup(model, frame, popup);
    } else if !model.help_visible {
        let cursor = editor.cursor();
        if cursor.line >= model.editor_scroll && cursor.line < end.max(model.editor_scroll + 1) {
            let row = u16::try_from(cursor.line - model.editor_scroll).unwrap_or(u16::MAX);
            let col =
                u16::try_from(editor.display_col(cursor.line, cursor.col)).unwrap_or(u16::MAX);
            let x = inner.x.saturating_add(col);
            let y = inner.y.saturating_add(row);
            if x < inner.right() && y < inner.bottom() {
                frame.set_cursor_position((x, y));
            }
        }
    }
}

/// Split `text` (line `idx`) into plain and selected spans.
fn highlight_line(idx: usize, text: String, span: Option<SelectedSpan>) -> Line<'static> {
    let Some(span) = span.filter(|s| s.start.line <= idx && idx <= s.end.line) else {
        return Line::raw(text);
    };
    let start = if span.start.line == idx {
        span.start.col.min(text.len())
    } else {
        0
    };
    let end = if span.end.line == idx {
        span.end.col.min(text.len())
    } else {
        text.len()
    };
    let selected = Style::default().add_modifier(Modifier::REVERSED);
    let mut spans = Vec::with_capacity(3);
    if start > 0 {
        spans.push(Span::raw(text[..start].to_string()));
    }
    if end > start {
        spans.push(Span::styled(text[start..end].to_string(), selected));
    } else if span.end.line != idx {
        // Selected line break
        spans.push(Span::styled(" ", selected));
    }
    if end < text.len() {
        spans.push(Span::raw(text[end..].to_string()));
    }
    Line::from(spans)
}

fn width_u16(text: &str) -> u16 {
    u16::try_from(unicode_width::UnicodeWidthStr::width(text)).unwrap_or(u16::MAX)
}
