use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, Route, ToastLevel};

pub fn render_title_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let title = format!(" scribe | {} {}", model.route.title(), model.route.path());
    let bar = Paragraph::new(title).style(
        Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(bar, area);
}

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let user = model.user.as_deref().unwrap_or("guest");
    let position = if model.route == Route::Dashboard {
        let cursor = model.editor.cursor();
        format!(
            "  Ln {}, Col {}",
            cursor.line + 1,
            model.editor.display_col(cursor.line, cursor.col) + 1
        )
    } else {
        String::new()
    };
    let working = model
        .in_flight
        .map(|cmd| format!("  [working: {cmd}]"))
        .unwrap_or_default();

    let status = format!(
        " {}  {}{}{}  {}  F1:help",
        user,
        model.route.path(),
        position,
        working,
        model.endpoint
    );

    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
