use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::{Model, Route};
use crate::dispatch::Command;
use crate::selection::Anchor;

use super::render::split_rows;

const BUTTON_GAP: u16 = 1;

fn button_width(command: Command) -> u16 {
    u16::try_from(command.label().len()).unwrap_or(u16::MAX) + 2
}

fn buttons_width() -> u16 {
    let gaps = BUTTON_GAP * (u16::try_from(Command::ALL.len()).unwrap_or(1) - 1);
    Command::ALL.iter().map(|c| button_width(*c)).sum::<u16>() + gaps
}

/// Screen rectangle of the action popup for `anchor`, kept inside `bounds`.
///
/// The anchor is in document rows; `scroll` converts it back to the screen.
pub fn action_popup_rect(anchor: Anchor, scroll: usize, bounds: Rect) -> Rect {
    let width = (buttons_width() + 2).min(bounds.width);
    let height = 3_u16.min(bounds.height);

    let scroll = i64::try_from(scroll).unwrap_or(i64::MAX);
    let max_x = i64::from(bounds.right().saturating_sub(width));
    let max_y = i64::from(bounds.bottom().saturating_sub(height));
    let x = i64::from(anchor.x).clamp(i64::from(bounds.x), max_x.max(i64::from(bounds.x)));
    let y = (i64::from(anchor.y) - scroll).clamp(i64::from(bounds.y), max_y.max(i64::from(bounds.y)));

    Rect::new(
        u16::try_from(x).unwrap_or(bounds.x),
        u16::try_from(y).unwrap_or(bounds.y),
        width,
        height,
    )
}

/// The popup rectangle for the current model, if the popup is shown.
pub fn popup_rect(model: &Model) -> Option<Rect> {
    if model.route != Route::Dashboard {
        return None;
    }
    let anchor = model.popup_anchor()?;
    let (width, height) = model.terminal_size;
    let (_, body, _) = split_rows(Rect::new(0, 0, width, height));
    if body.is_empty() {
        return None;
    }
    Some(action_popup_rect(anchor, model.editor_scroll, body))
}

/// Which button, if any, sits at screen cell (`col`, `row`).
pub fn popup_button_at(popup: Rect, col: u16, row: u16) -> Option<Command> {
    if row != popup.y + 1 || col < popup.x + 1 || col >= popup.right().saturating_sub(1) {
        return None;
    }
    let mut x = popup.x + 1;
    for command in Command::ALL {
        let width = button_width(command);
        if col >= x && col < x + width {
            return Some(command);
        }
        x += width + BUTTON_GAP;
    }
    None
}

const fn button_color(command: Command) -> Color {
    match command {
        Command::Paraphrase => Color::Blue,
        Command::Expand => Color::Green,
        Command::Summarize => Color::Red,
        Command::Translate => Color::Yellow,
    }
}

pub fn render_action_popup(model: &Model, frame: &mut Frame, popup: Rect) {
    let title = model
        .in_flight
        .map_or_else(|| "Actions".to_string(), |cmd| format!("{}...", cmd.label()));
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .style(Style::default().bg(Color::Black).fg(Color::White));

    let mut spans = Vec::with_capacity(Command::ALL.len() * 2);
    for (idx, command) in Command::ALL.into_iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw(" "));
        }
        let style = Style::default()
            .bg(button_color(command))
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD);
        spans.push(Span::styled(format!(" {} ", command.label()), style));
    }

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), popup);
}

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(6).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let global_cfg = model
        .config_global_path
        .as_ref()
        .map_or_else(|| "<unknown>".to_string(), |p| p.display().to_string());
    let local_cfg = model
        .config_local_path
        .as_ref()
        .map_or_else(|| "<none>".to_string(), |p| p.display().to_string());

    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let dim_style = Style::default().fg(Color::Indexed(245));

    let mut all_lines: Vec<Line> = Vec::new();

    all_lines.push(Line::styled("Editor", section_style));
    all_lines.push(Line::raw("  Typing              Insert text"));
    all_lines.push(Line::raw("  Arrows, Home/End    Navigate"));
    all_lines.push(Line::raw("  PageUp/PageDown     Scroll editor"));
    all_lines.push(Line::raw("  Mouse drag          Select text"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Actions", section_style));
    all_lines.push(Line::raw("  Click a button      Rewrite the selection"));
    for (idx, command) in Command::ALL.into_iter().enumerate() {
        all_lines.push(Line::raw(format!(
            "  Alt-{}               {}",
            idx + 1,
            command.label()
        )));
    }
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Other", section_style));
    all_lines.push(Line::raw("  Ctrl-q / Ctrl-c     Quit"));
    all_lines.push(Line::raw("  F1                  Toggle help"));
    all_lines.push(Line::raw(format!("  Endpoint: {}", model.endpoint)));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Config", section_style));
    all_lines.push(Line::raw(format!("  Global: {global_cfg}")));
    all_lines.push(Line::raw(format!("  Local override: {local_cfg}")));

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));

    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    // Inner area: border(1) + padding(1) on each side = 4
    let inner = Rect::new(
        popup.x + 2,
        popup.y + 2,
        popup.width.saturating_sub(4),
        popup.height.saturating_sub(4),
    );

    // Reserve 1 row at bottom for footer hint
    let content_height = inner.height.saturating_sub(1);
    let visible: Vec<Line> = all_lines
        .into_iter()
        .take(usize::from(content_height))
        .collect();
    let content_area = Rect::new(inner.x, inner.y, inner.width, content_height);
    frame.render_widget(Paragraph::new(visible), content_area);

    let footer_area = Rect::new(inner.x, inner.y + content_height, inner.width, 1);
    let footer = Line::styled("any key closes", dim_style);
    frame.render_widget(Paragraph::new(footer), footer_area);
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
