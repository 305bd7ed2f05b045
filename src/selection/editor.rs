use ratatui::layout::Rect;

use crate::editor::EditorBuffer;

use super::{SelectionProvider, SelectionRect};

/// Selection provider backed by the editor buffer's mouse selection.
///
/// `area` is the screen rectangle the buffer is drawn into and `scroll` the
/// index of the first visible line. Rectangles are reported in screen cells.
pub struct BufferSelection<'a> {
    buffer: &'a EditorBuffer,
    area: Rect,
    scroll: usize,
}

impl<'a> BufferSelection<'a> {
    pub const fn new(buffer: &'a EditorBuffer, area: Rect, scroll: usize) -> Self {
        Self {
            buffer,
            area,
            scroll,
        }
    }
}

impl SelectionProvider for BufferSelection<'_> {
    fn selected_text(&self) -> Option<String> {
        self.buffer.selected_text()
    }

    fn first_range_rect(&self) -> Option<SelectionRect> {
        let span = self.buffer.selection_span()?;
        let start_x = self.buffer.display_col(span.start.line, span.start.col);
        let end_x = self.buffer.display_col(span.end.line, span.end.col);
        let lines = span.end.line - span.start.line + 1;

        // Multi-line ranges cover the full text width, like a union rectangle.
        let (left, width) = if lines == 1 {
            (start_x, end_x.saturating_sub(start_x))
        } else {
            let widest = (span.start.line..=span.end.line)
                .map(|line| self.buffer.display_col(line, self.buffer.line_len(line)))
                .max()
                .unwrap_or(0);
            (0, widest)
        };

        let row = i64::try_from(span.start.line).unwrap_or(i64::MAX)
            - i64::try_from(self.scroll).unwrap_or(i64::MAX);
        Some(SelectionRect {
            left: to_i32(i64::from(self.area.x) + i64::try_from(left).unwrap_or(i64::MAX)),
            top: to_i32(i64::from(self.area.y) + row),
            width: to_i32(i64::try_from(width).unwrap_or(i64::MAX)),
            height: to_i32(i64::try_from(lines).unwrap_or(i64::MAX)),
        })
    }
}

fn to_i32(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line_rect_starts_at_selection() {
        let mut buf = EditorBuffer::from_text("hello world");
        buf.begin_selection(0, 6);
        buf.extend_selection(0, 11);
        let provider = BufferSelection::new(&buf, Rect::new(2, 3, 40, 10), 0);
        assert_eq!(
            provider.first_range_rect(),
            Some(SelectionRect {
                left: 8,
                top: 3,
                width: 5,
                height: 1
            })
        );
        assert_eq!(provider.selected_text(), Some("world".to_string()));
    }

    #[test]
    fn test_multi_line_rect_spans_text_width() {
        let mut buf = EditorBuffer::from_text("ab\nlonger line\ncd");
        buf.begin_selection(0, 1);
        buf.extend_selection(2, 1);
        let provider = BufferSelection::new(&buf, Rect::new(1, 1, 40, 10), 0);
        let rect = provider.first_range_rect().unwrap();
        assert_eq!(rect.left, 1);
        assert_eq!(rect.width, 11);
        assert_eq!(rect.height, 3);
    }

    #[test]
    fn test_rect_is_relative_to_scroll() {
        let text = (0..20).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
        let mut buf = EditorBuffer::from_text(&text);
        buf.begin_selection(12, 0);
        buf.extend_selection(12, 4);
        let provider = BufferSelection::new(&buf, Rect::new(0, 2, 40, 10), 10);
        assert_eq!(provider.first_range_rect().map(|r| r.top), Some(4));
    }

    #[test]
    fn test_no_selection_reports_nothing() {
        let buf = EditorBuffer::from_text("hello");
        let provider = BufferSelection::new(&buf, Rect::new(0, 0, 40, 10), 0);
        assert!(provider.selected_text().is_none());
        assert!(provider.first_range_rect().is_none());
    }
}
