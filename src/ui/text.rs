//! Shared text rendering helpers

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::app::state::TextBuffer;
use crate::theme::Theme;

/// Build a line with a visible cursor
pub fn line_with_cursor(
    text: &str,
    cursor_pos: usize,
    base_style: Style,
    theme: &Theme,
) -> Line<'static> {
    let chars: Vec<char> = text.chars().collect();
    let mut spans = Vec::new();

    // Text before cursor
    if cursor_pos > 0 {
        let before: String = chars.iter().take(cursor_pos).collect();
        spans.push(Span::styled(before, base_style));
    }

    // Cursor character (or space if at end)
    let cursor_char = chars.get(cursor_pos).copied().unwrap_or(' ');
    let cursor_style =
        Style::default().fg(theme.bg_primary).bg(theme.fg_primary).add_modifier(Modifier::BOLD);
    spans.push(Span::styled(cursor_char.to_string(), cursor_style));

    // Text after cursor
    if cursor_pos + 1 < chars.len() {
        let after: String = chars.iter().skip(cursor_pos + 1).collect();
        spans.push(Span::styled(after, base_style));
    }

    Line::from(spans)
}

/// Lines of an editable buffer, with the cursor drawn when editing
pub fn buffer_lines(
    buffer: &TextBuffer,
    editing: bool,
    style: Style,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut remaining = buffer.cursor();
    let mut cursor_placed = !editing;

    for raw in buffer.text().split('\n') {
        let len = raw.chars().count();
        if !cursor_placed && remaining <= len {
            lines.push(line_with_cursor(raw, remaining, style, theme));
            cursor_placed = true;
        } else {
            lines.push(Line::from(Span::styled(raw.to_string(), style)));
            // The newline itself takes one cursor position
            remaining = remaining.saturating_sub(len + 1);
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn cursor_at_start() {
        let theme = Theme::default();
        let line = line_with_cursor(":test", 0, Style::default(), &theme);
        assert_eq!(line.spans.len(), 2); // cursor + rest
    }

    #[test]
    fn cursor_at_end() {
        let theme = Theme::default();
        let line = line_with_cursor(":test", 5, Style::default(), &theme);
        assert_eq!(line.spans.len(), 2); // before + cursor (space)
    }

    #[test]
    fn cursor_in_middle_of_wide_chars() {
        let theme = Theme::default();
        let line = line_with_cursor("学习中文", 2, Style::default(), &theme);
        assert_eq!(line.spans.len(), 3);
        assert_eq!(line.spans[1].content, "中");
    }

    #[test]
    fn buffer_cursor_lands_on_second_line() {
        let theme = Theme::default();
        let mut buffer = TextBuffer::default();
        buffer.set("你好\n再见");
        buffer.move_left();

        let lines = buffer_lines(&buffer, true, Style::default(), &theme);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].spans.len(), 1);
        assert_eq!(lines[1].spans[1].content, "见");
    }

    #[test]
    fn buffer_without_editing_has_no_cursor() {
        let theme = Theme::default();
        let mut buffer = TextBuffer::default();
        buffer.set("你好");
        let lines = buffer_lines(&buffer, false, Style::default(), &theme);
        assert_eq!(lines[0].spans.len(), 1);
    }
}
