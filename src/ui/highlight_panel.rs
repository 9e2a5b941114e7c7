//! Highlight tab: free text with vocabulary colored by list

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::text::buffer_lines;
use crate::app::state::{HighlightState, InputMode};
use crate::highlight::HighlightSpan;
use crate::theme::Theme;
use crate::vocab::VocabularyStore;

pub fn draw(
    frame: &mut Frame,
    area: Rect,
    state: &HighlightState,
    mode: InputMode,
    store: &VocabularyStore,
    theme: &Theme,
) {
    let editing = mode == InputMode::Insert;
    let block = Block::default()
        .title(" Text ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if editing { theme.border_focused } else { theme.border }));

    let base = Style::default().fg(theme.fg_primary);
    let lines = if state.buffer.is_empty() && !editing {
        vec![Line::from(Span::styled(
            "Press i to type or p to paste Chinese text, then Enter to highlight.",
            Style::default().fg(theme.fg_muted),
        ))]
    } else if state.spans.is_empty() || editing {
        buffer_lines(&state.buffer, editing, base, theme)
    } else {
        let colors: Vec<Color> = store.lists().iter().map(|l| l.color()).collect();
        highlighted_lines(state.buffer.text(), &state.spans, &colors, base)
    };

    let para = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((state.scroll, 0));
    frame.render_widget(para, area);
}

/// Split `text` into runs, each tagged with the list that colors it
///
/// Where spans partially overlap, the earlier span keeps the shared bytes.
pub fn segments<'a>(text: &'a str, spans: &[HighlightSpan]) -> Vec<(&'a str, Option<usize>)> {
    let mut out = Vec::new();
    let mut pos = 0;

    for span in spans {
        if span.end <= pos || span.end > text.len() {
            continue;
        }
        let start = span.start.max(pos);
        if !text.is_char_boundary(start) || !text.is_char_boundary(span.end) {
            continue;
        }
        if start > pos {
            out.push((&text[pos..start], None));
        }
        out.push((&text[start..span.end], Some(span.list_index)));
        pos = span.end;
    }
    if pos < text.len() {
        out.push((&text[pos..], None));
    }
    out
}

fn highlighted_lines(
    text: &str,
    spans: &[HighlightSpan],
    colors: &[Color],
    base: Style,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();

    for (run, list) in segments(text, spans) {
        let style = match list.and_then(|i| colors.get(i)) {
            Some(&color) => Style::default().fg(Color::White).bg(color).add_modifier(Modifier::BOLD),
            None => base,
        };
        let mut pieces = run.split('\n');
        if let Some(first) = pieces.next() {
            if !first.is_empty() {
                current.push(Span::styled(first.to_string(), style));
            }
        }
        for piece in pieces {
            lines.push(Line::from(std::mem::take(&mut current)));
            if !piece.is_empty() {
                current.push(Span::styled(piece.to_string(), style));
            }
        }
    }
    lines.push(Line::from(current));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn span(start: usize, end: usize, list_index: usize) -> HighlightSpan {
        HighlightSpan { start, end, list_index, list_name: String::new(), word: String::new() }
    }

    #[test]
    fn segments_cover_the_whole_text() {
        let text = "我在学习中文";
        // 学习 = bytes 6..12
        let runs = segments(text, &[span(6, 12, 1)]);
        assert_eq!(runs, vec![("我在", None), ("学习", Some(1)), ("中文", None)]);
    }

    #[test]
    fn partial_overlap_goes_to_earlier_span() {
        let text = "中文化";
        // 中文 = 0..6, 文化 = 3..9
        let runs = segments(text, &[span(0, 6, 0), span(3, 9, 1)]);
        assert_eq!(runs, vec![("中文", Some(0)), ("化", Some(1))]);
    }

    #[test]
    fn highlighted_lines_break_on_newlines() {
        let text = "你好\n学习";
        let colors = [Color::Red];
        let lines = highlighted_lines(text, &[span(7, 13, 0)], &colors, Style::default());
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].spans[0].content, "你好");
        assert_eq!(lines[1].spans[0].content, "学习");
        assert_eq!(lines[1].spans[0].style.bg, Some(Color::Red));
    }
}
