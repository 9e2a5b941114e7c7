//! Tab bar and vocabulary legend

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
};

use crate::app::state::Tab;
use crate::theme::Theme;
use crate::vocab::VocabularyStore;

/// Draw the tab bar with the loaded lists underneath
pub fn draw(frame: &mut Frame, area: Rect, tab: Tab, store: &VocabularyStore, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 {
        return;
    }

    let tabs = Tabs::new(Tab::ALL.iter().map(|t| t.title()))
        .select(tab.index())
        .style(Style::default().fg(theme.fg_secondary))
        .highlight_style(Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD))
        .divider(Span::styled("|", Style::default().fg(theme.border)));
    frame.render_widget(tabs, Rect { height: 1, ..inner });

    if inner.height > 1 {
        let legend = Rect { y: inner.y + 1, height: 1, ..inner };
        frame.render_widget(Paragraph::new(legend_line(store, theme)), legend);
    }
}

/// One colored chip per loaded list
fn legend_line(store: &VocabularyStore, theme: &Theme) -> Line<'static> {
    if store.is_empty() {
        return Line::from(Span::styled(
            " No vocabulary loaded. Use :load <file.csv>",
            Style::default().fg(theme.fg_muted),
        ));
    }

    let mut spans = vec![Span::raw(" ")];
    for list in store.lists() {
        spans.push(Span::styled(
            format!(" {} ({}) ", list.name(), list.words().len()),
            Style::default().fg(Color::White).bg(list.color()),
        ));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}
