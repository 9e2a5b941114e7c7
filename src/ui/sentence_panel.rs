//! Sentence tab: source on the left, generated sentences on the right

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::text::buffer_lines;
use crate::app::state::{InputMode, SentenceState, SentenceView};
use crate::generate::{GRAMMAR_FORMS, GenerationMode};
use crate::theme::Theme;

pub fn draw(
    frame: &mut Frame,
    area: Rect,
    state: &SentenceState,
    mode: InputMode,
    sentences: &[String],
    strategy: &str,
    theme: &Theme,
) {
    let [controls_area, body] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(3)]).areas(area);
    let [source_area, output_area] =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).areas(body);

    frame.render_widget(Paragraph::new(controls_line(state, strategy, theme)), controls_area);
    draw_source(frame, source_area, state, mode == InputMode::Insert, theme);
    draw_sentences(frame, output_area, state, sentences, theme);
}

fn controls_line(state: &SentenceState, strategy: &str, theme: &Theme) -> Line<'static> {
    let label = Style::default().fg(theme.fg_muted);
    let value = Style::default().fg(theme.accent_secondary).add_modifier(Modifier::BOLD);
    let view = match state.view {
        SentenceView::Reading => "reading",
        SentenceView::Audio => "audio",
    };

    Line::from(vec![
        Span::styled(" Count ", label),
        Span::styled(state.count.to_string(), value),
        Span::styled("  Source ", label),
        Span::styled(state.mode.label(), value),
        Span::styled("  View ", label),
        Span::styled(view, value),
        Span::styled("  Sentences ", label),
        Span::styled(strategy.to_string(), value),
        Span::styled("   [g] generate [+/-] count [m] source [v] view", label),
    ])
}

fn draw_source(frame: &mut Frame, area: Rect, state: &SentenceState, editing: bool, theme: &Theme) {
    let (title, lines) = match state.mode {
        GenerationMode::FixedForm => (
            " Grammar Forms ",
            GRAMMAR_FORMS
                .iter()
                .map(|form| Line::from(Span::styled(*form, Style::default().fg(theme.fg_secondary))))
                .collect(),
        ),
        GenerationMode::Placeholder => {
            let lines = if state.templates.is_empty() && !editing {
                vec![Line::from(Span::styled(
                    "Press i to write templates, one per line, e.g. 我想{word}",
                    Style::default().fg(theme.fg_muted),
                ))]
            } else {
                buffer_lines(&state.templates, editing, Style::default().fg(theme.fg_primary), theme)
            };
            (" Templates ", lines)
        }
    };

    let border = if editing { theme.border_focused } else { theme.border };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
}

fn draw_sentences(
    frame: &mut Frame,
    area: Rect,
    state: &SentenceState,
    sentences: &[String],
    theme: &Theme,
) {
    let block = Block::default()
        .title(" Sentences ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));

    frame.render_widget(
        Paragraph::new(sentence_lines(state, sentences, theme))
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn sentence_lines(state: &SentenceState, sentences: &[String], theme: &Theme) -> Vec<Line<'static>> {
    let muted = Style::default().fg(theme.fg_muted);

    if sentences.is_empty() {
        return vec![Line::from(Span::styled("Press g to generate sentences.", muted))];
    }
    if !state.text_visible() {
        return vec![
            Line::from(Span::styled(
                format!("{} sentences hidden for listening practice.", sentences.len()),
                Style::default().fg(theme.fg_secondary),
            )),
            Line::from(""),
            Line::from(Span::styled("[a] play audio   [r] reveal", muted)),
        ];
    }

    sentences
        .iter()
        .enumerate()
        .map(|(i, sentence)| {
            Line::from(vec![
                Span::styled(format!("{:>2}. ", i + 1), muted),
                Span::styled(sentence.clone(), Style::default().fg(theme.fg_primary)),
            ])
        })
        .collect()
}
