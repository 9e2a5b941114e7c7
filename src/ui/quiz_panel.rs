//! Quiz tab component

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::state::QuizState;
use crate::quiz::{MARK_CLOSE, MARK_OPEN, QuizQuestion, TONE_CHOICES};
use crate::theme::Theme;

/// Draw the live question, the tone picker and the last result
pub fn draw(
    frame: &mut Frame,
    area: Rect,
    state: &QuizState,
    question: Option<&QuizQuestion>,
    theme: &Theme,
) {
    let block = Block::default()
        .title(format!(" Tone Quiz ({}) ", state.variant.label()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.bg_secondary));

    let lines = match question {
        Some(question) => question_lines(state, question, theme),
        None => vec![
            Line::from(""),
            Line::from(""),
            Line::from(Span::styled(
                "Press n or :quiz to start.",
                Style::default().fg(theme.fg_muted),
            )),
        ],
    };

    let para = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(para, area);
}

fn question_lines(state: &QuizState, question: &QuizQuestion, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("What is the tone of {}?", question.target_word),
            Style::default().fg(theme.fg_muted),
        )),
        Line::from(""),
        sentence_line(&question.sentence, theme),
        Line::from(""),
        Line::from(""),
    ];

    // Tone picker
    let mut picker = Vec::new();
    for (i, tone) in TONE_CHOICES.iter().enumerate() {
        let is_selected = i == state.selected_tone;
        let prefix = if is_selected { "\u{25CF}" } else { "\u{25CB}" }; // ● or ○
        let style = if is_selected {
            Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.fg_secondary)
        };
        picker.push(Span::styled(format!(" {} {} ", prefix, tone), style));
    }
    lines.push(Line::from(picker));
    lines.push(Line::from(""));

    if let Some((ref text, correct)) = state.feedback {
        let color = if correct { theme.success } else { theme.error };
        lines.push(Line::from(Span::styled(
            text.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
    }

    // Hint
    lines.push(Line::from(Span::styled(
        "[1-5] Answer    [h/l] Select    [Enter] Confirm    [n] Next question",
        Style::default().fg(theme.fg_muted),
    )));
    lines
}

/// The quiz sentence with the marked target drawn in the accent color
fn sentence_line(sentence: &str, theme: &Theme) -> Line<'static> {
    let plain = Style::default().fg(theme.fg_primary);
    let target = Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD);

    let marked = sentence
        .split_once(MARK_OPEN)
        .and_then(|(before, rest)| rest.split_once(MARK_CLOSE).map(|(word, after)| (before, word, after)));

    match marked {
        Some((before, word, after)) => Line::from(vec![
            Span::styled(before.to_string(), plain),
            Span::styled(format!("{}{}{}", MARK_OPEN, word, MARK_CLOSE), target),
            Span::styled(after.to_string(), plain),
        ]),
        None => Line::from(Span::styled(sentence.to_string(), plain)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn marked_target_is_accented() {
        let theme = Theme::default();
        let line = sentence_line("我说【你好】。", &theme);
        assert_eq!(line.spans.len(), 3);
        assert_eq!(line.spans[1].content, "【你好】");
        assert_eq!(line.spans[1].style.fg, Some(theme.accent_primary));
    }

    #[test]
    fn unmarked_sentence_is_plain() {
        let line = sentence_line("你好", &Theme::default());
        assert_eq!(line.spans.len(), 1);
    }

    #[test]
    fn feedback_is_shown_after_answer() {
        let theme = Theme::default();
        let question = QuizQuestion {
            sentence: "【你好】".into(),
            target_word: "你好".into(),
            correct_tone: "3".into(),
        };
        let mut state = QuizState::default();
        let before = question_lines(&state, &question, &theme).len();

        state.feedback = Some(("Correct".into(), true));
        let lines = question_lines(&state, &question, &theme);
        assert_eq!(lines.len(), before + 2);
        assert!(lines.iter().any(|l| l.spans.iter().any(|s| s.content == "Correct")));
    }
}
