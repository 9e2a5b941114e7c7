//! Command line UI component

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::text::line_with_cursor;
use crate::app::state::{CommandLineState, InputMode};
use crate::theme::Theme;

/// Draw the command line at the bottom of the screen
pub fn draw(frame: &mut Frame, area: Rect, state: &CommandLineState, theme: &Theme) {
    let line = match state.mode {
        InputMode::Normal => {
            // Show message or hint
            if let Some(ref msg) = state.message {
                let style = if state.is_error {
                    Style::default().fg(theme.error)
                } else {
                    Style::default().fg(theme.fg_muted)
                };
                Line::from(Span::styled(msg.clone(), style))
            } else {
                Line::from(Span::styled(
                    "Press : for commands, ? for help",
                    Style::default().fg(theme.fg_muted),
                ))
            }
        }
        InputMode::Command => {
            let text = format!(":{}", state.input.text());
            // +1 for prefix
            line_with_cursor(
                &text,
                state.input.cursor() + 1,
                Style::default().fg(theme.accent_primary),
                theme,
            )
        }
        InputMode::Insert => Line::from(Span::styled(
            "-- INSERT -- (Esc to finish)",
            Style::default().fg(theme.info),
        )),
    };

    frame.render_widget(Paragraph::new(line), area);
}
