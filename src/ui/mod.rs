//! UI rendering components

pub mod command_line;
pub mod header;
pub mod help;
pub mod highlight_panel;
pub mod quiz_panel;
pub mod sentence_panel;
mod text;

use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::Style,
    widgets::Block,
};

use crate::app::state::{AppState, Tab};
use crate::session::StudySession;
use crate::theme::Theme;

/// Main draw function
pub fn draw(frame: &mut Frame, state: &AppState, session: &StudySession, theme: &Theme) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(theme.bg_primary)), area);

    let [header_area, body, command_area] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(3), Constraint::Length(1)])
            .areas(area);

    header::draw(frame, header_area, state.tab, session.store(), theme);

    let mode = state.command_line.mode;
    match state.tab {
        Tab::Highlight => {
            highlight_panel::draw(frame, body, &state.highlight, mode, session.store(), theme)
        }
        Tab::Sentences => sentence_panel::draw(
            frame,
            body,
            &state.sentences,
            mode,
            session.sentences(),
            session.generator().service().label(),
            theme,
        ),
        Tab::Quiz => quiz_panel::draw(frame, body, &state.quiz, session.quiz().current(), theme),
    }

    command_line::draw(frame, command_area, &state.command_line, theme);

    if state.show_help {
        help::draw(frame, area, theme);
    }
}
