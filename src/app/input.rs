//! Key mapping for normal mode

use crossterm::event::{KeyCode, KeyModifiers};

use super::state::Tab;

/// Actions that can be taken in the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Navigation
    NextTab,
    PrevTab,
    ScrollUp,
    ScrollDown,

    // Modes
    EnterCommand,
    EnterInsert,
    Help,
    Back,

    // Highlight tab
    Highlight,
    Paste,

    // Sentence tab
    Generate,
    IncreaseCount,
    DecreaseCount,
    ToggleMode,
    ToggleView,
    Reveal,
    PlayAudio,

    // Quiz tab
    NewQuiz,
    PrevTone,
    NextTone,
    ChooseTone(char),
    Submit,

    Quit,
}

/// Map a key to an action for the given tab
pub fn key_to_action(tab: Tab, key: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        return match key {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('v') if tab == Tab::Highlight => Some(Action::Paste),
            _ => None,
        };
    }

    let global = match key {
        KeyCode::Tab => Some(Action::NextTab),
        KeyCode::BackTab => Some(Action::PrevTab),
        KeyCode::Char(':') => Some(Action::EnterCommand),
        KeyCode::Char('?') => Some(Action::Help),
        KeyCode::Esc => Some(Action::Back),
        _ => None,
    };
    if global.is_some() {
        return global;
    }

    match tab {
        Tab::Highlight => match key {
            KeyCode::Char('i') => Some(Action::EnterInsert),
            KeyCode::Enter | KeyCode::Char('h') => Some(Action::Highlight),
            KeyCode::Char('p') => Some(Action::Paste),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollUp),
            _ => None,
        },
        Tab::Sentences => match key {
            KeyCode::Char('i') => Some(Action::EnterInsert),
            KeyCode::Enter | KeyCode::Char('g') => Some(Action::Generate),
            KeyCode::Char('+') | KeyCode::Char('=') => Some(Action::IncreaseCount),
            KeyCode::Char('-') => Some(Action::DecreaseCount),
            KeyCode::Char('m') => Some(Action::ToggleMode),
            KeyCode::Char('v') => Some(Action::ToggleView),
            KeyCode::Char('r') => Some(Action::Reveal),
            KeyCode::Char('a') => Some(Action::PlayAudio),
            _ => None,
        },
        Tab::Quiz => match key {
            KeyCode::Char('n') => Some(Action::NewQuiz),
            KeyCode::Char('h') | KeyCode::Left => Some(Action::PrevTone),
            KeyCode::Char('l') | KeyCode::Right => Some(Action::NextTone),
            KeyCode::Char(c @ '1'..='5') => Some(Action::ChooseTone(c)),
            KeyCode::Enter => Some(Action::Submit),
            _ => None,
        },
    }
}
